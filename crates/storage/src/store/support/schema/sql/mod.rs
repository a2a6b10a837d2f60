#![forbid(unsafe_code)]

mod access;
mod core;
mod indexes;
mod records;
mod relationships;

pub(super) fn full_schema_sql() -> String {
    let mut sql = String::new();
    sql.push_str(core::SQL);
    sql.push_str(records::SQL);
    sql.push_str(access::SQL);
    sql.push_str(relationships::SQL);
    sql.push_str(indexes::SQL);
    sql
}
