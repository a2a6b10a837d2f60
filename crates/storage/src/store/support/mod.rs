#![forbid(unsafe_code)]

mod edges_tx;
mod predicate_sql;
mod schema;
mod time;

pub(super) use edges_tx::SqliteEdgeWriter;
pub(super) use predicate_sql::append_predicate_clause;
pub(super) use schema::install_schema;
pub(super) use time::now_ms;
