#![forbid(unsafe_code)]

use crm_core::access::PredicateNode;
use crm_core::model::{EntityKind, Operation};
use rusqlite::types::Value as SqlValue;

fn grant_column(operation: Operation) -> &'static str {
    match operation {
        Operation::Read => "can_read",
        Operation::Edit => "can_edit",
        Operation::Delete => "can_delete",
    }
}

/// Renders `node` as a boolean SQL expression over the record alias `r` (columns `tenant`,
/// `id`) of the given kind. Values are bound through `params`, never inlined.
pub(in crate::store) fn append_predicate_clause(
    sql: &mut String,
    params: &mut Vec<SqlValue>,
    kind: EntityKind,
    node: &PredicateNode,
) {
    match node {
        PredicateNode::True => sql.push_str("1=1"),
        PredicateNode::False => sql.push_str("1=0"),
        PredicateNode::And { children } => append_joined(sql, params, kind, children, " AND ", "1=1"),
        PredicateNode::Or { children } => append_joined(sql, params, kind, children, " OR ", "1=0"),
        PredicateNode::Grant { actor, operation } => {
            sql.push_str(
                "EXISTS (SELECT 1 FROM grants g \
                 WHERE g.tenant=r.tenant AND g.record_kind=? AND g.record_id=r.id AND g.user_id=? AND g.",
            );
            sql.push_str(grant_column(*operation));
            sql.push_str("=1)");
            params.push(SqlValue::Text(kind.as_str().to_string()));
            params.push(SqlValue::Text(actor.as_str().to_string()));
        }
        PredicateNode::Reachable {
            via,
            actor,
            operation,
        } => {
            // Two hops: record <-> connector, then connector <-> actor (as contact) or a grant
            // on the connector itself.
            sql.push_str(
                "EXISTS (SELECT 1 FROM membership_pairs mp \
                 WHERE mp.tenant=r.tenant AND mp.a_kind=? AND mp.a_id=r.id AND mp.b_kind=? AND (\
                 EXISTS (SELECT 1 FROM membership_pairs ma \
                 WHERE ma.tenant=mp.tenant AND ma.a_kind=mp.b_kind AND ma.a_id=mp.b_id \
                 AND ma.b_kind=? AND ma.b_id=?) \
                 OR EXISTS (SELECT 1 FROM grants cg \
                 WHERE cg.tenant=mp.tenant AND cg.record_kind=mp.b_kind AND cg.record_id=mp.b_id \
                 AND cg.user_id=? AND cg.",
            );
            sql.push_str(grant_column(*operation));
            sql.push_str("=1)))");
            params.push(SqlValue::Text(kind.as_str().to_string()));
            params.push(SqlValue::Text(via.as_str().to_string()));
            params.push(SqlValue::Text(EntityKind::Contact.as_str().to_string()));
            params.push(SqlValue::Text(actor.as_str().to_string()));
            params.push(SqlValue::Text(actor.as_str().to_string()));
        }
    }
}

fn append_joined(
    sql: &mut String,
    params: &mut Vec<SqlValue>,
    kind: EntityKind,
    children: &[PredicateNode],
    separator: &str,
    empty: &str,
) {
    if children.is_empty() {
        sql.push_str(empty);
        return;
    }
    sql.push('(');
    for (index, child) in children.iter().enumerate() {
        if index > 0 {
            sql.push_str(separator);
        }
        append_predicate_clause(sql, params, kind, child);
    }
    sql.push(')');
}

#[cfg(test)]
mod tests {
    use super::*;
    use crm_core::access::{ActorCapabilities, ScopeFlags, compile};
    use crm_core::ids::ActorId;

    #[test]
    fn constants_render_without_params() {
        let mut sql = String::new();
        let mut params = Vec::new();
        append_predicate_clause(&mut sql, &mut params, EntityKind::Contact, &PredicateNode::False);
        assert_eq!(sql, "1=0");
        assert!(params.is_empty());

        let mut sql = String::new();
        append_predicate_clause(
            &mut sql,
            &mut params,
            EntityKind::Contact,
            &PredicateNode::Or { children: Vec::new() },
        );
        assert_eq!(sql, "1=0");
    }

    #[test]
    fn connected_company_read_binds_every_value() {
        let actor = ActorId::try_new("u-1").unwrap();
        let caps = ActorCapabilities::none().with(EntityKind::Company, Operation::Read, ScopeFlags::CONNECTED);
        let predicate = compile(&caps, &actor, EntityKind::Company, Operation::Read);

        let mut sql = String::new();
        let mut params = Vec::new();
        append_predicate_clause(&mut sql, &mut params, EntityKind::Company, &predicate);

        assert!(sql.starts_with("(EXISTS (SELECT 1 FROM membership_pairs mp"));
        assert!(sql.contains(" OR EXISTS (SELECT 1 FROM grants g "));
        assert_eq!(sql.matches('?').count(), params.len());
        assert_eq!(params.len(), 5 + 2);
        assert_eq!(params[1], SqlValue::Text("project".to_string()));
        assert!(!sql.contains("u-1"));
    }
}
