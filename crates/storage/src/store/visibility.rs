#![forbid(unsafe_code)]

use super::support::append_predicate_clause;
use super::*;
use crm_core::access::{ActorCapabilities, PredicateNode, compile, resolve_scope};
use crm_core::ids::{ActorId, RecordId};
use crm_core::model::Operation;
use rusqlite::params_from_iter;
use rusqlite::types::Value as SqlValue;

const MAX_LIST_LIMIT: usize = 200;

fn escape_like(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for ch in value.chars() {
        if matches!(ch, '%' | '_' | '\\') {
            out.push('\\');
        }
        out.push(ch);
    }
    out
}

impl SqliteStore {
    /// Lists the records of one kind that the actor may access for the given operation.
    ///
    /// Denied records are simply absent; there is no distinguishable "forbidden" result.
    pub fn records_visible(
        &self,
        tenant: &TenantId,
        request: RecordsVisibleRequest,
    ) -> Result<RecordsVisibleResult, StoreError> {
        let limit = request.limit.min(MAX_LIST_LIMIT);
        let predicate = compile(
            &request.capabilities,
            &request.actor,
            request.kind,
            request.operation,
        );
        tracing::debug!(
            tenant = tenant.as_str(),
            kind = request.kind.as_str(),
            operation = request.operation.as_str(),
            scope = resolve_scope(&request.capabilities, request.kind, request.operation).as_str(),
            unconditional = ?predicate.is_unconditional(),
            "records visible query"
        );
        if predicate == PredicateNode::False || limit == 0 {
            return Ok(RecordsVisibleResult {
                records: Vec::new(),
                has_more: false,
            });
        }

        let mut sql = format!(
            "SELECT r.id, r.name, r.created_at_ms FROM {} r WHERE r.tenant=? AND ",
            kind_table(request.kind)
        );
        let mut params: Vec<SqlValue> = vec![SqlValue::Text(tenant.as_str().to_string())];
        append_predicate_clause(&mut sql, &mut params, request.kind, &predicate);

        if let Some(text) = request.text.as_deref().map(str::trim).filter(|t| !t.is_empty()) {
            sql.push_str(" AND r.name LIKE ? ESCAPE '\\'");
            params.push(SqlValue::Text(format!("%{}%", escape_like(text))));
        }

        sql.push_str(" ORDER BY r.name ASC, r.id ASC LIMIT ? OFFSET ?");
        params.push(SqlValue::Integer(to_sqlite_i64(limit.saturating_add(1))?));
        params.push(SqlValue::Integer(to_sqlite_i64(request.offset)?));

        let mut stmt = self.conn.prepare(&sql)?;
        let mut rows = stmt.query(params_from_iter(params.iter()))?;
        let mut records = Vec::new();
        while let Some(row) = rows.next()? {
            records.push(RecordRow {
                kind: request.kind,
                id: row.get(0)?,
                name: row.get(1)?,
                created_at_ms: row.get(2)?,
            });
        }

        let has_more = records.len() > limit;
        records.truncate(limit);
        Ok(RecordsVisibleResult { records, has_more })
    }

    /// Single-record form of [`SqliteStore::records_visible`]. A record that does not exist
    /// and a record the actor may not access both yield `false`.
    pub fn record_accessible(
        &self,
        tenant: &TenantId,
        capabilities: &ActorCapabilities,
        actor: &ActorId,
        kind: EntityKind,
        operation: Operation,
        record: &RecordId,
    ) -> Result<bool, StoreError> {
        let predicate = compile(capabilities, actor, kind, operation);
        if predicate == PredicateNode::False {
            return Ok(false);
        }

        let mut sql = format!(
            "SELECT EXISTS(SELECT 1 FROM {} r WHERE r.tenant=? AND r.id=? AND ",
            kind_table(kind)
        );
        let mut params: Vec<SqlValue> = vec![
            SqlValue::Text(tenant.as_str().to_string()),
            SqlValue::Text(record.as_str().to_string()),
        ];
        append_predicate_clause(&mut sql, &mut params, kind, &predicate);
        sql.push(')');

        let accessible = self
            .conn
            .query_row(&sql, params_from_iter(params.iter()), |row| row.get::<_, bool>(0))?;
        Ok(accessible)
    }
}
