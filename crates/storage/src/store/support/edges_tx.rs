#![forbid(unsafe_code)]

use super::super::{StoreError, record_exists};
use crm_core::ids::TenantId;
use crm_core::model::EntityKind;
use crm_core::relationships::{RelationshipEdge, RelationshipWriter};
use rusqlite::{Connection, Transaction, TransactionBehavior, params};

/// Writes relationship edges for one tenant, one IMMEDIATE transaction per batch.
pub(in crate::store) struct SqliteEdgeWriter<'a> {
    pub conn: &'a mut Connection,
    pub tenant: &'a TenantId,
    pub now_ms: i64,
}

impl RelationshipWriter for SqliteEdgeWriter<'_> {
    type Error = StoreError;

    fn insert_edges_if_absent(&mut self, edges: &[RelationshipEdge]) -> Result<usize, StoreError> {
        // Write lock is taken before the existence reads.
        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;
        match insert_edges_tx(&tx, self.tenant, edges, self.now_ms) {
            Ok(inserted) => {
                tx.commit()?;
                Ok(inserted)
            }
            Err(err) => {
                tracing::warn!(
                    tenant = self.tenant.as_str(),
                    edges = edges.len(),
                    error = %err,
                    "relationship link rolled back"
                );
                Err(err)
            }
        }
    }
}

fn insert_edges_tx(
    tx: &Transaction<'_>,
    tenant: &TenantId,
    edges: &[RelationshipEdge],
    now_ms: i64,
) -> Result<usize, StoreError> {
    let mut inserted = 0usize;
    for edge in edges {
        for endpoint in [edge.from(), edge.to()] {
            if !record_exists(tx, tenant, EntityKind::Contact, endpoint.as_str())? {
                return Err(StoreError::UnknownId);
            }
        }
        let rows = tx.execute(
            "INSERT INTO relationship_edges(tenant, from_id, to_id, created_at_ms) \
             VALUES (?1, ?2, ?3, ?4) \
             ON CONFLICT(tenant, from_id, to_id) DO NOTHING",
            params![
                tenant.as_str(),
                edge.from().as_str(),
                edge.to().as_str(),
                now_ms
            ],
        )?;
        inserted = inserted.saturating_add(rows);
    }
    Ok(inserted)
}
