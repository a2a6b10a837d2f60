#![forbid(unsafe_code)]

use super::support::{SqliteEdgeWriter, now_ms};
use super::*;
use crm_core::ids::RecordId;
use crm_core::relationships::{
    LinkOutcome, LinkRequest, RelationshipEdge, link, relationship_view,
};
use rusqlite::params;

impl SqliteStore {
    /// Links two contacts of the tenant under the request's mode.
    ///
    /// Every edge of one request commits together or not at all. Both contacts must exist
    /// (`UnknownId`), except for a self-link, which succeeds without touching storage.
    pub fn link_contacts(
        &mut self,
        tenant: &TenantId,
        request: &LinkRequest,
    ) -> Result<LinkOutcome, StoreError> {
        let mut writer = SqliteEdgeWriter {
            conn: &mut self.conn,
            tenant,
            now_ms: now_ms(),
        };
        let outcome = link(&mut writer, request)?;
        match outcome {
            LinkOutcome::SelfLinkIgnored => tracing::debug!(
                tenant = tenant.as_str(),
                contact = request.contact_one.as_str(),
                "self link ignored"
            ),
            LinkOutcome::Linked {
                requested,
                inserted,
            } => tracing::debug!(
                tenant = tenant.as_str(),
                one = request.contact_one.as_str(),
                two = request.contact_two.as_str(),
                mode = request.mode.as_str(),
                requested,
                inserted,
                "contacts linked"
            ),
        }
        Ok(outcome)
    }

    pub fn relationship_edges(
        &self,
        tenant: &TenantId,
    ) -> Result<Vec<RelationshipEdgeRow>, StoreError> {
        let mut stmt = self.conn.prepare(
            "SELECT from_id, to_id, created_at_ms FROM relationship_edges \
             WHERE tenant=?1 ORDER BY from_id ASC, to_id ASC",
        )?;
        let mut rows = stmt.query(params![tenant.as_str()])?;
        let mut out = Vec::new();
        while let Some(row) = rows.next()? {
            out.push(RelationshipEdgeRow {
                from_id: row.get(0)?,
                to_id: row.get(1)?,
                created_at_ms: row.get(2)?,
            });
        }
        Ok(out)
    }

    /// Peers of one contact with the direction of their link.
    pub fn contact_relationships(
        &self,
        tenant: &TenantId,
        contact: &RecordId,
    ) -> Result<Vec<ContactRelationshipRow>, StoreError> {
        let mut stmt = self.conn.prepare(
            "SELECT from_id, to_id FROM relationship_edges \
             WHERE tenant=?1 AND (from_id=?2 OR to_id=?2)",
        )?;
        let mut rows = stmt.query(params![tenant.as_str(), contact.as_str()])?;
        let mut edges = Vec::new();
        while let Some(row) = rows.next()? {
            let from = RecordId::try_new(row.get::<_, String>(0)?)
                .map_err(|err| StoreError::InvalidInput(err.message()))?;
            let to = RecordId::try_new(row.get::<_, String>(1)?)
                .map_err(|err| StoreError::InvalidInput(err.message()))?;
            let edge = RelationshipEdge::try_new(from, to)
                .map_err(|_| StoreError::InvalidInput("stored relationship edge is a self-loop"))?;
            edges.push(edge);
        }

        Ok(relationship_view(&edges, contact)
            .into_iter()
            .map(|(peer, direction)| ContactRelationshipRow {
                peer_id: peer.into_string(),
                direction,
            })
            .collect())
    }
}
