#![forbid(unsafe_code)]

use super::support::now_ms;
use super::*;
use crm_core::access::{Grant, MembershipEdge};
use rusqlite::params;

impl SqliteStore {
    pub fn record_create(
        &mut self,
        tenant: &TenantId,
        request: RecordCreateRequest,
    ) -> Result<RecordRow, StoreError> {
        let name = request.name.trim();
        if name.is_empty() {
            return Err(StoreError::InvalidInput("record name must not be empty"));
        }
        let now_ms = now_ms();
        let sql = format!(
            "INSERT INTO {}(tenant, id, name, created_at_ms) VALUES (?1, ?2, ?3, ?4)",
            kind_table(request.kind)
        );
        let insert = self.conn.execute(
            &sql,
            params![tenant.as_str(), request.id.as_str(), name, now_ms],
        );
        match insert {
            Ok(_) => {}
            Err(err) if is_constraint_violation(&err) => return Err(StoreError::AlreadyExists),
            Err(err) => return Err(StoreError::Sql(err)),
        }

        Ok(RecordRow {
            kind: request.kind,
            id: request.id.into_string(),
            name: name.to_string(),
            created_at_ms: now_ms,
        })
    }

    /// Adds a membership edge; re-adding an existing edge is a no-op. Returns whether it was new.
    pub fn membership_add(
        &mut self,
        tenant: &TenantId,
        edge: &MembershipEdge,
    ) -> Result<bool, StoreError> {
        let tx = self.conn.transaction()?;
        for (kind, id) in [
            (edge.member_kind(), edge.member()),
            (edge.container_kind(), edge.container()),
        ] {
            if !record_exists(&tx, tenant, kind, id.as_str())? {
                return Err(StoreError::UnknownId);
            }
        }
        let rows = tx.execute(
            "INSERT INTO memberships(tenant, member_kind, member_id, container_kind, container_id, created_at_ms) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6) \
             ON CONFLICT(tenant, member_kind, member_id, container_kind, container_id) DO NOTHING",
            params![
                tenant.as_str(),
                edge.member_kind().as_str(),
                edge.member().as_str(),
                edge.container_kind().as_str(),
                edge.container().as_str(),
                now_ms()
            ],
        )?;
        tx.commit()?;
        Ok(rows > 0)
    }

    /// Creates or replaces the grant of `grant.subject` on one record.
    pub fn grant_upsert(&mut self, tenant: &TenantId, grant: &Grant) -> Result<(), StoreError> {
        let tx = self.conn.transaction()?;
        if !record_exists(&tx, tenant, grant.record_kind, grant.record.as_str())? {
            return Err(StoreError::UnknownId);
        }
        tx.execute(
            r#"
            INSERT INTO grants(tenant, record_kind, record_id, user_id, can_read, can_edit, can_delete, updated_at_ms)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
            ON CONFLICT(tenant, record_kind, record_id, user_id) DO UPDATE SET
              can_read=excluded.can_read,
              can_edit=excluded.can_edit,
              can_delete=excluded.can_delete,
              updated_at_ms=excluded.updated_at_ms
            "#,
            params![
                tenant.as_str(),
                grant.record_kind.as_str(),
                grant.record.as_str(),
                grant.subject.as_str(),
                grant.can_read,
                grant.can_edit,
                grant.can_delete,
                now_ms()
            ],
        )?;
        tx.commit()?;
        Ok(())
    }
}
