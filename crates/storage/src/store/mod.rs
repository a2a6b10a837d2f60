#![forbid(unsafe_code)]

mod error;
mod records;
mod relationships;
mod requests;
mod support;
mod visibility;

pub use error::StoreError;
pub use requests::*;

use crate::StoreConfig;
use crm_core::ids::TenantId;
use crm_core::model::EntityKind;
use rusqlite::{Connection, ErrorCode};
use std::path::Path;
use support::install_schema;

#[derive(Debug)]
pub struct SqliteStore {
    conn: Connection,
    config: StoreConfig,
}

impl SqliteStore {
    pub fn open(storage_dir: impl AsRef<Path>) -> Result<Self, StoreError> {
        Self::open_with_config(StoreConfig::new(storage_dir))
    }

    pub fn open_with_config(config: StoreConfig) -> Result<Self, StoreError> {
        std::fs::create_dir_all(&config.storage_dir)?;

        let conn = Connection::open(config.db_path())?;
        conn.busy_timeout(config.busy_timeout())?;
        conn.execute_batch("PRAGMA foreign_keys = ON;")?;

        install_schema(&conn)?;
        tracing::info!(
            db = %config.db_path().display(),
            busy_timeout_ms = config.busy_timeout_ms,
            "crm store opened"
        );

        Ok(Self { conn, config })
    }

    pub fn storage_dir(&self) -> &Path {
        &self.config.storage_dir
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }
}

pub(in crate::store) fn kind_table(kind: EntityKind) -> &'static str {
    match kind {
        EntityKind::Contact => "contacts",
        EntityKind::Company => "companies",
        EntityKind::Project => "projects",
    }
}

pub(in crate::store) fn is_constraint_violation(err: &rusqlite::Error) -> bool {
    match err {
        rusqlite::Error::SqliteFailure(code, message) => {
            code.code == ErrorCode::ConstraintViolation
                || message.as_deref().is_some_and(|value| {
                    value.contains("UNIQUE constraint failed")
                        || value.contains("PRIMARY KEY constraint failed")
                })
        }
        _ => false,
    }
}

pub(in crate::store) fn to_sqlite_i64(value: usize) -> Result<i64, StoreError> {
    i64::try_from(value).map_err(|_| StoreError::InvalidInput("numeric overflow"))
}

pub(in crate::store) fn record_exists(
    conn: &Connection,
    tenant: &TenantId,
    kind: EntityKind,
    id: &str,
) -> Result<bool, StoreError> {
    let sql = format!(
        "SELECT EXISTS(SELECT 1 FROM {} WHERE tenant=?1 AND id=?2)",
        kind_table(kind)
    );
    let exists = conn.query_row(&sql, rusqlite::params![tenant.as_str(), id], |row| {
        row.get::<_, bool>(0)
    })?;
    Ok(exists)
}
