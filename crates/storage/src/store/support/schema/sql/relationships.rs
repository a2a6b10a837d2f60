#![forbid(unsafe_code)]

pub(super) const SQL: &str = r#"

        CREATE TABLE IF NOT EXISTS relationship_edges (
          tenant TEXT NOT NULL,
          from_id TEXT NOT NULL,
          to_id TEXT NOT NULL,
          created_at_ms INTEGER NOT NULL,
          PRIMARY KEY (tenant, from_id, to_id),
          CHECK (from_id <> to_id),
          FOREIGN KEY (tenant, from_id) REFERENCES contacts(tenant, id),
          FOREIGN KEY (tenant, to_id) REFERENCES contacts(tenant, id)
        );
"#;
