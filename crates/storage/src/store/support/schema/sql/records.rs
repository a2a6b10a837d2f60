#![forbid(unsafe_code)]

pub(super) const SQL: &str = r#"

        CREATE TABLE IF NOT EXISTS contacts (
          tenant TEXT NOT NULL,
          id TEXT NOT NULL,
          name TEXT NOT NULL,
          created_at_ms INTEGER NOT NULL,
          PRIMARY KEY (tenant, id)
        );

        CREATE TABLE IF NOT EXISTS companies (
          tenant TEXT NOT NULL,
          id TEXT NOT NULL,
          name TEXT NOT NULL,
          created_at_ms INTEGER NOT NULL,
          PRIMARY KEY (tenant, id)
        );

        CREATE TABLE IF NOT EXISTS projects (
          tenant TEXT NOT NULL,
          id TEXT NOT NULL,
          name TEXT NOT NULL,
          created_at_ms INTEGER NOT NULL,
          PRIMARY KEY (tenant, id)
        );
"#;
