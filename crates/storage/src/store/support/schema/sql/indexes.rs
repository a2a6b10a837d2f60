#![forbid(unsafe_code)]

pub(super) const SQL: &str = r#"

        CREATE INDEX IF NOT EXISTS idx_memberships_container ON memberships(tenant, container_kind, container_id);
        CREATE INDEX IF NOT EXISTS idx_grants_user ON grants(tenant, user_id, record_kind);
        CREATE INDEX IF NOT EXISTS idx_relationship_edges_to ON relationship_edges(tenant, to_id);
        CREATE INDEX IF NOT EXISTS idx_contacts_name ON contacts(tenant, name);
        CREATE INDEX IF NOT EXISTS idx_companies_name ON companies(tenant, name);
        CREATE INDEX IF NOT EXISTS idx_projects_name ON projects(tenant, name);
"#;
