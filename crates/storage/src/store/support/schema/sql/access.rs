#![forbid(unsafe_code)]

pub(super) const SQL: &str = r#"

        -- Stored member -> container (contact->project, company->project, contact->company).
        CREATE TABLE IF NOT EXISTS memberships (
          tenant TEXT NOT NULL,
          member_kind TEXT NOT NULL,
          member_id TEXT NOT NULL,
          container_kind TEXT NOT NULL,
          container_id TEXT NOT NULL,
          created_at_ms INTEGER NOT NULL,
          PRIMARY KEY (tenant, member_kind, member_id, container_kind, container_id)
        );

        -- Reachability reads memberships in both directions.
        CREATE VIEW IF NOT EXISTS membership_pairs AS
          SELECT tenant, member_kind AS a_kind, member_id AS a_id,
                 container_kind AS b_kind, container_id AS b_id
          FROM memberships
          UNION ALL
          SELECT tenant, container_kind AS a_kind, container_id AS a_id,
                 member_kind AS b_kind, member_id AS b_id
          FROM memberships;

        CREATE TABLE IF NOT EXISTS grants (
          tenant TEXT NOT NULL,
          record_kind TEXT NOT NULL,
          record_id TEXT NOT NULL,
          user_id TEXT NOT NULL,
          can_read INTEGER NOT NULL,
          can_edit INTEGER NOT NULL,
          can_delete INTEGER NOT NULL,
          updated_at_ms INTEGER NOT NULL,
          PRIMARY KEY (tenant, record_kind, record_id, user_id)
        );
"#;
