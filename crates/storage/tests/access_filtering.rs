#![forbid(unsafe_code)]

use crm_core::access::{ActorCapabilities, Grant, MembershipEdge, MemoryFacts, ScopeFlags, compile};
use crm_core::ids::{ActorId, RecordId, TenantId};
use crm_core::model::{EntityKind, Operation};
use crm_storage::{RecordCreateRequest, RecordsVisibleRequest, SqliteStore, StoreError};
use std::path::PathBuf;

fn temp_dir(test_name: &str) -> PathBuf {
    let base = std::env::temp_dir();
    let pid = std::process::id();
    let nonce = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default()
        .as_nanos();
    let dir = base.join(format!("crm_storage_{test_name}_{pid}_{nonce}"));
    std::fs::create_dir_all(&dir).expect("create temp dir");
    dir
}

fn rid(value: &str) -> RecordId {
    RecordId::try_new(value).expect("record id")
}

fn alice() -> ActorId {
    ActorId::try_new("u-alice").expect("actor id")
}

fn create(store: &mut SqliteStore, tenant: &TenantId, kind: EntityKind, id: &str, name: &str) {
    store
        .record_create(
            tenant,
            RecordCreateRequest {
                kind,
                id: rid(id),
                name: name.to_string(),
            },
        )
        .expect("create record");
}

fn member(store: &mut SqliteStore, tenant: &TenantId, member_kind: EntityKind, member_id: &str, container_kind: EntityKind, container_id: &str) {
    let edge = MembershipEdge::try_new(member_kind, rid(member_id), container_kind, rid(container_id))
        .expect("membership kinds");
    store.membership_add(tenant, &edge).expect("add membership");
}

fn grant_alice(store: &mut SqliteStore, tenant: &TenantId, kind: EntityKind, record: &str, read: bool, edit: bool) {
    store
        .grant_upsert(
            tenant,
            &Grant {
                subject: alice(),
                record_kind: kind,
                record: rid(record),
                can_read: read,
                can_edit: edit,
                can_delete: false,
            },
        )
        .expect("grant upsert");
}

const RECORDS: [(EntityKind, &str, &str); 10] = [
    (EntityKind::Contact, "u-alice", "Alice"),
    (EntityKind::Contact, "c-bob", "Bob"),
    (EntityKind::Contact, "c-carol", "Carol"),
    (EntityKind::Contact, "c-dave", "Dave"),
    (EntityKind::Contact, "c-erin", "Erin"),
    (EntityKind::Company, "co-1", "Globex"),
    (EntityKind::Company, "co-2", "Initech"),
    (EntityKind::Company, "co-3", "Umbrella"),
    (EntityKind::Project, "p-1", "Apollo"),
    (EntityKind::Project, "p-2", "Borealis"),
];

/// Alice is a member of project Apollo and of company Umbrella; Erin shares Umbrella with her.
const MEMBERSHIPS: [(EntityKind, &str, EntityKind, &str); 7] = [
    (EntityKind::Contact, "u-alice", EntityKind::Project, "p-1"),
    (EntityKind::Company, "co-1", EntityKind::Project, "p-1"),
    (EntityKind::Contact, "c-carol", EntityKind::Project, "p-1"),
    (EntityKind::Contact, "c-bob", EntityKind::Company, "co-2"),
    (EntityKind::Contact, "u-alice", EntityKind::Company, "co-3"),
    (EntityKind::Contact, "c-erin", EntityKind::Company, "co-3"),
    (EntityKind::Company, "co-3", EntityKind::Project, "p-2"),
];

fn seed(store: &mut SqliteStore, tenant: &TenantId) {
    for (kind, id, name) in RECORDS {
        create(store, tenant, kind, id, name);
    }
    for (member_kind, member_id, container_kind, container_id) in MEMBERSHIPS {
        member(store, tenant, member_kind, member_id, container_kind, container_id);
    }
}

fn visible_names(
    store: &SqliteStore,
    tenant: &TenantId,
    capabilities: ActorCapabilities,
    kind: EntityKind,
    operation: Operation,
) -> Vec<String> {
    store
        .records_visible(
            tenant,
            RecordsVisibleRequest {
                capabilities,
                actor: alice(),
                kind,
                operation,
                text: None,
                limit: 50,
                offset: 0,
            },
        )
        .expect("records visible")
        .records
        .into_iter()
        .map(|row| row.name)
        .collect()
}

fn connected(kind: EntityKind, operation: Operation) -> ActorCapabilities {
    ActorCapabilities::none().with(kind, operation, ScopeFlags::CONNECTED)
}

#[test]
fn allow_all_lists_every_record_of_the_tenant() {
    let storage_dir = temp_dir("allow_all_lists_every_record_of_the_tenant");
    let mut store = SqliteStore::open(&storage_dir).expect("open store");
    let tenant = TenantId::try_new("acme").expect("tenant");
    seed(&mut store, &tenant);

    assert_eq!(
        visible_names(&store, &tenant, ActorCapabilities::all(), EntityKind::Contact, Operation::Delete),
        vec!["Alice", "Bob", "Carol", "Dave", "Erin"]
    );
}

#[test]
fn no_scope_hides_records_even_with_a_grant() {
    let storage_dir = temp_dir("no_scope_hides_records_even_with_a_grant");
    let mut store = SqliteStore::open(&storage_dir).expect("open store");
    let tenant = TenantId::try_new("acme").expect("tenant");
    seed(&mut store, &tenant);
    grant_alice(&mut store, &tenant, EntityKind::Contact, "c-dave", true, true);

    let caps = ActorCapabilities::none();
    assert!(visible_names(&store, &tenant, caps, EntityKind::Contact, Operation::Read).is_empty());
    let accessible = store
        .record_accessible(&tenant, &caps, &alice(), EntityKind::Contact, Operation::Read, &rid("c-dave"))
        .expect("record accessible");
    assert!(!accessible);
}

#[test]
fn connected_company_via_shared_project() {
    let storage_dir = temp_dir("connected_company_via_shared_project");
    let mut store = SqliteStore::open(&storage_dir).expect("open store");
    let tenant = TenantId::try_new("acme").expect("tenant");
    seed(&mut store, &tenant);

    let caps = connected(EntityKind::Company, Operation::Read);
    assert_eq!(
        visible_names(&store, &tenant, caps, EntityKind::Company, Operation::Read),
        vec!["Globex"]
    );

    grant_alice(&mut store, &tenant, EntityKind::Company, "co-2", true, false);
    assert_eq!(
        visible_names(&store, &tenant, caps, EntityKind::Company, Operation::Read),
        vec!["Globex", "Initech"]
    );
}

#[test]
fn connected_contacts_via_project_company_grant_and_own_grant() {
    let storage_dir = temp_dir("connected_contacts_via_project_company_grant_and_own_grant");
    let mut store = SqliteStore::open(&storage_dir).expect("open store");
    let tenant = TenantId::try_new("acme").expect("tenant");
    seed(&mut store, &tenant);

    // Carol shares project Apollo with Alice, Erin shares company Umbrella.
    let read = connected(EntityKind::Contact, Operation::Read);
    assert_eq!(
        visible_names(&store, &tenant, read, EntityKind::Contact, Operation::Read),
        vec!["Alice", "Carol", "Erin"]
    );

    // Bob becomes reachable through a read grant on his company.
    grant_alice(&mut store, &tenant, EntityKind::Company, "co-2", true, false);
    // Dave only through his own grant.
    grant_alice(&mut store, &tenant, EntityKind::Contact, "c-dave", true, false);
    assert_eq!(
        visible_names(&store, &tenant, read, EntityKind::Contact, Operation::Read),
        vec!["Alice", "Bob", "Carol", "Dave", "Erin"]
    );

    // The company grant is read-only, so Bob stays hidden for edits. Shared memberships
    // do not depend on the operation.
    let edit = connected(EntityKind::Contact, Operation::Edit);
    assert_eq!(
        visible_names(&store, &tenant, edit, EntityKind::Contact, Operation::Edit),
        vec!["Alice", "Carol", "Erin"]
    );
}

#[test]
fn connected_projects_only_through_companies() {
    let storage_dir = temp_dir("connected_projects_only_through_companies");
    let mut store = SqliteStore::open(&storage_dir).expect("open store");
    let tenant = TenantId::try_new("acme").expect("tenant");
    seed(&mut store, &tenant);

    let caps = connected(EntityKind::Project, Operation::Read);
    assert_eq!(
        visible_names(&store, &tenant, caps, EntityKind::Project, Operation::Read),
        vec!["Borealis"]
    );
    let accessible = store
        .record_accessible(&tenant, &caps, &alice(), EntityKind::Project, Operation::Read, &rid("p-2"))
        .expect("record accessible");
    assert!(accessible);
}

#[test]
fn grants_and_memberships_do_not_cross_tenants() {
    let storage_dir = temp_dir("grants_and_memberships_do_not_cross_tenants");
    let mut store = SqliteStore::open(&storage_dir).expect("open store");
    let acme = TenantId::try_new("acme").expect("tenant");
    let beta = TenantId::try_new("beta").expect("tenant");
    seed(&mut store, &acme);
    create(&mut store, &beta, EntityKind::Contact, "c-dave", "Dave (beta)");
    grant_alice(&mut store, &beta, EntityKind::Contact, "c-dave", true, true);

    let caps = connected(EntityKind::Contact, Operation::Read);
    assert_eq!(
        visible_names(&store, &acme, caps, EntityKind::Contact, Operation::Read),
        vec!["Alice", "Carol", "Erin"]
    );
    assert_eq!(
        visible_names(&store, &beta, caps, EntityKind::Contact, Operation::Read),
        vec!["Dave (beta)"]
    );
}

#[test]
fn text_filter_and_pagination_compose_with_access() {
    let storage_dir = temp_dir("text_filter_and_pagination_compose_with_access");
    let mut store = SqliteStore::open(&storage_dir).expect("open store");
    let tenant = TenantId::try_new("acme").expect("tenant");
    seed(&mut store, &tenant);

    let page = store
        .records_visible(
            &tenant,
            RecordsVisibleRequest {
                capabilities: ActorCapabilities::all(),
                actor: alice(),
                kind: EntityKind::Contact,
                operation: Operation::Read,
                text: Some("A".to_string()),
                limit: 2,
                offset: 0,
            },
        )
        .expect("records visible");
    let names: Vec<_> = page.records.iter().map(|row| row.name.as_str()).collect();
    assert_eq!(names, vec!["Alice", "Carol"]);
    assert!(page.has_more);

    let scoped = store
        .records_visible(
            &tenant,
            RecordsVisibleRequest {
                capabilities: connected(EntityKind::Contact, Operation::Read),
                actor: alice(),
                kind: EntityKind::Contact,
                operation: Operation::Read,
                text: Some("a".to_string()),
                limit: 10,
                offset: 1,
            },
        )
        .expect("records visible");
    let names: Vec<_> = scoped.records.iter().map(|row| row.name.as_str()).collect();
    assert_eq!(names, vec!["Carol"]);
    assert!(!scoped.has_more);
}

#[test]
fn crud_surface_validates_input() {
    let storage_dir = temp_dir("crud_surface_validates_input");
    let mut store = SqliteStore::open(&storage_dir).expect("open store");
    let tenant = TenantId::try_new("acme").expect("tenant");
    seed(&mut store, &tenant);

    let duplicate = store.record_create(
        &tenant,
        RecordCreateRequest {
            kind: EntityKind::Contact,
            id: rid("c-bob"),
            name: "Bob again".to_string(),
        },
    );
    assert!(matches!(duplicate, Err(StoreError::AlreadyExists)));

    let edge = MembershipEdge::try_new(EntityKind::Contact, rid("c-bob"), EntityKind::Project, rid("p-404"))
        .expect("membership kinds");
    assert!(matches!(store.membership_add(&tenant, &edge), Err(StoreError::UnknownId)));

    let again = MembershipEdge::try_new(EntityKind::Contact, rid("c-carol"), EntityKind::Project, rid("p-1"))
        .expect("membership kinds");
    assert!(!store.membership_add(&tenant, &again).expect("re-add membership"));
}

#[test]
fn sql_filtering_matches_in_memory_evaluation() {
    let storage_dir = temp_dir("sql_filtering_matches_in_memory_evaluation");
    let mut store = SqliteStore::open(&storage_dir).expect("open store");
    let tenant = TenantId::try_new("acme").expect("tenant");
    seed(&mut store, &tenant);

    let mut facts = MemoryFacts::new();
    for (member_kind, member_id, container_kind, container_id) in MEMBERSHIPS {
        let edge = MembershipEdge::try_new(member_kind, rid(member_id), container_kind, rid(container_id))
            .expect("membership kinds");
        facts.add_membership(edge);
    }
    let grants = [
        (EntityKind::Company, "co-2", true, false, false),
        (EntityKind::Contact, "c-dave", true, true, false),
        (EntityKind::Project, "p-1", false, false, true),
    ];
    for (kind, record, can_read, can_edit, can_delete) in grants {
        let grant = Grant {
            subject: alice(),
            record_kind: kind,
            record: rid(record),
            can_read,
            can_edit,
            can_delete,
        };
        store.grant_upsert(&tenant, &grant).expect("grant upsert");
        facts.put_grant(grant);
    }

    for kind in EntityKind::ALL {
        for operation in Operation::ALL {
            for flags in [ScopeFlags::NONE, ScopeFlags::CONNECTED, ScopeFlags::ALL] {
                let caps = ActorCapabilities::none().with(kind, operation, flags);
                let predicate = compile(&caps, &alice(), kind, operation);
                let expected: Vec<String> = RECORDS
                    .iter()
                    .filter(|(record_kind, id, _)| {
                        *record_kind == kind && predicate.evaluate(&facts, kind, &rid(id))
                    })
                    .map(|(_, _, name)| name.to_string())
                    .collect();

                assert_eq!(
                    visible_names(&store, &tenant, caps, kind, operation),
                    expected,
                    "kind={} op={} flags={flags:?}",
                    kind.as_str(),
                    operation.as_str()
                );
                for (record_kind, id, name) in RECORDS.iter().filter(|(k, _, _)| *k == kind) {
                    let accessible = store
                        .record_accessible(&tenant, &caps, &alice(), *record_kind, operation, &rid(id))
                        .expect("record accessible");
                    assert_eq!(accessible, expected.contains(&name.to_string()), "record={id}");
                }
            }
        }
    }
}
