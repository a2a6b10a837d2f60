#![forbid(unsafe_code)]

use crm_core::access::ActorCapabilities;
use crm_core::ids::{ActorId, RecordId};
use crm_core::model::{EntityKind, Operation};
use crm_core::relationships::RelationshipDirection;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RecordCreateRequest {
    pub kind: EntityKind,
    pub id: RecordId,
    pub name: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RecordRow {
    pub kind: EntityKind,
    pub id: String,
    pub name: String,
    pub created_at_ms: i64,
}

/// Listing request for records the actor may touch with `operation`.
#[derive(Clone, Debug)]
pub struct RecordsVisibleRequest {
    pub capabilities: ActorCapabilities,
    pub actor: ActorId,
    pub kind: EntityKind,
    pub operation: Operation,
    /// ASCII case-insensitive substring match on the record name.
    pub text: Option<String>,
    pub limit: usize,
    pub offset: usize,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RecordsVisibleResult {
    pub records: Vec<RecordRow>,
    pub has_more: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RelationshipEdgeRow {
    pub from_id: String,
    pub to_id: String,
    pub created_at_ms: i64,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ContactRelationshipRow {
    pub peer_id: String,
    pub direction: RelationshipDirection,
}
