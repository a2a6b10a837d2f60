#![forbid(unsafe_code)]

use super::PredicateNode;
use crate::ids::{ActorId, RecordId};
use crate::model::{EntityKind, Operation};
use serde::{Deserialize, Serialize};

/// Explicit per-record, per-user permission row.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Grant {
    pub subject: ActorId,
    pub record_kind: EntityKind,
    pub record: RecordId,
    pub can_read: bool,
    pub can_edit: bool,
    pub can_delete: bool,
}

impl Grant {
    pub fn allows(&self, operation: Operation) -> bool {
        match operation {
            Operation::Read => self.can_read,
            Operation::Edit => self.can_edit,
            Operation::Delete => self.can_delete,
        }
    }
}

/// "A grant row exists for (actor, this record) with the operation's flag set."
///
/// The record is whatever the enclosing query is filtering; nothing is fetched here.
pub fn has_grant(actor: &ActorId, operation: Operation) -> PredicateNode {
    PredicateNode::Grant {
        actor: actor.clone(),
        operation,
    }
}
