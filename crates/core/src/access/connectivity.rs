#![forbid(unsafe_code)]

use super::PredicateNode;
use crate::ids::{ActorId, RecordId};
use crate::model::{EntityKind, Operation};
use serde::{Deserialize, Serialize};

/// Kinds that can connect an actor to a record through a shared membership.
///
/// A kind is never its own connector: company access does not hop through other companies,
/// project access does not hop through other projects.
pub const CONNECTOR_KINDS: [EntityKind; 2] = [EntityKind::Project, EntityKind::Company];

pub fn connector_kinds(kind: EntityKind) -> impl Iterator<Item = EntityKind> {
    CONNECTOR_KINDS.into_iter().filter(move |via| *via != kind)
}

/// The "connected" half of a scoped predicate: one `Reachable` branch per connector kind.
///
/// An empty result means the kind has no connector and only the grant branch applies.
pub fn connectivity(kind: EntityKind, actor: &ActorId, operation: Operation) -> Vec<PredicateNode> {
    connector_kinds(kind)
        .map(|via| PredicateNode::Reachable {
            via,
            actor: actor.clone(),
            operation,
        })
        .collect()
}

/// Stored member → container association, read in both directions for reachability.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MembershipEdge {
    member_kind: EntityKind,
    member: RecordId,
    container_kind: EntityKind,
    container: RecordId,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
#[error("{member} cannot be a member of {container}")]
pub struct MembershipKindError {
    pub member: &'static str,
    pub container: &'static str,
}

impl MembershipEdge {
    /// Accepts contact → project, company → project and contact → company.
    pub fn try_new(
        member_kind: EntityKind,
        member: RecordId,
        container_kind: EntityKind,
        container: RecordId,
    ) -> Result<Self, MembershipKindError> {
        let allowed = matches!(
            (member_kind, container_kind),
            (EntityKind::Contact, EntityKind::Project)
                | (EntityKind::Company, EntityKind::Project)
                | (EntityKind::Contact, EntityKind::Company)
        );
        if !allowed {
            return Err(MembershipKindError {
                member: member_kind.as_str(),
                container: container_kind.as_str(),
            });
        }
        Ok(Self {
            member_kind,
            member,
            container_kind,
            container,
        })
    }

    pub fn member_kind(&self) -> EntityKind {
        self.member_kind
    }

    pub fn member(&self) -> &RecordId {
        &self.member
    }

    pub fn container_kind(&self) -> EntityKind {
        self.container_kind
    }

    pub fn container(&self) -> &RecordId {
        &self.container
    }

    /// The endpoint opposite to (kind, id), when this edge touches it.
    pub fn other_end(&self, kind: EntityKind, id: &RecordId) -> Option<(EntityKind, &RecordId)> {
        if self.member_kind == kind && &self.member == id {
            Some((self.container_kind, &self.container))
        } else if self.container_kind == kind && &self.container == id {
            Some((self.member_kind, &self.member))
        } else {
            None
        }
    }
}
