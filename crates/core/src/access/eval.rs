#![forbid(unsafe_code)]

use super::{Grant, MembershipEdge, PredicateNode};
use crate::ids::{ActorId, RecordId};
use crate::model::{EntityKind, Operation};
use std::collections::BTreeMap;

/// Read-only view over grant and membership data, enough to evaluate a predicate in-process.
pub trait AccessFacts {
    fn grant_allows(
        &self,
        actor: &ActorId,
        kind: EntityKind,
        record: &RecordId,
        operation: Operation,
    ) -> bool;

    /// Records of kind `other` sharing a membership edge with (kind, record), either direction.
    fn linked(&self, kind: EntityKind, record: &RecordId, other: EntityKind) -> Vec<RecordId>;
}

impl PredicateNode {
    /// Evaluates the tree for one record of `kind`.
    ///
    /// This is the in-memory backend; SQL backends translate the tree instead.
    pub fn evaluate<F: AccessFacts + ?Sized>(
        &self,
        facts: &F,
        kind: EntityKind,
        record: &RecordId,
    ) -> bool {
        match self {
            PredicateNode::True => true,
            PredicateNode::False => false,
            PredicateNode::And { children } => children
                .iter()
                .all(|child| child.evaluate(facts, kind, record)),
            PredicateNode::Or { children } => children
                .iter()
                .any(|child| child.evaluate(facts, kind, record)),
            PredicateNode::Grant { actor, operation } => {
                facts.grant_allows(actor, kind, record, *operation)
            }
            PredicateNode::Reachable {
                via,
                actor,
                operation,
            } => facts.linked(kind, record, *via).iter().any(|connector| {
                facts
                    .linked(*via, connector, EntityKind::Contact)
                    .iter()
                    .any(|contact| contact.as_str() == actor.as_str())
                    || facts.grant_allows(actor, *via, connector, *operation)
            }),
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct MemoryFacts {
    memberships: Vec<MembershipEdge>,
    grants: BTreeMap<(EntityKind, RecordId, ActorId), Grant>,
}

impl MemoryFacts {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_membership(&mut self, edge: MembershipEdge) {
        if !self.memberships.contains(&edge) {
            self.memberships.push(edge);
        }
    }

    /// Replaces any earlier grant for the same (record, subject).
    pub fn put_grant(&mut self, grant: Grant) {
        let key = (grant.record_kind, grant.record.clone(), grant.subject.clone());
        self.grants.insert(key, grant);
    }
}

impl AccessFacts for MemoryFacts {
    fn grant_allows(
        &self,
        actor: &ActorId,
        kind: EntityKind,
        record: &RecordId,
        operation: Operation,
    ) -> bool {
        self.grants
            .get(&(kind, record.clone(), actor.clone()))
            .is_some_and(|grant| grant.allows(operation))
    }

    fn linked(&self, kind: EntityKind, record: &RecordId, other: EntityKind) -> Vec<RecordId> {
        self.memberships
            .iter()
            .filter_map(|edge| edge.other_end(kind, record))
            .filter(|(end_kind, _)| *end_kind == other)
            .map(|(_, id)| id.clone())
            .collect()
    }
}
