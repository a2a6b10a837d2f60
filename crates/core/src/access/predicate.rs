#![forbid(unsafe_code)]

use crate::ids::ActorId;
use crate::model::{EntityKind, Operation};
use serde::{Deserialize, Serialize};

/// Backend-agnostic access predicate over records of one target kind.
///
/// Leaves are evaluated against the record being filtered:
/// - `Grant`: the record carries a grant for `actor` allowing `operation`.
/// - `Reachable`: the record shares a membership with some `via` record which either has
///   `actor` as a linked contact or carries a grant for `actor` allowing `operation`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "node", rename_all = "snake_case")]
pub enum PredicateNode {
    True,
    False,
    And {
        children: Vec<PredicateNode>,
    },
    Or {
        children: Vec<PredicateNode>,
    },
    Grant {
        actor: ActorId,
        operation: Operation,
    },
    Reachable {
        via: EntityKind,
        actor: ActorId,
        operation: Operation,
    },
}

impl PredicateNode {
    /// Conjunction with constant folding; nested `And`s are flattened.
    pub fn and(self, other: PredicateNode) -> PredicateNode {
        match (self, other) {
            (PredicateNode::False, _) | (_, PredicateNode::False) => PredicateNode::False,
            (PredicateNode::True, node) | (node, PredicateNode::True) => node,
            (PredicateNode::And { mut children }, PredicateNode::And { children: rest }) => {
                children.extend(rest);
                PredicateNode::And { children }
            }
            (PredicateNode::And { mut children }, node) => {
                children.push(node);
                PredicateNode::And { children }
            }
            (node, PredicateNode::And { mut children }) => {
                children.insert(0, node);
                PredicateNode::And { children }
            }
            (left, right) => PredicateNode::And {
                children: vec![left, right],
            },
        }
    }

    /// Disjunction with constant folding; nested `Or`s are flattened.
    pub fn or(self, other: PredicateNode) -> PredicateNode {
        match (self, other) {
            (PredicateNode::True, _) | (_, PredicateNode::True) => PredicateNode::True,
            (PredicateNode::False, node) | (node, PredicateNode::False) => node,
            (PredicateNode::Or { mut children }, PredicateNode::Or { children: rest }) => {
                children.extend(rest);
                PredicateNode::Or { children }
            }
            (PredicateNode::Or { mut children }, node) => {
                children.push(node);
                PredicateNode::Or { children }
            }
            (node, PredicateNode::Or { mut children }) => {
                children.insert(0, node);
                PredicateNode::Or { children }
            }
            (left, right) => PredicateNode::Or {
                children: vec![left, right],
            },
        }
    }

    /// `Some(value)` when the tree is a constant and needs no record-level check.
    pub fn is_unconditional(&self) -> Option<bool> {
        match self {
            PredicateNode::True => Some(true),
            PredicateNode::False => Some(false),
            _ => None,
        }
    }
}
