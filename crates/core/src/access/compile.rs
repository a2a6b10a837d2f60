#![forbid(unsafe_code)]

use super::{ActorCapabilities, PredicateNode, Scope, connectivity, has_grant, resolve_scope};
use crate::ids::ActorId;
use crate::model::{EntityKind, Operation};

/// Compiles the access predicate for `actor` performing `operation` on records of `kind`.
///
/// `All` compiles to `True` and `None` to `False`, with no record-level branches. `Connected`
/// compiles to an `Or` of the reachability branches followed by the record's own grant. The
/// result is plain data: storage backends translate it and may AND it with their own filters.
pub fn compile(
    capabilities: &ActorCapabilities,
    actor: &ActorId,
    kind: EntityKind,
    operation: Operation,
) -> PredicateNode {
    match resolve_scope(capabilities, kind, operation) {
        Scope::All => PredicateNode::True,
        Scope::None => PredicateNode::False,
        Scope::Connected => {
            let mut children = connectivity(kind, actor, operation);
            children.push(has_grant(actor, operation));
            PredicateNode::Or { children }
        }
    }
}
