#![forbid(unsafe_code)]

use super::{RelationshipDirection, RelationshipEdge};
use crate::ids::RecordId;
use std::collections::BTreeMap;

/// Peers of `contact`, each tagged with the direction of its link(s). Sorted by peer id.
pub fn relationship_view<'a>(
    edges: impl IntoIterator<Item = &'a RelationshipEdge>,
    contact: &RecordId,
) -> Vec<(RecordId, RelationshipDirection)> {
    let mut peers = BTreeMap::<RecordId, (bool, bool)>::new();
    for edge in edges {
        if edge.from() == contact {
            peers.entry(edge.to().clone()).or_default().0 = true;
        } else if edge.to() == contact {
            peers.entry(edge.from().clone()).or_default().1 = true;
        }
    }
    peers
        .into_iter()
        .map(|(peer, (outgoing, incoming))| {
            let direction = match (outgoing, incoming) {
                (true, true) => RelationshipDirection::Mutual,
                (true, false) => RelationshipDirection::Outgoing,
                _ => RelationshipDirection::Incoming,
            };
            (peer, direction)
        })
        .collect()
}
