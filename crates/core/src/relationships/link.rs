#![forbid(unsafe_code)]

use super::{LinkMode, LinkOutcome, LinkRequest, RelationshipEdge};
use std::collections::BTreeSet;
use std::convert::Infallible;

/// Storage boundary for relationship edges.
pub trait RelationshipWriter {
    type Error;

    /// Inserts every edge not already present as one atomic unit: after an error none of
    /// `edges` may have been written. Returns how many edges were new.
    fn insert_edges_if_absent(&mut self, edges: &[RelationshipEdge]) -> Result<usize, Self::Error>;
}

/// Edges a request asks for. Empty for a self-link.
pub fn planned_edges(request: &LinkRequest) -> Vec<RelationshipEdge> {
    let Ok(forward) =
        RelationshipEdge::try_new(request.contact_one.clone(), request.contact_two.clone())
    else {
        return Vec::new();
    };
    match request.mode {
        LinkMode::Bidirectional => {
            let backward = forward.reversed();
            vec![forward, backward]
        }
        LinkMode::OneToTwo => vec![forward],
        LinkMode::TwoToOne => vec![forward.reversed()],
    }
}

/// Links two contacts. Re-applying a request is harmless: existing edges are kept as-is.
///
/// A request naming the same contact twice succeeds without touching the writer.
pub fn link<W: RelationshipWriter + ?Sized>(
    writer: &mut W,
    request: &LinkRequest,
) -> Result<LinkOutcome, W::Error> {
    let edges = planned_edges(request);
    if edges.is_empty() {
        return Ok(LinkOutcome::SelfLinkIgnored);
    }
    let inserted = writer.insert_edges_if_absent(&edges)?;
    Ok(LinkOutcome::Linked {
        requested: edges.len(),
        inserted,
    })
}

/// In-process edge set.
#[derive(Clone, Debug, Default)]
pub struct MemoryRelationships {
    edges: BTreeSet<RelationshipEdge>,
}

impl MemoryRelationships {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn edges(&self) -> impl Iterator<Item = &RelationshipEdge> {
        self.edges.iter()
    }

    pub fn len(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }
}

impl RelationshipWriter for MemoryRelationships {
    type Error = Infallible;

    fn insert_edges_if_absent(&mut self, edges: &[RelationshipEdge]) -> Result<usize, Infallible> {
        Ok(edges
            .iter()
            .filter(|edge| self.edges.insert((*edge).clone()))
            .count())
    }
}
