#![forbid(unsafe_code)]

use crate::ids::RecordId;
use serde::{Deserialize, Serialize};

/// How a link request maps onto directed edges. Wire values are 0, 1 and 2.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum LinkMode {
    Bidirectional,
    OneToTwo,
    TwoToOne,
}

impl LinkMode {
    pub fn from_wire(value: u8) -> Result<Self, LinkModeError> {
        match value {
            0 => Ok(LinkMode::Bidirectional),
            1 => Ok(LinkMode::OneToTwo),
            2 => Ok(LinkMode::TwoToOne),
            other => Err(LinkModeError(other)),
        }
    }

    pub fn wire(self) -> u8 {
        match self {
            LinkMode::Bidirectional => 0,
            LinkMode::OneToTwo => 1,
            LinkMode::TwoToOne => 2,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            LinkMode::Bidirectional => "bidirectional",
            LinkMode::OneToTwo => "one_to_two",
            LinkMode::TwoToOne => "two_to_one",
        }
    }
}

impl TryFrom<u8> for LinkMode {
    type Error = LinkModeError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::from_wire(value)
    }
}

impl From<LinkMode> for u8 {
    fn from(value: LinkMode) -> Self {
        value.wire()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
#[error("unknown link mode {0} (expected 0, 1 or 2)")]
pub struct LinkModeError(pub u8);

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkRequest {
    #[serde(rename = "contactOneId")]
    pub contact_one: RecordId,
    #[serde(rename = "contactTwoId")]
    pub contact_two: RecordId,
    pub mode: LinkMode,
}

/// Directed contact → contact edge. Never a self-loop.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RelationshipEdge {
    from: RecordId,
    to: RecordId,
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("relationship edge must join two different contacts ({0})")]
pub struct SelfLoopError(pub RecordId);

impl RelationshipEdge {
    pub fn try_new(from: RecordId, to: RecordId) -> Result<Self, SelfLoopError> {
        if from == to {
            return Err(SelfLoopError(from));
        }
        Ok(Self { from, to })
    }

    pub fn from(&self) -> &RecordId {
        &self.from
    }

    pub fn to(&self) -> &RecordId {
        &self.to
    }

    pub fn reversed(&self) -> Self {
        Self {
            from: self.to.clone(),
            to: self.from.clone(),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LinkOutcome {
    /// Both endpoints were the same contact; nothing was written.
    SelfLinkIgnored,
    Linked { requested: usize, inserted: usize },
}

impl LinkOutcome {
    pub fn inserted(self) -> usize {
        match self {
            LinkOutcome::SelfLinkIgnored => 0,
            LinkOutcome::Linked { inserted, .. } => inserted,
        }
    }
}

/// How a peer relates to a given contact, for rendering one-way vs mutual links.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RelationshipDirection {
    Outgoing,
    Incoming,
    Mutual,
}
