#![forbid(unsafe_code)]

use crate::model::{EntityKind, Operation};
use serde::{Deserialize, Serialize};

/// The two role flags for one (entity kind, operation) cell.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default, deny_unknown_fields)]
pub struct ScopeFlags {
    pub allow_all: bool,
    pub allow_connected: bool,
}

impl ScopeFlags {
    pub const NONE: ScopeFlags = ScopeFlags {
        allow_all: false,
        allow_connected: false,
    };
    pub const CONNECTED: ScopeFlags = ScopeFlags {
        allow_all: false,
        allow_connected: true,
    };
    pub const ALL: ScopeFlags = ScopeFlags {
        allow_all: true,
        allow_connected: false,
    };
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OperationFlags {
    pub read: ScopeFlags,
    pub edit: ScopeFlags,
    pub delete: ScopeFlags,
}

impl OperationFlags {
    pub fn get(&self, operation: Operation) -> ScopeFlags {
        match operation {
            Operation::Read => self.read,
            Operation::Edit => self.edit,
            Operation::Delete => self.delete,
        }
    }

    fn get_mut(&mut self, operation: Operation) -> &mut ScopeFlags {
        match operation {
            Operation::Read => &mut self.read,
            Operation::Edit => &mut self.edit,
            Operation::Delete => &mut self.delete,
        }
    }
}

/// Role-derived capability matrix of one actor, fixed for the duration of a request.
///
/// Cells absent from the role JSON deserialize as [`ScopeFlags::NONE`], so a partial role
/// grants nothing it does not name. Unknown kinds or operations are rejected at parse time.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ActorCapabilities {
    pub contact: OperationFlags,
    pub company: OperationFlags,
    pub project: OperationFlags,
}

impl ActorCapabilities {
    pub fn none() -> Self {
        Self::default()
    }

    /// Unrestricted access to every kind and operation.
    pub fn all() -> Self {
        let mut caps = Self::default();
        for kind in EntityKind::ALL {
            for operation in Operation::ALL {
                *caps.kind_mut(kind).get_mut(operation) = ScopeFlags::ALL;
            }
        }
        caps
    }

    pub fn with(mut self, kind: EntityKind, operation: Operation, flags: ScopeFlags) -> Self {
        *self.kind_mut(kind).get_mut(operation) = flags;
        self
    }

    pub fn flags(&self, kind: EntityKind, operation: Operation) -> ScopeFlags {
        self.kind(kind).get(operation)
    }

    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }

    fn kind(&self, kind: EntityKind) -> &OperationFlags {
        match kind {
            EntityKind::Contact => &self.contact,
            EntityKind::Company => &self.company,
            EntityKind::Project => &self.project,
        }
    }

    fn kind_mut(&mut self, kind: EntityKind) -> &mut OperationFlags {
        match kind {
            EntityKind::Contact => &mut self.contact,
            EntityKind::Company => &mut self.company,
            EntityKind::Project => &mut self.project,
        }
    }
}
