#![forbid(unsafe_code)]

use super::ActorCapabilities;
use crate::model::{EntityKind, Operation};
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Scope {
    None,
    Connected,
    All,
}

impl Scope {
    pub fn as_str(self) -> &'static str {
        match self {
            Scope::None => "none",
            Scope::Connected => "connected",
            Scope::All => "all",
        }
    }
}

/// Coarse access level for one (kind, operation) cell. `All` wins over `Connected`.
pub fn resolve_scope(
    capabilities: &ActorCapabilities,
    kind: EntityKind,
    operation: Operation,
) -> Scope {
    let flags = capabilities.flags(kind, operation);
    if flags.allow_all {
        Scope::All
    } else if flags.allow_connected {
        Scope::Connected
    } else {
        Scope::None
    }
}
