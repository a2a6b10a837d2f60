#![forbid(unsafe_code)]

pub mod access;
pub mod relationships;

pub mod ids {
    use serde::{Deserialize, Serialize};

    #[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
    #[serde(try_from = "String", into = "String")]
    pub struct TenantId(String);

    impl TenantId {
        pub fn as_str(&self) -> &str {
            &self.0
        }

        pub fn try_new(value: impl Into<String>) -> Result<Self, TenantIdError> {
            let value = value.into();
            validate_tenant_id(&value)?;
            Ok(Self(value))
        }
    }

    impl TryFrom<String> for TenantId {
        type Error = TenantIdError;

        fn try_from(value: String) -> Result<Self, Self::Error> {
            Self::try_new(value)
        }
    }

    impl From<TenantId> for String {
        fn from(value: TenantId) -> Self {
            value.0
        }
    }

    #[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
    pub enum TenantIdError {
        #[error("tenant id must not be empty")]
        Empty,
        #[error("tenant id is too long")]
        TooLong,
        #[error("tenant id must start with an ascii letter or digit")]
        InvalidFirstChar,
        #[error("tenant id contains invalid char {ch:?} at {index}")]
        InvalidChar { ch: char, index: usize },
    }

    impl TenantIdError {
        pub fn message(&self) -> &'static str {
            match self {
                Self::Empty => "tenant id must not be empty",
                Self::TooLong => "tenant id is too long",
                Self::InvalidFirstChar => "tenant id must start with an ascii letter or digit",
                Self::InvalidChar { .. } => "tenant id contains an invalid character",
            }
        }
    }

    fn validate_tenant_id(value: &str) -> Result<(), TenantIdError> {
        if value.is_empty() {
            return Err(TenantIdError::Empty);
        }
        if value.len() > 128 {
            return Err(TenantIdError::TooLong);
        }
        let mut chars = value.chars();
        let Some(first) = chars.next() else {
            return Err(TenantIdError::Empty);
        };
        if !first.is_ascii_alphanumeric() {
            return Err(TenantIdError::InvalidFirstChar);
        }
        for (index, ch) in value.char_indices().skip(1) {
            if ch.is_ascii_alphanumeric() || matches!(ch, '.' | '_' | '-') {
                continue;
            }
            return Err(TenantIdError::InvalidChar { ch, index });
        }
        Ok(())
    }

    /// Identifier of a CRM record (contact, company or project).
    #[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
    #[serde(try_from = "String", into = "String")]
    pub struct RecordId(String);

    impl RecordId {
        pub fn as_str(&self) -> &str {
            &self.0
        }

        pub fn into_string(self) -> String {
            self.0
        }

        pub fn try_new(value: impl Into<String>) -> Result<Self, IdError> {
            let value = value.into();
            validate_opaque_id(&value)?;
            Ok(Self(value))
        }
    }

    impl TryFrom<String> for RecordId {
        type Error = IdError;

        fn try_from(value: String) -> Result<Self, Self::Error> {
            Self::try_new(value)
        }
    }

    impl From<RecordId> for String {
        fn from(value: RecordId) -> Self {
            value.0
        }
    }

    impl std::fmt::Display for RecordId {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            f.write_str(&self.0)
        }
    }

    /// Identifier of the authenticated user whose access is being evaluated.
    ///
    /// An actor takes part in memberships as a contact carrying the same id.
    #[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
    #[serde(try_from = "String", into = "String")]
    pub struct ActorId(String);

    impl ActorId {
        pub fn as_str(&self) -> &str {
            &self.0
        }

        pub fn try_new(value: impl Into<String>) -> Result<Self, IdError> {
            let value = value.into();
            validate_opaque_id(&value)?;
            Ok(Self(value))
        }
    }

    impl TryFrom<String> for ActorId {
        type Error = IdError;

        fn try_from(value: String) -> Result<Self, Self::Error> {
            Self::try_new(value)
        }
    }

    impl From<ActorId> for String {
        fn from(value: ActorId) -> Self {
            value.0
        }
    }

    #[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
    pub enum IdError {
        #[error("id must not be empty")]
        Empty,
        #[error("id is too long")]
        TooLong,
        #[error("id contains control characters")]
        ContainsControl,
        #[error("id must not start or end with whitespace")]
        SurroundingWhitespace,
    }

    impl IdError {
        pub fn message(&self) -> &'static str {
            match self {
                Self::Empty => "id must not be empty",
                Self::TooLong => "id is too long",
                Self::ContainsControl => "id contains control characters",
                Self::SurroundingWhitespace => "id must not start or end with whitespace",
            }
        }
    }

    /// Ids are compared byte-for-byte, so only the canonical spelling is accepted.
    fn validate_opaque_id(value: &str) -> Result<(), IdError> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(IdError::Empty);
        }
        if value.len() > 128 {
            return Err(IdError::TooLong);
        }
        if value.chars().any(|c| c.is_control()) {
            return Err(IdError::ContainsControl);
        }
        if trimmed.len() != value.len() {
            return Err(IdError::SurroundingWhitespace);
        }
        Ok(())
    }
}

pub mod model {
    use serde::{Deserialize, Serialize};

    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
    #[serde(rename_all = "lowercase")]
    pub enum EntityKind {
        Contact,
        Company,
        Project,
    }

    impl EntityKind {
        pub const ALL: [EntityKind; 3] = [EntityKind::Contact, EntityKind::Company, EntityKind::Project];

        pub fn as_str(self) -> &'static str {
            match self {
                EntityKind::Contact => "contact",
                EntityKind::Company => "company",
                EntityKind::Project => "project",
            }
        }

        pub fn parse(value: &str) -> Result<Self, ModelParseError> {
            match value.trim().to_ascii_lowercase().as_str() {
                "contact" => Ok(EntityKind::Contact),
                "company" => Ok(EntityKind::Company),
                "project" => Ok(EntityKind::Project),
                _ => Err(ModelParseError::UnknownEntityKind(value.to_string())),
            }
        }
    }

    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
    #[serde(rename_all = "lowercase")]
    pub enum Operation {
        Read,
        Edit,
        Delete,
    }

    impl Operation {
        pub const ALL: [Operation; 3] = [Operation::Read, Operation::Edit, Operation::Delete];

        pub fn as_str(self) -> &'static str {
            match self {
                Operation::Read => "read",
                Operation::Edit => "edit",
                Operation::Delete => "delete",
            }
        }

        pub fn parse(value: &str) -> Result<Self, ModelParseError> {
            match value.trim().to_ascii_lowercase().as_str() {
                "read" => Ok(Operation::Read),
                "edit" => Ok(Operation::Edit),
                "delete" => Ok(Operation::Delete),
                _ => Err(ModelParseError::UnknownOperation(value.to_string())),
            }
        }
    }

    /// Rejected kind or operation names. These come from caller wiring, never from end
    /// users, and are not worth retrying.
    #[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
    pub enum ModelParseError {
        #[error("unknown entity kind: {0:?}")]
        UnknownEntityKind(String),
        #[error("unknown operation: {0:?}")]
        UnknownOperation(String),
    }
}
