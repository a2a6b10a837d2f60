#![forbid(unsafe_code)]

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("io: {0}")]
    Io(#[from] std::io::Error),
    #[error("sqlite: {0}")]
    Sql(#[from] rusqlite::Error),
    #[error("config: {0}")]
    Config(&'static str),
    #[error("config: {0}")]
    ConfigParse(String),
    #[error("invalid input: {0}")]
    InvalidInput(&'static str),
    #[error("record already exists")]
    AlreadyExists,
    #[error("unknown id")]
    UnknownId,
}
