use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum VaultError {
    #[error("Cannot access collection file {}: {source}", path.display())]
    Storage {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Collection file {} is corrupt: {source}", path.display())]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Coin not found: {0}")]
    CoinNotFound(String),

    #[error("Invalid value: {0}")]
    Validation(String),

    #[error("Unknown field: {0}")]
    UnknownField(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Api Error: {0}")]
    Api(String),
}

impl VaultError {
    /// True for failures reading, parsing or writing the collection file.
    pub fn is_storage(&self) -> bool {
        matches!(self, VaultError::Storage { .. } | VaultError::Corrupt { .. })
    }
}

pub type Result<T> = std::result::Result<T, VaultError>;
