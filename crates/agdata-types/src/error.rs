use thiserror::Error;

/// Errors produced by type operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeError {
    #[error("A null or blank name is invalid.")]
    BlankName,

    #[error("serialization error: {0}")]
    Serialization(String),
}
