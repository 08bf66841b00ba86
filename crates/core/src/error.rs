use std::path::PathBuf;
use thiserror::Error;

/// Failures while building a canonical identifier.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DocIdError {
    #[error("generic parameter `{name}` is declared neither on the member nor on its type")]
    UnresolvedGenericParameter { name: String },
    #[error("unhandled element type: {detail}")]
    UnhandledElementType { detail: String },
    #[error("conversion operator `{method}` has no return type")]
    MissingConversionType { method: String },
}

/// Failures while loading a documentation source.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("documentation source not found: {}", path.display())]
    MissingSource { path: PathBuf },
    #[error("malformed documentation source {source_name} (line {line}): {reason}")]
    MalformedSource {
        source_name: String,
        line: usize,
        reason: String,
    },
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Error, Debug)]
pub enum MemberdocError {
    #[error(transparent)]
    DocId(#[from] DocIdError),
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON serialization/deserialization error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, MemberdocError>;
