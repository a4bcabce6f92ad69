use thiserror::Error;

use crate::http_client::FetchError;
use crate::parser::ParseError;

/// Coarse classification of a failed search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The caller passed a blank query.
    InvalidInput,
    /// The results page could not be retrieved.
    FetchFailure,
    /// The page was retrieved but did not have the expected shape.
    StructureMismatch,
}

#[derive(Debug, Error)]
pub enum SearchError {
    #[error("Invalid or empty query provided: {query:?}")]
    InvalidInput { query: String },

    #[error("Failed to fetch results: {0}")]
    Fetch(#[from] FetchError),

    #[error("Element with id='{container_id}' not found in the response HTML")]
    StructureMismatch { container_id: String },

    #[error("Failed to parse response HTML: {0}")]
    Parse(#[from] ParseError),
}

impl SearchError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            SearchError::InvalidInput { .. } => ErrorKind::InvalidInput,
            SearchError::Fetch(_) => ErrorKind::FetchFailure,
            SearchError::StructureMismatch { .. } | SearchError::Parse(_) => {
                ErrorKind::StructureMismatch
            }
        }
    }
}
