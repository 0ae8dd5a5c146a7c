//! Errors raised while building or querying an adjacency matrix.

use thiserror::Error;

pub type GraphResult<T> = Result<T, GraphError>;

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum GraphError {
    /// A row's length differs from the number of rows
    #[error("matrix is not square: row {row} has {len} entries, expected {n}")]
    NotSquare { row: usize, len: usize, n: usize },

    /// A cell is neither 0/1 nor a boolean
    #[error("invalid edge indicator {found:?} at row {row}, column {col}")]
    InvalidEntry {
        row: usize,
        col: usize,
        found: String,
    },

    /// Zero vertices. Key-vertex status is undefined here, so we reject it.
    #[error("graph has no vertices")]
    Empty,

    #[error("vertex {vertex} out of range for a graph of {n} vertices")]
    VertexOutOfRange { vertex: usize, n: usize },

    #[error("failed to read matrix: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed JSON matrix: {0}")]
    Json(#[from] serde_json::Error),
}

impl GraphError {
    pub fn invalid_entry(row: usize, col: usize, found: impl Into<String>) -> Self {
        Self::InvalidEntry {
            row,
            col,
            found: found.into(),
        }
    }

    /// True for errors caused by the matrix contents rather than by I/O.
    pub fn is_malformed(&self) -> bool {
        !matches!(self, Self::Io(_))
    }
}
