//! Error types for the xclues library.

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Failures from the storage and gateway collaborators. Core session
/// transitions never fail; invalid user actions are silent no-ops.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// IO error occurred
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// HTTP transport error from the puzzle service
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Local storage error
    #[error("storage error: {0}")]
    Storage(String),

    /// Puzzle failed the authoring invariant
    #[error("invalid puzzle: {0}")]
    InvalidPuzzle(String),
}
