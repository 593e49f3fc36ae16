//! Error types for bounding-box computation.

use thiserror::Error;

/// Errors that can occur while computing an oriented bounding box.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum BoxError {
    /// Input is not a usable solid body.
    #[error("invalid input body: {0}")]
    InvalidInput(String),

    /// Mass properties or extents cannot be derived from the geometry.
    #[error("degenerate geometry: {0}")]
    Geometry(String),

    /// A frame handed to the alignment builder is unusable.
    #[error("invalid frame: {0}")]
    Transform(String),

    /// A preview or solid collaborator failed.
    #[error("presentation failed: {0}")]
    Presenter(String),
}

/// Result type for kernel operations.
pub type Result<T> = std::result::Result<T, BoxError>;
