//! Error types for mesh export and import.

use std::path::PathBuf;

use mesh_parametric::ParamError;
use thiserror::Error;

/// Result type for mesh I/O operations.
pub type IoResult<T> = Result<T, IoError>;

/// Errors that can occur while writing or reading mesh files.
///
/// A mesh that fails validation is not an error: the export returns a result
/// with `success == false`. These variants cover the filesystem, malformed
/// files and bad shape parameters.
#[derive(Debug, Error)]
pub enum IoError {
    /// File not found.
    #[error("file not found: {path}")]
    FileNotFound {
        /// Path that was not found.
        path: PathBuf,
    },

    /// Invalid file content (parse error).
    #[error("invalid file content: {message}")]
    InvalidContent {
        /// Description of what was invalid.
        message: String,
    },

    /// Unexpected end of file.
    #[error("unexpected end of file at position {position}")]
    UnexpectedEof {
        /// Position in the file where EOF was encountered.
        position: u64,
    },

    /// Invalid header in binary STL.
    #[error("invalid STL header: expected {expected} bytes, got {got}")]
    InvalidHeader {
        /// Expected header size.
        expected: usize,
        /// Actual header size.
        got: usize,
    },

    /// Binary STL holds fewer triangles than its header declares.
    #[error("invalid face count: expected {expected}, got {got}")]
    InvalidFaceCount {
        /// Declared number of faces.
        expected: u32,
        /// Number of complete faces present.
        got: u32,
    },

    /// Shape parameters were rejected before any mesh was generated.
    #[error(transparent)]
    InvalidParameter(#[from] ParamError),

    /// I/O error from the standard library.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Metadata serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Float parsing error.
    #[error("float parsing error: {0}")]
    ParseFloat(#[from] std::num::ParseFloatError),
}

impl IoError {
    /// Create an `InvalidContent` error with the given message.
    #[must_use]
    pub fn invalid_content(message: impl Into<String>) -> Self {
        Self::InvalidContent {
            message: message.into(),
        }
    }
}
