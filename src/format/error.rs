//! Error types for annotation file and export operations.

use thiserror::Error;

/// Errors that can occur while reading, writing or exporting annotations.
#[derive(Error, Debug)]
pub enum FormatError {
    /// I/O error during file operations
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON parsing or serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Invalid file structure or content
    #[error("Invalid format: {message}")]
    InvalidFormat {
        /// Description of the format error
        message: String,
    },

    /// Image dimensions required but not available
    #[error(
        "Image dimensions required for format '{format}' but not available for image '{image}'"
    )]
    MissingDimensions {
        /// The format requiring dimensions
        format: String,
        /// The image missing dimensions
        image: String,
    },

    /// No format registered under this id
    #[error("Unknown format '{id}'")]
    UnknownFormat {
        /// The requested format id
        id: String,
    },
}

impl FormatError {
    /// Create an invalid format error with a message.
    pub fn invalid_format(message: impl Into<String>) -> Self {
        Self::InvalidFormat {
            message: message.into(),
        }
    }

    /// Create a missing dimensions error.
    pub fn missing_dimensions(format: impl Into<String>, image: impl Into<String>) -> Self {
        Self::MissingDimensions {
            format: format.into(),
            image: image.into(),
        }
    }

    /// Create an unknown format error.
    pub fn unknown_format(id: impl Into<String>) -> Self {
        Self::UnknownFormat { id: id.into() }
    }
}
