//! Error types shared across Skedaddle crates.

use std::path::PathBuf;

/// Top-level error type for Skedaddle operations.
#[derive(Debug, thiserror::Error)]
pub enum SkedaddleError {
    #[error("Invalid parameter: {message}")]
    InvalidParameter { message: String },

    #[error("{resource} not found: {path}")]
    ResourceNotFound { resource: String, path: PathBuf },

    #[error("Encoding failed ({backend}): {message}")]
    EncodeFailed { backend: String, message: String },

    #[error("Audio synthesis failed ({backend}): {message}")]
    AudioSynthesisFailed { backend: String, message: String },

    #[error("Unsupported operation: {message}")]
    Unsupported { message: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

/// Result type alias using SkedaddleError.
pub type SkedaddleResult<T> = Result<T, SkedaddleError>;

impl SkedaddleError {
    pub fn invalid_parameter(msg: impl Into<String>) -> Self {
        Self::InvalidParameter {
            message: msg.into(),
        }
    }

    pub fn resource_not_found(resource: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self::ResourceNotFound {
            resource: resource.into(),
            path: path.into(),
        }
    }

    pub fn encode_failed(backend: impl Into<String>, msg: impl Into<String>) -> Self {
        Self::EncodeFailed {
            backend: backend.into(),
            message: msg.into(),
        }
    }

    pub fn audio_synthesis_failed(backend: impl Into<String>, msg: impl Into<String>) -> Self {
        Self::AudioSynthesisFailed {
            backend: backend.into(),
            message: msg.into(),
        }
    }

    pub fn unsupported(msg: impl Into<String>) -> Self {
        Self::Unsupported {
            message: msg.into(),
        }
    }
}
