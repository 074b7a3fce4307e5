//! Error types for the tagging pipeline.
//!
//! This module defines the errors that can occur while classifying an
//! image: decode failures, preprocessing failures, inference failures,
//! configuration problems, and the single wrapper error the orchestrator
//! surfaces to callers. Lower-level errors are never swallowed; they
//! propagate up wrapped with context.

use thiserror::Error;

/// Enum representing different stages of preprocessing in the pipeline.
///
/// Used to identify which preprocessing step an error occurred in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProcessingStage {
    /// Error occurred during the lossy re-encode round trip of a variant.
    Reencode,
    /// Generic processing error.
    Generic,
}

impl std::fmt::Display for ProcessingStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProcessingStage::Reencode => write!(f, "variant re-encode"),
            ProcessingStage::Generic => write!(f, "processing"),
        }
    }
}

/// Errors that can occur in the tagging pipeline.
#[derive(Error, Debug)]
pub enum TagError {
    /// The input payload could not be decoded as an image
    /// (malformed or unsupported format). Surfaced immediately, not
    /// retried.
    #[error("image decode")]
    Decode(#[source] image::ImageError),

    /// A preprocessing step failed.
    #[error("{stage} failed: {context}")]
    Processing {
        /// The preprocessing stage where the error occurred.
        stage: ProcessingStage,
        /// Additional context about the error.
        context: String,
        /// The underlying error.
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// The classifier backend was unavailable or an inference call
    /// failed. Not retried at this layer; callers may retry the whole
    /// classification call.
    #[error("inference: {context}")]
    Inference {
        /// Additional context about the failed call.
        context: String,
        /// The underlying error.
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Invalid configuration.
    #[error("configuration: {message}")]
    Config {
        /// A message describing the configuration error.
        message: String,
    },

    /// Cooperative cancellation was observed between pipeline stages.
    #[error("classification cancelled")]
    Cancelled,

    /// Wrapper surfaced to the caller by the orchestrator. Carries the
    /// original cause; classification is all-or-nothing per call, so no
    /// partial result accompanies this.
    #[error("classification failed")]
    ClassificationFailed {
        /// The stage error that aborted the call.
        #[source]
        source: Box<TagError>,
    },
}

impl TagError {
    /// Creates a processing error for the given stage.
    pub fn processing(
        stage: ProcessingStage,
        context: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        TagError::Processing {
            stage,
            context: context.into(),
            source: Box::new(source),
        }
    }

    /// Creates an inference error with context about the failed call.
    pub fn inference(
        context: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        TagError::Inference {
            context: context.into(),
            source: Box::new(source),
        }
    }

    /// Creates a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        TagError::Config {
            message: message.into(),
        }
    }

    /// Wraps a stage error into the single `ClassificationFailed` error
    /// surfaced at the orchestrator boundary.
    pub fn classification_failed(source: TagError) -> Self {
        TagError::ClassificationFailed {
            source: Box::new(source),
        }
    }
}

/// Convenience alias for results in the tagging pipeline.
pub type TagResult<T> = Result<T, TagError>;
