//! Capability traits at the classifier seam.
//!
//! The pretrained model is an external collaborator: the pipeline only
//! needs `classify(image, top_k)` plus a way to load the backend once.
//! Keeping the seam as two small traits lets the pipeline run against an
//! ONNX session, a remote service, or a deterministic fake in tests.

use crate::core::TagError;
use crate::domain::RawPrediction;
use image::RgbImage;
use std::sync::Arc;

/// A loaded image-classification capability.
///
/// Implementations must be shareable read-only across concurrent
/// classification calls; `classify` takes `&self` and must not mutate
/// the backend.
pub trait ImageClassifier: Send + Sync {
    /// Classifies one image into an ordered list of at most `top_k`
    /// (label, probability) candidates, most probable first.
    ///
    /// Probabilities need not sum to 1 across the returned subset.
    ///
    /// # Errors
    ///
    /// Returns `TagError::Inference` when the backend is unavailable or
    /// the call fails.
    fn classify(&self, image: &RgbImage, top_k: usize) -> Result<Vec<RawPrediction>, TagError>;
}

/// One-time loader for a classifier backend.
///
/// Loading may be slow (model fetch, session creation); the pipeline
/// invokes it at most once per process through
/// [`ClassifierHandle`](crate::core::ClassifierHandle).
pub trait ClassifierProvider: Send + Sync {
    /// Loads the backend and returns the shared classify capability.
    ///
    /// # Errors
    ///
    /// Returns `TagError::Inference` when the backend cannot be brought
    /// up; the pipeline will retry the load on the next call.
    fn load(&self) -> Result<Arc<dyn ImageClassifier>, TagError>;
}
