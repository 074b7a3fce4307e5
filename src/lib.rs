//! # phototag
//!
//! Ensemble image tagging for photo galleries. Given an arbitrary
//! uploaded photo, the pipeline produces a small set of clean,
//! confidently-ranked semantic labels from a pretrained general-purpose
//! image classifier, compensating for the classifier's sensitivity to
//! lighting, contrast, and crop.
//!
//! ## How it works
//!
//! - **Preprocess**: decode the payload and resize it to the
//!   classifier's input footprint (aspect-preserving, 224px edge by
//!   default), then render three photometric variants (mild enhance,
//!   identity, mild reduce) with a lossy re-encode round trip.
//! - **Infer**: classify all variants concurrently with top-k depth 7;
//!   a single failing variant fails the call.
//! - **Aggregate**: merge the per-variant lists with a rank-weighted
//!   average per label and keep the top 3.
//! - **Normalize**: drop labels below the score cutoff, remap the rest
//!   through a sigmoid into a legible confidence, and clean the label
//!   strings into short human phrases.
//!
//! The pretrained model itself is an external collaborator, injected
//! through the [`ClassifierProvider`](core::ClassifierProvider) /
//! [`ImageClassifier`](core::ImageClassifier) traits and loaded at most
//! once per process.
//!
//! ## Modules
//!
//! * [`core`] - Errors, configuration, the classifier seam, and the
//!   process-lifetime handle
//! * [`domain`] - Prediction value types
//! * [`pipeline`] - Fan-out inference, aggregation, normalization, and
//!   the orchestrator
//! * [`processors`] - Footprint resize and photometric variant
//!   rendering
//! * [`utils`] - Image decoding helpers
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use phototag::prelude::*;
//! use std::sync::Arc;
//!
//! struct MobileNetProvider;
//!
//! impl ClassifierProvider for MobileNetProvider {
//!     fn load(&self) -> Result<Arc<dyn ImageClassifier>, TagError> {
//!         // Bring up the real backend (ONNX session, remote service, ...).
//!         unimplemented!()
//!     }
//! }
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let tagger = PhotoTagger::builder()
//!         .provider(MobileNetProvider)
//!         .build()?;
//!
//!     let payload = std::fs::read("photo.jpg")?;
//!     for tag in tagger.tag_bytes(&payload)? {
//!         println!("{} ({:.3})", tag.label, tag.confidence);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Configuration
//!
//! Every tunable lives in [`TaggerConfig`](core::TaggerConfig),
//! overridable programmatically or from JSON:
//!
//! ```rust
//! use phototag::core::TaggerConfig;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = TaggerConfig::from_json(r#"
//! {
//!   "score_threshold": 0.25,
//!   "sigmoid_steepness": 2.0,
//!   "top_k": 5
//! }
//! "#)?;
//! assert_eq!(config.top_k, 5);
//! # Ok(())
//! # }
//! ```

pub mod core;
pub mod domain;
pub mod pipeline;
pub mod processors;
pub mod utils;

/// Commonly used types and functions.
pub mod prelude {
    pub use crate::core::{
        CancelToken, ClassifierProvider, ImageClassifier, PhotometricConfig, TagError, TagResult,
        TaggerConfig,
    };
    pub use crate::domain::{RawPrediction, TagPrediction};
    pub use crate::pipeline::{clean_label, PhotoTagger, PhotoTaggerBuilder};
    pub use crate::utils::decode_image;
}
