//! The core module of the tagging pipeline.
//!
//! This module contains the fundamental components of the pipeline:
//! - Error handling
//! - Configuration management
//! - The classifier capability traits and their process-lifetime handle
//! - Cooperative cancellation
//!
//! It also provides re-exports of commonly used types for convenience.

pub mod cancel;
pub mod config;
pub mod errors;
pub mod handle;
pub mod traits;

pub use cancel::CancelToken;
pub use config::{
    default_photometric_configs, PhotometricConfig, ResizeFilter, TaggerConfig,
};
pub use errors::{ProcessingStage, TagError, TagResult};
pub use handle::ClassifierHandle;
pub use traits::{ClassifierProvider, ImageClassifier};

/// Initializes the tracing subscriber for logging.
///
/// This sets up the tracing subscriber with an environment filter and a
/// formatting layer. It is typically called once at application startup;
/// the library itself never installs a subscriber.
pub fn init_tracing() {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::layer())
        .init();
}
