//! The tagging pipeline: fan-out inference, aggregation, normalization,
//! and the end-to-end orchestrator.

pub mod aggregate;
pub mod normalize;
pub mod runner;
pub mod tagger;

pub use aggregate::combine;
pub use normalize::{clean_label, finalize};
pub use runner::run_variants;
pub use tagger::{PhotoTagger, PhotoTaggerBuilder};
