//! Domain types for the tagging pipeline.

pub mod prediction;

pub use prediction::{AggregatedPrediction, RawPrediction, TagPrediction};
