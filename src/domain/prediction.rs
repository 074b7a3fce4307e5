//! Prediction value types flowing through the tagging pipeline.
//!
//! `RawPrediction` is what the classifier capability emits per variant,
//! `AggregatedPrediction` is the cross-variant score held between the
//! aggregation and normalization stages, and `TagPrediction` is the final
//! JSON-serializable output unit.

use serde::{Deserialize, Serialize};

/// One classifier output for a single image variant.
///
/// Probabilities are in `[0, 1]` but need not sum to 1 across the top-k
/// subset the classifier returns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawPrediction {
    /// Raw label string as emitted by the classifier (may be a
    /// comma-joined synonym list such as `"Siberian_husky, sled_dog"`).
    pub label: String,
    /// Softmax probability for this label on this variant.
    pub probability: f32,
}

impl RawPrediction {
    /// Creates a new raw prediction.
    pub fn new(label: impl Into<String>, probability: f32) -> Self {
        Self {
            label: label.into(),
            probability,
        }
    }
}

/// One label's rank-weighted cross-variant score, before confidence
/// remapping. Ephemeral: produced by the aggregator, consumed by the
/// normalizer.
#[derive(Debug, Clone, PartialEq)]
pub struct AggregatedPrediction {
    /// Raw label string (not yet cleaned).
    pub label: String,
    /// Rank-weighted average probability across the variants that
    /// reported this label.
    pub score: f32,
}

/// Final output unit: a cleaned label with a calibrated confidence.
///
/// At most three are returned per call, sorted by confidence descending,
/// each with `confidence` in `(0, 1]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TagPrediction {
    /// Short human phrase, lower-case.
    pub label: String,
    /// Sigmoid-remapped confidence, rounded to three decimal places.
    pub confidence: f32,
}
