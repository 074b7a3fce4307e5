//! Label cleanup and confidence remapping.
//!
//! Raw classifier labels arrive as lower-value strings ("Siberian_husky,
//! sled_dog"); this stage turns the survivors of the score cutoff into
//! short human phrases and stretches the raw averaged probability
//! (which clusters near the low end for a 1000-class softmax) into a
//! more legible confidence range.

use crate::domain::{AggregatedPrediction, TagPrediction};

/// Filler words stripped from labels before output.
const STRIP_WORDS: [&str; 6] = ["image", "picture", "photo", "jpg", "jpeg", "png"];

/// Cleans a raw classifier label into a short human phrase.
///
/// Order of operations matters: the comma split happens before the
/// underscore replacement and word filtering, because classifier labels
/// are sometimes comma-joined synonym lists and only the first synonym
/// is kept.
pub fn clean_label(raw: &str) -> String {
    let lowered = raw.to_lowercase();
    let first_synonym = lowered.split(',').next().unwrap_or("");

    first_synonym
        .replace('_', " ")
        .split_whitespace()
        .filter(|word| word.len() > 2 && !STRIP_WORDS.contains(word))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Remaps a raw aggregated score into a calibrated confidence, rounded
/// to three decimal places.
fn remap_confidence(score: f32, steepness: f32) -> f32 {
    let sigmoid = 1.0 / (1.0 + (-score * steepness).exp());
    (sigmoid * 1000.0).round() / 1000.0
}

/// Applies the score cutoff, confidence remap, and label cleanup to the
/// aggregated predictions, preserving their order.
///
/// The cutoff is evaluated on the raw aggregated score, before the
/// sigmoid remap, and is exclusive: a score exactly at the threshold is
/// dropped. An empty result is a valid outcome when every label falls
/// below the cutoff.
pub fn finalize(
    aggregated: Vec<AggregatedPrediction>,
    threshold: f32,
    steepness: f32,
) -> Vec<TagPrediction> {
    aggregated
        .into_iter()
        .filter(|prediction| prediction.score > threshold)
        .map(|prediction| TagPrediction {
            label: clean_label(&prediction.label),
            confidence: remap_confidence(prediction.score, steepness),
        })
        .collect()
}
