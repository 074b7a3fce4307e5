//! Cross-variant ensemble aggregation.
//!
//! The per-variant top-k lists are merged into one ranked list with a
//! rank-weighted average per label rather than a plain mean: equal
//! weighting would let one low-probability appearance of a label drag
//! down an otherwise dominant signal, while rank weighting favors each
//! label's best showing and still uses corroboration across variants as
//! a tie-break.

use crate::domain::{AggregatedPrediction, RawPrediction};
use std::cmp::Ordering;
use std::collections::HashMap;

/// Merges per-variant prediction lists into at most `keep` aggregated
/// predictions, sorted by score descending.
///
/// For each label, the observed probabilities are sorted descending and
/// the i-th largest (0-indexed) is weighted `1/(i+1)`; the score is the
/// weighted sum divided by the sum of the same truncated weight series.
/// Labels missing from some variants are not padded with zeros; only
/// observed occurrences count.
///
/// Grouping preserves first-seen label order and the final sort is
/// stable, so equal scores keep that order and repeated runs over
/// identical input produce identical output.
pub fn combine(variant_lists: &[Vec<RawPrediction>], keep: usize) -> Vec<AggregatedPrediction> {
    let mut order: Vec<&str> = Vec::new();
    let mut occurrences: HashMap<&str, Vec<f32>> = HashMap::new();

    for list in variant_lists {
        for prediction in list {
            occurrences
                .entry(prediction.label.as_str())
                .or_insert_with(|| {
                    order.push(prediction.label.as_str());
                    Vec::new()
                })
                .push(prediction.probability);
        }
    }

    let mut aggregated: Vec<AggregatedPrediction> = order
        .into_iter()
        .map(|label| {
            let mut probabilities = occurrences.remove(label).unwrap_or_default();
            probabilities.sort_by(|a, b| b.partial_cmp(a).unwrap_or(Ordering::Equal));

            let mut weighted_sum = 0.0f32;
            let mut weight_norm = 0.0f32;
            for (rank, probability) in probabilities.iter().enumerate() {
                let weight = 1.0 / (rank as f32 + 1.0);
                weighted_sum += probability * weight;
                weight_norm += weight;
            }

            AggregatedPrediction {
                label: label.to_string(),
                score: weighted_sum / weight_norm,
            }
        })
        .collect();

    aggregated.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));
    aggregated.truncate(keep);
    aggregated
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lists(raw: &[&[(&str, f32)]]) -> Vec<Vec<RawPrediction>> {
        raw.iter()
            .map(|list| {
                list.iter()
                    .map(|(label, probability)| RawPrediction::new(*label, *probability))
                    .collect()
            })
            .collect()
    }

    #[test]
    fn test_rank_weighted_average_favors_best_showing() {
        let input = lists(&[&[("husky", 0.9)], &[("husky", 0.4)], &[("husky", 0.3)]]);
        let aggregated = combine(&input, 3);

        // (0.9 + 0.4/2 + 0.3/3) / (1 + 1/2 + 1/3)
        let expected = 1.2 / (1.0 + 0.5 + 1.0 / 3.0);
        assert_eq!(aggregated.len(), 1);
        assert!((aggregated[0].score - expected).abs() < 1e-5);

        // Strictly above the plain mean: the best showing dominates.
        let mean = (0.9 + 0.4 + 0.3) / 3.0;
        assert!(aggregated[0].score > mean);
    }

    #[test]
    fn test_missing_occurrences_are_not_zero_padded() {
        // One strong appearance in a single variant keeps its full score.
        let input = lists(&[&[("husky", 0.9)], &[], &[]]);
        let aggregated = combine(&input, 3);
        assert_eq!(aggregated.len(), 1);
        assert!((aggregated[0].score - 0.9).abs() < 1e-6);
    }

    #[test]
    fn test_repeated_equal_probabilities_do_not_inflate_score() {
        let input = lists(&[
            &[("tabby", 0.5), ("crate", 0.5)],
            &[("tabby", 0.5)],
            &[("tabby", 0.5)],
        ]);
        let aggregated = combine(&input, 3);

        // Same per-occurrence probability: the weighted average is 0.5
        // either way, and the stable sort keeps first-seen order.
        assert_eq!(aggregated[0].label, "tabby");
        assert_eq!(aggregated[1].label, "crate");
        assert!((aggregated[0].score - aggregated[1].score).abs() < 1e-6);
    }

    #[test]
    fn test_sorted_descending_and_truncated() {
        let input = lists(&[&[
            ("a", 0.2),
            ("b", 0.9),
            ("c", 0.5),
            ("d", 0.7),
        ]]);
        let aggregated = combine(&input, 3);

        let labels: Vec<&str> = aggregated.iter().map(|p| p.label.as_str()).collect();
        assert_eq!(labels, vec!["b", "d", "c"]);
    }

    #[test]
    fn test_ties_keep_first_seen_order_deterministically() {
        let input = lists(&[&[("zebra", 0.4), ("ant", 0.4), ("moth", 0.4)]]);
        for _ in 0..10 {
            let aggregated = combine(&input, 3);
            let labels: Vec<&str> = aggregated.iter().map(|p| p.label.as_str()).collect();
            assert_eq!(labels, vec!["zebra", "ant", "moth"]);
        }
    }

    #[test]
    fn test_empty_input_yields_empty_output() {
        assert!(combine(&[], 3).is_empty());
        assert!(combine(&lists(&[&[], &[], &[]]), 3).is_empty());
    }
}
