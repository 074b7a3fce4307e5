//! Variant fan-out across the classifier capability.

use crate::core::{ImageClassifier, PhotometricConfig, TagError};
use crate::domain::RawPrediction;
use crate::processors::apply_photometric;
use image::RgbImage;
use rayon::prelude::*;
use tracing::debug;

/// Renders each photometric variant of the base image and classifies all
/// of them concurrently, returning one top-k list per config in config
/// order.
///
/// The fan-out is all-or-nothing: a single failing variant fails the
/// whole call, because the ensemble needs a consistent full variant set.
/// Each variant is created and dropped inside its own task, so variants
/// are released even when a sibling fails.
///
/// # Errors
///
/// Propagates `TagError::Processing` from variant rendering and
/// `TagError::Inference` from the classifier; neither is retried here.
pub fn run_variants(
    classifier: &dyn ImageClassifier,
    base: &RgbImage,
    configs: &[PhotometricConfig],
    top_k: usize,
    jpeg_quality: u8,
) -> Result<Vec<Vec<RawPrediction>>, TagError> {
    configs
        .par_iter()
        .map(|config| {
            let variant = apply_photometric(base, config, jpeg_quality)?;
            let predictions = classifier.classify(&variant, top_k)?;
            debug!(
                contrast = config.contrast,
                brightness = config.brightness,
                saturation = config.saturation,
                count = predictions.len(),
                "variant classified"
            );
            Ok(predictions)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::default_photometric_configs;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct EchoClassifier {
        calls: AtomicUsize,
        fail_on_call: Option<usize>,
    }

    impl ImageClassifier for EchoClassifier {
        fn classify(
            &self,
            image: &RgbImage,
            top_k: usize,
        ) -> Result<Vec<RawPrediction>, TagError> {
            let call = self.calls.fetch_add(1, Ordering::SeqCst);
            if Some(call) == self.fail_on_call {
                return Err(TagError::inference(
                    "backend not ready",
                    std::io::Error::other("session lost"),
                ));
            }
            // Label every call identically so assertions are
            // order-independent under the parallel fan-out.
            Ok(vec![RawPrediction::new(
                format!("{}x{}", image.width(), image.height()),
                1.0 / top_k as f32,
            )])
        }
    }

    #[test]
    fn test_one_list_per_config_in_order() {
        let classifier = EchoClassifier {
            calls: AtomicUsize::new(0),
            fail_on_call: None,
        };
        let base = RgbImage::new(64, 48);
        let configs = default_photometric_configs();

        let lists = run_variants(&classifier, &base, &configs, 7, 95).expect("fan-out succeeds");

        assert_eq!(lists.len(), configs.len());
        for list in &lists {
            assert_eq!(list.len(), 1);
            // Variants keep the base footprint.
            assert_eq!(list[0].label, "64x48");
        }
        assert_eq!(classifier.calls.load(Ordering::SeqCst), configs.len());
    }

    #[test]
    fn test_single_failing_variant_fails_the_call() {
        let classifier = EchoClassifier {
            calls: AtomicUsize::new(0),
            fail_on_call: Some(1),
        };
        let base = RgbImage::new(32, 32);
        let configs = default_photometric_configs();

        let result = run_variants(&classifier, &base, &configs, 7, 95);
        assert!(matches!(result, Err(TagError::Inference { .. })));
    }
}
