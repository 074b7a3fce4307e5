//! Configuration for the tagging pipeline.
//!
//! All tunable parameters of the pipeline live in [`TaggerConfig`]: the
//! classifier input footprint, the photometric variant set, the top-k
//! depth, and the two calibration constants (score cutoff and sigmoid
//! steepness). The defaults are tuned for a MobileNet-class 1000-label
//! backbone; none of them is derived from calibration data, so all are
//! overridable, either programmatically or from JSON.

use crate::core::TagError;
use image::imageops::FilterType;
use serde::{Deserialize, Serialize};

/// Resize filter selection, a serde-friendly mirror of
/// [`image::imageops::FilterType`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResizeFilter {
    /// Nearest neighbor
    Nearest,
    /// Linear (triangle) filter
    Triangle,
    /// Cubic (Catmull-Rom) filter
    CatmullRom,
    /// Gaussian filter
    Gaussian,
    /// Lanczos filter with window 3
    #[default]
    Lanczos3,
}

impl From<ResizeFilter> for FilterType {
    fn from(filter: ResizeFilter) -> Self {
        match filter {
            ResizeFilter::Nearest => FilterType::Nearest,
            ResizeFilter::Triangle => FilterType::Triangle,
            ResizeFilter::CatmullRom => FilterType::CatmullRom,
            ResizeFilter::Gaussian => FilterType::Gaussian,
            ResizeFilter::Lanczos3 => FilterType::Lanczos3,
        }
    }
}

/// A named photometric transform descriptor.
///
/// Multipliers are applied to each pixel in order: contrast, then
/// brightness, then saturation. `1.0` everywhere is the identity.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PhotometricConfig {
    /// Contrast multiplier around mid-gray.
    pub contrast: f32,
    /// Brightness multiplier.
    pub brightness: f32,
    /// Saturation multiplier (0.0 is grayscale).
    pub saturation: f32,
}

impl PhotometricConfig {
    /// The identity transform.
    pub const IDENTITY: Self = Self {
        contrast: 1.0,
        brightness: 1.0,
        saturation: 1.0,
    };

    /// Creates a new photometric config.
    pub fn new(contrast: f32, brightness: f32, saturation: f32) -> Self {
        Self {
            contrast,
            brightness,
            saturation,
        }
    }
}

/// The default variant set: mild enhance, identity, mild reduce.
///
/// The slice order is the deterministic iteration order used for
/// tie-break stability downstream; the set itself carries no ordering
/// semantics.
pub fn default_photometric_configs() -> Vec<PhotometricConfig> {
    vec![
        PhotometricConfig::new(1.2, 1.1, 1.1),
        PhotometricConfig::IDENTITY,
        PhotometricConfig::new(0.9, 0.95, 0.9),
    ]
}

/// Configuration for the end-to-end tagging pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TaggerConfig {
    /// Classifier input edge length; the larger source dimension is
    /// scaled down to this, the other proportionally.
    pub input_edge: u32,
    /// Filter used for the footprint resize.
    pub resize_filter: ResizeFilter,
    /// Quality of the lossy re-encode each variant is round-tripped
    /// through (1..=100).
    pub jpeg_quality: u8,
    /// Number of candidates requested from the classifier per variant.
    pub top_k: usize,
    /// Maximum number of labels kept after aggregation.
    pub max_results: usize,
    /// Labels with an aggregated score at or below this are dropped
    /// before confidence remapping (exclusive boundary).
    pub score_threshold: f32,
    /// Steepness of the sigmoid confidence remap.
    pub sigmoid_steepness: f32,
    /// Photometric variant set, iterated in slice order.
    pub photometric_configs: Vec<PhotometricConfig>,
}

impl Default for TaggerConfig {
    fn default() -> Self {
        Self {
            input_edge: 224,
            resize_filter: ResizeFilter::default(),
            jpeg_quality: 95,
            top_k: 7,
            max_results: 3,
            score_threshold: 0.18,
            sigmoid_steepness: 2.0,
            photometric_configs: default_photometric_configs(),
        }
    }
}

impl TaggerConfig {
    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns `TagError::Config` describing the first invalid parameter.
    pub fn validate(&self) -> Result<(), TagError> {
        if self.input_edge == 0 {
            return Err(TagError::config("input_edge must be greater than 0"));
        }
        if self.jpeg_quality == 0 || self.jpeg_quality > 100 {
            return Err(TagError::config("jpeg_quality must be in 1..=100"));
        }
        if self.top_k == 0 {
            return Err(TagError::config("top_k must be greater than 0"));
        }
        if self.max_results == 0 {
            return Err(TagError::config("max_results must be greater than 0"));
        }
        if !(0.0..1.0).contains(&self.score_threshold) {
            return Err(TagError::config("score_threshold must be in [0, 1)"));
        }
        if self.sigmoid_steepness <= 0.0 {
            return Err(TagError::config("sigmoid_steepness must be positive"));
        }
        if self.photometric_configs.is_empty() {
            return Err(TagError::config(
                "at least one photometric config is required",
            ));
        }
        Ok(())
    }

    /// Loads and validates a configuration from JSON.
    ///
    /// Missing fields fall back to their defaults.
    ///
    /// # Errors
    ///
    /// Returns `TagError::Config` if the JSON is malformed or a
    /// parameter is out of range.
    pub fn from_json(json: &str) -> Result<Self, TagError> {
        let config: Self = serde_json::from_str(json)
            .map_err(|e| TagError::config(format!("invalid tagger config JSON: {e}")))?;
        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = TaggerConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.input_edge, 224);
        assert_eq!(config.top_k, 7);
        assert_eq!(config.max_results, 3);
        assert_eq!(config.photometric_configs.len(), 3);
    }

    #[test]
    fn test_variant_set_order_is_enhance_identity_reduce() {
        let configs = default_photometric_configs();
        assert_eq!(configs[0], PhotometricConfig::new(1.2, 1.1, 1.1));
        assert_eq!(configs[1], PhotometricConfig::IDENTITY);
        assert_eq!(configs[2], PhotometricConfig::new(0.9, 0.95, 0.9));
    }

    #[test]
    fn test_invalid_quality_rejected() {
        let config = TaggerConfig {
            jpeg_quality: 0,
            ..TaggerConfig::default()
        };
        assert!(config.validate().is_err());

        let config = TaggerConfig {
            jpeg_quality: 101,
            ..TaggerConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_empty_variant_set_rejected() {
        let config = TaggerConfig {
            photometric_configs: vec![],
            ..TaggerConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_from_json_partial_override() {
        let config = TaggerConfig::from_json(r#"{"score_threshold": 0.25, "top_k": 5}"#)
            .expect("valid JSON config");
        assert_eq!(config.score_threshold, 0.25);
        assert_eq!(config.top_k, 5);
        // Untouched fields keep their defaults.
        assert_eq!(config.input_edge, 224);
        assert_eq!(config.sigmoid_steepness, 2.0);
    }

    #[test]
    fn test_from_json_rejects_out_of_range() {
        assert!(TaggerConfig::from_json(r#"{"score_threshold": 1.5}"#).is_err());
        assert!(TaggerConfig::from_json("not json").is_err());
    }
}
