//! Photometric variant rendering.
//!
//! Each classification call renders the base image through a small stack
//! of photometric filters (contrast, brightness, saturation multipliers)
//! and then round-trips the result through a lossy JPEG encode at fixed
//! quality. The round trip normalizes color-space artifacts introduced
//! by the filter stack so variants match what the classifier saw during
//! its own training-time preprocessing.

use crate::core::{PhotometricConfig, ProcessingStage, TagError};
use image::codecs::jpeg::JpegEncoder;
use image::{Rgb, RgbImage};
use imageproc::map::map_colors;

/// Rec. 709 luma weights used by the saturation filter.
const LUMA_WEIGHTS: [f32; 3] = [0.2126, 0.7152, 0.0722];

/// Renders one photometric variant of the base image.
///
/// The filter stack is applied per pixel in order contrast, brightness,
/// saturation, then the surface is re-encoded as JPEG at the given
/// quality and decoded again. The returned variant is owned by the
/// caller and released when dropped.
///
/// # Errors
///
/// Returns `TagError::Processing` if the re-encode round trip fails.
pub fn apply_photometric(
    base: &RgbImage,
    config: &PhotometricConfig,
    jpeg_quality: u8,
) -> Result<RgbImage, TagError> {
    let filtered = map_colors(base, |pixel| filter_pixel(pixel, config));
    reencode(&filtered, jpeg_quality)
}

/// Applies the filter stack to a single pixel on the unit scale.
fn filter_pixel(pixel: Rgb<u8>, config: &PhotometricConfig) -> Rgb<u8> {
    let mut channels = pixel.0.map(|c| c as f32 / 255.0);

    for channel in &mut channels {
        *channel = (*channel - 0.5) * config.contrast + 0.5;
        *channel *= config.brightness;
    }

    let luma = channels[0] * LUMA_WEIGHTS[0]
        + channels[1] * LUMA_WEIGHTS[1]
        + channels[2] * LUMA_WEIGHTS[2];
    for channel in &mut channels {
        *channel = luma + (*channel - luma) * config.saturation;
    }

    Rgb(channels.map(|c| (c.clamp(0.0, 1.0) * 255.0).round() as u8))
}

/// Round-trips a filtered surface through a lossy JPEG encode.
fn reencode(image: &RgbImage, quality: u8) -> Result<RgbImage, TagError> {
    let mut encoded = Vec::new();
    let mut encoder = JpegEncoder::new_with_quality(&mut encoded, quality);
    encoder.encode_image(image).map_err(|e| {
        TagError::processing(
            ProcessingStage::Reencode,
            "jpeg encode of filtered variant",
            e,
        )
    })?;

    let decoded = image::load_from_memory(&encoded).map_err(|e| {
        TagError::processing(
            ProcessingStage::Reencode,
            "decode of re-encoded variant",
            e,
        )
    })?;
    Ok(decoded.to_rgb8())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn solid_image(width: u32, height: u32, color: [u8; 3]) -> RgbImage {
        RgbImage::from_pixel(width, height, Rgb(color))
    }

    fn mean_channel(image: &RgbImage, channel: usize) -> f32 {
        let sum: u64 = image.pixels().map(|p| p.0[channel] as u64).sum();
        sum as f32 / (image.width() * image.height()) as f32
    }

    #[test]
    fn test_identity_preserves_dimensions_and_color() {
        let base = solid_image(32, 24, [120, 60, 200]);
        let variant = apply_photometric(&base, &PhotometricConfig::IDENTITY, 95)
            .expect("identity variant renders");

        assert_eq!((variant.width(), variant.height()), (32, 24));
        // The JPEG round trip may shift channels slightly but not far.
        for channel in 0..3 {
            let drift = (mean_channel(&variant, channel) - base.get_pixel(0, 0).0[channel] as f32)
                .abs();
            assert!(drift < 4.0, "channel {channel} drifted by {drift}");
        }
    }

    #[test]
    fn test_brightness_raises_luminance() {
        let base = solid_image(32, 32, [100, 100, 100]);
        let config = PhotometricConfig::new(1.0, 1.2, 1.0);
        let variant = apply_photometric(&base, &config, 95).expect("variant renders");

        let brightened = mean_channel(&variant, 0);
        assert!(
            (brightened - 120.0).abs() < 4.0,
            "expected ~120, got {brightened}"
        );
    }

    #[test]
    fn test_zero_saturation_is_grayscale() {
        let base = solid_image(32, 32, [200, 40, 90]);
        let config = PhotometricConfig::new(1.0, 1.0, 0.0);
        let variant = apply_photometric(&base, &config, 95).expect("variant renders");

        let r = mean_channel(&variant, 0);
        let g = mean_channel(&variant, 1);
        let b = mean_channel(&variant, 2);
        assert!((r - g).abs() < 4.0 && (g - b).abs() < 4.0, "{r} {g} {b}");
    }

    #[test]
    fn test_contrast_pushes_channels_from_midgray() {
        let config = PhotometricConfig::new(1.5, 1.0, 1.0);
        let bright = filter_pixel(Rgb([200, 200, 200]), &config);
        let dark = filter_pixel(Rgb([60, 60, 60]), &config);
        assert!(bright.0[0] > 200);
        assert!(dark.0[0] < 60);
    }

    #[test]
    fn test_filter_output_is_clamped() {
        let config = PhotometricConfig::new(3.0, 2.0, 1.0);
        let white = filter_pixel(Rgb([250, 250, 250]), &config);
        let black = filter_pixel(Rgb([5, 5, 5]), &config);
        assert_eq!(white, Rgb([255, 255, 255]));
        assert_eq!(black, Rgb([0, 0, 0]));
    }
}
