//! Aspect-preserving resize to the classifier input footprint.

use image::imageops::{self, FilterType};
use image::RgbImage;

/// Computes the footprint dimensions for a source of the given size.
///
/// The larger source dimension is scaled to `edge`, the other
/// proportionally, which avoids stretching distortion. Dimensions are
/// rounded and floored at one pixel.
pub fn footprint_dimensions(width: u32, height: u32, edge: u32) -> (u32, u32) {
    let aspect = width as f32 / height as f32;
    let (target_width, target_height) = if width >= height {
        (edge as f32, edge as f32 / aspect)
    } else {
        (edge as f32 * aspect, edge as f32)
    };
    (
        (target_width.round() as u32).max(1),
        (target_height.round() as u32).max(1),
    )
}

/// Resizes the source image to the classifier footprint, preserving
/// aspect ratio.
pub fn resize_to_footprint(image: &RgbImage, edge: u32, filter: FilterType) -> RgbImage {
    let (width, height) = footprint_dimensions(image.width(), image.height(), edge);
    imageops::resize(image, width, height, filter)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_landscape_scales_width_to_edge() {
        assert_eq!(footprint_dimensions(640, 480, 224), (224, 168));
    }

    #[test]
    fn test_portrait_scales_height_to_edge() {
        assert_eq!(footprint_dimensions(480, 640, 224), (168, 224));
    }

    #[test]
    fn test_square_fills_footprint() {
        assert_eq!(footprint_dimensions(512, 512, 224), (224, 224));
    }

    #[test]
    fn test_extreme_aspect_is_floored_at_one_pixel() {
        assert_eq!(footprint_dimensions(10_000, 10, 224), (224, 1));
    }

    #[test]
    fn test_resize_produces_footprint_dimensions() {
        let source = RgbImage::new(640, 480);
        let resized = resize_to_footprint(&source, 224, FilterType::Triangle);
        assert_eq!((resized.width(), resized.height()), (224, 168));
    }
}
