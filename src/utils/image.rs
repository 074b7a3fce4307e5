//! Image decoding utilities.

use crate::core::TagError;
use image::RgbImage;

/// Decodes an in-memory image payload into an RGB image.
///
/// Any raster format supported by the `image` crate is accepted
/// (JPEG and PNG at minimum).
///
/// # Errors
///
/// Returns `TagError::Decode` if the payload is malformed or the format
/// is unsupported. Decode failures are never retried.
pub fn decode_image(bytes: &[u8]) -> Result<RgbImage, TagError> {
    let decoded = image::load_from_memory(bytes).map_err(TagError::Decode)?;
    Ok(decoded.to_rgb8())
}
