//! Image processing for the tagging pipeline.
//!
//! Two processors feed the inference stage: the footprint resize that
//! prepares the base image, and the photometric filter stack that
//! renders each ensemble variant.

pub mod photometric;
pub mod resize;

pub use photometric::apply_photometric;
pub use resize::{footprint_dimensions, resize_to_footprint};
