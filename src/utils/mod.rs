//! Utility functions for the tagging pipeline.

pub mod image;

pub use self::image::decode_image;
