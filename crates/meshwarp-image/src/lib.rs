#![deny(missing_docs)]
//! Image types and traits for generating and manipulating images

/// image representation for warping and morphing purposes.
pub mod image;

/// Error types for the image module.
pub mod error;

/// Supported pixel layouts and their canonical RGBA conversion.
pub mod color_spaces;

/// image basic operations module.
pub mod ops;

pub use crate::color_spaces::{DynamicImage, PixelFormat};
pub use crate::error::ImageError;
pub use crate::image::{Image, ImageDtype, ImageSize};
