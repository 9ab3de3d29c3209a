//! Pixel interpolation methods used when resampling warped images.
//!
//! # Antialias kernels
//!
//! - **Nearest**: uses the nearest pixel value, no smoothing
//! - **Bilinear**: linear interpolation between the four surrounding pixels
//! - **Lanczos**: windowed sinc over a 4x4 neighbourhood (`a = 2`)
//! - **Lanczos4**: windowed sinc over an 8x8 neighbourhood (`a = 4`)
//!
//! Every kernel clamps neighbour indices at the image border.

mod bilinear;

/// Grid generation and coordinate mapping utilities.
///
/// Functions for generating the per-pixel sampling maps used in image warping.
pub mod grid;

pub(crate) mod interpolate;
mod lanczos;
mod nearest;
mod remap;

pub use interpolate::{interpolate_pixel, AntialiasKernel};
pub use remap::remap;
