#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]

/// Warping and morphing of images whose pixel layout is only known at runtime.
pub mod dynamic;

/// Error types for the warp and morph operations.
pub mod error;

/// utilities for interpolation.
pub mod interpolation;

/// two-image morphing module.
pub mod morph;

/// module containing parallelization utilities.
pub mod parallel;

/// mesh based geometric transformations module.
pub mod warp;

pub use crate::error::WarpError;
pub use crate::interpolation::AntialiasKernel;
