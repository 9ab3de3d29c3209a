#![deny(missing_docs)]
//! Control-point meshes used to describe piecewise image deformations.
//!
//! A [`MeshGrid`] is a regular `nx` x `ny` grid of [`Point`]s laid over an image.
//! Two compatible meshes describe a deformation: every quadrilateral cell of the
//! first mesh is mapped onto the matching cell of the second one.

/// Error types for the mesh module.
pub mod error;

/// Mesh interpolation and compatibility checks.
pub mod interpolate;

/// Reading and writing meshes in the M2 text format.
pub mod io;

/// The control-point grid and its editing operations.
pub mod mesh;

/// Floating-point and integer 2D points.
pub mod point;

pub use crate::error::MeshError;
pub use crate::interpolate::{compatible, interpolate_meshes};
pub use crate::mesh::{Direction, MeshGrid, MIN_MESH_LINES};
pub use crate::point::{ImagePoint, Point};
