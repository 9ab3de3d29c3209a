mod mesh;
mod quad;

pub use mesh::{mesh_sample_grid, warp_image, warp_mesh};
pub use quad::{bilinear_forward, bilinear_inverse};
