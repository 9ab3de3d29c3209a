use meshwarp_image::{ImageError, ImageSize};
use meshwarp_mesh::MeshError;

/// An error type for the warp and morph operations.
#[derive(thiserror::Error, Debug, PartialEq)]
pub enum WarpError {
    /// The meshes could not be combined.
    #[error(transparent)]
    Mesh(#[from] MeshError),

    /// An image buffer was rejected.
    #[error(transparent)]
    Image(#[from] ImageError),

    /// The two images to morph do not have the same size.
    #[error("Images to morph must have the same size, got {0} and {1}")]
    ImageSizeMismatch(ImageSize, ImageSize),

    /// The antialiasing kernel name is not known.
    #[error("Unknown antialias kernel {0:?}, expected one of nearest, bilinear, lanczos, lanczos4")]
    UnknownKernel(String),
}
