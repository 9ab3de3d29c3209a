#![doc = env!("CARGO_PKG_DESCRIPTION")]

#[doc(inline)]
pub use meshwarp_image as image;

#[doc(inline)]
pub use meshwarp_imgproc as imgproc;

#[doc(inline)]
pub use meshwarp_mesh as mesh;
