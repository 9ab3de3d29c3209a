use meshwarp_image::DynamicImage;
use meshwarp_mesh::MeshGrid;

use crate::error::WarpError;
use crate::interpolation::AntialiasKernel;
use crate::morph::morph;
use crate::warp::warp_image;

/// Apply `$op` to the typed image inside a natively supported variant, keeping the
/// variant, or fall through to `$fallback` for the other layouts.
macro_rules! dispatch_native {
    ($img:expr, |$typed:ident| $op:expr, $fallback:expr) => {
        match $img {
            DynamicImage::Gray8($typed) => DynamicImage::Gray8($op),
            DynamicImage::Gray16($typed) => DynamicImage::Gray16($op),
            DynamicImage::Alpha8($typed) => DynamicImage::Alpha8($op),
            DynamicImage::Rgba8($typed) => DynamicImage::Rgba8($op),
            DynamicImage::PremultipliedRgba8($typed) => DynamicImage::PremultipliedRgba8($op),
            DynamicImage::Rgba16($typed) => DynamicImage::Rgba16($op),
            DynamicImage::Cmyk8($typed) => DynamicImage::Cmyk8($op),
            DynamicImage::Rgb8(_) | DynamicImage::GrayAlpha8(_) => $fallback,
        }
    };
}

/// Warp an image whose pixel layout is only known at runtime.
///
/// One and four channel layouts are warped as they are and keep their layout.
/// Any other layout is converted to [`DynamicImage::Rgba8`] first and the result
/// stays in that representation.
///
/// See [`warp_image`] for the meaning of the other arguments.
///
/// # Example
///
/// ```
/// use meshwarp_image::{DynamicImage, Image, ImageSize, PixelFormat};
/// use meshwarp_imgproc::{dynamic::warp_dynamic, AntialiasKernel};
/// use meshwarp_mesh::MeshGrid;
///
/// let size = ImageSize { width: 8, height: 8 };
/// let rgb = DynamicImage::Rgb8(Image::from_size_val(size, 9).unwrap());
/// let mesh = MeshGrid::new_regular(4, 4, 8, 8);
///
/// let out = warp_dynamic(&rgb, &mesh, &mesh, 1.0, AntialiasKernel::Nearest).unwrap();
/// assert_eq!(out.format(), PixelFormat::Rgba8);
/// ```
pub fn warp_dynamic(
    img: &DynamicImage,
    src_mesh: &MeshGrid,
    dst_mesh: &MeshGrid,
    t: f64,
    kernel: AntialiasKernel,
) -> Result<DynamicImage, WarpError> {
    Ok(dispatch_native!(
        img,
        |typed| warp_image(typed, src_mesh, dst_mesh, t, kernel)?,
        DynamicImage::Rgba8(warp_image(&img.to_rgba8(), src_mesh, dst_mesh, t, kernel)?)
    ))
}

/// Morph two images whose pixel layouts are only known at runtime.
///
/// When both images share a natively supported layout the morph runs on that layout.
/// Otherwise both are converted to [`DynamicImage::Rgba8`] and the result is
/// emitted in that representation.
///
/// See [`morph`] for the meaning of the other arguments.
pub fn morph_dynamic(
    src_img: &DynamicImage,
    dst_img: &DynamicImage,
    src_mesh: &MeshGrid,
    dst_mesh: &MeshGrid,
    t: f64,
    kernel: AntialiasKernel,
) -> Result<DynamicImage, WarpError> {
    let canonical = || -> Result<DynamicImage, WarpError> {
        log::debug!(
            "morphing {:?} with {:?} through the canonical RGBA representation",
            src_img.format(),
            dst_img.format()
        );
        Ok(DynamicImage::Rgba8(morph(
            &src_img.to_rgba8(),
            &dst_img.to_rgba8(),
            src_mesh,
            dst_mesh,
            t,
            kernel,
        )?))
    };

    let out = match (src_img, dst_img) {
        (DynamicImage::Gray8(a), DynamicImage::Gray8(b)) => {
            DynamicImage::Gray8(morph(a, b, src_mesh, dst_mesh, t, kernel)?)
        }
        (DynamicImage::Gray16(a), DynamicImage::Gray16(b)) => {
            DynamicImage::Gray16(morph(a, b, src_mesh, dst_mesh, t, kernel)?)
        }
        (DynamicImage::Alpha8(a), DynamicImage::Alpha8(b)) => {
            DynamicImage::Alpha8(morph(a, b, src_mesh, dst_mesh, t, kernel)?)
        }
        (DynamicImage::Rgba8(a), DynamicImage::Rgba8(b)) => {
            DynamicImage::Rgba8(morph(a, b, src_mesh, dst_mesh, t, kernel)?)
        }
        (DynamicImage::PremultipliedRgba8(a), DynamicImage::PremultipliedRgba8(b)) => {
            DynamicImage::PremultipliedRgba8(morph(a, b, src_mesh, dst_mesh, t, kernel)?)
        }
        (DynamicImage::Rgba16(a), DynamicImage::Rgba16(b)) => {
            DynamicImage::Rgba16(morph(a, b, src_mesh, dst_mesh, t, kernel)?)
        }
        (DynamicImage::Cmyk8(a), DynamicImage::Cmyk8(b)) => {
            DynamicImage::Cmyk8(morph(a, b, src_mesh, dst_mesh, t, kernel)?)
        }
        _ => canonical()?,
    };

    Ok(out)
}
