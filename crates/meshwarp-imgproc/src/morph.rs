use meshwarp_image::{Image, ImageDtype, ImageError};
use meshwarp_mesh::{interpolate_meshes, MeshGrid};

use crate::error::WarpError;
use crate::interpolation::AntialiasKernel;
use crate::parallel;
use crate::warp::warp_image;

/// Cross-dissolve two images.
///
/// The formula used is:
///
/// dst(x,y,c) = (1 - t) * src1(x,y,c) + t * src2(x,y,c)
///
/// The result is rounded half away from zero and saturated by
/// [`ImageDtype::from_f32`].
///
/// # Arguments
///
/// * `src1` - The image weighted by `1 - t`.
/// * `src2` - The image weighted by `t`.
/// * `dst` - The output image.
/// * `t` - The blend fraction.
///
/// # Errors
///
/// Returns an error if the sizes of `src1`, `src2` and `dst` do not match.
pub fn blend<T: ImageDtype, const C: usize>(
    src1: &Image<T, C>,
    src2: &Image<T, C>,
    dst: &mut Image<T, C>,
    t: f32,
) -> Result<(), ImageError> {
    if src1.size() != src2.size() {
        return Err(ImageError::InvalidImageSize(
            src1.cols(),
            src1.rows(),
            src2.cols(),
            src2.rows(),
        ));
    }

    if src1.size() != dst.size() {
        return Err(ImageError::InvalidImageSize(
            src1.width(),
            src1.height(),
            dst.width(),
            dst.height(),
        ));
    }

    let s = 1.0 - t;
    parallel::par_iter_rows_val_two(src1, src2, dst, |&a, &b, out| {
        let (a, b): (f32, f32) = (a.into(), b.into());
        *out = T::from_f32(s * a + t * b);
    });

    Ok(())
}

/// Morph two images toward an intermediate mesh.
///
/// Both images are fully warped onto `interpolate_meshes(src_mesh, dst_mesh, t)`,
/// `src_img` from `src_mesh` and `dst_img` from `dst_mesh`, and the two results are
/// blended with weights `1 - t` and `t`. Only the mesh moves by the fraction `t`;
/// each warp itself always runs to completion.
///
/// # Arguments
///
/// * `src_img` - The image shown at `t = 0`.
/// * `dst_img` - The image shown at `t = 1`.
/// * `src_mesh` - The mesh laid over `src_img`.
/// * `dst_mesh` - The mesh laid over `dst_img`.
/// * `t` - The morph fraction in `[0, 1]`.
/// * `kernel` - The antialias kernel used by both warps.
///
/// # Errors
///
/// Fails if the images differ in size, the meshes are not compatible or `t` lies
/// outside `[0, 1]`.
///
/// # Example
///
/// ```
/// use meshwarp_image::{Image, ImageSize};
/// use meshwarp_imgproc::{morph::morph, AntialiasKernel};
/// use meshwarp_mesh::MeshGrid;
///
/// let size = ImageSize { width: 16, height: 16 };
/// let black = Image::<u8, 1>::from_size_val(size, 0).unwrap();
/// let white = Image::<u8, 1>::from_size_val(size, 200).unwrap();
/// let mesh = MeshGrid::new_regular(4, 4, 16, 16);
///
/// let mid = morph(&black, &white, &mesh, &mesh, 0.25, AntialiasKernel::Bilinear).unwrap();
/// assert!(mid.as_slice().iter().all(|&v| v == 50));
/// ```
pub fn morph<T: ImageDtype, const C: usize>(
    src_img: &Image<T, C>,
    dst_img: &Image<T, C>,
    src_mesh: &MeshGrid,
    dst_mesh: &MeshGrid,
    t: f64,
    kernel: AntialiasKernel,
) -> Result<Image<T, C>, WarpError> {
    if src_img.size() != dst_img.size() {
        return Err(WarpError::ImageSizeMismatch(src_img.size(), dst_img.size()));
    }

    let target = interpolate_meshes(src_mesh, dst_mesh, t)?;

    let warped_src = warp_image(src_img, src_mesh, &target, 1.0, kernel)?;
    let warped_dst = warp_image(dst_img, dst_mesh, &target, 1.0, kernel)?;

    let mut out = Image::from_size_val(src_img.size(), T::default())?;
    blend(&warped_src, &warped_dst, &mut out, t as f32)?;

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use meshwarp_image::ImageSize;
    use meshwarp_mesh::{MeshError, Point};

    fn gradient(size: ImageSize) -> Image<u8, 4> {
        Image::from_fn(size, |x, y| {
            [(x * 8) as u8, (y * 8) as u8, ((x + y) * 4) as u8, 255]
        })
    }

    #[test]
    fn test_blend() -> Result<(), ImageError> {
        let size = ImageSize::from([2, 1]);
        let a = Image::<u8, 1>::new(size, vec![0, 255])?;
        let b = Image::<u8, 1>::new(size, vec![101, 0])?;
        let mut out = Image::<u8, 1>::from_size_val(size, 0)?;

        blend(&a, &b, &mut out, 0.5)?;
        // 50.5 and 127.5 round away from zero
        assert_eq!(out.as_slice(), &[51, 128]);

        blend(&a, &b, &mut out, 0.0)?;
        assert_eq!(out, a);
        blend(&a, &b, &mut out, 1.0)?;
        assert_eq!(out, b);
        Ok(())
    }

    #[test]
    fn test_blend_size_mismatch() -> Result<(), ImageError> {
        let a = Image::<u8, 1>::from_size_val(ImageSize::from([2, 2]), 0)?;
        let b = Image::<u8, 1>::from_size_val(ImageSize::from([2, 3]), 0)?;
        let mut out = a.clone();
        assert_eq!(
            blend(&a, &b, &mut out, 0.5),
            Err(ImageError::InvalidImageSize(2, 2, 2, 3))
        );
        Ok(())
    }

    #[test]
    fn morph_image_onto_itself() -> Result<(), WarpError> {
        let size = ImageSize::from([24, 20]);
        let img = gradient(size);
        let mut mesh = MeshGrid::new_regular(5, 4, 24, 20);
        mesh.set(2, 1, Point::new(12.5, 7.0));
        for kernel in AntialiasKernel::ALL {
            for t in [0.0, 0.4, 1.0] {
                assert_eq!(morph(&img, &img, &mesh, &mesh, t, kernel)?, img);
            }
        }
        Ok(())
    }

    #[test]
    fn morph_endpoints() -> Result<(), WarpError> {
        let size = ImageSize::from([24, 20]);
        let a = gradient(size);
        let b = a.map(|v| 255 - v);
        let m1 = MeshGrid::new_regular(4, 4, 24, 20);
        let mut m2 = m1.clone();
        m2.set(1, 2, m2.get(1, 2) + Point::new(1.5, -1.0));

        let at_start = morph(&a, &b, &m1, &m2, 0.0, AntialiasKernel::Bilinear)?;
        assert_eq!(at_start, a);

        let at_end = morph(&a, &b, &m1, &m2, 1.0, AntialiasKernel::Bilinear)?;
        assert_eq!(at_end, b);
        Ok(())
    }

    #[test]
    fn morph_errors() -> Result<(), ImageError> {
        let a = Image::<u8, 1>::from_size_val(ImageSize::from([8, 8]), 0)?;
        let b = Image::<u8, 1>::from_size_val(ImageSize::from([8, 9]), 0)?;
        let m = MeshGrid::new_regular(4, 4, 8, 8);
        assert_eq!(
            morph(&a, &b, &m, &m, 0.5, AntialiasKernel::Nearest),
            Err(WarpError::ImageSizeMismatch(a.size(), b.size()))
        );
        assert_eq!(
            morph(&a, &a, &m, &m, -0.5, AntialiasKernel::Nearest),
            Err(WarpError::Mesh(MeshError::FractionOutOfRange(-0.5)))
        );
        Ok(())
    }
}
