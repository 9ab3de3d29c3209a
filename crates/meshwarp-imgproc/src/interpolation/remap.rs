use crate::parallel;

use super::interpolate::interpolate_pixel;
use super::AntialiasKernel;
use meshwarp_image::{Image, ImageError};

/// Apply generic geometric transformation to an image.
///
/// Every destination pixel `(x, y)` is sampled from the source at
/// `(map_x[y, x], map_y[y, x])` with the given kernel.
///
/// # Arguments
///
/// * `src` - The input image container with shape (height, width, C).
/// * `dst` - The output image container with shape (height, width, C).
/// * `map_x` - The x coordinates of the pixels to interpolate.
/// * `map_y` - The y coordinates of the pixels to interpolate.
/// * `kernel` - The antialias kernel to use.
///
/// # Errors
///
/// * The map_x and map_y must have the same size.
/// * The output image must have the same size as the map_x and map_y.
/// * The source image must not be empty unless the output is.
pub fn remap<const C: usize>(
    src: &Image<f32, C>,
    dst: &mut Image<f32, C>,
    map_x: &Image<f32, 1>,
    map_y: &Image<f32, 1>,
    kernel: AntialiasKernel,
) -> Result<(), ImageError> {
    if map_x.size() != map_y.size() {
        return Err(ImageError::InvalidImageSize(
            map_x.width(),
            map_x.height(),
            map_y.width(),
            map_y.height(),
        ));
    }

    if dst.size() != map_x.size() {
        return Err(ImageError::InvalidImageSize(
            map_x.width(),
            map_x.height(),
            dst.width(),
            dst.height(),
        ));
    }

    if dst.as_slice().is_empty() {
        return Ok(());
    }

    if src.as_slice().is_empty() {
        return Err(ImageError::InvalidImageSize(
            src.width(),
            src.height(),
            dst.width(),
            dst.height(),
        ));
    }

    // parallelize the remap operation by rows
    parallel::par_iter_rows_resample(dst, map_x, map_y, |&x, &y, dst_pixel| {
        dst_pixel.copy_from_slice(&interpolate_pixel(src, x, y, kernel));
    });

    Ok(())
}

#[cfg(test)]
mod tests {
    use meshwarp_image::{Image, ImageError, ImageSize};

    use super::AntialiasKernel;

    #[test]
    fn remap_smoke() -> Result<(), ImageError> {
        let image = Image::<_, 1>::new(
            ImageSize {
                width: 3,
                height: 3,
            },
            vec![0f32, 1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0],
        )?;

        let new_size = ImageSize::from([2, 2]);

        let map_x = Image::<_, 1>::new(new_size, vec![0.0, 2.0, 0.0, 2.0])?;
        let map_y = Image::<_, 1>::new(new_size, vec![0.0, 0.0, 2.0, 2.0])?;

        let expected = Image::<_, 1>::new(new_size, vec![0.0, 2.0, 6.0, 8.0])?;

        let mut image_transformed = Image::<_, 1>::from_size_val(new_size, 0.0)?;

        for kernel in AntialiasKernel::ALL {
            super::remap(
                &image,
                &mut image_transformed,
                &map_x,
                &map_y,
                kernel,
            )?;
            assert_eq!(image_transformed, expected);
        }

        Ok(())
    }

    #[test]
    fn remap_size_mismatch() -> Result<(), ImageError> {
        let image = Image::<f32, 1>::from_size_val(ImageSize::from([3, 3]), 0.0)?;
        let map = Image::<f32, 1>::from_size_val(ImageSize::from([2, 2]), 0.0)?;
        let mut dst = Image::<f32, 1>::from_size_val(ImageSize::from([3, 2]), 0.0)?;
        assert_eq!(
            super::remap(&image, &mut dst, &map, &map, AntialiasKernel::Nearest),
            Err(ImageError::InvalidImageSize(2, 2, 3, 2))
        );
        Ok(())
    }
}
