use crate::{Image, ImageDtype, ImageError};

/// Convert the pixel data of an image to a different sample type, scaling it on the way.
///
/// Every sample is widened to `f32`, multiplied by `scale` and narrowed with
/// [`ImageDtype::from_f32`], so integer targets are rounded and saturated.
///
/// # Arguments
///
/// * `src` - The source image.
/// * `dst` - The destination image.
/// * `scale` - The scale to multiply the pixel data with.
///
/// Example:
///
/// ```
/// use meshwarp_image::{Image, ImageSize};
/// use meshwarp_image::ops::cast_and_scale;
///
/// let image = Image::<u16, 1>::new(
///     ImageSize {
///         width: 2,
///         height: 1,
///     },
///     vec![0u16, 65535],
/// ).unwrap();
///
/// let mut image_u8 = Image::<u8, 1>::from_size_val(image.size(), 0).unwrap();
///
/// cast_and_scale(&image, &mut image_u8, 1. / 257.0).unwrap();
///
/// assert_eq!(image_u8.as_slice(), &[0, 255]);
/// ```
pub fn cast_and_scale<T, U, const C: usize>(
    src: &Image<T, C>,
    dst: &mut Image<U, C>,
    scale: f32,
) -> Result<(), ImageError>
where
    T: ImageDtype,
    U: ImageDtype,
{
    if src.size() != dst.size() {
        return Err(ImageError::InvalidImageSize(
            src.width(),
            src.height(),
            dst.width(),
            dst.height(),
        ));
    }

    dst.as_slice_mut()
        .iter_mut()
        .zip(src.as_slice().iter())
        .for_each(|(out, &inp)| {
            let x: f32 = inp.into();
            *out = U::from_f32(x * scale);
        });

    Ok(())
}
