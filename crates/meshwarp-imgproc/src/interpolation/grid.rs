use meshwarp_image::{Image, ImageError, ImageSize};

use crate::parallel;

/// Create a meshgrid of sample coordinates by filling whole rows with `f(y, xs, ys)`.
///
/// The rows are filled in parallel, so `f` can share per-row setup between the
/// pixels of a row.
///
/// # Arguments
///
/// * `size` - The size of the grid.
/// * `f` - Fills the x and y coordinates of row `y`.
///
/// # Returns
///
/// A tuple of single channel images containing the x and y coordinate of every pixel.
pub fn meshgrid_from_rows(
    size: ImageSize,
    f: impl Fn(usize, &mut [f32], &mut [f32]) + Send + Sync,
) -> Result<(Image<f32, 1>, Image<f32, 1>), ImageError> {
    let mut map_x = Image::from_size_val(size, 0.0)?;
    let mut map_y = Image::from_size_val(size, 0.0)?;
    parallel::par_iter_rows_grid(&mut map_x, &mut map_y, f);
    Ok((map_x, map_y))
}
