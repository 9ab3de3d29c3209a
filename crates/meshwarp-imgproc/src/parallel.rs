use rayon::prelude::*;

use meshwarp_image::Image;

/// Apply a function to each sample of two images in parallel, writing into a third.
///
/// The images are split into rows and the rows are processed by the rayon thread pool.
pub fn par_iter_rows_val_two<T1, T2, T3, const C: usize>(
    src1: &Image<T1, C>,
    src2: &Image<T2, C>,
    dst: &mut Image<T3, C>,
    f: impl Fn(&T1, &T2, &mut T3) + Send + Sync,
) where
    T1: Send + Sync,
    T2: Send + Sync,
    T3: Send + Sync,
{
    let row_len = C * src1.cols();
    if row_len == 0 {
        return;
    }
    src1.as_slice()
        .par_chunks_exact(row_len)
        .zip(src2.as_slice().par_chunks_exact(row_len))
        .zip(dst.as_slice_mut().par_chunks_exact_mut(row_len))
        .for_each(|((src1_chunk, src2_chunk), dst_chunk)| {
            src1_chunk
                .iter()
                .zip(src2_chunk.iter())
                .zip(dst_chunk.iter_mut())
                .for_each(|((src1_val, src2_val), dst_val)| {
                    f(src1_val, src2_val, dst_val);
                });
        });
}

/// Apply a function to each pixel for grid sampling in parallel.
///
/// `map_x` and `map_y` hold, for every destination pixel, the source coordinate to
/// sample. They must have the same size as `dst`.
pub fn par_iter_rows_resample<const C: usize>(
    dst: &mut Image<f32, C>,
    map_x: &Image<f32, 1>,
    map_y: &Image<f32, 1>,
    f: impl Fn(&f32, &f32, &mut [f32]) + Send + Sync,
) {
    let cols = dst.cols();
    if cols == 0 {
        return;
    }
    let dst_slice = dst.as_slice_mut();
    let map_x_slice = map_x.as_slice();
    let map_y_slice = map_y.as_slice();

    dst_slice
        .par_chunks_exact_mut(C * cols)
        .zip(map_x_slice.par_chunks_exact(cols))
        .zip(map_y_slice.par_chunks_exact(cols))
        .for_each(|((dst_chunk, map_x_chunk), map_y_chunk)| {
            dst_chunk
                .chunks_exact_mut(C)
                .zip(map_x_chunk.iter().zip(map_y_chunk.iter()))
                .for_each(|(dst_pixel, (x, y))| {
                    f(x, y, dst_pixel);
                });
        });
}

/// Fill a pair of coordinate maps row by row in parallel.
///
/// `f` receives the row index and the mutable x and y rows of the maps, so any
/// per-row setup is done once per row.
pub fn par_iter_rows_grid(
    map_x: &mut Image<f32, 1>,
    map_y: &mut Image<f32, 1>,
    f: impl Fn(usize, &mut [f32], &mut [f32]) + Send + Sync,
) {
    let cols = map_x.cols();
    if cols == 0 {
        return;
    }
    map_x
        .as_slice_mut()
        .par_chunks_exact_mut(cols)
        .zip(map_y.as_slice_mut().par_chunks_exact_mut(cols))
        .enumerate()
        .for_each(|(row, (xs, ys))| f(row, xs, ys));
}
