use std::f32::consts::PI;

use meshwarp_image::Image;

/// Largest supported number of taps per axis, reached with `a = 4`.
const MAX_TAPS: usize = 8;

/// The Lanczos window `a * sin(pi x) * sin(pi x / a) / (pi x)^2` for `|x| < a`.
#[inline]
fn lanczos_weight(x: f32, a: f32) -> f32 {
    if x == 0.0 {
        return 1.0;
    }
    if x.abs() >= a {
        return 0.0;
    }
    let px = PI * x;
    a * px.sin() * (px / a).sin() / (px * px)
}

/// Normalized weights of the `2a` taps starting at offset `1 - a` from `floor(u)`.
fn tap_weights(frac: f32, a: usize) -> [f32; MAX_TAPS] {
    let mut weights = [0.0; MAX_TAPS];
    let mut sum = 0.0;
    for (i, w) in weights.iter_mut().take(2 * a).enumerate() {
        let offset = i as f32 + 1.0 - a as f32;
        *w = lanczos_weight(frac - offset, a as f32);
        sum += *w;
    }
    if sum != 0.0 {
        weights.iter_mut().for_each(|w| *w /= sum);
    }
    weights
}

/// Kernel for Lanczos interpolation with window size `a`.
///
/// The kernel covers a `2a x 2a` neighbourhood around the sample. Neighbours outside
/// the image are clamped to the border and the weights are normalized to sum to one
/// along each axis.
///
/// # Arguments
///
/// * `image` - The input image container.
/// * `u` - The x coordinate of the pixel to interpolate.
/// * `v` - The y coordinate of the pixel to interpolate.
/// * `a` - The window size, at most 4.
///
/// # Returns
///
/// The interpolated pixel values.
pub(crate) fn lanczos_interpolation<const C: usize>(
    image: &Image<f32, C>,
    u: f32,
    v: f32,
    a: usize,
) -> [f32; C] {
    debug_assert!((1..=MAX_TAPS / 2).contains(&a));
    let (rows, cols) = (image.rows(), image.cols());
    let data = image.as_slice();

    let u = u.clamp(0.0, (cols - 1) as f32);
    let v = v.clamp(0.0, (rows - 1) as f32);
    let (u0, v0) = (u.floor(), v.floor());
    let (frac_u, frac_v) = (u - u0, v - v0);

    let mut pixel = [0.0; C];

    // exact hit, no filtering needed
    if frac_u == 0.0 && frac_v == 0.0 {
        let base = (v0 as usize * cols + u0 as usize) * C;
        pixel.copy_from_slice(&data[base..base + C]);
        return pixel;
    }

    let wx = tap_weights(frac_u, a);
    let wy = tap_weights(frac_v, a);
    let x_start = u0 as isize + 1 - a as isize;
    let y_start = v0 as isize + 1 - a as isize;

    for (j, &w_row) in wy.iter().take(2 * a).enumerate() {
        if w_row == 0.0 {
            continue;
        }
        let y = (y_start + j as isize).clamp(0, rows as isize - 1) as usize;
        for (i, &w_col) in wx.iter().take(2 * a).enumerate() {
            let x = (x_start + i as isize).clamp(0, cols as isize - 1) as usize;
            let w = w_row * w_col;
            let base = (y * cols + x) * C;
            for k in 0..C {
                pixel[k] += w * data[base + k];
            }
        }
    }

    pixel
}
