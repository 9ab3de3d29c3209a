use std::sync::atomic::{AtomicUsize, Ordering};

use meshwarp_image::{ops::cast_and_scale, Image, ImageDtype, ImageSize};
use meshwarp_mesh::{compatible, interpolate_meshes, MeshError, MeshGrid, Point};

use super::quad::{bilinear_forward, bilinear_inverse};
use crate::error::WarpError;
use crate::interpolation::{grid::meshgrid_from_rows, remap, AntialiasKernel};

/// Slack in pixels when testing whether a pixel lies in a cell's bounding box.
const BBOX_EPS: f64 = 1e-6;

/// A pair of matching cells in the target and source meshes.
struct Cell {
    target: [Point; 4],
    source: [Point; 4],
    min: Point,
    max: Point,
}

impl Cell {
    #[inline]
    fn spans_row(&self, y: f64) -> bool {
        self.min.y - BBOX_EPS <= y && y <= self.max.y + BBOX_EPS
    }

    #[inline]
    fn spans_col(&self, x: f64) -> bool {
        self.min.x - BBOX_EPS <= x && x <= self.max.x + BBOX_EPS
    }
}

fn mesh_cells(source: &MeshGrid, target: &MeshGrid) -> Vec<Cell> {
    let mut cells = Vec::with_capacity((target.nx() - 1) * (target.ny() - 1));
    for cy in 0..target.ny() - 1 {
        for cx in 0..target.nx() - 1 {
            let quad = target.cell(cx, cy);
            let (min, max) = quad.iter().skip(1).fold((quad[0], quad[0]), |(lo, hi), p| {
                (
                    Point::new(lo.x.min(p.x), lo.y.min(p.y)),
                    Point::new(hi.x.max(p.x), hi.y.max(p.y)),
                )
            });
            cells.push(Cell {
                target: quad,
                source: source.cell(cx, cy),
                min,
                max,
            });
        }
    }
    cells
}

/// Compute the sampling maps that warp an image from `source` onto `target`.
///
/// For every pixel of an image of the given size, the cell of `target` containing it
/// is located and the cell parameters `(u, v)` of the pixel are solved with
/// [`bilinear_inverse`](super::bilinear_inverse). The sample coordinate is the point
/// with the same parameters in the matching cell of `source`. Pixels that no cell
/// covers sample their own position.
///
/// # Arguments
///
/// * `source` - The mesh laid over the image to sample.
/// * `target` - The mesh describing where the source cells end up.
/// * `size` - The size of the output image.
///
/// # Returns
///
/// The x and y sample coordinate of every output pixel.
///
/// # Errors
///
/// Fails if the meshes are not compatible.
pub fn mesh_sample_grid(
    source: &MeshGrid,
    target: &MeshGrid,
    size: ImageSize,
) -> Result<(Image<f32, 1>, Image<f32, 1>), WarpError> {
    if !compatible(source, target) {
        return Err(MeshError::IncompatibleMeshes(
            source.nx(),
            source.ny(),
            target.nx(),
            target.ny(),
        )
        .into());
    }

    let cells = mesh_cells(source, target);
    let uncovered = AtomicUsize::new(0);

    let maps = meshgrid_from_rows(size, |y, xs, ys| {
        let py = y as f64;
        let row_cells: Vec<&Cell> = cells.iter().filter(|c| c.spans_row(py)).collect();

        let mut missed = 0;
        for (x, (map_x, map_y)) in xs.iter_mut().zip(ys.iter_mut()).enumerate() {
            let p = Point::new(x as f64, py);
            let sample = row_cells
                .iter()
                .filter(|c| c.spans_col(p.x))
                .find_map(|c| {
                    bilinear_inverse(&c.target, p).map(|(u, v)| bilinear_forward(&c.source, u, v))
                })
                .unwrap_or_else(|| {
                    missed += 1;
                    p
                });
            *map_x = sample.x as f32;
            *map_y = sample.y as f32;
        }

        if missed > 0 {
            uncovered.fetch_add(missed, Ordering::Relaxed);
        }
    })?;

    let uncovered = uncovered.into_inner();
    if uncovered > 0 {
        log::warn!(
            "{} of {} pixels lie outside the {}x{} mesh and keep their position",
            uncovered,
            size.width * size.height,
            target.nx(),
            target.ny()
        );
    }

    Ok(maps)
}

/// Warp an image from one mesh toward another.
///
/// The target mesh is `interpolate_meshes(src_mesh, dst_mesh, t)`. The content under
/// each cell of `src_mesh` is moved to the matching cell of the target mesh and
/// resampled with `kernel`.
///
/// # Arguments
///
/// * `src` - The input image with shape (height, width, channels).
/// * `dst` - The output image with shape (height, width, channels).
/// * `src_mesh` - The mesh laid over the input image.
/// * `dst_mesh` - The mesh to warp toward.
/// * `t` - How far to move toward `dst_mesh`, in `[0, 1]`.
/// * `kernel` - The antialias kernel used for resampling.
///
/// # Errors
///
/// Fails if the meshes are not compatible or `t` lies outside `[0, 1]`.
///
/// # Example
///
/// ```
/// use meshwarp_image::{Image, ImageSize};
/// use meshwarp_imgproc::{warp::warp_mesh, AntialiasKernel};
/// use meshwarp_mesh::MeshGrid;
///
/// let size = ImageSize { width: 8, height: 6 };
/// let src = Image::<f32, 1>::from_fn(size, |x, y| [(x + y) as f32]);
/// let mut dst = Image::<f32, 1>::from_size_val(size, 0.0).unwrap();
///
/// let mesh = MeshGrid::new_regular(4, 4, 8, 6);
/// warp_mesh(&src, &mut dst, &mesh, &mesh, 0.5, AntialiasKernel::Nearest).unwrap();
///
/// assert_eq!(dst, src);
/// ```
pub fn warp_mesh<const C: usize>(
    src: &Image<f32, C>,
    dst: &mut Image<f32, C>,
    src_mesh: &MeshGrid,
    dst_mesh: &MeshGrid,
    t: f64,
    kernel: AntialiasKernel,
) -> Result<(), WarpError> {
    let target = interpolate_meshes(src_mesh, dst_mesh, t)?;

    log::debug!(
        "warping {} image with a {}x{} mesh at t = {} using the {} kernel",
        src.size(),
        src_mesh.nx(),
        src_mesh.ny(),
        t,
        kernel
    );

    let (map_x, map_y) = mesh_sample_grid(src_mesh, &target, dst.size())?;
    remap(src, dst, &map_x, &map_y, kernel)?;

    Ok(())
}

/// Warp an image of any sample type from one mesh toward another.
///
/// The samples are resampled in `f32` and converted back with
/// [`ImageDtype::from_f32`]. The output has the size of the input. See
/// [`warp_mesh`] for the meaning of the other arguments.
pub fn warp_image<T: ImageDtype, const C: usize>(
    img: &Image<T, C>,
    src_mesh: &MeshGrid,
    dst_mesh: &MeshGrid,
    t: f64,
    kernel: AntialiasKernel,
) -> Result<Image<T, C>, WarpError> {
    let mut src = Image::from_size_val(img.size(), 0.0)?;
    cast_and_scale(img, &mut src, 1.0)?;

    let mut dst = Image::from_size_val(img.size(), 0.0)?;
    warp_mesh(&src, &mut dst, src_mesh, dst_mesh, t, kernel)?;

    let mut out = Image::from_size_val(img.size(), T::default())?;
    cast_and_scale(&dst, &mut out, 1.0)?;
    Ok(out)
}
