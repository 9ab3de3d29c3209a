use crate::error::MeshError;
use crate::point::{ImagePoint, Point};

/// The smallest number of rows or columns a mesh may have.
pub const MIN_MESH_LINES: usize = 4;

/// Orientation of a mesh line.
///
/// A [`Direction::Horizontal`] line is a row of the mesh (it spans the x axis), a
/// [`Direction::Vertical`] line is a column.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Direction {
    /// A mesh row. Inserting or deleting one changes `ny`.
    Horizontal,
    /// A mesh column. Inserting or deleting one changes `nx`.
    Vertical,
}

/// A regular grid of control points laid over an image.
///
/// The grid has `nx` columns and `ny` rows of [`Point`]s stored in row-major
/// order. Every point also carries an integer label, which is preserved by the
/// M2 file format and otherwise ignored.
///
/// Adjacent points form `(nx - 1) x (ny - 1)` quadrilateral cells. A mesh only
/// describes a well defined warp once it is bounded by the image and monotonic
/// along its rows and columns, see [`MeshGrid::functionalize`].
///
/// # Examples
///
/// ```
/// use meshwarp_mesh::{MeshGrid, Point};
///
/// let mut mesh = MeshGrid::new_regular(4, 4, 100, 100);
/// assert_eq!(mesh.get(1, 0), Point::new(33.0, 0.0));
///
/// mesh.set(1, 1, Point::new(40.0, 40.0));
/// assert_eq!(mesh.get(1, 1), Point::new(40.0, 40.0));
/// ```
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "MeshGridData")
)]
pub struct MeshGrid {
    nx: usize,
    ny: usize,
    points: Vec<Point>,
    labels: Vec<i32>,
}

/// Unchecked serialized form of a [`MeshGrid`].
#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct MeshGridData {
    nx: usize,
    ny: usize,
    points: Vec<Point>,
    labels: Vec<i32>,
}

#[cfg(feature = "serde")]
impl TryFrom<MeshGridData> for MeshGrid {
    type Error = MeshError;

    fn try_from(data: MeshGridData) -> Result<Self, Self::Error> {
        let MeshGridData {
            nx,
            ny,
            points,
            labels,
        } = data;
        let valid = nx >= MIN_MESH_LINES
            && ny >= MIN_MESH_LINES
            && nx.checked_mul(ny) == Some(points.len())
            && labels.len() == points.len();
        if !valid {
            return Err(MeshError::InvalidLayout {
                nx,
                ny,
                points: points.len(),
                labels: labels.len(),
            });
        }
        Ok(Self {
            nx,
            ny,
            points,
            labels,
        })
    }
}

fn check_dims(nx: usize, ny: usize) {
    if nx < MIN_MESH_LINES || ny < MIN_MESH_LINES {
        panic!("mesh must be at least {MIN_MESH_LINES}x{MIN_MESH_LINES}, got {nx}x{ny}");
    }
}

fn check_rows<T, R: AsRef<[T]>>(rows: &[R]) -> (usize, usize) {
    let ny = rows.len();
    let nx = rows.first().map_or(0, |row| row.as_ref().len());
    check_dims(nx, ny);
    if rows.iter().any(|row| row.as_ref().len() != nx) {
        panic!("all mesh rows must have the same length");
    }
    (nx, ny)
}

fn clamp_coord(v: f64, limit: usize) -> f64 {
    if v < 0.0 {
        0.0
    } else if v >= limit as f64 {
        limit.saturating_sub(1) as f64
    } else {
        v
    }
}

impl MeshGrid {
    /// Create a mesh of `nx` x `ny` points, all at the origin.
    ///
    /// # Panics
    ///
    /// Panics if `nx` or `ny` is smaller than [`MIN_MESH_LINES`].
    pub fn new(nx: usize, ny: usize) -> Self {
        check_dims(nx, ny);
        Self {
            nx,
            ny,
            points: vec![Point::default(); nx * ny],
            labels: vec![0; nx * ny],
        }
    }

    /// Create a mesh from rows of points.
    ///
    /// # Panics
    ///
    /// Panics if there are fewer than four rows or columns, or if the rows do not
    /// all have the same length.
    pub fn from_points<R: AsRef<[Point]>>(rows: &[R]) -> Self {
        let (nx, ny) = check_rows::<Point, R>(rows);
        let points = rows
            .iter()
            .flat_map(|row| row.as_ref().iter().copied())
            .collect();
        Self {
            nx,
            ny,
            points,
            labels: vec![0; nx * ny],
        }
    }

    /// Create a mesh from rows of integer image coordinates.
    ///
    /// # Panics
    ///
    /// Same conditions as [`MeshGrid::from_points`].
    pub fn from_image_points<R: AsRef<[ImagePoint]>>(rows: &[R]) -> Self {
        let (nx, ny) = check_rows::<ImagePoint, R>(rows);
        let points = rows
            .iter()
            .flat_map(|row| row.as_ref().iter().map(|&p| Point::from(p)))
            .collect();
        Self {
            nx,
            ny,
            points,
            labels: vec![0; nx * ny],
        }
    }

    /// Create an evenly spaced mesh spanning `[0, width - 1] x [0, height - 1]`.
    ///
    /// The point in column `c` and row `r` lies at
    /// `(c * (width - 1) / (nx - 1), r * (height - 1) / (ny - 1))`.
    pub fn new_regular(nx: usize, ny: usize, width: usize, height: usize) -> Self {
        check_dims(nx, ny);
        let sx = width.saturating_sub(1) as f64 / (nx - 1) as f64;
        let sy = height.saturating_sub(1) as f64 / (ny - 1) as f64;
        let points = (0..ny)
            .flat_map(|r| (0..nx).map(move |c| Point::new(c as f64 * sx, r as f64 * sy)))
            .collect();
        Self {
            nx,
            ny,
            points,
            labels: vec![0; nx * ny],
        }
    }

    pub(crate) fn from_raw(nx: usize, ny: usize, points: Vec<Point>, labels: Vec<i32>) -> Self {
        check_dims(nx, ny);
        debug_assert_eq!(points.len(), nx * ny);
        debug_assert_eq!(labels.len(), nx * ny);
        Self {
            nx,
            ny,
            points,
            labels,
        }
    }

    /// Number of columns.
    #[inline]
    pub fn nx(&self) -> usize {
        self.nx
    }

    /// Number of rows.
    #[inline]
    pub fn ny(&self) -> usize {
        self.ny
    }

    /// The points in row-major order.
    pub fn as_slice(&self) -> &[Point] {
        &self.points
    }

    /// The point labels in row-major order.
    pub fn labels(&self) -> &[i32] {
        &self.labels
    }

    #[inline]
    fn index(&self, x: usize, y: usize) -> usize {
        if x >= self.nx || y >= self.ny {
            panic!(
                "point ({x}, {y}) lies out of bounds of the {}x{} mesh",
                self.nx, self.ny
            );
        }
        y * self.nx + x
    }

    /// The point in column `x` and row `y`.
    ///
    /// # Panics
    ///
    /// Panics if the coordinate lies outside the mesh.
    pub fn get(&self, x: usize, y: usize) -> Point {
        self.points[self.index(x, y)]
    }

    /// Replace the point in column `x` and row `y`.
    ///
    /// # Panics
    ///
    /// Panics if the coordinate lies outside the mesh.
    pub fn set(&mut self, x: usize, y: usize, pt: Point) {
        let idx = self.index(x, y);
        self.points[idx] = pt;
    }

    /// The point in column `x` and row `y`, truncated to integer coordinates.
    pub fn get_image_point(&self, x: usize, y: usize) -> ImagePoint {
        self.get(x, y).to_image_point()
    }

    /// Replace the point in column `x` and row `y` with an integer coordinate.
    pub fn set_image_point(&mut self, x: usize, y: usize, pt: ImagePoint) {
        self.set(x, y, pt.into());
    }

    /// The label of the point in column `x` and row `y`.
    pub fn label(&self, x: usize, y: usize) -> i32 {
        self.labels[self.index(x, y)]
    }

    /// Replace the label of the point in column `x` and row `y`.
    pub fn set_label(&mut self, x: usize, y: usize, label: i32) {
        let idx = self.index(x, y);
        self.labels[idx] = label;
    }

    /// The four corners of cell `(cx, cy)`: top-left, top-right, bottom-right and
    /// bottom-left.
    ///
    /// # Panics
    ///
    /// Panics if `cx >= nx - 1` or `cy >= ny - 1`.
    pub fn cell(&self, cx: usize, cy: usize) -> [Point; 4] {
        if cx + 1 >= self.nx || cy + 1 >= self.ny {
            panic!(
                "cell ({cx}, {cy}) lies out of bounds of the {}x{} mesh",
                self.nx, self.ny
            );
        }
        let i = cy * self.nx + cx;
        [
            self.points[i],
            self.points[i + 1],
            self.points[i + self.nx + 1],
            self.points[i + self.nx],
        ]
    }

    /// Copy the points out as a vector of rows.
    pub fn points(&self) -> Vec<Vec<Point>> {
        self.points.chunks_exact(self.nx).map(<[Point]>::to_vec).collect()
    }

    /// Copy the points out as rows of integer coordinates, truncated toward zero.
    pub fn image_points(&self) -> Vec<Vec<ImagePoint>> {
        self.points
            .chunks_exact(self.nx)
            .map(|row| row.iter().map(Point::to_image_point).collect())
            .collect()
    }

    /// The upper-left and lower-right corners of the bounding box of all points.
    pub fn bounds(&self) -> (Point, Point) {
        let first = self.points[0];
        self.points
            .iter()
            .fold((first, first), |(ul, lr), p| {
                (
                    Point::new(ul.x.min(p.x), ul.y.min(p.y)),
                    Point::new(lr.x.max(p.x), lr.y.max(p.y)),
                )
            })
    }

    /// Rescale the mesh to fit an image of `width` x `height` pixels.
    ///
    /// Coordinates are multiplied by `(width - 1) / max_x` and
    /// `(height - 1) / max_y`, so a regular mesh stays regular. An axis whose
    /// largest coordinate is not positive is left untouched. Coordinates that
    /// would reach `width` or `height` are clamped to the last pixel.
    pub fn scale(&mut self, width: usize, height: usize) {
        let (_, lr) = self.bounds();
        let last_x = width.saturating_sub(1) as f64;
        let last_y = height.saturating_sub(1) as f64;
        let sx = if lr.x > 0.0 { last_x / lr.x } else { 1.0 };
        let sy = if lr.y > 0.0 { last_y / lr.y } else { 1.0 };
        for p in self.points.iter_mut() {
            p.x *= sx;
            p.y *= sy;
            if p.x >= width as f64 {
                p.x = last_x;
            }
            if p.y >= height as f64 {
                p.y = last_y;
            }
        }
    }

    /// Insert a line between line `index` and line `index + 1`.
    ///
    /// The new points are interpolated at fraction `frac` from line `index` to
    /// line `index + 1` and get the label `0`.
    ///
    /// # Errors
    ///
    /// Fails if `index` is larger than the number of lines minus two or if `frac`
    /// lies outside `[0, 1]`.
    pub fn add_line(
        &mut self,
        index: usize,
        frac: f64,
        direction: Direction,
    ) -> Result<(), MeshError> {
        let lines = match direction {
            Direction::Horizontal => self.ny,
            Direction::Vertical => self.nx,
        };
        if index >= lines - 1 {
            return Err(MeshError::LineIndexOutOfRange {
                direction,
                index,
                max: lines - 2,
            });
        }
        if !(0.0..=1.0).contains(&frac) {
            return Err(MeshError::LineFractionOutOfRange(frac));
        }

        let nx = self.nx;
        match direction {
            Direction::Horizontal => {
                let upper = &self.points[index * nx..(index + 1) * nx];
                let lower = &self.points[(index + 1) * nx..(index + 2) * nx];
                let row: Vec<Point> = upper
                    .iter()
                    .zip(lower)
                    .map(|(a, b)| a.lerp(b, frac))
                    .collect();
                let at = (index + 1) * nx;
                self.points.splice(at..at, row);
                self.labels.splice(at..at, std::iter::repeat(0).take(nx));
                self.ny += 1;
            }
            Direction::Vertical => {
                // bottom-up so earlier insertions do not shift later indices
                for row in (0..self.ny).rev() {
                    let i = row * nx + index;
                    let p = self.points[i].lerp(&self.points[i + 1], frac);
                    self.points.insert(i + 1, p);
                    self.labels.insert(i + 1, 0);
                }
                self.nx += 1;
            }
        }
        Ok(())
    }

    /// Remove line `index`.
    ///
    /// # Errors
    ///
    /// Fails if `index` does not name an existing line, or if the mesh already
    /// has only [`MIN_MESH_LINES`] lines in that direction.
    pub fn delete_line(&mut self, index: usize, direction: Direction) -> Result<(), MeshError> {
        let lines = match direction {
            Direction::Horizontal => self.ny,
            Direction::Vertical => self.nx,
        };
        if index >= lines {
            return Err(MeshError::LineIndexOutOfRange {
                direction,
                index,
                max: lines - 1,
            });
        }
        if lines <= MIN_MESH_LINES {
            return Err(MeshError::MeshTooSmall(direction, lines));
        }

        let nx = self.nx;
        match direction {
            Direction::Horizontal => {
                self.points.drain(index * nx..(index + 1) * nx);
                self.labels.drain(index * nx..(index + 1) * nx);
                self.ny -= 1;
            }
            Direction::Vertical => {
                for row in (0..self.ny).rev() {
                    self.points.remove(row * nx + index);
                    self.labels.remove(row * nx + index);
                }
                self.nx -= 1;
            }
        }
        Ok(())
    }

    /// Repair the mesh so it maps an image of `width` x `height` pixels onto itself
    /// in a single-valued way.
    ///
    /// Coordinates outside `[0, width) x [0, height)` are clamped to the nearest
    /// edge pixel. Then every row is swept left to right, raising each `x` to its
    /// left neighbour's `x` when smaller, and every column top to bottom, raising
    /// each `y` to its upper neighbour's `y`. Afterwards rows are non-decreasing in
    /// `x` and columns non-decreasing in `y`.
    ///
    /// Returns the number of points that were moved. Calling it again on the
    /// result returns `0`.
    pub fn functionalize(&mut self, width: usize, height: usize) -> usize {
        let (nx, ny) = (self.nx, self.ny);
        let mut changed = vec![false; self.points.len()];

        for (p, c) in self.points.iter_mut().zip(changed.iter_mut()) {
            let q = Point::new(clamp_coord(p.x, width), clamp_coord(p.y, height));
            if q != *p {
                *p = q;
                *c = true;
            }
        }

        for y in 0..ny {
            for x in 1..nx {
                let i = y * nx + x;
                let left = self.points[i - 1].x;
                if self.points[i].x < left {
                    self.points[i].x = left;
                    changed[i] = true;
                }
            }
        }

        for x in 0..nx {
            for y in 1..ny {
                let i = y * nx + x;
                let up = self.points[i - nx].y;
                if self.points[i].y < up {
                    self.points[i].y = up;
                    changed[i] = true;
                }
            }
        }

        let count = changed.iter().filter(|&&c| c).count();
        log::debug!(
            "functionalized {}x{} mesh against {}x{}: {} points moved",
            nx,
            ny,
            width,
            height,
            count
        );
        count
    }
}

impl std::fmt::Display for MeshGrid {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "[")?;
        for (j, row) in self.points.chunks_exact(self.nx).enumerate() {
            if j > 0 {
                write!(f, ", ")?;
            }
            write!(f, "[")?;
            for (i, p) in row.iter().enumerate() {
                if i > 0 {
                    write!(f, ", ")?;
                }
                std::fmt::Display::fmt(p, f)?;
            }
            write!(f, "]")?;
        }
        write!(f, "]")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, Rng, SeedableRng};

    fn random_mesh(rng: &mut StdRng, nx: usize, ny: usize) -> MeshGrid {
        let rows: Vec<Vec<Point>> = (0..ny)
            .map(|_| {
                (0..nx)
                    .map(|_| Point::new(rng.random_range(0.0..500.0), rng.random_range(0.0..300.0)))
                    .collect()
            })
            .collect();
        MeshGrid::from_points(&rows)
    }

    #[test]
    fn regular_mesh() {
        let mesh = MeshGrid::new_regular(4, 4, 100, 100);
        assert_eq!(mesh.nx(), 4);
        assert_eq!(mesh.ny(), 4);
        let xs: Vec<f64> = (0..4).map(|i| mesh.get(i, 2).x).collect();
        assert_eq!(xs, vec![0.0, 33.0, 66.0, 99.0]);
        let ys: Vec<f64> = (0..4).map(|j| mesh.get(3, j).y).collect();
        assert_eq!(ys, vec![0.0, 33.0, 66.0, 99.0]);
        assert_eq!(mesh.bounds(), (Point::new(0.0, 0.0), Point::new(99.0, 99.0)));
    }

    #[test]
    fn from_points_round_trip() {
        let mut rng = StdRng::seed_from_u64(7);
        for (nx, ny) in [(4, 4), (5, 7), (9, 4)] {
            let mesh = random_mesh(&mut rng, nx, ny);
            assert_eq!(mesh.nx(), nx);
            assert_eq!(mesh.ny(), ny);
            assert_eq!(MeshGrid::from_points(&mesh.points()), mesh);
        }
    }

    #[test]
    fn from_image_points() {
        let rows: Vec<Vec<ImagePoint>> = (0..4)
            .map(|y| (0..5).map(|x| ImagePoint::new(x * 10, y * 20)).collect())
            .collect();
        let mesh = MeshGrid::from_image_points(&rows);
        assert_eq!(mesh.nx(), 5);
        assert_eq!(mesh.get(4, 3), Point::new(40.0, 60.0));
        assert_eq!(mesh.image_points(), rows);
    }

    #[test]
    fn image_points_truncate() {
        let mut mesh = MeshGrid::new(4, 4);
        mesh.set(2, 1, Point::new(3.9, 7.2));
        assert_eq!(mesh.get_image_point(2, 1), ImagePoint::new(3, 7));
        mesh.set_image_point(0, 0, ImagePoint::new(5, 6));
        assert_eq!(mesh.get(0, 0), Point::new(5.0, 6.0));
    }

    #[test]
    fn labels() {
        let mut mesh = MeshGrid::new(4, 4);
        assert!(mesh.labels().iter().all(|&l| l == 0));
        mesh.set_label(3, 2, 17);
        assert_eq!(mesh.label(3, 2), 17);
        assert_eq!(mesh.labels()[2 * 4 + 3], 17);
    }

    #[test]
    #[should_panic(expected = "at least 4x4")]
    fn new_too_small() {
        MeshGrid::new(3, 10);
    }

    #[test]
    #[should_panic(expected = "same length")]
    fn from_points_ragged() {
        let mut rows = MeshGrid::new(4, 4).points();
        rows[2].push(Point::default());
        MeshGrid::from_points(&rows);
    }

    #[test]
    #[should_panic(expected = "out of bounds")]
    fn get_out_of_range() {
        MeshGrid::new(4, 5).get(4, 0);
    }

    #[test]
    #[should_panic(expected = "out of bounds")]
    fn set_out_of_range() {
        MeshGrid::new(4, 5).set(0, 5, Point::default());
    }

    #[test]
    fn clone_is_independent() {
        let mesh = MeshGrid::new_regular(5, 5, 64, 64);
        let mut copy = mesh.clone();
        assert_eq!(copy, mesh);
        copy.set(1, 1, Point::new(-1.0, -1.0));
        assert_ne!(copy, mesh);
        assert_eq!(mesh.get(1, 1), Point::new(15.75, 15.75));
    }

    #[test]
    fn cell_corners() {
        let mesh = MeshGrid::new_regular(4, 4, 31, 61);
        let [tl, tr, br, bl] = mesh.cell(1, 2);
        assert_eq!(tl, Point::new(10.0, 40.0));
        assert_eq!(tr, Point::new(20.0, 40.0));
        assert_eq!(br, Point::new(20.0, 60.0));
        assert_eq!(bl, Point::new(10.0, 60.0));
    }

    #[test]
    fn add_then_delete_line() -> Result<(), MeshError> {
        let mut rng = StdRng::seed_from_u64(11);
        let original = random_mesh(&mut rng, 5, 6);

        let mut mesh = original.clone();
        mesh.add_line(2, 0.25, Direction::Horizontal)?;
        assert_eq!((mesh.nx(), mesh.ny()), (5, 7));
        for x in 0..5 {
            let expected = original.get(x, 2).lerp(&original.get(x, 3), 0.25);
            assert!(mesh.get(x, 3).approx_eq(&expected, 1e-12));
            assert_eq!(mesh.get(x, 4), original.get(x, 3));
        }
        mesh.delete_line(3, Direction::Horizontal)?;
        assert_eq!(mesh, original);

        mesh.add_line(0, 1.0, Direction::Vertical)?;
        assert_eq!((mesh.nx(), mesh.ny()), (6, 6));
        for y in 0..6 {
            assert_eq!(mesh.get(1, y), original.get(1, y));
            assert_eq!(mesh.get(2, y), original.get(1, y));
            assert_eq!(mesh.get(5, y), original.get(4, y));
        }
        mesh.delete_line(1, Direction::Vertical)?;
        assert_eq!(mesh, original);
        Ok(())
    }

    #[test]
    fn add_line_errors() {
        let mut mesh = MeshGrid::new(4, 5);
        assert_eq!(
            mesh.add_line(3, 0.5, Direction::Vertical),
            Err(MeshError::LineIndexOutOfRange {
                direction: Direction::Vertical,
                index: 3,
                max: 2
            })
        );
        assert!(mesh.add_line(3, 0.5, Direction::Horizontal).is_ok());
        assert_eq!(
            mesh.add_line(0, 1.5, Direction::Horizontal),
            Err(MeshError::LineFractionOutOfRange(1.5))
        );
        assert!(mesh.add_line(0, -0.1, Direction::Vertical).is_err());
        assert_eq!(
            mesh.add_line(usize::MAX, 0.5, Direction::Horizontal),
            Err(MeshError::LineIndexOutOfRange {
                direction: Direction::Horizontal,
                index: usize::MAX,
                max: 4
            })
        );
        assert_eq!((mesh.nx(), mesh.ny()), (4, 6));
    }

    #[test]
    fn delete_line_errors() -> Result<(), MeshError> {
        let mut mesh = MeshGrid::new(5, 4);
        assert_eq!(
            mesh.delete_line(5, Direction::Vertical),
            Err(MeshError::LineIndexOutOfRange {
                direction: Direction::Vertical,
                index: 5,
                max: 4
            })
        );
        assert_eq!(
            mesh.delete_line(0, Direction::Horizontal),
            Err(MeshError::MeshTooSmall(Direction::Horizontal, 4))
        );
        mesh.delete_line(4, Direction::Vertical)?;
        assert_eq!(
            mesh.delete_line(0, Direction::Vertical),
            Err(MeshError::MeshTooSmall(Direction::Vertical, 4))
        );
        Ok(())
    }

    #[test]
    fn scale_regular_mesh() {
        let mut mesh = MeshGrid::new_regular(5, 6, 101, 51);
        mesh.scale(201, 11);
        let expected = MeshGrid::new_regular(5, 6, 201, 11);
        for (a, b) in mesh.as_slice().iter().zip(expected.as_slice()) {
            assert!(a.approx_eq(b, 1e-9), "{a} != {b}");
        }
        let (_, lr) = mesh.bounds();
        assert!(lr.x < 201.0 && lr.y < 11.0);
    }

    #[test]
    fn scale_degenerate_axis() {
        let mut mesh = MeshGrid::new_regular(4, 4, 10, 1);
        mesh.scale(20, 40);
        assert!(mesh.as_slice().iter().all(|p| p.y == 0.0));
        approx::assert_relative_eq!(mesh.get(3, 0).x, 19.0);
    }

    #[test]
    fn functionalize_repairs_mesh() {
        let _ = env_logger::builder().is_test(true).try_init();
        let mut mesh = MeshGrid::new_regular(4, 4, 100, 100);
        mesh.set(0, 0, Point::new(-5.0, -3.0));
        mesh.set(3, 3, Point::new(120.0, 99.5));
        mesh.set(2, 1, Point::new(10.0, 20.0));

        let changed = mesh.functionalize(100, 100);
        // (0,0) and (3,3) clamped, (2,1) raised in x
        assert_eq!(changed, 3);
        assert_eq!(mesh.get(0, 0), Point::new(0.0, 0.0));
        assert_eq!(mesh.get(3, 3), Point::new(99.0, 99.5));
        assert_eq!(mesh.get(2, 1), Point::new(33.0, 20.0));
        assert_eq!(mesh.functionalize(100, 100), 0);
    }

    #[test]
    fn functionalize_random_meshes() {
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..20 {
            let mut mesh = random_mesh(&mut rng, 6, 5);
            mesh.functionalize(400, 250);
            for y in 0..mesh.ny() {
                for x in 0..mesh.nx() {
                    let p = mesh.get(x, y);
                    assert!((0.0..400.0).contains(&p.x) && (0.0..250.0).contains(&p.y));
                    if x > 0 {
                        assert!(mesh.get(x - 1, y).x <= p.x);
                    }
                    if y > 0 {
                        assert!(mesh.get(x, y - 1).y <= p.y);
                    }
                }
            }
            assert_eq!(mesh.functionalize(400, 250), 0);
        }
    }

    #[test]
    fn display() {
        let mesh = MeshGrid::new_regular(4, 4, 4, 4);
        assert_eq!(
            mesh.to_string(),
            "[[[0, 0], [1, 0], [2, 0], [3, 0]], \
             [[0, 1], [1, 1], [2, 1], [3, 1]], \
             [[0, 2], [1, 2], [2, 2], [3, 2]], \
             [[0, 3], [1, 3], [2, 3], [3, 3]]]"
        );
        let mut mesh = mesh;
        mesh.set(0, 0, Point::new(0.5, 0.26));
        assert!(format!("{mesh:.1}").starts_with("[[[0.5, 0.3], [1.0, 0.0]"));
    }
}
