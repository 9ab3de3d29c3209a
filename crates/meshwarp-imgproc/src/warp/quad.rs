use meshwarp_mesh::Point;

/// Slack accepted around the unit square when inverting a quad.
const PARAM_EPS: f64 = 1e-6;

/// Below this magnitude the quadratic term of the inverse map is treated as zero.
const QUADRATIC_EPS: f64 = 1e-9;

#[inline]
fn cross(a: Point, b: Point) -> f64 {
    a.x * b.y - a.y * b.x
}

/// Map the cell parameters `(u, v)` to a point of the bilinear quad.
///
/// The corners are given as top-left, top-right, bottom-right and bottom-left, so
/// `(0, 0)` maps to the top-left corner and `(1, 1)` to the bottom-right one.
///
/// # Examples
///
/// ```
/// use meshwarp_imgproc::warp::bilinear_forward;
/// use meshwarp_mesh::Point;
///
/// let quad = [
///     Point::new(0.0, 0.0),
///     Point::new(4.0, 0.0),
///     Point::new(4.0, 2.0),
///     Point::new(0.0, 2.0),
/// ];
/// assert_eq!(bilinear_forward(&quad, 0.5, 0.5), Point::new(2.0, 1.0));
/// ```
pub fn bilinear_forward(quad: &[Point; 4], u: f64, v: f64) -> Point {
    let [a, b, c, d] = *quad;
    a + (b - a) * u + (d - a) * v + (a - b + c - d) * (u * v)
}

/// Find the cell parameters `(u, v)` of a point inside a bilinear quad.
///
/// This is the inverse of [`bilinear_forward`]. Writing the quad as
/// `P(u, v) = a + e u + f v + g u v`, eliminating `u` with a 2D cross product leaves
/// the quadratic `k2 v^2 + k1 v + k0 = 0`, which is solved in closed form. When the
/// opposite edges are parallel the quadratic term vanishes and the linear equation
/// is solved instead.
///
/// Returns `None` when the point lies outside the quad or the quad is degenerate.
/// Parameters within a small tolerance of the unit square are clamped into it.
pub fn bilinear_inverse(quad: &[Point; 4], p: Point) -> Option<(f64, f64)> {
    let [a, b, c, d] = *quad;
    let e = b - a;
    let f = d - a;
    let g = a - b + c - d;
    let h = p - a;

    let k2 = cross(g, f);
    let k1 = cross(e, f) + cross(h, g);
    let k0 = cross(h, e);

    let solve_u = |v: f64| -> Option<f64> {
        let den_x = e.x + g.x * v;
        let den_y = e.y + g.y * v;
        if den_x.abs() >= den_y.abs() {
            (den_x != 0.0).then(|| (h.x - f.x * v) / den_x)
        } else {
            Some((h.y - f.y * v) / den_y)
        }
    };

    let accept = |u: f64, v: f64| -> Option<(f64, f64)> {
        let range = -PARAM_EPS..=1.0 + PARAM_EPS;
        (range.contains(&u) && range.contains(&v)).then(|| (u.clamp(0.0, 1.0), v.clamp(0.0, 1.0)))
    };

    let scale = e.x.abs() + e.y.abs() + f.x.abs() + f.y.abs();
    if k2.abs() <= QUADRATIC_EPS * scale * scale {
        if k1 == 0.0 {
            return None;
        }
        let v = -k0 / k1;
        return accept(solve_u(v)?, v);
    }

    let disc = k1 * k1 - 4.0 * k0 * k2;
    if disc < 0.0 {
        return None;
    }
    // q has the sign of k1 so the two roots are computed without cancellation
    let q = -0.5 * (k1 + k1.signum() * disc.sqrt());
    let roots = [q / k2, if q != 0.0 { k0 / q } else { f64::NAN }];

    roots
        .into_iter()
        .find_map(|v| accept(solve_u(v)?, v))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, Rng, SeedableRng};

    fn square() -> [Point; 4] {
        [
            Point::new(10.0, 20.0),
            Point::new(14.0, 20.0),
            Point::new(14.0, 28.0),
            Point::new(10.0, 28.0),
        ]
    }

    #[test]
    fn inverse_of_rectangle() {
        let quad = square();
        let (u, v) = bilinear_inverse(&quad, Point::new(11.0, 26.0)).unwrap();
        approx::assert_relative_eq!(u, 0.25, epsilon = 1e-12);
        approx::assert_relative_eq!(v, 0.75, epsilon = 1e-12);
        assert_eq!(bilinear_inverse(&quad, Point::new(10.0, 20.0)), Some((0.0, 0.0)));
        assert_eq!(bilinear_inverse(&quad, Point::new(15.0, 21.0)), None);
        assert_eq!(bilinear_inverse(&quad, Point::new(12.0, 19.0)), None);
    }

    #[test]
    fn inverse_round_trip_on_random_quads() {
        let mut rng = StdRng::seed_from_u64(1234);
        for _ in 0..200 {
            // convex quads from jittered rectangle corners
            let mut jitter = |p: Point| {
                p + Point::new(rng.random_range(-1.5..1.5), rng.random_range(-1.5..1.5))
            };
            let quad = [
                jitter(Point::new(0.0, 0.0)),
                jitter(Point::new(10.0, 0.0)),
                jitter(Point::new(10.0, 10.0)),
                jitter(Point::new(0.0, 10.0)),
            ];
            let (u, v) = (rng.random_range(0.0..=1.0), rng.random_range(0.0..=1.0));
            let p = bilinear_forward(&quad, u, v);
            let (iu, iv) = bilinear_inverse(&quad, p).unwrap();
            approx::assert_relative_eq!(iu, u, epsilon = 1e-7);
            approx::assert_relative_eq!(iv, v, epsilon = 1e-7);
        }
    }

    #[test]
    fn degenerate_quad() {
        let p = Point::new(3.0, 3.0);
        let quad = [p, p, p, p];
        assert_eq!(bilinear_inverse(&quad, p), None);
    }

    #[test]
    fn parallelogram_uses_linear_solve() {
        let quad = [
            Point::new(0.0, 0.0),
            Point::new(4.0, 0.0),
            Point::new(6.0, 4.0),
            Point::new(2.0, 4.0),
        ];
        let p = bilinear_forward(&quad, 0.3, 0.6);
        let (u, v) = bilinear_inverse(&quad, p).unwrap();
        approx::assert_relative_eq!(u, 0.3, epsilon = 1e-12);
        approx::assert_relative_eq!(v, 0.6, epsilon = 1e-12);
    }
}
