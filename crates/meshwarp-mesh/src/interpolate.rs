use crate::error::MeshError;
use crate::mesh::MeshGrid;

/// Check whether two meshes have the same number of rows and columns.
pub fn compatible(m1: &MeshGrid, m2: &MeshGrid) -> bool {
    m1.nx() == m2.nx() && m1.ny() == m2.ny()
}

/// Interpolate between two meshes.
///
/// Every point of the result is `(1 - t) * m1 + t * m2`. The result equals `m1`
/// for `t = 0` and `m2` for `t = 1`, labels included; in between the labels are
/// taken from `m1`.
///
/// # Arguments
///
/// * `m1` - The mesh at `t = 0`.
/// * `m2` - The mesh at `t = 1`.
/// * `t` - The interpolation fraction in `[0, 1]`.
///
/// # Errors
///
/// Fails if `t` lies outside `[0, 1]` or the meshes are not [`compatible`].
///
/// # Examples
///
/// ```
/// use meshwarp_mesh::{interpolate_meshes, MeshGrid, Point};
///
/// let m1 = MeshGrid::new_regular(4, 4, 10, 10);
/// let m2 = MeshGrid::new_regular(4, 4, 31, 10);
/// let mid = interpolate_meshes(&m1, &m2, 0.5).unwrap();
/// assert_eq!(mid.get(3, 3), Point::new(19.5, 9.0));
/// ```
pub fn interpolate_meshes(m1: &MeshGrid, m2: &MeshGrid, t: f64) -> Result<MeshGrid, MeshError> {
    if !(0.0..=1.0).contains(&t) {
        return Err(MeshError::FractionOutOfRange(t));
    }
    if !compatible(m1, m2) {
        return Err(MeshError::IncompatibleMeshes(
            m1.nx(),
            m1.ny(),
            m2.nx(),
            m2.ny(),
        ));
    }

    if t == 0.0 {
        return Ok(m1.clone());
    }
    if t == 1.0 {
        return Ok(m2.clone());
    }

    let points = m1
        .as_slice()
        .iter()
        .zip(m2.as_slice())
        .map(|(a, b)| a.lerp(b, t))
        .collect();

    Ok(MeshGrid::from_raw(
        m1.nx(),
        m1.ny(),
        points,
        m1.labels().to_vec(),
    ))
}
