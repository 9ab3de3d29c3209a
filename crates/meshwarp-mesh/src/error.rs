use crate::mesh::Direction;

/// An error type for mesh operations.
#[derive(thiserror::Error, Debug, PartialEq)]
pub enum MeshError {
    /// The two meshes do not have the same number of rows and columns.
    #[error("Incompatible meshes: {0}x{1} vs {2}x{3}")]
    IncompatibleMeshes(usize, usize, usize, usize),

    /// The interpolation fraction lies outside [0, 1].
    #[error("Interpolation fraction {0} does not lie in the range [0, 1]")]
    FractionOutOfRange(f64),

    /// The line index is not valid for the requested operation.
    #[error("{direction:?} line index {index} is out of range (max {max})")]
    LineIndexOutOfRange {
        /// Orientation of the line.
        direction: Direction,
        /// The offending index.
        index: usize,
        /// The largest accepted index.
        max: usize,
    },

    /// The fraction at which a new line is inserted lies outside [0, 1].
    #[error("Line fraction {0} does not lie in the range [0, 1]")]
    LineFractionOutOfRange(f64),

    /// Deleting a line would leave fewer lines than a mesh requires.
    #[error("Cannot delete a {0:?} line from a mesh with only {1} of them")]
    MeshTooSmall(Direction, usize),

    /// Serialized mesh data does not describe a valid mesh.
    #[error("Invalid {nx}x{ny} mesh layout with {points} points and {labels} labels")]
    InvalidLayout {
        /// Number of columns.
        nx: usize,
        /// Number of rows.
        ny: usize,
        /// Number of points provided.
        points: usize,
        /// Number of labels provided.
        labels: usize,
    },
}
