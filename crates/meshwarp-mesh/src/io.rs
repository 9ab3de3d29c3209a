use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use crate::mesh::{MeshGrid, MIN_MESH_LINES};
use crate::point::Point;

const MESH_HEADER: &str = "M2";
const MAX_MESH_POINTS: usize = 50_000_000;
const MAX_RESERVED_POINTS: usize = 1 << 16;

/// Error types for the mesh file module.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum MeshIoError {
    /// Failed to read or write the mesh file.
    #[error("Failed to access mesh file")]
    Io(#[from] std::io::Error),

    /// The input ended before all required lines were read.
    #[error("Unexpected end of file while reading {context}")]
    UnexpectedEof {
        /// What was being read when the input ran out.
        context: String,
    },

    /// The first line is not the `M2` header.
    #[error("Invalid mesh header {0:?}, expected \"M2\"")]
    InvalidHeader(String),

    /// A line could not be parsed.
    #[error("Failed to parse line {line}: {reason}")]
    Parse {
        /// One-based line number.
        line: usize,
        /// What went wrong.
        reason: String,
    },

    /// The declared mesh dimensions are below the 4x4 minimum.
    #[error("Mesh must be at least 4x4, read {nx}x{ny}")]
    MeshTooSmall {
        /// Declared number of columns.
        nx: usize,
        /// Declared number of rows.
        ny: usize,
    },
}

struct LineReader<R> {
    reader: R,
    buf: String,
    line: usize,
}

impl<R: BufRead> LineReader<R> {
    fn new(reader: R) -> Self {
        Self {
            reader,
            buf: String::new(),
            line: 0,
        }
    }

    fn next_line(&mut self, context: impl FnOnce() -> String) -> Result<&str, MeshIoError> {
        self.buf.clear();
        if self.reader.read_line(&mut self.buf)? == 0 {
            return Err(MeshIoError::UnexpectedEof { context: context() });
        }
        self.line += 1;
        Ok(self.buf.trim_end_matches(['\r', '\n']))
    }

    fn parse_fields<T: std::str::FromStr, const N: usize>(
        &self,
        what: &str,
    ) -> Result<[T; N], MeshIoError> {
        let text = self.buf.trim();
        let parse_err = || MeshIoError::Parse {
            line: self.line,
            reason: format!("expected {what}, got {text:?}"),
        };

        let mut tokens = text.split_whitespace();
        let mut fields = Vec::with_capacity(N);
        for token in tokens.by_ref().take(N) {
            fields.push(token.parse::<T>().map_err(|_| parse_err())?);
        }
        if tokens.next().is_some() {
            return Err(parse_err());
        }
        fields.try_into().map_err(|_| parse_err())
    }
}

/// Read a mesh in the M2 text format.
///
/// The input starts with the `M2` header, followed by a line holding `nx ny` and
/// then `nx * ny` lines of `x y label` in row-major order, with the coordinates
/// stored as integers in tenths of a pixel. Anything after the last point line is
/// ignored.
///
/// # Arguments
///
/// * `reader` - The buffered input to read from.
///
/// # Errors
///
/// Returns [`MeshIoError::UnexpectedEof`] if the input ends before the last point
/// line, [`MeshIoError::Parse`] if a line does not hold the expected integer
/// fields, [`MeshIoError::InvalidHeader`] for a wrong header and
/// [`MeshIoError::MeshTooSmall`] for dimensions below 4x4.
pub fn read_mesh<R: BufRead>(reader: R) -> Result<MeshGrid, MeshIoError> {
    let mut lines = LineReader::new(reader);

    let header = lines.next_line(|| "the mesh header".to_string())?;
    if header != MESH_HEADER {
        return Err(MeshIoError::InvalidHeader(header.to_string()));
    }

    lines.next_line(|| "the mesh dimensions".to_string())?;
    let [nx, ny] = lines.parse_fields::<usize, 2>("mesh dimensions \"nx ny\"")?;
    if nx < MIN_MESH_LINES || ny < MIN_MESH_LINES {
        return Err(MeshIoError::MeshTooSmall { nx, ny });
    }
    let num_points = nx.checked_mul(ny).filter(|&n| n <= MAX_MESH_POINTS);
    let Some(num_points) = num_points else {
        return Err(MeshIoError::Parse {
            line: lines.line,
            reason: format!("mesh of {nx}x{ny} points is too large"),
        });
    };
    log::debug!("reading a {}x{} mesh", nx, ny);

    // the header alone does not prove the points exist
    let reserve = num_points.min(MAX_RESERVED_POINTS);
    let mut points = Vec::with_capacity(reserve);
    let mut labels = Vec::with_capacity(reserve);
    for i in 0..num_points {
        lines.next_line(|| format!("mesh point {} of {}", i + 1, num_points))?;
        let [x, y, label] = lines.parse_fields::<i32, 3>("mesh point \"x y label\"")?;
        points.push(Point::new(x as f64 / 10.0, y as f64 / 10.0));
        labels.push(label);
    }

    Ok(MeshGrid::from_raw(nx, ny, points, labels))
}

/// Write a mesh in the M2 text format.
///
/// Coordinates are written in tenths of a pixel, rounded half away from zero.
/// The point lines are followed by the subimage block expected by the xmorph
/// family of tools, derived from the bounding box of the mesh.
///
/// # Errors
///
/// Returns [`MeshIoError::Io`] if writing fails.
pub fn write_mesh<W: Write>(mesh: &MeshGrid, mut writer: W) -> Result<(), MeshIoError> {
    writeln!(writer, "{MESH_HEADER}")?;
    writeln!(writer, "{} {}", mesh.nx(), mesh.ny())?;
    for (p, label) in mesh.as_slice().iter().zip(mesh.labels()) {
        writeln!(
            writer,
            "{:.0} {:.0} {}",
            (p.x * 10.0).round(),
            (p.y * 10.0).round(),
            label
        )?;
    }

    let (ul, lr) = mesh.bounds();
    let (dx, dy) = (lr.x - ul.x, lr.y - ul.y);
    let eyes = [
        Point::new(ul.x + dx / 3.0, ul.y + dy / 3.0),
        Point::new(ul.x + 2.0 * dx / 3.0, ul.y + dy / 3.0),
        Point::new(ul.x + dx / 2.0, ul.y + 2.0 * dy / 3.0),
    ];
    let (width, height) = ((dx + 1.0).ceil(), (dy + 1.0).ceil());

    writeln!(writer, "<SIS>")?;
    writeln!(writer, "<orig>\n{width:.0} {height:.0}\n</orig>")?;
    writeln!(
        writer,
        "<rect>\n{:.0} {:.0} {:.0} {:.0}\n</rect>",
        ul.x.floor(),
        ul.y.floor(),
        lr.x.ceil(),
        lr.y.ceil()
    )?;
    for eye in eyes {
        writeln!(writer, "<eye>\n{:.6} {:.6}\n</eye>", eye.x, eye.y)?;
    }
    writeln!(writer, "</SIS>")?;
    writeln!(
        writer,
        "<resulting image size>\n{width:.0} {height:.0}\n</resulting image size>"
    )?;
    writeln!(writer, "<features>")?;
    for i in 0..3 {
        writeln!(writer, "<name>\nfeature {i}\n</name>")?;
    }
    writeln!(writer, "</features>")?;

    Ok(())
}

/// Read a mesh from an M2 file on disk.
///
/// # Arguments
///
/// * `path` - The path to the mesh file.
pub fn read_mesh_file(path: impl AsRef<Path>) -> Result<MeshGrid, MeshIoError> {
    let file = File::open(path.as_ref())?;
    read_mesh(BufReader::new(file))
}

/// Write a mesh to an M2 file on disk, replacing any existing file.
///
/// # Arguments
///
/// * `mesh` - The mesh to write.
/// * `path` - The path to the mesh file.
pub fn write_mesh_file(mesh: &MeshGrid, path: impl AsRef<Path>) -> Result<(), MeshIoError> {
    let mut writer = BufWriter::new(File::create(path.as_ref())?);
    write_mesh(mesh, &mut writer)?;
    writer.flush()?;
    Ok(())
}
