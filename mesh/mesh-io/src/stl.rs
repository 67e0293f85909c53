//! STL (Stereolithography) encoding and decoding.
//!
//! # Binary Format
//!
//! ```text
//! UINT8[80]    – Header: part name, zero padded
//! UINT32       – Number of triangles
//! foreach triangle
//!     REAL32[3] – Unit normal (zero for degenerate faces)
//!     REAL32[3] – Vertex 1
//!     REAL32[3] – Vertex 2
//!     REAL32[3] – Vertex 3
//!     UINT16    – Attribute byte count (0)
//! end
//! ```
//!
//! # ASCII Format
//!
//! ```text
//! solid name
//!   facet normal ni nj nk
//!     outer loop
//!       vertex v1x v1y v1z
//!       vertex v2x v2y v2z
//!       vertex v3x v3y v3z
//!     endloop
//!   endfacet
//!   ...
//! endsolid name
//! ```
//!
//! All numbers are little-endian. Coordinates are millimeters.

use std::fs::{self, File};
use std::io::{self, BufWriter, Read, Write};
use std::path::{Path, PathBuf};

use mesh_types::{Mesh, Triangle, Vertex};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{IoError, IoResult};

/// STL binary header size in bytes.
pub const HEADER_SIZE: usize = 80;

/// Size of one triangle in binary STL (normal + 3 vertices + attribute).
pub const TRIANGLE_SIZE: usize = 50;

/// Cross-product magnitude below which a written normal is zero.
const NORMAL_EPSILON: f64 = 1e-10;

/// The two STL encodings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum StlFormat {
    /// Human-readable text STL.
    #[serde(rename = "ascii-stl")]
    Ascii,
    /// Compact binary STL.
    #[default]
    #[serde(rename = "binary-stl")]
    Binary,
}

impl StlFormat {
    /// Format label used in export results and metadata.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Ascii => "ascii-stl",
            Self::Binary => "binary-stl",
        }
    }

    /// Parse a label as produced by [`StlFormat::as_str`], or `ascii`/`binary`.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "ascii-stl" | "ascii" => Some(Self::Ascii),
            "binary-stl" | "binary" => Some(Self::Binary),
            _ => None,
        }
    }

    /// Exact file size for a mesh of `triangle_count` faces, binary only.
    #[must_use]
    pub const fn binary_size(triangle_count: u32) -> u64 {
        (HEADER_SIZE as u64) + 4 + (TRIANGLE_SIZE as u64) * (triangle_count as u64)
    }
}

impl std::fmt::Display for StlFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Name and declared triangle count from a binary STL header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StlHeader {
    /// Header text up to the first zero byte.
    pub name: String,
    /// Triangle count declared after the header.
    pub triangle_count: u32,
}

/// Encode a mesh as binary STL.
///
/// The name is truncated to 80 bytes and zero padded. Faces whose indices
/// do not resolve are skipped and not counted.
///
/// # Errors
///
/// Returns an error if the mesh has more than `u32::MAX` faces or the
/// writer fails.
pub fn encode_binary<W: Write>(mesh: &Mesh, name: &str, mut writer: W) -> IoResult<u32> {
    let triangles: Vec<Triangle> = mesh.triangles().collect();
    let count = u32::try_from(triangles.len())
        .map_err(|_| IoError::invalid_content("too many triangles for binary STL"))?;

    writer.write_all(&header_bytes(name))?;
    writer.write_all(&count.to_le_bytes())?;

    for tri in &triangles {
        let n = tri.normal_or_zero(NORMAL_EPSILON);
        write_vector_binary(&mut writer, n.x, n.y, n.z)?;
        for v in [tri.v0, tri.v1, tri.v2] {
            write_vector_binary(&mut writer, v.x, v.y, v.z)?;
        }
        writer.write_all(&0u16.to_le_bytes())?;
    }

    Ok(count)
}

/// Build the 80-byte header from a part name.
fn header_bytes(name: &str) -> [u8; HEADER_SIZE] {
    let mut header = [0u8; HEADER_SIZE];
    let bytes = name.as_bytes();
    let len = bytes.len().min(HEADER_SIZE);
    header[..len].copy_from_slice(&bytes[..len]);
    header
}

/// Write three components as little-endian f32s.
fn write_vector_binary<W: Write>(writer: &mut W, x: f64, y: f64, z: f64) -> IoResult<()> {
    #[allow(clippy::cast_possible_truncation)]
    // Truncation: STL stores single precision
    {
        writer.write_all(&(x as f32).to_le_bytes())?;
        writer.write_all(&(y as f32).to_le_bytes())?;
        writer.write_all(&(z as f32).to_le_bytes())?;
    }
    Ok(())
}

/// Encode a mesh as ASCII STL with `precision` fractional digits.
///
/// Line breaks in the name become spaces so the `solid` line stays intact.
///
/// # Errors
///
/// Returns an error if the writer fails.
pub fn encode_ascii<W: Write>(
    mesh: &Mesh,
    name: &str,
    precision: usize,
    mut writer: W,
) -> IoResult<u32> {
    let name = solid_name(name);
    writeln!(writer, "solid {name}")?;

    let mut count = 0u32;
    for tri in mesh.triangles() {
        let n = tri.normal_or_zero(NORMAL_EPSILON);
        writeln!(
            writer,
            "  facet normal {:.p$} {:.p$} {:.p$}",
            n.x,
            n.y,
            n.z,
            p = precision
        )?;
        writeln!(writer, "    outer loop")?;
        for v in [tri.v0, tri.v1, tri.v2] {
            writeln!(
                writer,
                "      vertex {:.p$} {:.p$} {:.p$}",
                v.x,
                v.y,
                v.z,
                p = precision
            )?;
        }
        writeln!(writer, "    endloop")?;
        writeln!(writer, "  endfacet")?;
        count = count.saturating_add(1);
    }

    writeln!(writer, "endsolid {name}")?;
    Ok(count)
}

fn solid_name(name: &str) -> String {
    name.replace(['\r', '\n'], " ")
}

/// Load a mesh from an STL file.
///
/// Binary files are recognized by their exact size (84 + 50 per declared
/// triangle); anything else starting with `solid` is parsed as ASCII.
/// Vertices are not shared between faces.
///
/// # Errors
///
/// Returns an error if the file cannot be read or is not valid STL.
pub fn load_stl<P: AsRef<Path>>(path: P) -> IoResult<Mesh> {
    let path = path.as_ref();
    let bytes = fs::read(path).map_err(|e| not_found_or_io(path, e))?;
    let mesh = parse_stl(&bytes)?;
    debug!(
        path = %path.display(),
        faces = mesh.face_count(),
        "Loaded STL"
    );
    Ok(mesh)
}

/// Parse STL bytes, detecting the encoding.
///
/// # Errors
///
/// Returns an error if the bytes are neither binary nor ASCII STL.
pub fn parse_stl(bytes: &[u8]) -> IoResult<Mesh> {
    if bytes.len() < 6 {
        return Err(IoError::invalid_content("file too small to be valid STL"));
    }

    if let Some(count) = declared_count(bytes) {
        let exact = usize::try_from(StlFormat::binary_size(count)).ok();
        if exact == Some(bytes.len()) {
            return parse_binary(bytes);
        }
    }

    let starts_solid = String::from_utf8_lossy(&bytes[..bytes.len().min(HEADER_SIZE)])
        .trim_start()
        .starts_with("solid");
    if starts_solid {
        parse_ascii(bytes)
    } else {
        parse_binary(bytes)
    }
}

fn declared_count(bytes: &[u8]) -> Option<u32> {
    let raw = bytes.get(HEADER_SIZE..HEADER_SIZE + 4)?;
    Some(u32::from_le_bytes([raw[0], raw[1], raw[2], raw[3]]))
}

/// Decode a binary STL buffer.
fn parse_binary(bytes: &[u8]) -> IoResult<Mesh> {
    let face_count = declared_count(bytes).ok_or(IoError::InvalidHeader {
        expected: HEADER_SIZE + 4,
        got: bytes.len(),
    })?;

    let body = &bytes[HEADER_SIZE + 4..];
    // Check the declared count against the data before allocating for it.
    let available = u32::try_from(body.len() / TRIANGLE_SIZE).unwrap_or(u32::MAX);
    if available < face_count {
        return Err(IoError::InvalidFaceCount {
            expected: face_count,
            got: available,
        });
    }

    let mut vertices = Vec::with_capacity(face_count as usize * 3);
    let mut faces = Vec::with_capacity(face_count as usize);

    for chunk in body.chunks_exact(TRIANGLE_SIZE).take(face_count as usize) {
        #[allow(clippy::cast_possible_truncation)]
        // Truncation: face_count fits u32 so 3 * i + 2 does for any readable file
        let base = vertices.len() as u32;
        vertices.push(read_vertex(&chunk[12..24]));
        vertices.push(read_vertex(&chunk[24..36]));
        vertices.push(read_vertex(&chunk[36..48]));
        faces.push([base, base + 1, base + 2]);
    }

    Ok(Mesh::from_parts(vertices, faces))
}

/// Read a vertex from 12 bytes (3 f32s).
fn read_vertex(buf: &[u8]) -> Vertex {
    let x = f32::from_le_bytes([buf[0], buf[1], buf[2], buf[3]]);
    let y = f32::from_le_bytes([buf[4], buf[5], buf[6], buf[7]]);
    let z = f32::from_le_bytes([buf[8], buf[9], buf[10], buf[11]]);
    Vertex::from_coords(f64::from(x), f64::from(y), f64::from(z))
}

/// Decode an ASCII STL buffer.
fn parse_ascii(bytes: &[u8]) -> IoResult<Mesh> {
    let text = std::str::from_utf8(bytes)
        .map_err(|e| IoError::invalid_content(format!("ASCII STL is not UTF-8: {e}")))?;

    let mut vertices = Vec::new();
    let mut faces = Vec::new();
    let mut in_facet = false;
    let mut in_loop = false;
    let mut corners: Vec<Vertex> = Vec::with_capacity(3);

    for line in text.lines() {
        let parts: Vec<&str> = line.split_whitespace().collect();
        let Some(keyword) = parts.first() else {
            continue;
        };

        match keyword.to_ascii_lowercase().as_str() {
            "facet" => {
                in_facet = true;
            }
            "outer" => {
                if parts.get(1).is_some_and(|p| p.eq_ignore_ascii_case("loop")) {
                    in_loop = true;
                    corners.clear();
                }
            }
            "vertex" => {
                if in_loop {
                    if parts.len() < 4 {
                        return Err(IoError::invalid_content(format!(
                            "vertex line needs three coordinates: `{}`",
                            line.trim()
                        )));
                    }
                    let x: f64 = parts[1].parse()?;
                    let y: f64 = parts[2].parse()?;
                    let z: f64 = parts[3].parse()?;
                    corners.push(Vertex::from_coords(x, y, z));
                }
            }
            "endloop" => {
                in_loop = false;
            }
            "endfacet" => {
                if in_facet && corners.len() == 3 {
                    let base = u32::try_from(vertices.len())
                        .map_err(|_| IoError::invalid_content("too many vertices"))?;
                    vertices.append(&mut corners);
                    faces.push([base, base + 1, base + 2]);
                } else if in_facet {
                    warn!(corners = corners.len(), "Skipping facet without three vertices");
                }
                corners.clear();
                in_facet = false;
            }
            "endsolid" => break,
            _ => {}
        }
    }

    if in_facet {
        return Err(IoError::UnexpectedEof {
            position: bytes.len() as u64,
        });
    }

    Ok(Mesh::from_parts(vertices, faces))
}

/// Read the name and declared triangle count of a binary STL file.
///
/// # Errors
///
/// Returns an error if the file is missing or shorter than 84 bytes.
pub fn read_binary_header<P: AsRef<Path>>(path: P) -> IoResult<StlHeader> {
    let path = path.as_ref();
    let mut file = File::open(path).map_err(|e| not_found_or_io(path, e))?;

    let mut buf = [0u8; HEADER_SIZE + 4];
    let mut filled = 0;
    while filled < buf.len() {
        let n = file.read(&mut buf[filled..])?;
        if n == 0 {
            return Err(IoError::InvalidHeader {
                expected: HEADER_SIZE + 4,
                got: filled,
            });
        }
        filled += n;
    }

    let end = buf[..HEADER_SIZE]
        .iter()
        .position(|&b| b == 0)
        .unwrap_or(HEADER_SIZE);
    Ok(StlHeader {
        name: String::from_utf8_lossy(&buf[..end]).into_owned(),
        triangle_count: u32::from_le_bytes([
            buf[HEADER_SIZE],
            buf[HEADER_SIZE + 1],
            buf[HEADER_SIZE + 2],
            buf[HEADER_SIZE + 3],
        ]),
    })
}

fn not_found_or_io(path: &Path, e: io::Error) -> IoError {
    if e.kind() == io::ErrorKind::NotFound {
        IoError::FileNotFound {
            path: path.to_path_buf(),
        }
    } else {
        IoError::Io(e)
    }
}

/// A file being written that is removed again unless committed.
///
/// Readers never observe a half-written part: any error between creation
/// and [`PendingFile::commit`] drops the guard, which deletes the file.
pub(crate) struct PendingFile {
    path: PathBuf,
    writer: Option<BufWriter<File>>,
}

impl PendingFile {
    pub(crate) fn create(path: &Path) -> IoResult<Self> {
        let file = File::create(path)?;
        Ok(Self {
            path: path.to_path_buf(),
            writer: Some(BufWriter::new(file)),
        })
    }

    /// Flush and sync to disk, returning the final size in bytes.
    pub(crate) fn commit(mut self) -> IoResult<u64> {
        let Some(writer) = self.writer.take() else {
            return Err(IoError::invalid_content("file already committed"));
        };
        let file = writer.into_inner().map_err(io::IntoInnerError::into_error)?;
        file.sync_all()?;
        let len = file.metadata()?.len();
        // Disarm only after the data is durable.
        self.path = PathBuf::new();
        Ok(len)
    }
}

impl Write for PendingFile {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self.writer.as_mut() {
            Some(w) => w.write(buf),
            None => Err(io::Error::other("file already committed")),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self.writer.as_mut() {
            Some(w) => w.flush(),
            None => Ok(()),
        }
    }
}

impl Drop for PendingFile {
    fn drop(&mut self) {
        if self.path.as_os_str().is_empty() {
            return;
        }
        // Close the handle before removing.
        drop(self.writer.take());
        if let Err(e) = fs::remove_file(&self.path) {
            warn!(path = %self.path.display(), error = %e, "Failed to remove partial file");
        } else {
            debug!(path = %self.path.display(), "Removed partial file");
        }
    }
}
