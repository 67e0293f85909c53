//! Validated STL export.

use std::borrow::Cow;
use std::path::{Path, PathBuf};

use mesh_printability::recommend;
use mesh_repair::{ValidationReport, merge_vertices, orient_outward, validate_mesh_with_options};
use mesh_types::Mesh;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::IoResult;
use crate::settings::ExportSettings;
use crate::stl::{PendingFile, StlFormat, encode_ascii, encode_binary};

/// Outcome of an export attempt.
///
/// `success == false` means validation failed and nothing was written; the
/// report says why.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportResult {
    /// Whether a file was written.
    pub success: bool,
    /// Path of the written file, if any.
    pub file_path: Option<PathBuf>,
    /// Encoding used.
    pub format: StlFormat,
    /// Size of the written file in bytes (0 when nothing was written).
    pub byte_size: u64,
    /// Number of triangles in the exported mesh.
    pub triangle_count: usize,
    /// Validation report for the exported mesh.
    pub report: ValidationReport,
    /// Printing recommendations (empty when nothing was written).
    pub recommendations: Vec<String>,
}

impl ExportResult {
    fn rejected(format: StlFormat, triangle_count: usize, report: ValidationReport) -> Self {
        Self {
            success: false,
            file_path: None,
            format,
            byte_size: 0,
            triangle_count,
            report,
            recommendations: Vec::new(),
        }
    }
}

/// Write a mesh as ASCII STL with default settings.
///
/// # Errors
///
/// Returns an error only for filesystem failures. A mesh that fails
/// validation yields `Ok` with `success == false`.
pub fn write_ascii<P: AsRef<Path>>(mesh: &Mesh, path: P, name: &str) -> IoResult<ExportResult> {
    write_stl(mesh, path, name, StlFormat::Ascii, &ExportSettings::default())
}

/// Write a mesh as binary STL with default settings.
///
/// # Errors
///
/// Returns an error only for filesystem failures.
///
/// # Example
///
/// ```no_run
/// use mesh_io::write_binary;
/// use mesh_types::unit_cube;
///
/// let result = write_binary(&unit_cube(), "cube.stl", "cube").unwrap();
/// assert!(result.success);
/// assert_eq!(result.byte_size, 84 + 50 * 12);
/// ```
pub fn write_binary<P: AsRef<Path>>(mesh: &Mesh, path: P, name: &str) -> IoResult<ExportResult> {
    write_stl(mesh, path, name, StlFormat::Binary, &ExportSettings::default())
}

/// Write a mesh as ASCII STL.
///
/// # Errors
///
/// Returns an error only for filesystem failures.
pub fn write_ascii_with<P: AsRef<Path>>(
    mesh: &Mesh,
    path: P,
    name: &str,
    settings: &ExportSettings,
) -> IoResult<ExportResult> {
    write_stl(mesh, path, name, StlFormat::Ascii, settings)
}

/// Write a mesh as binary STL.
///
/// # Errors
///
/// Returns an error only for filesystem failures.
pub fn write_binary_with<P: AsRef<Path>>(
    mesh: &Mesh,
    path: P,
    name: &str,
    settings: &ExportSettings,
) -> IoResult<ExportResult> {
    write_stl(mesh, path, name, StlFormat::Binary, settings)
}

/// Validate and write a mesh.
///
/// With default settings the caller's mesh is validated and written as
/// given: same faces, same order, same winding. Welding and reorienting
/// happen only when `merge_vertices` or `fix_normals` is set, and then the
/// repaired mesh is what gets validated and written. A file is created only
/// if validation passes, and a failed write leaves no file behind.
///
/// # Errors
///
/// Returns an error only for filesystem failures.
pub fn write_stl<P: AsRef<Path>>(
    mesh: &Mesh,
    path: P,
    name: &str,
    format: StlFormat,
    settings: &ExportSettings,
) -> IoResult<ExportResult> {
    let path = path.as_ref();
    let prepared = prepare_for_export(mesh, settings);
    let report = validate_mesh_with_options(&prepared, &settings.validation_options());

    if !report.is_valid {
        warn!(
            path = %path.display(),
            errors = report.errors.len(),
            "Mesh failed validation, nothing written"
        );
        return Ok(ExportResult::rejected(format, prepared.face_count(), report));
    }

    let mut pending = PendingFile::create(path)?;
    let written = match format {
        StlFormat::Ascii => encode_ascii(&prepared, name, settings.precision, &mut pending)?,
        StlFormat::Binary => encode_binary(&prepared, name, &mut pending)?,
    };
    let byte_size = pending.commit()?;

    info!(
        path = %path.display(),
        format = %format,
        triangles = written,
        bytes = byte_size,
        "Exported STL"
    );

    Ok(ExportResult {
        success: true,
        file_path: Some(path.to_path_buf()),
        format,
        byte_size,
        triangle_count: written as usize,
        recommendations: recommend(&prepared),
        report,
    })
}

/// The mesh [`write_stl`] validates and writes under `settings`.
///
/// Borrows `mesh` unchanged unless `merge_vertices` or `fix_normals` is set.
#[must_use]
pub fn prepare_for_export<'a>(mesh: &'a Mesh, settings: &ExportSettings) -> Cow<'a, Mesh> {
    let mut prepared = Cow::Borrowed(mesh);
    if settings.merge_vertices {
        prepared = Cow::Owned(merge_vertices(&prepared, settings.merge_epsilon));
    }
    if settings.fix_normals {
        prepared = Cow::Owned(orient_outward(&prepared));
    }
    prepared
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::stl::load_stl;
    use mesh_types::unit_cube;

    #[test]
    fn binary_size_matches_triangles() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cube.stl");
        let result = write_binary(&unit_cube(), &path, "cube").unwrap();

        assert!(result.success);
        assert_eq!(result.triangle_count, 12);
        assert_eq!(result.byte_size, 84 + 50 * 12);
        assert_eq!(std::fs::metadata(&path).unwrap().len(), result.byte_size);
        assert_eq!(result.file_path.as_deref(), Some(path.as_path()));
        assert_eq!(result.format.as_str(), "binary-stl");
    }

    #[test]
    fn round_trip_preserves_faces() {
        let dir = tempfile::tempdir().unwrap();
        for (format, file) in [(StlFormat::Ascii, "a.stl"), (StlFormat::Binary, "b.stl")] {
            let path = dir.path().join(file);
            let result =
                write_stl(&unit_cube(), &path, "cube", format, &ExportSettings::default()).unwrap();
            assert!(result.success);

            let loaded = load_stl(&path).unwrap();
            assert_eq!(loaded.face_count(), 12);
            let welded = merge_vertices(&loaded, 1e-6);
            assert_eq!(welded.vertex_count(), 8);
            assert!((welded.signed_volume() - 1.0).abs() < 1e-6);
        }
    }

    #[test]
    fn invalid_mesh_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.stl");
        let mesh = Mesh::from_raw(&[0.0, 0.0, 0.0], &[]);
        let result = write_binary(&mesh, &path, "bad").unwrap();

        assert!(!result.success);
        assert!(result.file_path.is_none());
        assert_eq!(result.byte_size, 0);
        assert!(result.recommendations.is_empty());
        assert!(result.report.errors.iter().any(|e| e.contains("Insufficient vertices")));
        assert!(!path.exists());
    }

    #[test]
    fn winding_is_kept_by_default() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("inward.stl");
        let inward = unit_cube().with_flipped_winding();
        let result = write_binary(&inward, &path, "inward").unwrap();
        assert!(result.success);

        let loaded = load_stl(&path).unwrap();
        for (written, reread) in inward.triangles().zip(loaded.triangles()) {
            assert_eq!(written.v0, reread.v0);
            assert_eq!(written.v1, reread.v1);
            assert_eq!(written.v2, reread.v2);
        }
        assert!(merge_vertices(&loaded, 1e-6).signed_volume() < 0.0);
    }

    #[test]
    fn fix_normals_flips_inward_cube() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("inward.stl");
        let settings = ExportSettings::default().with_fix_normals(true);
        let inward = unit_cube().with_flipped_winding();
        write_binary_with(&inward, &path, "inward", &settings).unwrap();

        let loaded = merge_vertices(&load_stl(&path).unwrap(), 1e-6);
        assert!(loaded.signed_volume() > 0.0);
    }

    #[test]
    fn degenerate_faces_survive_default_export() {
        let dir = tempfile::tempdir().unwrap();
        let (mut vertices, mut faces) = unit_cube().into_parts();
        vertices.push(mesh_types::Vertex::from_coords(2.0, 0.0, 0.0));
        vertices.push(mesh_types::Vertex::from_coords(2.0, 0.0, 0.0));
        vertices.push(mesh_types::Vertex::from_coords(2.0, 1.0, 0.0));
        faces.push([8, 9, 10]);
        let mesh = Mesh::from_parts(vertices, faces);

        for format in [StlFormat::Ascii, StlFormat::Binary] {
            let path = dir.path().join(format!("{format}.stl"));
            let result =
                write_stl(&mesh, &path, "cube", format, &ExportSettings::default()).unwrap();
            assert!(result.success);
            assert_eq!(result.triangle_count, 13);
            assert_eq!(result.report.degenerate_triangle_count, 1);
            assert_eq!(load_stl(&path).unwrap().face_count(), 13);
        }
    }

    #[test]
    fn lone_degenerate_triangle_is_written() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sliver.stl");
        let mesh = Mesh::from_raw(&[0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0], &[0, 1, 2]);
        let result = write_binary(&mesh, &path, "sliver").unwrap();
        assert!(result.success, "{:?}", result.report.errors);
        assert_eq!(result.byte_size, 84 + 50);
    }

    #[test]
    fn merge_vertices_opt_in_drops_collapsed_faces() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("welded.stl");
        let (mut vertices, mut faces) = unit_cube().into_parts();
        vertices.push(mesh_types::Vertex::from_coords(0.0, 0.0, 0.0));
        faces.push([0, 8, 1]);
        let mesh = Mesh::from_parts(vertices, faces);

        let settings = ExportSettings::default().with_merge_vertices(true);
        let result = write_binary_with(&mesh, &path, "welded", &settings).unwrap();
        assert!(result.success);
        assert_eq!(result.triangle_count, 12);
    }

    #[test]
    fn default_preparation_borrows() {
        let cube = unit_cube();
        assert!(matches!(
            prepare_for_export(&cube, &ExportSettings::default()),
            Cow::Borrowed(_)
        ));
        let settings = ExportSettings::default().with_merge_vertices(true);
        assert!(matches!(prepare_for_export(&cube, &settings), Cow::Owned(_)));
    }

    #[test]
    fn ascii_honours_precision() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cube.stl");
        let settings = ExportSettings::default().with_precision(2);
        let result = write_ascii_with(&unit_cube(), &path, "cube", &settings).unwrap();
        assert!(result.success);

        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.starts_with("solid cube\n"));
        assert!(text.contains("vertex 0.00 0.00 0.00"));
        assert!(!text.contains("0.000"));
    }

    #[test]
    fn small_part_gets_recommendations() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cube.stl");
        let result = write_ascii(&unit_cube(), &path, "cube").unwrap();
        assert!(result.success);
        assert!(!result.recommendations.is_empty());
    }
}
