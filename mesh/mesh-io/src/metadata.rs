//! JSON metadata sidecars written next to exported parts.

use std::path::{Path, PathBuf};

use mesh_repair::ValidationReport;
use serde::Serialize;
use tracing::debug;

use crate::error::{IoError, IoResult};
use crate::export::ExportResult;
use crate::settings::ExportSettings;
use crate::stl::{PendingFile, StlFormat};

/// Sidecar document layout.
#[derive(Serialize)]
struct ExportMetadata<'a, P: Serialize> {
    part_info: &'a P,
    export_info: ExportInfo,
    print_recommendations: &'a [String],
    validation_results: &'a ValidationReport,
    export_settings: &'a ExportSettings,
}

#[derive(Serialize)]
struct ExportInfo {
    format: StlFormat,
    triangle_count: usize,
    byte_size: u64,
}

/// Sidecar path for an exported file: `<dir>/<stem>_metadata.json`.
///
/// ```
/// use std::path::Path;
/// use mesh_io::metadata_path;
///
/// let sidecar = metadata_path(Path::new("out/gear.stl")).unwrap();
/// assert_eq!(sidecar, Path::new("out/gear_metadata.json"));
/// ```
#[must_use]
pub fn metadata_path(stl_path: &Path) -> Option<PathBuf> {
    let stem = stl_path.file_stem()?.to_string_lossy();
    Some(stl_path.with_file_name(format!("{stem}_metadata.json")))
}

/// Write the metadata sidecar for an export.
///
/// `part_info` is any serializable description of the part, typically its
/// shape parameters. Returns the path written.
///
/// # Errors
///
/// Returns an error if the STL path has no file name, serialization fails
/// or the file cannot be written. A failed write leaves no file behind.
pub fn write_metadata<P: Serialize>(
    stl_path: &Path,
    part_info: &P,
    result: &ExportResult,
    settings: &ExportSettings,
) -> IoResult<PathBuf> {
    let path = metadata_path(stl_path).ok_or_else(|| {
        IoError::invalid_content(format!("no file name in {}", stl_path.display()))
    })?;

    let document = ExportMetadata {
        part_info,
        export_info: ExportInfo {
            format: result.format,
            triangle_count: result.triangle_count,
            byte_size: result.byte_size,
        },
        print_recommendations: &result.recommendations,
        validation_results: &result.report,
        export_settings: settings,
    };

    let mut pending = PendingFile::create(&path)?;
    serde_json::to_writer_pretty(&mut pending, &document)?;
    let bytes = pending.commit()?;

    debug!(path = %path.display(), bytes, "Wrote metadata");
    Ok(path)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::export::write_binary;
    use mesh_types::unit_cube;
    use serde_json::{Value, json};

    #[test]
    fn sidecar_contents() {
        let dir = tempfile::tempdir().unwrap();
        let stl = dir.path().join("cube.stl");
        let result = write_binary(&unit_cube(), &stl, "cube").unwrap();
        let settings = ExportSettings::default();

        let path =
            write_metadata(&stl, &json!({"type": "cube", "size": 1.0}), &result, &settings)
                .unwrap();
        assert_eq!(path, dir.path().join("cube_metadata.json"));

        let doc: Value = serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(doc["part_info"]["type"], "cube");
        assert_eq!(doc["export_info"]["format"], "binary-stl");
        assert_eq!(doc["export_info"]["triangle_count"], 12);
        assert_eq!(doc["export_info"]["byte_size"], 684);
        assert_eq!(doc["validation_results"]["is_valid"], true);
        assert_eq!(doc["export_settings"]["units"], "mm");
        assert_eq!(
            doc["print_recommendations"].as_array().unwrap().len(),
            result.recommendations.len()
        );
    }

    #[test]
    fn path_without_file_name_is_rejected() {
        assert!(metadata_path(Path::new("/")).is_none());
    }
}
