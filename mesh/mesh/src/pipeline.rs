//! One-call part export: generate, validate, write, advise.

use std::path::{Path, PathBuf};

use mesh_io::{
    ExportResult, ExportSettings, IoResult, StlFormat, prepare_for_export, write_metadata,
    write_stl,
};
use mesh_parametric::{ShapeParameters, generate};
use mesh_printability::{MaterialProfile, PrintEstimate, PrintSettings, advise, estimate_print};
use serde::Serialize;
use tracing::{info, warn};

/// Everything needed to produce one printable part.
///
/// # Example
///
/// ```no_run
/// use mesh::{GearParams, MaterialProfile, PartRequest, StlFormat, export_part};
///
/// let gear = GearParams::new(1.0, 20, 20.0, 5.0).unwrap();
/// let request = PartRequest::new("spur", gear.into(), "out")
///     .with_material(MaterialProfile::petg())
///     .with_format(StlFormat::Ascii);
///
/// let part = export_part(&request).unwrap();
/// assert!(part.result.success);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct PartRequest {
    /// Part name, used for the solid name and the file stem.
    pub name: String,
    /// Shape to generate.
    pub shape: ShapeParameters,
    /// Material the advice is tailored to.
    pub material: MaterialProfile,
    /// STL encoding.
    pub format: StlFormat,
    /// Directory the STL (and sidecar) are written to.
    pub output_dir: PathBuf,
    /// Export preparation and validation settings.
    pub settings: ExportSettings,
    /// Printer assumptions for the time estimate.
    pub print_settings: PrintSettings,
    /// Whether to write the `_metadata.json` sidecar.
    pub write_metadata: bool,
}

impl PartRequest {
    /// Request a binary PLA part with default settings and a sidecar.
    #[must_use]
    pub fn new(name: impl Into<String>, shape: ShapeParameters, output_dir: impl AsRef<Path>) -> Self {
        Self {
            name: name.into(),
            shape,
            material: MaterialProfile::default(),
            format: StlFormat::Binary,
            output_dir: output_dir.as_ref().to_path_buf(),
            settings: ExportSettings::default(),
            print_settings: PrintSettings::default(),
            write_metadata: true,
        }
    }

    /// Set the material.
    #[must_use]
    pub fn with_material(mut self, material: MaterialProfile) -> Self {
        self.material = material;
        self
    }

    /// Set the STL encoding.
    #[must_use]
    pub fn with_format(mut self, format: StlFormat) -> Self {
        self.format = format;
        self
    }

    /// Set the export settings.
    #[must_use]
    pub fn with_settings(mut self, settings: ExportSettings) -> Self {
        self.settings = settings;
        self
    }

    /// Set the printer assumptions.
    #[must_use]
    pub fn with_print_settings(mut self, settings: PrintSettings) -> Self {
        self.print_settings = settings;
        self
    }

    /// Enable or disable the metadata sidecar.
    #[must_use]
    pub fn with_metadata(mut self, write: bool) -> Self {
        self.write_metadata = write;
        self
    }

    /// Path the STL is written to: `<output_dir>/<name>.stl`.
    ///
    /// Characters other than ASCII letters, digits, `-` and `_` become `_`.
    #[must_use]
    pub fn stl_path(&self) -> PathBuf {
        let stem: String = self
            .name
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
            .collect();
        let stem = if stem.is_empty() { "part".to_string() } else { stem };
        self.output_dir.join(format!("{stem}.stl"))
    }
}

/// Outcome of [`export_part`].
#[derive(Debug, Clone, PartialEq)]
pub struct PartExport {
    /// Export result. Its recommendations are the material-aware advice.
    pub result: ExportResult,
    /// Material and time estimate for the generated mesh.
    pub estimate: PrintEstimate,
    /// Sidecar path, when one was written.
    pub metadata_path: Option<PathBuf>,
    /// Why the sidecar is missing when it was requested but could not be
    /// written. The STL is kept either way.
    pub metadata_warning: Option<String>,
}

/// Part description recorded in the sidecar.
#[derive(Serialize)]
struct PartInfo<'a> {
    name: &'a str,
    material: &'a MaterialProfile,
    shape: &'a ShapeParameters,
}

/// Generate, validate, write and advise on one part.
///
/// Advice and the estimate describe the same mesh the report does, i.e.
/// the generated mesh after any welding or reorienting the settings ask for.
/// The sidecar is only written when the STL was. A sidecar failure does not
/// undo a written STL; it is reported through `metadata_warning`.
///
/// # Errors
///
/// Returns [`mesh_io::IoError::InvalidParameter`] for bad shape parameters
/// and I/O errors from writing the STL. A mesh that fails validation is
/// reported through `result.success` instead.
pub fn export_part(request: &PartRequest) -> IoResult<PartExport> {
    let mesh = generate(&request.shape)?;
    let path = request.stl_path();

    let mut result = write_stl(&mesh, &path, &request.name, request.format, &request.settings)?;
    let prepared = prepare_for_export(&mesh, &request.settings);
    if result.success {
        result.recommendations = advise(&prepared, &request.material);
    }
    let estimate = estimate_print(&prepared, &request.print_settings);

    let mut metadata_path = None;
    let mut metadata_warning = None;
    if result.success && request.write_metadata {
        let info = PartInfo {
            name: &request.name,
            material: &request.material,
            shape: &request.shape,
        };
        match write_metadata(&path, &info, &result, &request.settings) {
            Ok(sidecar) => metadata_path = Some(sidecar),
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Metadata sidecar not written");
                metadata_warning = Some(format!("Metadata sidecar not written: {e}"));
            }
        }
    }

    info!(
        name = %request.name,
        shape = request.shape.kind(),
        material = %request.material.name,
        success = result.success,
        triangles = result.triangle_count,
        estimate = %estimate.summary(),
        "Exported part"
    );

    Ok(PartExport {
        result,
        estimate,
        metadata_path,
        metadata_warning,
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use mesh_io::{IoError, load_stl};
    use mesh_parametric::{GearParams, SpringParams, ThreadParams};

    fn gear() -> ShapeParameters {
        GearParams::new(1.0, 12, 20.0, 3.0).unwrap().into()
    }

    #[test]
    fn gear_part_end_to_end() {
        let dir = tempfile::tempdir().unwrap();
        let request = PartRequest::new("spur gear", gear(), dir.path());
        let part = export_part(&request).unwrap();

        assert!(part.result.success);
        assert_eq!(
            part.result.file_path.as_deref(),
            Some(dir.path().join("spur_gear.stl").as_path())
        );
        assert_eq!(part.result.triangle_count, 4 * 12 * 8 - 4);
        assert!(part.estimate.material_volume_mm3 > 0.0);

        let sidecar = part.metadata_path.unwrap();
        assert_eq!(sidecar, dir.path().join("spur_gear_metadata.json"));
        let doc: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(sidecar).unwrap()).unwrap();
        assert_eq!(doc["part_info"]["shape"]["type"], "gear");
        assert_eq!(doc["part_info"]["material"]["name"], "PLA");
        assert_eq!(doc["export_info"]["format"], "binary-stl");
    }

    #[test]
    fn recommendations_are_material_aware() {
        let dir = tempfile::tempdir().unwrap();
        let thin: ShapeParameters = SpringParams::new(3.0, 2.0, 0.3, 1.0).unwrap().into();
        let request = PartRequest::new("coil", thin, dir.path())
            .with_material(MaterialProfile::tpu())
            .with_metadata(false);
        let part = export_part(&request).unwrap();

        assert!(part.metadata_path.is_none());
        assert!(
            part.result
                .recommendations
                .iter()
                .any(|r| r.contains("TPU")),
            "{:?}",
            part.result.recommendations
        );
    }

    #[test]
    fn ascii_thread_reloads() {
        let dir = tempfile::tempdir().unwrap();
        let thread: ShapeParameters = ThreadParams::new(6.0, 5.0, 1.0, 4.0, 60.0).unwrap().into();
        let request = PartRequest::new("m6", thread, dir.path()).with_format(StlFormat::Ascii);
        let part = export_part(&request).unwrap();

        let loaded = load_stl(part.result.file_path.unwrap()).unwrap();
        assert_eq!(loaded.face_count(), part.result.triangle_count);
    }

    #[test]
    fn bad_parameters_write_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let mut params = GearParams::new(1.0, 12, 20.0, 3.0).unwrap();
        params.teeth = 2;
        let request = PartRequest::new("broken", params.into(), dir.path());

        let err = export_part(&request).unwrap_err();
        assert!(matches!(err, IoError::InvalidParameter(_)));
        assert!(!request.stl_path().exists());
    }

    #[test]
    fn sidecar_failure_keeps_the_stl() {
        let dir = tempfile::tempdir().unwrap();
        let request = PartRequest::new("blocked", gear(), dir.path());
        std::fs::create_dir(dir.path().join("blocked_metadata.json")).unwrap();

        let part = export_part(&request).unwrap();
        assert!(part.result.success);
        assert!(part.metadata_path.is_none());
        assert!(part.metadata_warning.unwrap().contains("Metadata sidecar not written"));
        assert_eq!(
            load_stl(request.stl_path()).unwrap().face_count(),
            part.result.triangle_count
        );
    }

    #[test]
    fn advice_follows_the_written_mesh() {
        let dir = tempfile::tempdir().unwrap();
        let settings = ExportSettings::default()
            .with_merge_vertices(true)
            .with_fix_normals(true);
        let request = PartRequest::new("welded", gear(), dir.path())
            .with_settings(settings.clone())
            .with_metadata(false);
        let part = export_part(&request).unwrap();

        let mesh = generate(&request.shape).unwrap();
        let prepared = prepare_for_export(&mesh, &settings);
        assert_eq!(part.result.triangle_count, prepared.face_count());
        assert_eq!(part.result.recommendations, advise(&prepared, &request.material));
        assert_eq!(part.estimate, estimate_print(&prepared, &request.print_settings));
        assert!(part.metadata_warning.is_none());
    }

    #[test]
    fn stl_path_sanitizes_name() {
        let request = PartRequest::new("../a b", gear(), "/tmp/parts");
        assert_eq!(request.stl_path(), Path::new("/tmp/parts/___a_b.stl"));
        let unnamed = PartRequest::new("", gear(), "out");
        assert_eq!(unnamed.stl_path(), Path::new("out/part.stl"));
    }
}
