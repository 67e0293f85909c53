//! Export settings.

use mesh_repair::ValidationOptions;
use serde::{Deserialize, Serialize};

/// Settings that control how a mesh is prepared, checked and written.
///
/// Serialized verbatim into the metadata sidecar.
///
/// # Example
///
/// ```
/// use mesh_io::ExportSettings;
///
/// let settings = ExportSettings::default()
///     .with_precision(4)
///     .with_manifold_check(false);
/// assert_eq!(settings.units, "mm");
/// assert!(!settings.validation_options().check_manifold);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportSettings {
    /// Unit label recorded in metadata. Coordinates are always millimeters.
    pub units: String,
    /// Decimal digits for ASCII coordinates.
    pub precision: usize,
    /// Weld coincident vertices before validation. Off by default, since
    /// welding drops collapsed faces.
    pub merge_vertices: bool,
    /// Flip closed meshes whose faces wind inward. Off by default, so the
    /// written winding matches the input.
    pub fix_normals: bool,
    /// Run the edge manifold check during validation.
    pub manifold_check: bool,
    /// Smallest bounding-box extent (mm) before a feature-size warning.
    pub minimum_feature_size: f64,
    /// Largest bounding-box extent (mm) before a build-volume warning.
    pub max_build_dimension: f64,
    /// Distance (mm) below which vertices are welded.
    pub merge_epsilon: f64,
}

impl Default for ExportSettings {
    fn default() -> Self {
        Self {
            units: "mm".to_string(),
            precision: 6,
            merge_vertices: false,
            fix_normals: false,
            manifold_check: true,
            minimum_feature_size: 0.4,
            max_build_dimension: 300.0,
            merge_epsilon: 1e-6,
        }
    }
}

impl ExportSettings {
    /// Set the ASCII coordinate precision.
    #[must_use]
    pub fn with_precision(mut self, digits: usize) -> Self {
        self.precision = digits;
        self
    }

    /// Enable or disable vertex welding.
    #[must_use]
    pub fn with_merge_vertices(mut self, merge: bool) -> Self {
        self.merge_vertices = merge;
        self
    }

    /// Enable or disable winding repair.
    #[must_use]
    pub fn with_fix_normals(mut self, fix: bool) -> Self {
        self.fix_normals = fix;
        self
    }

    /// Enable or disable the manifold check.
    #[must_use]
    pub fn with_manifold_check(mut self, check: bool) -> Self {
        self.manifold_check = check;
        self
    }

    /// Set the minimum feature size.
    #[must_use]
    pub fn with_minimum_feature_size(mut self, size: f64) -> Self {
        self.minimum_feature_size = size;
        self
    }

    /// Set the build-volume limit.
    #[must_use]
    pub fn with_max_build_dimension(mut self, size: f64) -> Self {
        self.max_build_dimension = size;
        self
    }

    /// Validation thresholds derived from these settings.
    #[must_use]
    pub fn validation_options(&self) -> ValidationOptions {
        ValidationOptions::default()
            .with_minimum_feature_size(self.minimum_feature_size)
            .with_max_build_dimension(self.max_build_dimension)
            .with_check_manifold(self.manifold_check)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let settings = ExportSettings::default();
        assert_eq!(settings.precision, 6);
        assert!(!settings.merge_vertices && !settings.fix_normals);
        assert!(settings.manifold_check);
        assert!((settings.minimum_feature_size - 0.4).abs() < f64::EPSILON);
        assert_eq!(settings.validation_options(), ValidationOptions::default());
    }

    #[test]
    fn serializes_with_field_names() {
        let json = serde_json::to_value(ExportSettings::default()).unwrap();
        assert_eq!(json["units"], "mm");
        assert_eq!(json["precision"], 6);
        assert_eq!(json["manifold_check"], true);
        assert_eq!(json["minimum_feature_size"], 0.4);
    }
}
