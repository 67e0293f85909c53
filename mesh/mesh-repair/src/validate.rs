//! Printability validation.
//!
//! Checks run in a fixed order and every finding is recorded rather than
//! raised:
//!
//! 1. Structure (fatal): vertex count, face count, index range
//! 2. Degenerate triangles (warning)
//! 3. Bounding-box scale against feature size and build volume (warning)
//! 4. Edge manifoldness (warning, reported through `is_manifold`)

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use mesh_types::Mesh;
use tracing::{debug, warn};

use crate::adjacency::EdgeAdjacency;

/// Result of validating one mesh.
///
/// `is_valid` only reflects structural errors. Degenerate triangles, scale
/// problems and open or non-manifold edges are warnings.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ValidationReport {
    /// False if any structural error was found.
    pub is_valid: bool,
    /// Fatal findings, in check order.
    pub errors: Vec<String>,
    /// Non-fatal findings, in check order.
    pub warnings: Vec<String>,
    /// Faces with area below the degenerate epsilon.
    pub degenerate_triangle_count: usize,
    /// True iff every edge is shared by exactly two faces.
    pub is_manifold: bool,
    /// Total number of vertices.
    pub vertex_count: usize,
    /// Total number of faces.
    pub face_count: usize,
    /// Edges used by exactly one face.
    pub boundary_edge_count: usize,
    /// Edges used by more than two faces.
    pub non_manifold_edge_count: usize,
    /// Bounding-box size `[x, y, z]`, or `None` for a mesh without vertices.
    pub bounds: Option<[f64; 3]>,
}

impl ValidationReport {
    /// True if the report carries no errors and no warnings.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.errors.is_empty() && self.warnings.is_empty()
    }
}

impl std::fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Validation Report:")?;
        writeln!(f, "  Vertices: {}", self.vertex_count)?;
        writeln!(f, "  Faces: {}", self.face_count)?;
        writeln!(f, "  Valid: {}", if self.is_valid { "Yes" } else { "No" })?;
        writeln!(
            f,
            "  Manifold: {}",
            if self.is_manifold { "Yes" } else { "No" }
        )?;
        if let Some([x, y, z]) = self.bounds {
            writeln!(f, "  Size: {x:.3} x {y:.3} x {z:.3} mm")?;
        }

        if !self.errors.is_empty() {
            writeln!(f)?;
            writeln!(f, "  Errors:")?;
            for error in &self.errors {
                writeln!(f, "    - {error}")?;
            }
        }
        if !self.warnings.is_empty() {
            writeln!(f)?;
            writeln!(f, "  Warnings:")?;
            for warning in &self.warnings {
                writeln!(f, "    - {warning}")?;
            }
        }

        Ok(())
    }
}

/// Thresholds for [`validate_mesh_with_options`].
///
/// # Example
///
/// ```
/// use mesh_repair::ValidationOptions;
///
/// let options = ValidationOptions::default()
///     .with_minimum_feature_size(0.8)
///     .with_check_manifold(false);
/// assert!((options.max_build_dimension - 300.0).abs() < f64::EPSILON);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ValidationOptions {
    /// Smallest bounding-box extent (mm) before a feature-size warning.
    pub minimum_feature_size: f64,
    /// Largest bounding-box extent (mm) before a build-volume warning.
    pub max_build_dimension: f64,
    /// Area below which a triangle counts as degenerate.
    pub degenerate_area_epsilon: f64,
    /// Whether to run the edge manifold check.
    pub check_manifold: bool,
}

impl Default for ValidationOptions {
    fn default() -> Self {
        Self {
            minimum_feature_size: 0.4,
            max_build_dimension: 300.0,
            degenerate_area_epsilon: 1e-10,
            check_manifold: true,
        }
    }
}

impl ValidationOptions {
    /// Set the minimum feature size.
    #[must_use]
    pub const fn with_minimum_feature_size(mut self, size: f64) -> Self {
        self.minimum_feature_size = size;
        self
    }

    /// Set the build-volume limit.
    #[must_use]
    pub const fn with_max_build_dimension(mut self, size: f64) -> Self {
        self.max_build_dimension = size;
        self
    }

    /// Set the degenerate area epsilon.
    #[must_use]
    pub const fn with_degenerate_area_epsilon(mut self, epsilon: f64) -> Self {
        self.degenerate_area_epsilon = epsilon;
        self
    }

    /// Enable or disable the manifold check.
    #[must_use]
    pub const fn with_check_manifold(mut self, check: bool) -> Self {
        self.check_manifold = check;
        self
    }
}

/// Validate a mesh with default options.
///
/// # Example
///
/// ```
/// use mesh_repair::validate_mesh;
/// use mesh_types::unit_cube;
///
/// let report = validate_mesh(&unit_cube());
/// assert!(report.is_valid);
/// assert!(report.is_manifold);
/// assert_eq!(report.degenerate_triangle_count, 0);
/// ```
#[must_use]
pub fn validate_mesh(mesh: &Mesh) -> ValidationReport {
    validate_mesh_with_options(mesh, &ValidationOptions::default())
}

/// Validate a mesh with custom options.
///
/// Never fails: every problem ends up in `errors` or `warnings`.
#[must_use]
pub fn validate_mesh_with_options(mesh: &Mesh, options: &ValidationOptions) -> ValidationReport {
    let mut errors = Vec::new();
    let mut warnings = Vec::new();

    let vertex_count = mesh.vertex_count();
    let face_count = mesh.face_count();

    if vertex_count < 3 {
        errors.push(format!(
            "Insufficient vertices: {vertex_count} (minimum 3 required)"
        ));
    }
    if face_count == 0 {
        errors.push("No faces found".to_string());
    }
    for (face_idx, face) in mesh.faces().iter().enumerate() {
        for &v in face {
            if v as usize >= vertex_count {
                errors.push(format!(
                    "Face {face_idx} references non-existent vertex {v}"
                ));
            }
        }
    }

    let degenerate_triangle_count = mesh
        .triangles()
        .filter(|tri| tri.is_degenerate(options.degenerate_area_epsilon))
        .count();
    if degenerate_triangle_count > 0 {
        warnings.push(format!(
            "Found {degenerate_triangle_count} degenerate triangles"
        ));
    }

    let bounds = if vertex_count > 0 {
        let size = mesh.bounds().size();
        let min_dimension = size.min();
        let max_dimension = size.max();
        if min_dimension < options.minimum_feature_size {
            warnings.push(format!(
                "Part has features smaller than {}mm",
                options.minimum_feature_size
            ));
        }
        if max_dimension > options.max_build_dimension {
            warnings.push(format!(
                "Part dimension ({max_dimension:.1}mm) exceeds typical printer build volume"
            ));
        }
        Some([size.x, size.y, size.z])
    } else {
        None
    };

    let (is_manifold, boundary_edge_count, non_manifold_edge_count) = if options.check_manifold {
        let adjacency = EdgeAdjacency::build(mesh.faces());
        let boundary = adjacency.boundary_edge_count();
        let non_manifold = adjacency.non_manifold_edge_count();
        let is_manifold = adjacency.is_manifold();
        if !is_manifold {
            warnings.push(format!(
                "Mesh is not manifold: {boundary} open edge(s), {non_manifold} non-manifold edge(s)"
            ));
        }
        (is_manifold, boundary, non_manifold)
    } else {
        (true, 0, 0)
    };

    for error in &errors {
        warn!(%error, "mesh failed validation");
    }

    let report = ValidationReport {
        is_valid: errors.is_empty(),
        errors,
        warnings,
        degenerate_triangle_count,
        is_manifold,
        vertex_count,
        face_count,
        boundary_edge_count,
        non_manifold_edge_count,
        bounds,
    };

    debug!(
        vertices = report.vertex_count,
        faces = report.face_count,
        valid = report.is_valid,
        manifold = report.is_manifold,
        degenerate = report.degenerate_triangle_count,
        warnings = report.warnings.len(),
        "validated mesh"
    );

    report
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;
    use mesh_types::{Vertex, unit_cube};

    fn simple_triangle() -> Mesh {
        Mesh::from_parts(
            vec![
                Vertex::from_coords(0.0, 0.0, 0.0),
                Vertex::from_coords(10.0, 0.0, 0.0),
                Vertex::from_coords(0.0, 10.0, 0.0),
            ],
            vec![[0, 1, 2]],
        )
    }

    fn cube(size: f64) -> Mesh {
        unit_cube().scaled_about(mesh_types::Point3::origin(), size)
    }

    #[test]
    fn closed_cube_is_clean() {
        let report = validate_mesh(&cube(10.0));
        assert!(report.is_valid);
        assert!(report.is_manifold);
        assert!(report.is_clean(), "{report}");
        assert_eq!(report.vertex_count, 8);
        assert_eq!(report.face_count, 12);
        assert_eq!(report.bounds, Some([10.0, 10.0, 10.0]));
    }

    #[test]
    fn removing_a_face_opens_the_cube() {
        let (vertices, mut faces) = cube(10.0).into_parts();
        faces.pop();
        let report = validate_mesh(&Mesh::from_parts(vertices, faces));
        assert!(report.is_valid);
        assert!(!report.is_manifold);
        assert_eq!(report.boundary_edge_count, 3);
        assert_eq!(
            report.warnings,
            vec!["Mesh is not manifold: 3 open edge(s), 0 non-manifold edge(s)".to_string()]
        );
    }

    #[test]
    fn single_vertex_is_invalid() {
        let mesh = Mesh::from_parts(vec![Vertex::from_coords(0.0, 0.0, 0.0)], vec![]);
        let report = validate_mesh(&mesh);
        assert!(!report.is_valid);
        assert_eq!(
            report.errors,
            vec![
                "Insufficient vertices: 1 (minimum 3 required)".to_string(),
                "No faces found".to_string(),
            ]
        );
        // No faces, so no edges to disagree with.
        assert!(report.is_manifold);
    }

    #[test]
    fn empty_mesh() {
        let report = validate_mesh(&Mesh::new());
        assert!(!report.is_valid);
        assert_eq!(report.bounds, None);
        assert_eq!(report.errors.len(), 2);
        assert!(report.warnings.is_empty());
    }

    #[test]
    fn out_of_range_index_is_reported_and_skipped() {
        let (vertices, mut faces) = simple_triangle().into_parts();
        faces.push([0, 1, 7]);
        faces.push([9, 1, 8]);
        let report = validate_mesh(&Mesh::from_parts(vertices, faces));
        assert!(!report.is_valid);
        assert_eq!(
            report.errors,
            vec![
                "Face 1 references non-existent vertex 7".to_string(),
                "Face 2 references non-existent vertex 9".to_string(),
                "Face 2 references non-existent vertex 8".to_string(),
            ]
        );
        assert_eq!(report.degenerate_triangle_count, 0);
    }

    #[test]
    fn coincident_vertices_count_as_degenerate() {
        let (mut vertices, mut faces) = cube(10.0).into_parts();
        vertices.push(Vertex::from_coords(0.0, 0.0, 0.0));
        faces.push([0, 8, 1]);
        let report = validate_mesh(&Mesh::from_parts(vertices, faces));
        assert!(report.is_valid);
        assert_eq!(report.degenerate_triangle_count, 1);
        assert!(report
            .warnings
            .contains(&"Found 1 degenerate triangles".to_string()));
    }

    #[test]
    fn small_and_large_parts_warn() {
        let flat = simple_triangle();
        let report = validate_mesh(&flat);
        assert!(report
            .warnings
            .contains(&"Part has features smaller than 0.4mm".to_string()));

        let report = validate_mesh(&cube(450.0));
        assert_eq!(
            report.warnings,
            vec!["Part dimension (450.0mm) exceeds typical printer build volume".to_string()]
        );
    }

    #[test]
    fn custom_thresholds() {
        let options = ValidationOptions::default()
            .with_minimum_feature_size(20.0)
            .with_max_build_dimension(5.0);
        let report = validate_mesh_with_options(&cube(10.0), &options);
        assert_eq!(
            report.warnings,
            vec![
                "Part has features smaller than 20mm".to_string(),
                "Part dimension (10.0mm) exceeds typical printer build volume".to_string(),
            ]
        );
    }

    #[test]
    fn manifold_check_can_be_disabled() {
        let options = ValidationOptions::default().with_check_manifold(false);
        let report = validate_mesh_with_options(&simple_triangle(), &options);
        assert!(report.is_manifold);
        assert_eq!(report.boundary_edge_count, 0);
        assert!(!report.warnings.iter().any(|w| w.contains("manifold")));
    }

    #[test]
    fn report_display() {
        let mesh = Mesh::from_parts(vec![Vertex::from_coords(0.0, 0.0, 0.0)], vec![]);
        let report = validate_mesh(&mesh);
        let display = report.to_string();
        assert!(display.contains("Vertices: 1"));
        assert!(display.contains("Valid: No"));
        assert!(display.contains("No faces found"));
    }
}
