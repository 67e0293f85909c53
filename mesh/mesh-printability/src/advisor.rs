//! Print-setting recommendations.
//!
//! Rules are evaluated independently against the bounding box (and, for the
//! material rules, the face normals). Every rule that applies contributes
//! one line, always in the same order.

use mesh_types::{Mesh, Triangle, Vector3};
use tracing::debug;

use crate::material::MaterialProfile;

/// Minimum extent (mm) below which fine layers are recommended.
const FINE_DETAIL_MM: f64 = 2.0;
/// Minimum extent (mm) below which medium layers are recommended.
const MEDIUM_DETAIL_MM: f64 = 10.0;
/// Maximum extent (mm) above which reduced infill is recommended.
const LARGE_PART_MM: f64 = 50.0;
/// Minimum extent (mm) below which walls may not print reliably.
const THIN_WALL_MM: f64 = 1.0;
/// Height above the lowest vertex (mm) that still counts as resting on the bed.
const BED_TOLERANCE_MM: f64 = 1e-6;
/// Normal length below which a face is ignored by the overhang check.
const NORMAL_EPSILON: f64 = 1e-10;

/// Geometry-only recommendations (layer height, infill, supports, thin walls).
///
/// An empty mesh yields no recommendations.
///
/// # Example
///
/// ```
/// use mesh_printability::recommend;
/// use mesh_types::{Point3, unit_cube};
///
/// let cube = unit_cube().scaled_about(Point3::origin(), 20.0);
/// assert_eq!(
///     recommend(&cube),
///     vec![
///         "Use 0.2-0.3mm layer height for faster printing".to_string(),
///         "Use 100% infill for mechanical parts".to_string(),
///     ]
/// );
/// ```
#[must_use]
pub fn recommend(mesh: &Mesh) -> Vec<String> {
    let mut recommendations = Vec::new();
    if mesh.vertex_count() == 0 {
        return recommendations;
    }

    let size = mesh.bounds().size();
    let min_feature = size.min();
    let max_dimension = size.max();

    recommendations.push(
        if min_feature < FINE_DETAIL_MM {
            "Use 0.1mm layer height for fine details"
        } else if min_feature < MEDIUM_DETAIL_MM {
            "Use 0.15-0.2mm layer height"
        } else {
            "Use 0.2-0.3mm layer height for faster printing"
        }
        .to_string(),
    );

    recommendations.push(
        if max_dimension > LARGE_PART_MM {
            "Consider using 20-40% infill to save material"
        } else {
            "Use 100% infill for mechanical parts"
        }
        .to_string(),
    );

    if size.z > size.x && size.z > size.y {
        recommendations.push("Tall part - consider printing supports".to_string());
    }

    if min_feature < THIN_WALL_MM {
        recommendations
            .push("Warning: Features thinner than 1mm may not print reliably".to_string());
    }

    recommendations
}

/// Recommendations for printing `mesh` in `material`.
///
/// Starts with [`recommend`] and adds a minimum-wall warning when the
/// smallest bounding-box extent is below the material's wall limit, and an
/// overhang warning when faces tilt further than the material allows.
///
/// # Example
///
/// ```
/// use mesh_printability::{MaterialProfile, advise};
/// use mesh_types::{Point3, unit_cube};
///
/// let pin = unit_cube().scaled_about(Point3::origin(), 0.8);
/// let advice = advise(&pin, &MaterialProfile::pla());
/// assert!(advice.contains(
///     &"Warning: Minimum feature (0.80mm) is below PLA minimum wall thickness (1.2mm)".to_string()
/// ));
/// ```
#[must_use]
pub fn advise(mesh: &Mesh, material: &MaterialProfile) -> Vec<String> {
    let mut recommendations = recommend(mesh);
    if recommendations.is_empty() {
        return recommendations;
    }

    let min_feature = mesh.bounds().min_extent();
    if min_feature < material.min_wall_thickness_mm {
        recommendations.push(format!(
            "Warning: Minimum feature ({min_feature:.2}mm) is below {} minimum wall thickness ({}mm)",
            material.name, material.min_wall_thickness_mm
        ));
    }

    let overhangs = find_overhangs(mesh, material.max_overhang_deg);
    if overhangs.face_count > 0 && overhangs.area > 0.0 {
        recommendations.push(format!(
            "Warning: {} face(s) overhang beyond {} limit of {} degrees - supports required",
            overhangs.face_count, material.name, material.max_overhang_deg
        ));
    }

    debug!(
        material = %material.name,
        count = recommendations.len(),
        overhang_faces = overhangs.face_count,
        "generated print advice"
    );

    recommendations
}

/// Faces that need support under a given overhang limit.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OverhangSummary {
    /// Number of overhanging faces.
    pub face_count: usize,
    /// Their total area in mm².
    pub area: f64,
    /// Indices of the overhanging faces.
    pub faces: Vec<u32>,
}

/// Find downward-facing faces tilted beyond `max_overhang_deg` from vertical.
///
/// The overhang angle of a face is measured from the vertical: a vertical
/// wall is 0°, a flat ceiling is 90°. Faces resting on the build plate (all
/// vertices at the lowest Z) and degenerate faces are skipped.
///
/// ```
/// use mesh_printability::find_overhangs;
/// use mesh_types::unit_cube;
///
/// // Bottom faces sit on the bed, so a plain cube has no overhangs.
/// assert_eq!(find_overhangs(&unit_cube(), 45.0).face_count, 0);
/// ```
#[must_use]
pub fn find_overhangs(mesh: &Mesh, max_overhang_deg: f64) -> OverhangSummary {
    let mut summary = OverhangSummary::default();
    if mesh.vertex_count() == 0 {
        return summary;
    }

    let bed_z = mesh.bounds().min.z;
    let down = -Vector3::z();

    for face_idx in 0..mesh.face_count() {
        let Some(tri) = mesh.triangle(face_idx) else {
            continue;
        };
        if rests_on_bed(&tri, bed_z) {
            continue;
        }
        let Some(normal) = tri.normal(NORMAL_EPSILON) else {
            continue;
        };

        let downward = normal.dot(&down);
        if downward <= 0.0 {
            continue;
        }
        let overhang_deg = downward.clamp(0.0, 1.0).asin().to_degrees();
        if overhang_deg > max_overhang_deg {
            #[allow(clippy::cast_possible_truncation)]
            summary.faces.push(face_idx as u32);
            summary.area += tri.area();
        }
    }

    summary.face_count = summary.faces.len();
    summary
}

fn rests_on_bed(tri: &Triangle, bed_z: f64) -> bool {
    [tri.v0, tri.v1, tri.v2]
        .iter()
        .all(|p| p.z - bed_z <= BED_TOLERANCE_MM)
}

#[cfg(test)]
mod tests {
    use super::*;
    use mesh_types::{Point3, Vertex, unit_cube};

    fn box_mesh(x: f64, y: f64, z: f64) -> Mesh {
        let (vertices, faces) = unit_cube().into_parts();
        let vertices = vertices
            .into_iter()
            .map(|v| Vertex::from_coords(v.x() * x, v.y() * y, v.z() * z))
            .collect();
        Mesh::from_parts(vertices, faces)
    }

    #[test]
    fn empty_mesh_has_no_advice() {
        assert!(recommend(&Mesh::new()).is_empty());
        assert!(advise(&Mesh::new(), &MaterialProfile::pla()).is_empty());
    }

    #[test]
    fn layer_height_thresholds() {
        let first = |m: &Mesh| recommend(m)[0].clone();
        assert_eq!(first(&box_mesh(1.9, 30.0, 30.0)), "Use 0.1mm layer height for fine details");
        assert_eq!(first(&box_mesh(2.0, 30.0, 30.0)), "Use 0.15-0.2mm layer height");
        assert_eq!(first(&box_mesh(9.9, 30.0, 30.0)), "Use 0.15-0.2mm layer height");
        assert_eq!(
            first(&box_mesh(10.0, 30.0, 30.0)),
            "Use 0.2-0.3mm layer height for faster printing"
        );
    }

    #[test]
    fn infill_threshold() {
        assert_eq!(recommend(&box_mesh(50.0, 20.0, 20.0))[1], "Use 100% infill for mechanical parts");
        assert_eq!(
            recommend(&box_mesh(50.1, 20.0, 20.0))[1],
            "Consider using 20-40% infill to save material"
        );
    }

    #[test]
    fn thin_tall_box() {
        let advice = recommend(&box_mesh(0.5, 0.5, 20.0));
        assert_eq!(
            advice,
            vec![
                "Use 0.1mm layer height for fine details".to_string(),
                "Use 100% infill for mechanical parts".to_string(),
                "Tall part - consider printing supports".to_string(),
                "Warning: Features thinner than 1mm may not print reliably".to_string(),
            ]
        );
    }

    #[test]
    fn tall_requires_strictly_greater_height() {
        let advice = recommend(&box_mesh(20.0, 10.0, 20.0));
        assert!(!advice.iter().any(|r| r.starts_with("Tall part")));
    }

    #[test]
    fn material_wall_warning() {
        let part = box_mesh(1.3, 30.0, 30.0);
        let pla = advise(&part, &MaterialProfile::pla());
        assert!(!pla.iter().any(|r| r.contains("minimum wall thickness")));

        let abs = advise(&part, &MaterialProfile::abs());
        assert_eq!(
            abs.last().unwrap(),
            "Warning: Minimum feature (1.30mm) is below ABS minimum wall thickness (1.5mm)"
        );
    }

    #[test]
    fn ceiling_needs_support() {
        // A raised downward-facing square: overhang angle 90 degrees.
        let mesh = Mesh::from_parts(
            vec![
                Vertex::from_coords(0.0, 0.0, 0.0),
                Vertex::from_coords(0.0, 0.0, 5.0),
                Vertex::from_coords(10.0, 0.0, 5.0),
                Vertex::from_coords(0.0, 10.0, 5.0),
            ],
            vec![[1, 3, 2]],
        );
        let overhangs = find_overhangs(&mesh, 45.0);
        assert_eq!(overhangs.face_count, 1);
        assert!((overhangs.area - 50.0).abs() < 1e-9);

        let advice = advise(&mesh, &MaterialProfile::petg());
        assert_eq!(
            advice.last().unwrap(),
            "Warning: 1 face(s) overhang beyond PETG limit of 50 degrees - supports required"
        );
    }

    #[test]
    fn overhang_angle_is_measured_from_vertical() {
        // Plane tilted 60 degrees from vertical, normal 30 degrees from straight down.
        let tilt = 60.0_f64.to_radians();
        let mesh = Mesh::from_parts(
            vec![
                Vertex::from_coords(0.0, 0.0, 0.0),
                Vertex::from_coords(0.0, 0.0, 5.0),
                Vertex::from_coords(0.0, 10.0, 5.0),
                Vertex::from_coords(10.0 * tilt.sin(), 0.0, 5.0 + 10.0 * tilt.cos()),
            ],
            vec![[1, 2, 3]],
        );
        let normal = mesh.triangle(0).unwrap().normal(1e-10).unwrap();
        assert!(normal.z < 0.0);
        assert_eq!(find_overhangs(&mesh, 45.0).face_count, 1);
        assert_eq!(find_overhangs(&mesh, 70.0).face_count, 0);
    }

    #[test]
    fn cube_has_no_overhangs() {
        let cube = unit_cube().scaled_about(Point3::origin(), 20.0);
        assert_eq!(find_overhangs(&cube, 30.0), OverhangSummary::default());
        let advice = advise(&cube, &MaterialProfile::tpu());
        assert_eq!(advice, recommend(&cube));
    }
}
