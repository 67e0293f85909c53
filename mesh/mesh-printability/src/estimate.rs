//! Coarse material and print-time estimates.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use hashbrown::HashMap;
use mesh_types::Mesh;
use tracing::debug;

/// Share of the bounding box assumed solid when the mesh is not closed.
const OPEN_MESH_FILL: f64 = 0.3;
/// Slack so a height that is an exact multiple of the layer height does not
/// gain a layer from rounding.
const LAYER_SLACK: f64 = 1e-9;

/// Slicer-level settings used by [`estimate_print`].
///
/// # Example
///
/// ```
/// use mesh_printability::PrintSettings;
///
/// let settings = PrintSettings::default().with_layer_height(0.1);
/// assert!((settings.volumetric_flow_mm3_per_s - 8.0).abs() < f64::EPSILON);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PrintSettings {
    /// Layer height in mm.
    pub layer_height: f64,
    /// Sustained extrusion rate in mm³/s.
    pub volumetric_flow_mm3_per_s: f64,
    /// Fixed time per layer (travel, layer change) in seconds.
    pub layer_overhead_s: f64,
}

impl Default for PrintSettings {
    fn default() -> Self {
        Self {
            layer_height: 0.2,
            volumetric_flow_mm3_per_s: 8.0,
            layer_overhead_s: 2.0,
        }
    }
}

impl PrintSettings {
    /// Set the layer height.
    #[must_use]
    pub const fn with_layer_height(mut self, height: f64) -> Self {
        self.layer_height = height;
        self
    }

    /// Set the volumetric flow rate.
    #[must_use]
    pub const fn with_volumetric_flow(mut self, flow: f64) -> Self {
        self.volumetric_flow_mm3_per_s = flow;
        self
    }

    /// Set the per-layer overhead.
    #[must_use]
    pub const fn with_layer_overhead(mut self, seconds: f64) -> Self {
        self.layer_overhead_s = seconds;
        self
    }
}

/// Estimated material use and print time.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PrintEstimate {
    /// Material volume in mm³.
    pub material_volume_mm3: f64,
    /// Number of layers.
    pub layer_count: u64,
    /// Print time in minutes.
    pub print_time_minutes: f64,
}

impl PrintEstimate {
    /// Print time as `"Xh Ym"`, rounded to the nearest minute.
    ///
    /// ```
    /// use mesh_printability::PrintEstimate;
    ///
    /// let estimate = PrintEstimate { print_time_minutes: 135.4, ..Default::default() };
    /// assert_eq!(estimate.summary(), "2h 15m");
    /// ```
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn summary(&self) -> String {
        let total = self.print_time_minutes.max(0.0).round() as u64;
        format!("{}h {}m", total / 60, total % 60)
    }
}

/// Estimate material volume and print time for `mesh`.
///
/// A closed mesh uses its enclosed volume. An open mesh has no meaningful
/// volume, so 30% of its bounding box is assumed instead. Time is extrusion
/// time at the configured flow plus a fixed overhead per layer.
///
/// ```
/// use mesh_printability::{PrintSettings, estimate_print};
/// use mesh_types::{Point3, unit_cube};
///
/// let cube = unit_cube().scaled_about(Point3::origin(), 20.0);
/// let estimate = estimate_print(&cube, &PrintSettings::default());
/// assert!((estimate.material_volume_mm3 - 8000.0).abs() < 1e-6);
/// assert_eq!(estimate.layer_count, 100);
/// ```
#[must_use]
pub fn estimate_print(mesh: &Mesh, settings: &PrintSettings) -> PrintEstimate {
    if mesh.vertex_count() == 0 {
        return PrintEstimate::default();
    }

    let bounds = mesh.bounds();
    let material_volume_mm3 = if is_closed(mesh) {
        mesh.signed_volume().abs()
    } else {
        bounds.volume() * OPEN_MESH_FILL
    };

    let layer_count = if settings.layer_height > 0.0 {
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let layers = (bounds.size().z / settings.layer_height - LAYER_SLACK).ceil() as u64;
        layers
    } else {
        0
    };

    let extrusion_s = if settings.volumetric_flow_mm3_per_s > 0.0 {
        material_volume_mm3 / settings.volumetric_flow_mm3_per_s
    } else {
        0.0
    };
    #[allow(clippy::cast_precision_loss)]
    let overhead_s = layer_count as f64 * settings.layer_overhead_s;
    let print_time_minutes = (extrusion_s + overhead_s) / 60.0;

    debug!(
        volume = material_volume_mm3,
        layers = layer_count,
        minutes = print_time_minutes,
        "estimated print"
    );

    PrintEstimate {
        material_volume_mm3,
        layer_count,
        print_time_minutes,
    }
}

/// True if every edge is shared by exactly two faces.
fn is_closed(mesh: &Mesh) -> bool {
    if mesh.face_count() == 0 {
        return false;
    }

    let mut edge_count: HashMap<(u32, u32), u32> = HashMap::new();
    for &[a, b, c] in mesh.faces() {
        for (u, v) in [(a, b), (b, c), (c, a)] {
            *edge_count.entry((u.min(v), u.max(v))).or_insert(0) += 1;
        }
    }
    edge_count.values().all(|&count| count == 2)
}

#[cfg(test)]
mod tests {
    use super::*;
    use mesh_types::{Point3, unit_cube};

    #[test]
    fn closed_cube_time() {
        let cube = unit_cube().scaled_about(Point3::origin(), 20.0);
        let estimate = estimate_print(&cube, &PrintSettings::default());
        // 8000 / 8 = 1000 s extrusion, 100 layers * 2 s = 200 s overhead.
        assert!((estimate.print_time_minutes - 20.0).abs() < 1e-9);
        assert_eq!(estimate.summary(), "0h 20m");
    }

    #[test]
    fn open_mesh_uses_bounding_box() {
        let (vertices, mut faces) = unit_cube()
            .scaled_about(Point3::origin(), 10.0)
            .into_parts();
        faces.truncate(10);
        let open = Mesh::from_parts(vertices, faces);
        let estimate = estimate_print(&open, &PrintSettings::default());
        assert!((estimate.material_volume_mm3 - 300.0).abs() < 1e-9);
    }

    #[test]
    fn inside_out_mesh_still_has_positive_volume() {
        let cube = unit_cube()
            .scaled_about(Point3::origin(), 10.0)
            .with_flipped_winding();
        let estimate = estimate_print(&cube, &PrintSettings::default());
        assert!((estimate.material_volume_mm3 - 1000.0).abs() < 1e-9);
    }

    #[test]
    fn finer_layers_take_longer() {
        let cube = unit_cube().scaled_about(Point3::origin(), 20.0);
        let coarse = estimate_print(&cube, &PrintSettings::default());
        let fine = estimate_print(&cube, &PrintSettings::default().with_layer_height(0.1));
        assert_eq!(fine.layer_count, 200);
        assert!(fine.print_time_minutes > coarse.print_time_minutes);
    }

    #[test]
    fn empty_mesh() {
        let estimate = estimate_print(&Mesh::new(), &PrintSettings::default());
        assert_eq!(estimate, PrintEstimate::default());
        assert_eq!(estimate.summary(), "0h 0m");
    }

    #[test]
    fn summary_rounds_to_minutes() {
        let estimate = PrintEstimate {
            print_time_minutes: 59.6,
            ..Default::default()
        };
        assert_eq!(estimate.summary(), "1h 0m");
    }
}
