//! Dimensional compensation: fit classes and shrinkage.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use mesh_types::Mesh;

use crate::material::MaterialProfile;

/// How a printed shaft should sit in a printed hole.
///
/// Offsets are added to the nominal diameter in mm. Positive shaft offsets
/// and negative hole offsets tighten the fit.
///
/// # Example
///
/// ```
/// use mesh_printability::FitClass;
///
/// let fit = FitClass::SlidingFit;
/// assert!((fit.adjusted_shaft(8.0) - 7.95).abs() < 1e-12);
/// assert!((fit.adjusted_hole(8.0) - 8.05).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum FitClass {
    /// Standard location clearance fit (H7/g6).
    #[default]
    StandardH7G6,
    /// Interference fit.
    PressFit,
    /// Loose clearance fit.
    SlidingFit,
}

impl FitClass {
    /// All fit classes.
    pub const ALL: [Self; 3] = [Self::StandardH7G6, Self::PressFit, Self::SlidingFit];

    /// Conventional name.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::StandardH7G6 => "H7/g6",
            Self::PressFit => "press-fit",
            Self::SlidingFit => "sliding-fit",
        }
    }

    /// Look up a fit class by its conventional name.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|fit| fit.as_str().eq_ignore_ascii_case(name))
    }

    /// Offset applied to a shaft diameter, in mm.
    #[must_use]
    pub const fn shaft_offset(&self) -> f64 {
        match self {
            Self::StandardH7G6 => -0.012,
            Self::PressFit => 0.02,
            Self::SlidingFit => -0.05,
        }
    }

    /// Offset applied to a hole diameter, in mm.
    #[must_use]
    pub const fn hole_offset(&self) -> f64 {
        match self {
            Self::StandardH7G6 => 0.018,
            Self::PressFit => -0.02,
            Self::SlidingFit => 0.05,
        }
    }

    /// Shaft diameter to model for a nominal diameter.
    #[must_use]
    pub fn adjusted_shaft(&self, nominal: f64) -> f64 {
        nominal + self.shaft_offset()
    }

    /// Hole diameter to model for a nominal diameter.
    #[must_use]
    pub fn adjusted_hole(&self, nominal: f64) -> f64 {
        nominal + self.hole_offset()
    }

    /// Clearance between the adjusted hole and shaft; negative for interference.
    #[must_use]
    pub fn clearance(&self) -> f64 {
        self.hole_offset() - self.shaft_offset()
    }
}

impl std::fmt::Display for FitClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Pre-scale a part so it shrinks to its modeled size after cooling.
///
/// Scales uniformly by `1 / (1 - shrinkage)` about the bounding-box minimum
/// corner, so a part placed on the build plate stays there. Shrinkage values
/// outside `[0, 1)` leave the mesh unchanged.
///
/// ```
/// use mesh_printability::{MaterialProfile, compensate_shrinkage};
/// use mesh_types::unit_cube;
///
/// let scaled = compensate_shrinkage(&unit_cube(), &MaterialProfile::abs());
/// let size = scaled.bounds().size();
/// assert!((size.x - 1.0 / 0.995).abs() < 1e-12);
/// ```
#[must_use]
pub fn compensate_shrinkage(mesh: &Mesh, material: &MaterialProfile) -> Mesh {
    let shrinkage = material.shrinkage;
    if mesh.vertex_count() == 0 || !(0.0..1.0).contains(&shrinkage) {
        return mesh.clone();
    }
    let origin = mesh.bounds().min;
    mesh.scaled_about(origin, 1.0 / (1.0 - shrinkage))
}
