//! Material profiles for FDM printing.
//!
//! A profile is plain data passed into the advisor, so callers can supply
//! their own filament numbers instead of the built-in presets.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Printing limits for one filament.
///
/// # Example
///
/// ```
/// use mesh_printability::MaterialProfile;
///
/// let pla = MaterialProfile::pla();
/// assert_eq!(pla.name, "PLA");
/// assert!((pla.max_overhang_deg - 45.0).abs() < f64::EPSILON);
///
/// let custom = MaterialProfile::new("Nylon")
///     .with_min_wall_thickness(1.6)
///     .with_shrinkage(0.015);
/// assert!((custom.shrinkage - 0.015).abs() < f64::EPSILON);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MaterialProfile {
    /// Display name used in recommendation text.
    pub name: String,
    /// Thinnest wall that prints reliably, in mm.
    pub min_wall_thickness_mm: f64,
    /// Steepest unsupported overhang, in degrees from vertical.
    pub max_overhang_deg: f64,
    /// Linear shrinkage on cooling as a fraction (0.003 = 0.3%).
    pub shrinkage: f64,
}

impl Default for MaterialProfile {
    fn default() -> Self {
        Self::pla()
    }
}

impl MaterialProfile {
    /// A profile with PLA limits under a different name.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::pla()
        }
    }

    /// PLA: 1.2 mm walls, 45° overhang, 0.3% shrinkage.
    #[must_use]
    pub fn pla() -> Self {
        Self {
            name: "PLA".to_string(),
            min_wall_thickness_mm: 1.2,
            max_overhang_deg: 45.0,
            shrinkage: 0.003,
        }
    }

    /// PETG: 1.0 mm walls, 50° overhang, 0.2% shrinkage.
    #[must_use]
    pub fn petg() -> Self {
        Self {
            name: "PETG".to_string(),
            min_wall_thickness_mm: 1.0,
            max_overhang_deg: 50.0,
            shrinkage: 0.002,
        }
    }

    /// ABS: 1.5 mm walls, 40° overhang, 0.5% shrinkage.
    #[must_use]
    pub fn abs() -> Self {
        Self {
            name: "ABS".to_string(),
            min_wall_thickness_mm: 1.5,
            max_overhang_deg: 40.0,
            shrinkage: 0.005,
        }
    }

    /// TPU: 2.0 mm walls, 30° overhang, 0.2% shrinkage.
    #[must_use]
    pub fn tpu() -> Self {
        Self {
            name: "TPU".to_string(),
            min_wall_thickness_mm: 2.0,
            max_overhang_deg: 30.0,
            shrinkage: 0.002,
        }
    }

    /// Look up a preset by name, ignoring case.
    ///
    /// ```
    /// use mesh_printability::MaterialProfile;
    ///
    /// assert_eq!(MaterialProfile::preset("petg"), Some(MaterialProfile::petg()));
    /// assert_eq!(MaterialProfile::preset("wood"), None);
    /// ```
    #[must_use]
    pub fn preset(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "pla" => Some(Self::pla()),
            "petg" => Some(Self::petg()),
            "abs" => Some(Self::abs()),
            "tpu" => Some(Self::tpu()),
            _ => None,
        }
    }

    /// All built-in presets.
    #[must_use]
    pub fn presets() -> [Self; 4] {
        [Self::pla(), Self::petg(), Self::abs(), Self::tpu()]
    }

    /// Set the minimum wall thickness.
    #[must_use]
    pub fn with_min_wall_thickness(mut self, thickness: f64) -> Self {
        self.min_wall_thickness_mm = thickness;
        self
    }

    /// Set the maximum overhang angle.
    #[must_use]
    pub fn with_max_overhang(mut self, degrees: f64) -> Self {
        self.max_overhang_deg = degrees;
        self
    }

    /// Set the shrinkage fraction.
    #[must_use]
    pub fn with_shrinkage(mut self, shrinkage: f64) -> Self {
        self.shrinkage = shrinkage;
        self
    }
}
