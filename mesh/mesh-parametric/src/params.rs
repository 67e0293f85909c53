//! Shape parameter records.
//!
//! Each record validates on construction and again when it is turned into a
//! mesh, so a record assembled field-by-field cannot slip past the checks.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{ParamError, ParamResult};
use crate::spring::{SECTION_SEGMENTS, STEPS_PER_COIL};
use crate::thread::SEGMENTS_PER_TURN;

/// Parameters for a spur gear.
///
/// # Example
///
/// ```
/// use mesh_parametric::GearParams;
///
/// let gear = GearParams::new(1.0, 20, 20.0, 0.5).unwrap();
/// assert!((gear.pitch_radius() - 10.0).abs() < 1e-12);
///
/// assert!(GearParams::new(1.0, 2, 20.0, 0.5).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct GearParams {
    /// Gear module in mm (pitch diameter per tooth).
    pub module: f64,
    /// Number of teeth, at least 3.
    pub teeth: u32,
    /// Pressure angle in degrees, `[0, 90)`.
    pub pressure_angle_deg: f64,
    /// Face width along Z in mm.
    pub thickness: f64,
}

impl GearParams {
    /// Build and validate gear parameters.
    ///
    /// # Errors
    ///
    /// Returns [`ParamError::InvalidParameter`] if any field is out of range.
    pub fn new(module: f64, teeth: u32, pressure_angle_deg: f64, thickness: f64) -> ParamResult<Self> {
        let params = Self {
            module,
            teeth,
            pressure_angle_deg,
            thickness,
        };
        params.validate()?;
        Ok(params)
    }

    /// Check every field constraint.
    ///
    /// # Errors
    ///
    /// Returns the first violated constraint.
    pub fn validate(&self) -> ParamResult<()> {
        positive("module", self.module)?;
        if self.teeth < 3 {
            return Err(ParamError::invalid(
                "teeth",
                f64::from(self.teeth),
                "must be at least 3",
            ));
        }
        finite("pressure_angle_deg", self.pressure_angle_deg)?;
        if !(0.0..90.0).contains(&self.pressure_angle_deg) {
            return Err(ParamError::invalid(
                "pressure_angle_deg",
                self.pressure_angle_deg,
                "must be in [0, 90)",
            ));
        }
        positive("thickness", self.thickness)
    }

    /// Pitch circle radius: `module * teeth / 2`.
    #[must_use]
    pub fn pitch_radius(&self) -> f64 {
        self.module * f64::from(self.teeth) / 2.0
    }

    /// Tip (addendum) radius: `pitch_radius + module`.
    #[must_use]
    pub fn outer_radius(&self) -> f64 {
        self.pitch_radius() + self.module
    }

    /// Root (dedendum) radius: `pitch_radius - 1.25 * module`.
    #[must_use]
    pub fn inner_radius(&self) -> f64 {
        self.pitch_radius() - 1.25 * self.module
    }
}

/// Parameters for a helical compression spring.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SpringParams {
    /// Number of coils (may be fractional).
    pub coils: f64,
    /// Radius of the helix centerline in mm.
    pub radius: f64,
    /// Radius of the wire cross-section in mm, below `radius`.
    pub wire_radius: f64,
    /// Rise per coil in mm (0 gives a flat spiral).
    pub pitch: f64,
}

impl SpringParams {
    /// Build and validate spring parameters.
    ///
    /// # Errors
    ///
    /// Returns [`ParamError::InvalidParameter`] if any field is out of range.
    pub fn new(coils: f64, radius: f64, wire_radius: f64, pitch: f64) -> ParamResult<Self> {
        let params = Self {
            coils,
            radius,
            wire_radius,
            pitch,
        };
        params.validate()?;
        Ok(params)
    }

    /// Check every field constraint.
    ///
    /// # Errors
    ///
    /// Returns the first violated constraint.
    pub fn validate(&self) -> ParamResult<()> {
        positive("coils", self.coils)?;
        positive("radius", self.radius)?;
        positive("wire_radius", self.wire_radius)?;
        if self.wire_radius >= self.radius {
            return Err(ParamError::invalid(
                "wire_radius",
                self.wire_radius,
                "must be smaller than radius",
            ));
        }
        non_negative("pitch", self.pitch)?;
        #[allow(clippy::cast_precision_loss)]
        let vertices = ((self.coils * STEPS_PER_COIL).ceil() + 1.0) * SECTION_SEGMENTS as f64 + 2.0;
        indexable("coils", self.coils, vertices)
    }
}

/// Parameters for an external thread.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ThreadParams {
    /// Crest diameter in mm.
    pub major_diameter: f64,
    /// Root diameter in mm, below `major_diameter`.
    pub minor_diameter: f64,
    /// Axial advance per turn in mm.
    pub pitch: f64,
    /// Threaded length in mm.
    pub length: f64,
    /// Included flank angle in degrees, `(0, 180)`.
    pub thread_angle_deg: f64,
}

impl ThreadParams {
    /// Build and validate thread parameters.
    ///
    /// # Errors
    ///
    /// Returns [`ParamError::InvalidParameter`] if any field is out of range.
    pub fn new(
        major_diameter: f64,
        minor_diameter: f64,
        pitch: f64,
        length: f64,
        thread_angle_deg: f64,
    ) -> ParamResult<Self> {
        let params = Self {
            major_diameter,
            minor_diameter,
            pitch,
            length,
            thread_angle_deg,
        };
        params.validate()?;
        Ok(params)
    }

    /// Check every field constraint.
    ///
    /// # Errors
    ///
    /// Returns the first violated constraint.
    pub fn validate(&self) -> ParamResult<()> {
        positive("major_diameter", self.major_diameter)?;
        positive("minor_diameter", self.minor_diameter)?;
        if self.minor_diameter >= self.major_diameter {
            return Err(ParamError::invalid(
                "minor_diameter",
                self.minor_diameter,
                "must be smaller than major_diameter",
            ));
        }
        positive("pitch", self.pitch)?;
        positive("length", self.length)?;
        finite("thread_angle_deg", self.thread_angle_deg)?;
        if self.thread_angle_deg <= 0.0 || self.thread_angle_deg >= 180.0 {
            return Err(ParamError::invalid(
                "thread_angle_deg",
                self.thread_angle_deg,
                "must be in (0, 180)",
            ));
        }
        #[allow(clippy::cast_precision_loss)]
        let vertices = ((self.length / self.pitch).ceil() + 1.0) * SEGMENTS_PER_TURN as f64 + 3.0;
        indexable("length", self.length, vertices)
    }

    /// Whole turns needed to cover `length`: `ceil(length / pitch)`.
    ///
    /// Only meaningful for validated parameters; the count saturates otherwise.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn turns(&self) -> usize {
        // Validated positive and finite, so the quotient is a positive finite number.
        ((self.length / self.pitch).ceil() as usize).max(1)
    }
}

/// The closed set of shapes the generator knows how to build.
///
/// ```
/// use mesh_parametric::{ShapeParameters, SpringParams};
///
/// let shape = ShapeParameters::Spring(SpringParams::new(5.0, 1.0, 0.1, 0.3).unwrap());
/// assert_eq!(shape.kind(), "spring");
/// assert!(shape.validate().is_ok());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "type", rename_all = "snake_case"))]
pub enum ShapeParameters {
    /// Spur gear.
    Gear(GearParams),
    /// Helical spring.
    Spring(SpringParams),
    /// External thread.
    Thread(ThreadParams),
}

impl ShapeParameters {
    /// Lowercase shape name.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Gear(_) => "gear",
            Self::Spring(_) => "spring",
            Self::Thread(_) => "thread",
        }
    }

    /// Validate the wrapped parameters.
    ///
    /// # Errors
    ///
    /// Returns the first violated constraint.
    pub fn validate(&self) -> ParamResult<()> {
        match self {
            Self::Gear(p) => p.validate(),
            Self::Spring(p) => p.validate(),
            Self::Thread(p) => p.validate(),
        }
    }
}

impl From<GearParams> for ShapeParameters {
    fn from(p: GearParams) -> Self {
        Self::Gear(p)
    }
}

impl From<SpringParams> for ShapeParameters {
    fn from(p: SpringParams) -> Self {
        Self::Spring(p)
    }
}

impl From<ThreadParams> for ShapeParameters {
    fn from(p: ThreadParams) -> Self {
        Self::Thread(p)
    }
}

fn finite(name: &'static str, value: f64) -> ParamResult<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ParamError::invalid(name, value, "must be finite"))
    }
}

fn positive(name: &'static str, value: f64) -> ParamResult<()> {
    finite(name, value)?;
    if value > 0.0 {
        Ok(())
    } else {
        Err(ParamError::invalid(name, value, "must be positive"))
    }
}

/// Faces index vertices with `u32`, which caps how large a shape can get.
fn indexable(name: &'static str, value: f64, vertices: f64) -> ParamResult<()> {
    if vertices <= f64::from(u32::MAX) {
        Ok(())
    } else {
        Err(ParamError::invalid(
            name,
            value,
            "produces more vertices than u32 indices can address",
        ))
    }
}

fn non_negative(name: &'static str, value: f64) -> ParamResult<()> {
    finite(name, value)?;
    if value >= 0.0 {
        Ok(())
    } else {
        Err(ParamError::invalid(name, value, "must not be negative"))
    }
}
