//! Moving frames along a circular helix.
//!
//! The helix is `c(t) = (R cos t, R sin t, h t)`, where `h` is the rise per
//! radian. Its Frenet frame has a closed form, so no numeric differentiation
//! or parallel transport is needed.

use nalgebra::{Point3, Vector3};

/// An orthonormal frame at a point on a curve.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Frame {
    /// Tangent direction (forward along the curve).
    pub tangent: Vector3<f64>,
    /// Principal normal (towards the helix axis).
    pub normal: Vector3<f64>,
    /// Binormal, `tangent x normal`.
    pub binormal: Vector3<f64>,
}

impl Frame {
    /// Point on the circle of `radius` around `center` in the normal plane.
    ///
    /// Angle zero lies along [`Frame::normal`]; positive angles turn towards
    /// [`Frame::binormal`].
    #[must_use]
    pub fn section_point(&self, center: &Point3<f64>, radius: f64, angle: f64) -> Point3<f64> {
        center + (self.normal * angle.cos() + self.binormal * angle.sin()) * radius
    }
}

/// A circular helix around the Z axis, starting on the +X axis at `z = 0`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Helix {
    /// Radius of the centerline.
    pub radius: f64,
    /// Rise per full turn.
    pub pitch: f64,
}

impl Helix {
    /// Create a helix.
    #[must_use]
    pub const fn new(radius: f64, pitch: f64) -> Self {
        Self { radius, pitch }
    }

    fn rise_per_radian(&self) -> f64 {
        self.pitch / std::f64::consts::TAU
    }

    /// Centerline point at parameter `t` (radians).
    #[must_use]
    pub fn point(&self, t: f64) -> Point3<f64> {
        Point3::new(
            self.radius * t.cos(),
            self.radius * t.sin(),
            self.rise_per_radian() * t,
        )
    }

    /// Frenet frame at parameter `t` (radians).
    ///
    /// # Example
    ///
    /// ```
    /// use mesh_parametric::Helix;
    ///
    /// let frame = Helix::new(2.0, 1.0).frame(0.7);
    /// assert!((frame.tangent.norm() - 1.0).abs() < 1e-12);
    /// assert!(frame.tangent.dot(&frame.normal).abs() < 1e-12);
    /// ```
    #[must_use]
    pub fn frame(&self, t: f64) -> Frame {
        let (sin_t, cos_t) = t.sin_cos();
        let derivative = Vector3::new(
            -self.radius * sin_t,
            self.radius * cos_t,
            self.rise_per_radian(),
        );
        // radius > 0 keeps the derivative away from zero
        let tangent = derivative
            .try_normalize(f64::EPSILON)
            .unwrap_or_else(Vector3::z);
        let normal = Vector3::new(-cos_t, -sin_t, 0.0);
        let binormal = tangent.cross(&normal);
        Frame {
            tangent,
            normal,
            binormal,
        }
    }
}
