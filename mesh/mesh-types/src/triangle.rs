//! Triangle type for geometric calculations.

use nalgebra::{Point3, Vector3};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A triangle with concrete vertex positions.
///
/// This is a utility type for geometric calculations. It stores the actual
/// vertex positions rather than indices.
///
/// Winding is **counter-clockwise (CCW) when viewed from the front**
/// (normal points toward viewer).
///
/// # Example
///
/// ```
/// use mesh_types::{Point3, Triangle};
///
/// let tri = Triangle::new(
///     Point3::new(0.0, 0.0, 0.0),
///     Point3::new(1.0, 0.0, 0.0),
///     Point3::new(0.0, 1.0, 0.0),
/// );
///
/// // Area of a right triangle with legs 1 and 1
/// assert!((tri.area() - 0.5).abs() < 1e-10);
///
/// // Normal points in +Z direction
/// let normal = tri.normal(1e-10).unwrap();
/// assert!((normal.z - 1.0).abs() < 1e-10);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Triangle {
    /// First vertex.
    pub v0: Point3<f64>,
    /// Second vertex.
    pub v1: Point3<f64>,
    /// Third vertex.
    pub v2: Point3<f64>,
}

impl Triangle {
    /// Create a new triangle from three points.
    #[inline]
    #[must_use]
    pub const fn new(v0: Point3<f64>, v1: Point3<f64>, v2: Point3<f64>) -> Self {
        Self { v0, v1, v2 }
    }

    /// Compute the (unnormalized) face normal via cross product.
    ///
    /// The direction follows the right-hand rule with CCW winding.
    /// The magnitude equals twice the triangle's area.
    ///
    /// # Example
    ///
    /// ```
    /// use mesh_types::{Point3, Triangle};
    ///
    /// let tri = Triangle::new(
    ///     Point3::new(0.0, 0.0, 0.0),
    ///     Point3::new(2.0, 0.0, 0.0),
    ///     Point3::new(0.0, 2.0, 0.0),
    /// );
    ///
    /// let n = tri.normal_unnormalized();
    /// // Magnitude = 2 * area = 2 * 2 = 4
    /// assert!((n.norm() - 4.0).abs() < 1e-10);
    /// ```
    #[inline]
    #[must_use]
    pub fn normal_unnormalized(&self) -> Vector3<f64> {
        let e1 = self.v1 - self.v0;
        let e2 = self.v2 - self.v0;
        e1.cross(&e2)
    }

    /// Compute the unit face normal.
    ///
    /// Returns `None` when the cross product magnitude is below `epsilon`.
    #[must_use]
    pub fn normal(&self, epsilon: f64) -> Option<Vector3<f64>> {
        let n = self.normal_unnormalized();
        let len = n.norm();
        if len > epsilon {
            Some(n / len)
        } else {
            None
        }
    }

    /// Compute the unit face normal, or the zero vector for degenerate triangles.
    ///
    /// This is the normal written to mesh files, where a division by a
    /// vanishing magnitude must not produce NaNs.
    ///
    /// ```
    /// use mesh_types::{Point3, Triangle, Vector3};
    ///
    /// let degen = Triangle::new(
    ///     Point3::new(0.0, 0.0, 0.0),
    ///     Point3::new(1.0, 0.0, 0.0),
    ///     Point3::new(2.0, 0.0, 0.0),
    /// );
    /// assert_eq!(degen.normal_or_zero(1e-10), Vector3::zeros());
    /// ```
    #[must_use]
    pub fn normal_or_zero(&self, epsilon: f64) -> Vector3<f64> {
        self.normal(epsilon).unwrap_or_else(Vector3::zeros)
    }

    /// Compute the area of the triangle.
    ///
    /// Half the magnitude of the cross product of the two edge vectors
    /// leaving `v0`.
    #[inline]
    #[must_use]
    pub fn area(&self) -> f64 {
        self.normal_unnormalized().norm() * 0.5
    }

    /// Check whether the triangle's area is below `epsilon`.
    #[inline]
    #[must_use]
    pub fn is_degenerate(&self, epsilon: f64) -> bool {
        self.area() < epsilon
    }

    /// Compute the centroid (center of mass).
    #[inline]
    #[must_use]
    pub fn centroid(&self) -> Point3<f64> {
        Point3::new(
            (self.v0.x + self.v1.x + self.v2.x) / 3.0,
            (self.v0.y + self.v1.y + self.v2.y) / 3.0,
            (self.v0.z + self.v1.z + self.v2.z) / 3.0,
        )
    }

    /// Signed volume of the tetrahedron spanned by this triangle and the origin.
    ///
    /// Summed over a closed, outward-wound mesh this gives the enclosed
    /// volume (divergence theorem); a negative sum means the mesh is
    /// inside-out.
    #[inline]
    #[must_use]
    pub fn signed_volume_contribution(&self) -> f64 {
        self.v0.coords.dot(&self.v1.coords.cross(&self.v2.coords)) / 6.0
    }

    /// Return the triangle with reversed winding.
    #[inline]
    #[must_use]
    pub const fn reversed(&self) -> Self {
        Self::new(self.v0, self.v2, self.v1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn right_triangle() -> Triangle {
        Triangle::new(
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(3.0, 0.0, 0.0),
            Point3::new(0.0, 4.0, 0.0),
        )
    }

    #[test]
    fn area_of_right_triangle() {
        assert!((right_triangle().area() - 6.0).abs() < 1e-10);
    }

    #[test]
    fn normal_points_up_for_ccw() {
        let n = right_triangle().normal(1e-10);
        assert!(n.is_some_and(|n| (n.z - 1.0).abs() < 1e-10));
    }

    #[test]
    fn reversed_flips_normal() {
        let n = right_triangle().reversed().normal(1e-10);
        assert!(n.is_some_and(|n| (n.z + 1.0).abs() < 1e-10));
    }

    #[test]
    fn coincident_vertices_are_degenerate() {
        let tri = Triangle::new(
            Point3::new(1.0, 1.0, 1.0),
            Point3::new(1.0, 1.0, 1.0),
            Point3::new(2.0, 0.0, 0.0),
        );
        assert!(tri.area().abs() < f64::EPSILON);
        assert!(tri.is_degenerate(1e-10));
        assert!(tri.normal(1e-10).is_none());
        assert_eq!(tri.normal_or_zero(1e-10), Vector3::zeros());
    }

    #[test]
    fn centroid_is_average() {
        let c = right_triangle().centroid();
        assert!((c.x - 1.0).abs() < 1e-10);
        assert!((c.y - 4.0 / 3.0).abs() < 1e-10);
    }

    #[test]
    fn signed_volume_of_unit_tetrahedron_face() {
        let tri = Triangle::new(
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
            Point3::new(0.0, 0.0, 1.0),
        );
        assert!((tri.signed_volume_contribution() - 1.0 / 6.0).abs() < 1e-12);
        assert!((tri.reversed().signed_volume_contribution() + 1.0 / 6.0).abs() < 1e-12);
    }
}
