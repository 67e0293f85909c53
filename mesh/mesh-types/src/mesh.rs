//! Indexed triangle mesh.

use crate::{Aabb, Triangle, Vertex};
use nalgebra::{Point3, Vector3};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A triangle as three indices into a mesh's vertex list.
///
/// Winding is counter-clockwise when viewed from outside.
pub type Face = [u32; 3];

/// An immutable indexed triangle mesh.
///
/// Vertices and faces are stored separately, with faces referencing
/// vertices by index. Once built, a mesh is never modified in place:
/// geometric operations such as [`Mesh::translated`] return a new mesh.
///
/// A mesh may still be structurally invalid (for example a face may point
/// past the end of the vertex list) when it comes from an external source.
/// Accessors that resolve indices return `Option` instead of panicking, and
/// the validator in `mesh-repair` reports such problems.
///
/// # Example
///
/// ```
/// use mesh_types::{Mesh, Vertex};
///
/// let mesh = Mesh::from_parts(
///     vec![
///         Vertex::from_coords(0.0, 0.0, 0.0),
///         Vertex::from_coords(1.0, 0.0, 0.0),
///         Vertex::from_coords(0.0, 1.0, 0.0),
///     ],
///     vec![[0, 1, 2]],
/// );
///
/// assert_eq!(mesh.vertex_count(), 3);
/// assert_eq!(mesh.face_count(), 1);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Mesh {
    vertices: Vec<Vertex>,
    faces: Vec<Face>,
}

impl Mesh {
    /// Create an empty mesh.
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self {
            vertices: Vec::new(),
            faces: Vec::new(),
        }
    }

    /// Create a mesh from vertices and faces.
    ///
    /// Face indices are not checked here; see `mesh_repair::validate_mesh`.
    #[inline]
    #[must_use]
    pub const fn from_parts(vertices: Vec<Vertex>, faces: Vec<Face>) -> Self {
        Self { vertices, faces }
    }

    /// Create a mesh from flat coordinate and index arrays.
    ///
    /// * `positions` - `[x0, y0, z0, x1, y1, z1, ...]`
    /// * `indices` - `[a0, b0, c0, a1, b1, c1, ...]`
    ///
    /// Returns an empty mesh if either length is not a multiple of 3.
    ///
    /// ```
    /// use mesh_types::Mesh;
    ///
    /// let positions = [0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0];
    /// let mesh = Mesh::from_raw(&positions, &[0, 1, 2]);
    /// assert_eq!(mesh.vertex_count(), 3);
    /// assert_eq!(mesh.face_count(), 1);
    /// ```
    #[must_use]
    pub fn from_raw(positions: &[f64], indices: &[u32]) -> Self {
        if positions.len() % 3 != 0 || indices.len() % 3 != 0 {
            return Self::new();
        }

        let vertices = positions
            .chunks_exact(3)
            .map(|c| Vertex::from_coords(c[0], c[1], c[2]))
            .collect();
        let faces = indices.chunks_exact(3).map(|c| [c[0], c[1], c[2]]).collect();

        Self { vertices, faces }
    }

    /// Consume the mesh and return its vertex and face lists.
    #[must_use]
    pub fn into_parts(self) -> (Vec<Vertex>, Vec<Face>) {
        (self.vertices, self.faces)
    }

    /// All vertices in index order.
    #[inline]
    #[must_use]
    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    /// All faces in order.
    #[inline]
    #[must_use]
    pub fn faces(&self) -> &[Face] {
        &self.faces
    }

    /// Number of vertices.
    #[inline]
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Number of faces.
    #[inline]
    #[must_use]
    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    /// True if the mesh has no vertices or no faces.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty() || self.faces.is_empty()
    }

    /// Vertex by index.
    #[inline]
    #[must_use]
    pub fn vertex(&self, index: usize) -> Option<&Vertex> {
        self.vertices.get(index)
    }

    /// Resolve a face into a triangle.
    ///
    /// Returns `None` if the face index or any of its vertex indices is out
    /// of range.
    #[must_use]
    pub fn triangle(&self, face_index: usize) -> Option<Triangle> {
        let [a, b, c] = *self.faces.get(face_index)?;
        Some(Triangle::new(
            self.vertex(a as usize)?.position,
            self.vertex(b as usize)?.position,
            self.vertex(c as usize)?.position,
        ))
    }

    /// Iterate over every face that resolves to a triangle.
    ///
    /// Faces with out-of-range indices are skipped.
    pub fn triangles(&self) -> impl Iterator<Item = Triangle> + '_ {
        (0..self.faces.len()).filter_map(|i| self.triangle(i))
    }

    /// Axis-aligned bounding box over all vertices.
    ///
    /// Returns an empty box for a mesh without vertices.
    #[must_use]
    pub fn bounds(&self) -> Aabb {
        Aabb::from_points(self.vertices.iter().map(|v| &v.position))
    }

    /// Signed enclosed volume (divergence theorem).
    ///
    /// Only meaningful for closed meshes; negative when the winding points
    /// inward.
    #[must_use]
    pub fn signed_volume(&self) -> f64 {
        self.triangles()
            .map(|t| t.signed_volume_contribution())
            .sum()
    }

    /// Total surface area.
    #[must_use]
    pub fn surface_area(&self) -> f64 {
        self.triangles().map(|t| t.area()).sum()
    }

    /// Return a copy moved by `offset`.
    #[must_use]
    pub fn translated(&self, offset: Vector3<f64>) -> Self {
        self.map_positions(|p| p + offset)
    }

    /// Return a copy scaled uniformly by `factor` about `origin`.
    #[must_use]
    pub fn scaled_about(&self, origin: Point3<f64>, factor: f64) -> Self {
        self.map_positions(|p| origin + (p - origin) * factor)
    }

    /// Return a copy with every face's winding reversed.
    #[must_use]
    pub fn with_flipped_winding(&self) -> Self {
        Self {
            vertices: self.vertices.clone(),
            faces: self.faces.iter().map(|&[a, b, c]| [a, c, b]).collect(),
        }
    }

    fn map_positions(&self, f: impl Fn(Point3<f64>) -> Point3<f64>) -> Self {
        Self {
            vertices: self
                .vertices
                .iter()
                .map(|v| Vertex::new(f(v.position)))
                .collect(),
            faces: self.faces.clone(),
        }
    }
}

/// Create a closed unit cube mesh `[0, 1]^3` (8 vertices, 12 triangles).
///
/// Every edge is shared by exactly two faces and all faces wind outward,
/// which makes it the reference fixture for manifold and round-trip tests.
///
/// ```
/// use mesh_types::unit_cube;
///
/// let cube = unit_cube();
/// assert_eq!(cube.face_count(), 12);
/// assert!((cube.signed_volume() - 1.0).abs() < 1e-12);
/// ```
#[must_use]
pub fn unit_cube() -> Mesh {
    let vertices = vec![
        Vertex::from_coords(0.0, 0.0, 0.0),
        Vertex::from_coords(1.0, 0.0, 0.0),
        Vertex::from_coords(1.0, 1.0, 0.0),
        Vertex::from_coords(0.0, 1.0, 0.0),
        Vertex::from_coords(0.0, 0.0, 1.0),
        Vertex::from_coords(1.0, 0.0, 1.0),
        Vertex::from_coords(1.0, 1.0, 1.0),
        Vertex::from_coords(0.0, 1.0, 1.0),
    ];

    let faces = vec![
        // Bottom (z=0), -Z
        [0, 2, 1],
        [0, 3, 2],
        // Top (z=1), +Z
        [4, 5, 6],
        [4, 6, 7],
        // Front (y=0), -Y
        [0, 1, 5],
        [0, 5, 4],
        // Back (y=1), +Y
        [3, 7, 6],
        [3, 6, 2],
        // Left (x=0), -X
        [0, 4, 7],
        [0, 7, 3],
        // Right (x=1), +X
        [1, 2, 6],
        [1, 6, 5],
    ];

    Mesh::from_parts(vertices, faces)
}
