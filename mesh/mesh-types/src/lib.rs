//! Core mesh types for parametric part generation.
//!
//! This crate provides the data model shared by every stage of the
//! generate → validate → export → advise chain:
//!
//! - [`Vertex`] - A point in 3D space
//! - [`Mesh`] - An immutable indexed triangle mesh
//! - [`Face`] - A triangle as three vertex indices
//! - [`Triangle`] - A concrete triangle with vertex positions
//! - [`Aabb`] - Axis-aligned bounding box
//!
//! # Units
//!
//! All coordinates are `f64`. Downstream crates (mesh-repair,
//! mesh-printability, mesh-io) assume millimeters.
//!
//! # Coordinate System
//!
//! Uses a **right-handed coordinate system**:
//! - X: width (left/right)
//! - Y: depth (front/back)
//! - Z: height (up/down), the build direction
//!
//! Face winding is **counter-clockwise (CCW) when viewed from outside**.
//! Normals point outward by the right-hand rule.
//!
//! # Ownership
//!
//! A [`Mesh`] cannot be modified after construction. Operations that change
//! geometry return a new mesh, so a mesh can be handed from one stage to the
//! next (or shared across threads) without any stage observing another's
//! edits.
//!
//! # Example
//!
//! ```
//! use mesh_types::{Mesh, Vertex};
//!
//! let mesh = Mesh::from_parts(
//!     vec![
//!         Vertex::from_coords(0.0, 0.0, 0.0),
//!         Vertex::from_coords(1.0, 0.0, 0.0),
//!         Vertex::from_coords(0.5, 1.0, 0.0),
//!     ],
//!     vec![[0, 1, 2]],
//! );
//!
//! assert_eq!(mesh.face_count(), 1);
//! assert!(!mesh.is_empty());
//! ```

#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
#![warn(missing_docs)]

mod bounds;
mod mesh;
mod triangle;
mod vertex;

pub use bounds::Aabb;
pub use mesh::{Face, Mesh, unit_cube};
pub use triangle::Triangle;
pub use vertex::Vertex;

// Re-export nalgebra types for convenience
pub use nalgebra::{Point3, Vector3};
