//! Printability validation and light repair for triangle meshes.
//!
//! This crate provides:
//! - [`validate_mesh`] - structural, degeneracy, scale and manifold checks
//!   producing a [`ValidationReport`]
//! - [`EdgeAdjacency`] - undirected edge use counts
//! - [`merge_vertices`] - spatial-hash vertex welding
//! - [`orient_outward`] - flips closed inside-out meshes
//!
//! Validation never fails. Problems are reported as strings in the report:
//! structural problems (too few vertices, no faces, bad indices) are errors
//! and make `is_valid` false, everything else is a warning.
//!
//! # Example
//!
//! ```
//! use mesh_repair::validate_mesh;
//! use mesh_types::{Mesh, Vertex};
//!
//! let mesh = Mesh::from_parts(vec![Vertex::from_coords(0.0, 0.0, 0.0)], vec![]);
//! let report = validate_mesh(&mesh);
//!
//! assert!(!report.is_valid);
//! assert_eq!(report.errors[0], "Insufficient vertices: 1 (minimum 3 required)");
//! ```

// Safety: Deny unwrap/expect in library code. Tests may use them (workspace warns).
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
#![warn(missing_docs)]

mod adjacency;
mod repair;
mod validate;

pub use adjacency::EdgeAdjacency;
pub use repair::{merge_vertices, orient_outward, signed_volume};
pub use validate::{ValidationOptions, ValidationReport, validate_mesh, validate_mesh_with_options};
