//! Parametric part generation and print-ready STL export.
//!
//! This umbrella crate re-exports the mesh-* crates and adds
//! [`export_part`], which runs the whole pipeline for one part:
//! generate the shape, validate it, write STL, advise on printing,
//! estimate the print and record a metadata sidecar.
//!
//! # Quick Start
//!
//! ```no_run
//! use mesh::prelude::*;
//!
//! let spring = SpringParams::new(5.0, 1.0, 0.1, 0.3).unwrap();
//! let mesh = generate(&spring.into()).unwrap();
//!
//! let report = validate_mesh(&mesh);
//! assert!(report.is_valid);
//!
//! let result = write_binary(&mesh, "spring.stl", "spring").unwrap();
//! for line in advise(&mesh, &MaterialProfile::petg()) {
//!     println!("{line}");
//! }
//! # let _ = result;
//! ```
//!
//! # Module Organization
//!
//! - [`types`] - Core data structures: `Mesh`, `Vertex`, `Triangle`, `Aabb`
//! - [`parametric`] - Gear, spring and thread generators
//! - [`repair`] - Validation, vertex welding, winding repair
//! - [`printability`] - Materials, print advice, estimates, fits
//! - [`io`] - STL export, metadata sidecars, STL loading

// Safety: Deny unwrap/expect in library code. Tests may use them (workspace warns).
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
#![warn(missing_docs)]
#![doc(html_root_url = "https://docs.rs/mesh/0.7.0")]

mod pipeline;

// =============================================================================
// Re-exports
// =============================================================================

/// Core data structures: `Mesh`, `Vertex`, `Triangle`, `Aabb`.
pub use mesh_types as types;

/// Gear, spring and thread generators.
pub use mesh_parametric as parametric;

/// Mesh validation and light repair.
pub use mesh_repair as repair;

/// Material profiles, print advice and estimates.
pub use mesh_printability as printability;

/// STL export and metadata sidecars.
pub use mesh_io as io;

pub use mesh_io::{ExportResult, ExportSettings, IoError, IoResult, StlFormat};
pub use mesh_parametric::{GearParams, ShapeParameters, SpringParams, ThreadParams};
pub use mesh_printability::{MaterialProfile, PrintEstimate, PrintSettings};
pub use pipeline::{PartExport, PartRequest, export_part};

// =============================================================================
// Prelude
// =============================================================================

/// Common imports for part generation and export.
///
/// # Usage
///
/// ```
/// use mesh::prelude::*;
/// ```
pub mod prelude {
    // Core types
    pub use mesh_types::{Aabb, Face, Mesh, Triangle, Vertex, unit_cube};

    // Generation
    pub use mesh_parametric::{
        GearParams, ShapeParameters, SpringParams, ThreadParams, generate,
    };

    // Validation
    pub use mesh_repair::{ValidationOptions, ValidationReport, validate_mesh};

    // Advice
    pub use mesh_printability::{
        MaterialProfile, PrintSettings, advise, estimate_print, recommend,
    };

    // Export
    pub use mesh_io::{
        ExportResult, ExportSettings, StlFormat, write_ascii, write_binary, write_stl,
    };

    pub use crate::pipeline::{PartExport, PartRequest, export_part};
}

// =============================================================================
// Tests
// =============================================================================
