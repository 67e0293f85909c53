//! Print-setting advice for FDM 3D printing.
//!
//! This crate turns mesh geometry and a material profile into:
//!
//! - **Recommendations**: layer height, infill, supports and thin-wall
//!   warnings ([`recommend`], [`advise`])
//! - **Overhang analysis**: faces that need support ([`find_overhangs`])
//! - **Estimates**: material volume and print time ([`estimate_print`])
//! - **Compensation**: fit-class offsets and shrinkage pre-scaling
//!   ([`FitClass`], [`compensate_shrinkage`])
//!
//! Everything here is a pure function of its inputs and cannot fail.
//!
//! # Example
//!
//! ```
//! use mesh_printability::{MaterialProfile, advise};
//! use mesh_types::{Mesh, Vertex, unit_cube};
//!
//! // A 0.5 x 0.5 x 20 mm pin.
//! let (vertices, faces) = unit_cube().into_parts();
//! let pin = Mesh::from_parts(
//!     vertices
//!         .iter()
//!         .map(|v| Vertex::from_coords(v.x() * 0.5, v.y() * 0.5, v.z() * 20.0))
//!         .collect(),
//!     faces,
//! );
//!
//! let advice = advise(&pin, &MaterialProfile::pla());
//! assert!(advice.contains(&"Tall part - consider printing supports".to_string()));
//! assert!(advice.contains(&"Warning: Features thinner than 1mm may not print reliably".to_string()));
//! ```
//!
//! # Materials
//!
//! | Preset | Min wall | Max overhang | Shrinkage |
//! |--------|----------|--------------|-----------|
//! | PLA    | 1.2 mm   | 45°          | 0.3%      |
//! | PETG   | 1.0 mm   | 50°          | 0.2%      |
//! | ABS    | 1.5 mm   | 40°          | 0.5%      |
//! | TPU    | 2.0 mm   | 30°          | 0.2%      |

// Safety: Deny unwrap/expect in library code. Tests may use them (workspace warns).
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
#![warn(missing_docs)]

mod advisor;
mod estimate;
mod fit;
mod material;

pub use advisor::{OverhangSummary, advise, find_overhangs, recommend};
pub use estimate::{PrintEstimate, PrintSettings, estimate_print};
pub use fit::{FitClass, compensate_shrinkage};
pub use material::MaterialProfile;
