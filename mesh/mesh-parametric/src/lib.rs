//! Parametric gear, spring and thread meshes.
//!
//! Every generator takes a validated parameter record and returns a closed,
//! outward-wound [`Mesh`](mesh_types::Mesh) in millimeters:
//!
//! - [`generate_gear`] - spur gear extruded along +Z
//! - [`generate_spring`] - circular wire swept along a helix
//! - [`generate_thread`] - helical strip with a triangle-wave crest
//!
//! [`generate`] dispatches on the tagged [`ShapeParameters`] union.
//!
//! The tooth and thread profiles are approximations meant for printing
//! visual parts. They are not dimensionally accurate involute or ISO forms,
//! and `pressure_angle_deg` / `thread_angle_deg` are validated but do not
//! alter the outline.
//!
//! # Example
//!
//! ```
//! use mesh_parametric::{ShapeParameters, SpringParams, generate};
//!
//! let params = ShapeParameters::Spring(SpringParams::new(5.0, 1.0, 0.1, 0.3)?);
//! let spring = generate(&params)?;
//! assert!(spring.signed_volume() > 0.0);
//! # Ok::<(), mesh_parametric::ParamError>(())
//! ```

#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
#![warn(missing_docs)]

mod error;
mod frame;
mod gear;
mod generate;
mod params;
mod spring;
mod thread;

pub use error::{ParamError, ParamResult};
pub use frame::{Frame, Helix};
pub use gear::{SEGMENTS_PER_TOOTH, generate_gear};
pub use generate::generate;
pub use params::{GearParams, ShapeParameters, SpringParams, ThreadParams};
pub use spring::{SECTION_SEGMENTS, STEPS_PER_COIL, generate_spring};
pub use thread::{CREST_PERIOD, SEGMENTS_PER_TURN, generate_thread};
