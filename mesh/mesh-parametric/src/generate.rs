//! Dispatch from [`ShapeParameters`] to the shape generators.

use mesh_types::Mesh;

use crate::error::ParamResult;
use crate::gear::generate_gear;
use crate::params::ShapeParameters;
use crate::spring::generate_spring;
use crate::thread::generate_thread;

/// Generate the mesh described by `params`.
///
/// Generation is deterministic: equal parameters give identical meshes.
///
/// # Errors
///
/// Returns [`crate::ParamError::InvalidParameter`] if any field constraint is
/// violated. No mesh is produced in that case.
///
/// # Example
///
/// ```
/// use mesh_parametric::{GearParams, ShapeParameters, generate};
///
/// let params = ShapeParameters::Gear(GearParams::new(1.0, 20, 20.0, 0.5).unwrap());
/// let mesh = generate(&params).unwrap();
/// assert_eq!(mesh, generate(&params).unwrap());
/// ```
pub fn generate(params: &ShapeParameters) -> ParamResult<Mesh> {
    match params {
        ShapeParameters::Gear(p) => generate_gear(p),
        ShapeParameters::Spring(p) => generate_spring(p),
        ShapeParameters::Thread(p) => generate_thread(p),
    }
}
