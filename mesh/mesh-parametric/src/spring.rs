//! Helical spring generation.
//!
//! A circular wire section is swept along a helix using the helix's Frenet
//! frame, and both ends are closed with a fan around the wire center.

use std::f64::consts::TAU;

use mesh_types::{Mesh, Vertex};
use tracing::{debug, warn};

use crate::error::ParamResult;
use crate::frame::Helix;
use crate::params::SpringParams;

/// Sweep steps per full coil.
pub const STEPS_PER_COIL: f64 = 32.0;

/// Points in the wire cross-section.
pub const SECTION_SEGMENTS: usize = 16;

/// Generate a closed helical spring mesh.
///
/// The helix axis is Z and the coil starts on the +X axis at `z = 0`. The
/// mesh has `(steps + 1) * 16 + 2` vertices where
/// `steps = ceil(coils * 32)`.
///
/// # Errors
///
/// Returns [`crate::ParamError::InvalidParameter`] if `params` fails
/// validation.
///
/// # Example
///
/// ```
/// use mesh_parametric::{SpringParams, generate_spring};
///
/// let spring = generate_spring(&SpringParams::new(5.0, 1.0, 0.1, 0.3).unwrap()).unwrap();
/// assert_eq!(spring.vertex_count(), 161 * 16 + 2);
/// ```
pub fn generate_spring(params: &SpringParams) -> ParamResult<Mesh> {
    params.validate()?;

    if params.pitch < 2.0 * params.wire_radius {
        warn!(
            pitch = params.pitch,
            wire_radius = params.wire_radius,
            "spring pitch is smaller than the wire diameter, coils will overlap"
        );
    }

    let steps = step_count(params.coils);
    let helix = Helix::new(params.radius, params.pitch);
    let sweep = params.coils * TAU;
    let section = SECTION_SEGMENTS;

    let mut vertices = Vec::with_capacity((steps + 1) * section + 2);
    for s in 0..=steps {
        #[allow(clippy::cast_precision_loss)]
        let t = sweep * s as f64 / steps as f64;
        let center = helix.point(t);
        let frame = helix.frame(t);
        for k in 0..section {
            #[allow(clippy::cast_precision_loss)]
            let phi = TAU * k as f64 / section as f64;
            vertices.push(Vertex::new(frame.section_point(&center, params.wire_radius, phi)));
        }
    }

    let start_center = vertices.len();
    vertices.push(Vertex::new(helix.point(0.0)));
    let end_center = vertices.len();
    vertices.push(Vertex::new(helix.point(sweep)));

    #[allow(clippy::cast_possible_truncation)]
    let idx = |ring: usize, k: usize| (ring * section + k % section) as u32;

    let mut faces = Vec::with_capacity(steps * section * 2 + section * 2);
    for ring in 0..steps {
        for k in 0..section {
            let curr = idx(ring, k);
            let next_seg = idx(ring, k + 1);
            let next_ring = idx(ring + 1, k);
            let next_both = idx(ring + 1, k + 1);
            faces.push([curr, next_seg, next_ring]);
            faces.push([next_seg, next_both, next_ring]);
        }
    }

    #[allow(clippy::cast_possible_truncation)]
    let (start_center, end_center) = (start_center as u32, end_center as u32);
    for k in 0..section {
        faces.push([start_center, idx(0, k + 1), idx(0, k)]);
        faces.push([end_center, idx(steps, k), idx(steps, k + 1)]);
    }

    debug!(
        coils = params.coils,
        steps,
        vertices = vertices.len(),
        faces = faces.len(),
        "generated spring"
    );

    Ok(Mesh::from_parts(vertices, faces))
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn step_count(coils: f64) -> usize {
    ((coils * STEPS_PER_COIL).ceil() as usize).max(1)
}
