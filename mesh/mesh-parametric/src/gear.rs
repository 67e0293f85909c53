//! Spur gear generation.
//!
//! The tooth outline is a piecewise-linear stand-in for an involute: each
//! tooth spans [`SEGMENTS_PER_TOOTH`] ring vertices split into four phases
//! (rising flank, tip land, falling flank, root land). The outline is
//! extruded along +Z and both ends are closed without a center vertex.

use std::f64::consts::TAU;

use mesh_types::{Face, Mesh, Vertex};
use tracing::debug;

use crate::error::ParamResult;
use crate::params::GearParams;

/// Ring vertices per tooth.
pub const SEGMENTS_PER_TOOTH: usize = 8;

/// Generate a closed spur gear mesh.
///
/// The front face sits at `z = 0` and the back face at `z = thickness`. The
/// mesh has `teeth * 16` vertices and `4 * n - 4` faces where
/// `n = teeth * 8`.
///
/// # Errors
///
/// Returns [`crate::ParamError::InvalidParameter`] if `params` fails
/// validation.
///
/// # Example
///
/// ```
/// use mesh_parametric::{GearParams, generate_gear};
///
/// let gear = generate_gear(&GearParams::new(1.0, 20, 20.0, 0.5).unwrap()).unwrap();
/// assert_eq!(gear.vertex_count(), 320);
/// assert_eq!(gear.face_count(), 636);
/// ```
pub fn generate_gear(params: &GearParams) -> ParamResult<Mesh> {
    params.validate()?;

    let teeth = params.teeth as usize;
    let ring = teeth * SEGMENTS_PER_TOOTH;
    let outer = params.outer_radius();
    let inner = params.inner_radius();

    let mut vertices = Vec::with_capacity(ring * 2);
    for z in [0.0, params.thickness] {
        for k in 0..ring {
            #[allow(clippy::cast_precision_loss)]
            let angle = TAU * k as f64 / ring as f64;
            let r = profile_radius(k % SEGMENTS_PER_TOOTH, inner, outer);
            vertices.push(Vertex::from_coords(r * angle.cos(), r * angle.sin(), z));
        }
    }

    let cap = cap_triangles(teeth);
    let mut faces = Vec::with_capacity(4 * ring - 4);
    #[allow(clippy::cast_possible_truncation)]
    let n = ring as u32;

    // Front cap faces -Z, so its CCW-from-above triangles are reversed.
    faces.extend(cap.iter().map(|&[a, b, c]| [a, c, b]));
    faces.extend(cap.iter().map(|&[a, b, c]| [a + n, b + n, c + n]));

    for i in 0..n {
        let j = (i + 1) % n;
        faces.push([i, j, j + n]);
        faces.push([i, j + n, i + n]);
    }

    debug!(
        teeth = params.teeth,
        vertices = vertices.len(),
        faces = faces.len(),
        "generated gear"
    );

    Ok(Mesh::from_parts(vertices, faces))
}

/// Radius of ring vertex `k` within one tooth (`k < SEGMENTS_PER_TOOTH`).
fn profile_radius(k: usize, inner: f64, outer: f64) -> f64 {
    let depth = outer - inner;
    let t = if k % 2 == 0 { 0.0 } else { 0.5 };
    match k / 2 {
        0 => inner + depth * t,
        1 => outer,
        2 => outer - depth * t,
        _ => inner,
    }
}

/// CCW (seen from +Z) triangulation of the gear outline using ring indices.
///
/// Each tooth bump runs from its first root vertex `b` to `b + 6`, both on the
/// root circle, and is fanned from `b`. What remains is the polygon of the
/// `b`, `b + 6`, `b + 7` vertices of every tooth, all on the root circle and
/// therefore convex, which is fanned from its first vertex.
fn cap_triangles(teeth: usize) -> Vec<Face> {
    let mut tris = Vec::with_capacity(teeth * SEGMENTS_PER_TOOTH - 2);
    let mut root = Vec::with_capacity(teeth * 3);

    for tooth in 0..teeth {
        #[allow(clippy::cast_possible_truncation)]
        let b = (tooth * SEGMENTS_PER_TOOTH) as u32;
        for k in 1..=5 {
            tris.push([b, b + k, b + k + 1]);
        }
        root.extend([b, b + 6, b + 7]);
    }

    for w in 1..root.len() - 1 {
        tris.push([root[0], root[w], root[w + 1]]);
    }
    tris
}
