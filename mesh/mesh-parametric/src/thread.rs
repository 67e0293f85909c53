//! External thread generation.
//!
//! The thread is one continuous helical vertex strip whose radius follows a
//! triangle wave between the root and crest radius. Consecutive turns of the
//! strip are stitched together and the two helical end loops are capped, so
//! the result is closed. This is a printable approximation and not a
//! standard thread form.

use std::f64::consts::TAU;

use mesh_types::{Face, Mesh, Point3, Vector3, Vertex};
use tracing::debug;

use crate::error::ParamResult;
use crate::params::ThreadParams;

/// Strip vertices per full turn.
pub const SEGMENTS_PER_TURN: usize = 32;

/// Strip vertices per crest period of the radius wave.
pub const CREST_PERIOD: usize = 8;

/// Generate a closed thread mesh along +Z starting at `z = 0`.
///
/// The strip runs `turns + 1` turns where `turns = ceil(length / pitch)`, so
/// every angle is covered by at least `turns` full pitches of wall.
///
/// # Errors
///
/// Returns [`crate::ParamError::InvalidParameter`] if `params` fails
/// validation.
///
/// # Example
///
/// ```
/// use mesh_parametric::{ThreadParams, generate_thread};
///
/// let thread = generate_thread(&ThreadParams::new(1.0, 0.8, 0.2, 2.0, 60.0).unwrap()).unwrap();
/// let height = thread.bounds().size().z;
/// assert!(height >= 2.0);
/// ```
pub fn generate_thread(params: &ThreadParams) -> ParamResult<Mesh> {
    params.validate()?;

    let turns = params.turns();
    let last = SEGMENTS_PER_TURN * (turns + 1);
    let root = params.minor_diameter / 2.0;
    let depth = (params.major_diameter - params.minor_diameter) / 2.0;

    let mut vertices = Vec::with_capacity(last + 3);
    for j in 0..=last {
        #[allow(clippy::cast_precision_loss)]
        let fraction = j as f64 / SEGMENTS_PER_TURN as f64;
        let theta = TAU * fraction;
        let z = params.pitch * fraction;
        let r = root + depth * crest_factor(j);
        vertices.push(Vertex::from_coords(r * theta.cos(), r * theta.sin(), z));
    }

    let bottom = centroid(&vertices[..=SEGMENTS_PER_TURN]);
    let top = centroid(&vertices[last - SEGMENTS_PER_TURN..]);
    vertices.push(Vertex::new(bottom));
    vertices.push(Vertex::new(top));

    let faces = stitch(last);

    debug!(
        turns,
        vertices = vertices.len(),
        faces = faces.len(),
        "generated thread"
    );

    Ok(Mesh::from_parts(vertices, faces))
}

/// Triangle wave in `[0, 1]` with period [`CREST_PERIOD`], zero at the start
/// of each period and one at its middle.
fn crest_factor(j: usize) -> f64 {
    #[allow(clippy::cast_precision_loss)]
    let phase = (j % CREST_PERIOD) as f64 / CREST_PERIOD as f64;
    1.0 - (2.0 * phase - 1.0).abs()
}

fn centroid(vertices: &[Vertex]) -> Point3<f64> {
    #[allow(clippy::cast_precision_loss)]
    let count = vertices.len() as f64;
    let sum = vertices
        .iter()
        .fold(Vector3::zeros(), |acc, v| acc + v.position.coords);
    Point3::from(sum / count)
}

/// Faces for a strip whose last vertex index is `last`, with the bottom and
/// top cap centers at `last + 1` and `last + 2`.
#[allow(clippy::cast_possible_truncation)]
fn stitch(last: usize) -> Vec<Face> {
    let turn = SEGMENTS_PER_TURN as u32;
    let n = last as u32;
    let bottom = n + 1;
    let top = n + 2;

    let strip_faces = 2 * (last - SEGMENTS_PER_TURN);
    let mut faces = Vec::with_capacity(strip_faces + 2 * (SEGMENTS_PER_TURN + 1));
    for j in 0..(n - turn) {
        faces.push([j, j + 1, j + turn + 1]);
        faces.push([j, j + turn + 1, j + turn]);
    }

    for k in 0..turn {
        faces.push([bottom, k + 1, k]);
    }
    faces.push([bottom, 0, turn]);

    let first_top = n - turn;
    for m in first_top..n {
        faces.push([top, m, m + 1]);
    }
    faces.push([top, n, first_top]);

    faces
}
