//! Light repairs applied before export.
//!
//! Both helpers return a new mesh and leave their input untouched.

use hashbrown::HashMap;
use mesh_types::{Face, Mesh, Point3, Vertex};
use tracing::debug;

use crate::adjacency::EdgeAdjacency;

/// Weld vertices closer than `epsilon` and drop faces that collapse.
///
/// Uses a spatial hash with cell size `2 * epsilon` and checks the 3x3x3
/// neighborhood of each vertex. Chains of merges are resolved to one
/// representative. Vertices that end up unreferenced are removed and the
/// remaining ones keep their relative order. Faces with out-of-range
/// indices are kept unchanged so validation can still report them.
///
/// # Example
///
/// ```
/// use mesh_repair::merge_vertices;
/// use mesh_types::{Mesh, Vertex};
///
/// // Two triangles sharing an edge, stored with duplicated vertices.
/// let mesh = Mesh::from_parts(
///     vec![
///         Vertex::from_coords(0.0, 0.0, 0.0),
///         Vertex::from_coords(1.0, 0.0, 0.0),
///         Vertex::from_coords(0.0, 1.0, 0.0),
///         Vertex::from_coords(1.0, 0.0, 0.0),
///         Vertex::from_coords(1.0, 1.0, 0.0),
///         Vertex::from_coords(0.0, 1.0, 0.0),
///     ],
///     vec![[0, 1, 2], [3, 4, 5]],
/// );
///
/// let welded = merge_vertices(&mesh, 1e-6);
/// assert_eq!(welded.vertex_count(), 4);
/// assert_eq!(welded.face_count(), 2);
/// ```
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn merge_vertices(mesh: &Mesh, epsilon: f64) -> Mesh {
    let vertices = mesh.vertices();
    if vertices.is_empty() || epsilon.is_nan() || epsilon <= 0.0 {
        return mesh.clone();
    }

    let cell_size = epsilon * 2.0;

    let mut spatial_hash: HashMap<(i64, i64, i64), Vec<u32>> = HashMap::new();
    for (idx, vertex) in vertices.iter().enumerate() {
        let cell = pos_to_cell(&vertex.position, cell_size);
        spatial_hash.entry(cell).or_default().push(idx as u32);
    }

    let mut remap: Vec<u32> = (0..vertices.len() as u32).collect();
    let mut merged = 0_usize;

    for (idx, vertex) in vertices.iter().enumerate() {
        let idx = idx as u32;
        if remap[idx as usize] != idx {
            continue;
        }

        let cell = pos_to_cell(&vertex.position, cell_size);
        for dx in -1..=1 {
            for dy in -1..=1 {
                for dz in -1..=1 {
                    let neighbor_cell = (cell.0 + dx, cell.1 + dy, cell.2 + dz);
                    let Some(candidates) = spatial_hash.get(&neighbor_cell) else {
                        continue;
                    };
                    for &other in candidates {
                        if other <= idx || remap[other as usize] != other {
                            continue;
                        }
                        let dist = (vertex.position - vertices[other as usize].position).norm();
                        if dist < epsilon {
                            remap[other as usize] = idx;
                            merged += 1;
                        }
                    }
                }
            }
        }
    }

    if merged == 0 {
        return mesh.clone();
    }

    // Representatives are processed in index order, so remap targets are always roots.
    let faces: Vec<Face> = mesh
        .faces()
        .iter()
        .map(|face| face.map(|v| remap.get(v as usize).copied().unwrap_or(v)))
        .filter(|&[a, b, c]| a != b && b != c && a != c)
        .collect();

    let (vertices, faces) = compact(vertices, faces, &remap);

    debug!(
        merged,
        vertices = vertices.len(),
        faces = faces.len(),
        "merged vertices"
    );

    Mesh::from_parts(vertices, faces)
}

/// Drop representatives no face uses and renumber the rest in order.
///
/// Only vertices that are their own representative are candidates, so a
/// merged-away vertex never survives. Out-of-range face indices are left
/// alone and stay out of range, since the vertex list only shrinks.
#[allow(clippy::cast_possible_truncation)]
fn compact(vertices: &[Vertex], mut faces: Vec<Face>, remap: &[u32]) -> (Vec<Vertex>, Vec<Face>) {
    let mut used = vec![false; vertices.len()];
    for face in &faces {
        for &v in face {
            if let Some(slot) = used.get_mut(v as usize) {
                *slot = true;
            }
        }
    }

    let mut new_index = vec![u32::MAX; vertices.len()];
    let mut kept = Vec::with_capacity(vertices.len());
    for (idx, vertex) in vertices.iter().enumerate() {
        if remap[idx] as usize == idx && used[idx] {
            new_index[idx] = kept.len() as u32;
            kept.push(*vertex);
        }
    }

    for face in &mut faces {
        for v in face.iter_mut() {
            if let Some(&mapped) = new_index.get(*v as usize) {
                *v = mapped;
            }
        }
    }

    (kept, faces)
}

/// Convert a position to its spatial hash cell.
#[allow(clippy::cast_possible_truncation)]
fn pos_to_cell(pos: &Point3<f64>, cell_size: f64) -> (i64, i64, i64) {
    (
        (pos.x / cell_size).floor() as i64,
        (pos.y / cell_size).floor() as i64,
        (pos.z / cell_size).floor() as i64,
    )
}

/// Signed volume enclosed by the mesh.
///
/// Positive for a closed mesh with outward winding, negative when it is
/// inside-out. Meaningless for open meshes.
#[must_use]
pub fn signed_volume(mesh: &Mesh) -> f64 {
    mesh.signed_volume()
}

/// Flip every face of a closed, inside-out mesh.
///
/// Meshes that are open or already enclose a non-negative volume are
/// returned unchanged, since the sign of the volume says nothing about the
/// orientation of an open surface.
///
/// ```
/// use mesh_repair::{orient_outward, signed_volume};
/// use mesh_types::unit_cube;
///
/// let inside_out = unit_cube().with_flipped_winding();
/// assert!(signed_volume(&inside_out) < 0.0);
/// assert!(signed_volume(&orient_outward(&inside_out)) > 0.0);
/// ```
#[must_use]
pub fn orient_outward(mesh: &Mesh) -> Mesh {
    if mesh.face_count() == 0 || !EdgeAdjacency::build(mesh.faces()).is_manifold() {
        return mesh.clone();
    }

    let volume = mesh.signed_volume();
    if volume < 0.0 {
        debug!(volume, "flipping inside-out mesh");
        mesh.with_flipped_winding()
    } else {
        mesh.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mesh_types::{Vertex, unit_cube};

    /// Unit cube stored as an unwelded triangle soup (3 vertices per face).
    fn cube_soup() -> Mesh {
        let cube = unit_cube();
        let mut vertices = Vec::new();
        let mut faces = Vec::new();
        for tri in cube.triangles() {
            let base = vertices.len() as u32;
            vertices.extend([tri.v0, tri.v1, tri.v2].map(Vertex::new));
            faces.push([base, base + 1, base + 2]);
        }
        Mesh::from_parts(vertices, faces)
    }

    #[test]
    fn welds_triangle_soup_back_to_cube() {
        let soup = cube_soup();
        assert_eq!(soup.vertex_count(), 36);
        assert!(!EdgeAdjacency::build(soup.faces()).is_manifold());

        let welded = merge_vertices(&soup, 1e-6);
        assert_eq!(welded.vertex_count(), 8);
        assert_eq!(welded.face_count(), 12);
        assert!(EdgeAdjacency::build(welded.faces()).is_manifold());
        assert!((welded.signed_volume() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn weld_drops_collapsed_faces() {
        let mesh = Mesh::from_parts(
            vec![
                Vertex::from_coords(0.0, 0.0, 0.0),
                Vertex::from_coords(1.0, 0.0, 0.0),
                Vertex::from_coords(0.0, 1.0, 0.0),
                Vertex::from_coords(1.0 + 1e-9, 0.0, 0.0),
            ],
            vec![[0, 1, 2], [0, 1, 3]],
        );
        let welded = merge_vertices(&mesh, 1e-6);
        assert_eq!(welded.vertex_count(), 3);
        assert_eq!(welded.faces(), &[[0, 1, 2]]);
    }

    #[test]
    fn weld_keeps_distant_vertices() {
        let cube = unit_cube();
        let welded = merge_vertices(&cube, 1e-6);
        assert_eq!(welded, cube);
    }

    #[test]
    fn weld_is_greedy_from_lowest_index() {
        // 0-1 and 1-2 are within epsilon, 0-2 is not. Vertex 1 joins 0 first,
        // so 2 stays on its own.
        let mesh = Mesh::from_parts(
            vec![
                Vertex::from_coords(0.0, 0.0, 0.0),
                Vertex::from_coords(0.6, 0.0, 0.0),
                Vertex::from_coords(1.2, 0.0, 0.0),
                Vertex::from_coords(0.0, 5.0, 0.0),
                Vertex::from_coords(5.0, 5.0, 0.0),
            ],
            vec![[1, 4, 3], [2, 4, 3]],
        );
        let welded = merge_vertices(&mesh, 1.0);
        assert_eq!(welded.vertex_count(), 4);
        assert_eq!(welded.faces(), &[[0, 3, 2], [1, 3, 2]]);
        assert!(welded.triangle(0).unwrap().v0.x.abs() < 1e-12);
        assert!((welded.triangle(1).unwrap().v0.x - 1.2).abs() < 1e-12);
    }

    #[test]
    fn weld_leaves_bad_indices_for_validation() {
        let mesh = Mesh::from_parts(
            vec![
                Vertex::from_coords(0.0, 0.0, 0.0),
                Vertex::from_coords(0.0, 0.0, 0.0),
                Vertex::from_coords(1.0, 0.0, 0.0),
                Vertex::from_coords(0.0, 1.0, 0.0),
            ],
            vec![[1, 2, 3], [0, 2, 99]],
        );
        let welded = merge_vertices(&mesh, 1e-6);
        assert_eq!(welded.face_count(), 2);
        assert_eq!(welded.faces()[1][2], 99);
    }

    #[test]
    fn orient_flips_inside_out_cube() {
        let flipped = unit_cube().with_flipped_winding();
        let fixed = orient_outward(&flipped);
        assert_eq!(fixed, unit_cube());
    }

    #[test]
    fn orient_leaves_open_mesh_alone() {
        let (vertices, mut faces) = unit_cube().with_flipped_winding().into_parts();
        faces.pop();
        let open = Mesh::from_parts(vertices, faces);
        assert_eq!(orient_outward(&open), open);
    }

    #[test]
    fn signed_volume_of_cube() {
        assert!((signed_volume(&unit_cube()) - 1.0).abs() < 1e-12);
    }
}
