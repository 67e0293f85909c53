//! Edge adjacency for the manifold check.

use hashbrown::HashMap;
use mesh_types::Face;

/// Undirected edge use counts for a face list.
///
/// Each edge is keyed on its sorted vertex-index pair, so `(a, b)` and
/// `(b, a)` are the same edge. A closed 2-manifold surface uses every edge
/// exactly twice.
#[derive(Debug, Clone, Default)]
pub struct EdgeAdjacency {
    edge_counts: HashMap<(u32, u32), u32>,
}

impl EdgeAdjacency {
    /// Count edge uses over all faces.
    ///
    /// # Example
    ///
    /// ```
    /// use mesh_repair::EdgeAdjacency;
    ///
    /// let adj = EdgeAdjacency::build(&[[0, 1, 2], [1, 3, 2]]);
    /// assert_eq!(adj.edge_count(), 5);
    /// assert_eq!(adj.boundary_edge_count(), 4);
    /// assert_eq!(adj.count(2, 1), 2);
    /// ```
    #[must_use]
    pub fn build(faces: &[Face]) -> Self {
        let mut edge_counts: HashMap<(u32, u32), u32> = HashMap::with_capacity(faces.len() * 3 / 2);

        for face in faces {
            let edges = [
                normalize_edge(face[0], face[1]),
                normalize_edge(face[1], face[2]),
                normalize_edge(face[2], face[0]),
            ];
            for edge in edges {
                *edge_counts.entry(edge).or_insert(0) += 1;
            }
        }

        Self { edge_counts }
    }

    /// How many faces use the edge between `v0` and `v1`.
    #[must_use]
    pub fn count(&self, v0: u32, v1: u32) -> u32 {
        self.edge_counts
            .get(&normalize_edge(v0, v1))
            .copied()
            .unwrap_or(0)
    }

    /// Number of distinct edges.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.edge_counts.len()
    }

    /// Edges used by exactly one face (open edges).
    pub fn boundary_edges(&self) -> impl Iterator<Item = (u32, u32)> + '_ {
        self.edge_counts
            .iter()
            .filter(|&(_, &count)| count == 1)
            .map(|(&edge, _)| edge)
    }

    /// Number of edges used by exactly one face.
    #[must_use]
    pub fn boundary_edge_count(&self) -> usize {
        self.edge_counts.values().filter(|&&count| count == 1).count()
    }

    /// Edges used by more than two faces.
    pub fn non_manifold_edges(&self) -> impl Iterator<Item = (u32, u32)> + '_ {
        self.edge_counts
            .iter()
            .filter(|&(_, &count)| count > 2)
            .map(|(&edge, _)| edge)
    }

    /// Number of edges used by more than two faces.
    #[must_use]
    pub fn non_manifold_edge_count(&self) -> usize {
        self.edge_counts.values().filter(|&&count| count > 2).count()
    }

    /// True iff every edge is used exactly twice.
    ///
    /// An empty face list is vacuously manifold.
    #[must_use]
    pub fn is_manifold(&self) -> bool {
        self.edge_counts.values().all(|&count| count == 2)
    }
}

/// Sort an edge's endpoints so the smaller index comes first.
#[inline]
fn normalize_edge(v0: u32, v1: u32) -> (u32, u32) {
    if v0 < v1 { (v0, v1) } else { (v1, v0) }
}
