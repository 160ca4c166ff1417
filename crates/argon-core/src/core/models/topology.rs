use tracing::warn;

/// Undirected bonded topology over a fixed set of atom indices.
///
/// Edges are normalized (`i < j`) and deduplicated at construction, and the
/// adjacency list is built exactly once; angle and dihedral derivation
/// traverse the cached adjacency rather than rescanning the edge list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Topology {
    n_atoms: usize,
    edges: Vec<[usize; 2]>,
    adjacency: Vec<Vec<usize>>,
}

impl Topology {
    /// A topology with no bonds over `n_atoms` atoms.
    pub fn empty(n_atoms: usize) -> Self {
        Self {
            n_atoms,
            edges: Vec::new(),
            adjacency: vec![Vec::new(); n_atoms],
        }
    }

    /// Builds a topology from raw undirected edges.
    ///
    /// Self-loops and edges referencing atoms outside `0..n_atoms` are
    /// dropped with a warning; duplicates (in either order) collapse to a
    /// single edge.
    pub fn new(n_atoms: usize, bonds: &[[usize; 2]]) -> Self {
        let mut edges: Vec<[usize; 2]> = Vec::with_capacity(bonds.len());
        for &[a, b] in bonds {
            if a == b || a >= n_atoms || b >= n_atoms {
                warn!(a, b, n_atoms, "dropping invalid bond edge");
                continue;
            }
            edges.push([a.min(b), a.max(b)]);
        }
        edges.sort_unstable();
        edges.dedup();

        let mut adjacency = vec![Vec::new(); n_atoms];
        for &[i, j] in &edges {
            adjacency[i].push(j);
            adjacency[j].push(i);
        }

        Self {
            n_atoms,
            edges,
            adjacency,
        }
    }

    pub fn n_atoms(&self) -> usize {
        self.n_atoms
    }

    pub fn edges(&self) -> &[[usize; 2]] {
        &self.edges
    }

    pub fn neighbors(&self, atom: usize) -> &[usize] {
        &self.adjacency[atom]
    }

    /// All angle triples `(i, j, k)` with `j` the vertex atom and `i < k`.
    pub fn derive_angles(&self) -> Vec<[usize; 3]> {
        let mut angles = Vec::new();
        for (j, neighbors) in self.adjacency.iter().enumerate() {
            for (a, &i) in neighbors.iter().enumerate() {
                for &k in &neighbors[a + 1..] {
                    let (i, k) = (i.min(k), i.max(k));
                    angles.push([i, j, k]);
                }
            }
        }
        angles
    }

    /// All proper dihedral quadruples `(i, j, k, l)` around each bond `j-k`.
    ///
    /// Each central bond is visited once (edges are normalized), so every
    /// dihedral appears exactly once.
    pub fn derive_dihedrals(&self) -> Vec<[usize; 4]> {
        let mut dihedrals = Vec::new();
        for &[j, k] in &self.edges {
            for &i in &self.adjacency[j] {
                if i == k {
                    continue;
                }
                for &l in &self.adjacency[k] {
                    if l == j || l == i {
                        continue;
                    }
                    dihedrals.push([i, j, k, l]);
                }
            }
        }
        dihedrals
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn edges_are_normalized_and_deduplicated() {
        let topo = Topology::new(4, &[[2, 0], [0, 2], [1, 2], [3, 2]]);
        assert_eq!(topo.edges(), &[[0, 2], [1, 2], [2, 3]]);
        assert_eq!(topo.neighbors(2), &[0, 1, 3]);
    }

    #[test]
    fn invalid_edges_are_dropped() {
        let topo = Topology::new(3, &[[0, 1], [1, 1], [2, 9]]);
        assert_eq!(topo.edges(), &[[0, 1]]);
    }

    #[test]
    fn linear_chain_derives_expected_angles_and_dihedrals() {
        // 0-1-2-3 chain: two angles, one dihedral.
        let topo = Topology::new(4, &[[0, 1], [1, 2], [2, 3]]);
        assert_eq!(topo.derive_angles(), vec![[0, 1, 2], [1, 2, 3]]);
        assert_eq!(topo.derive_dihedrals(), vec![[0, 1, 2, 3]]);
    }

    #[test]
    fn branched_center_derives_all_neighbor_pairs_as_angles() {
        // Methane-like star: central atom 0 bonded to 1..=4.
        let topo = Topology::new(5, &[[0, 1], [0, 2], [0, 3], [0, 4]]);
        assert_eq!(topo.derive_angles().len(), 6);
        assert!(topo.derive_dihedrals().is_empty());
    }

    #[test]
    fn three_membered_ring_excludes_degenerate_dihedrals() {
        let topo = Topology::new(3, &[[0, 1], [1, 2], [0, 2]]);
        // Every candidate quadruple around a ring bond revisits one of its
        // own end atoms, so none survive.
        assert!(topo.derive_dihedrals().is_empty());
        assert_eq!(topo.derive_angles().len(), 3);
    }
}
