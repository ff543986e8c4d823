//! Classification of a partial edge selection into "cannot become a Hamiltonian cycle",
//! "may still become one" and "is one".
//!
//! All bookkeeping happens in a [`CycleScratch`] derived from the subset; neither the graph
//! nor the caller's subset are touched, so sibling branches may keep sharing the subset's
//! backing storage.

use crate::graph::*;
use smallvec::SmallVec;

/// Verdict of [`FeasibilityChecker::classify`]
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash)]
pub enum Classification {
    /// No extension of the subset is a Hamiltonian cycle
    Rejected(Rejection),
    /// The subset contains no cycle yet and may be extended
    Acceptable,
    /// The subset is a single cycle through all vertices
    Hamiltonian,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash)]
pub enum Rejection {
    /// More edges than vertices
    TooManyEdges,
    /// Some vertex is incident to more than two selected edges
    DegreeExceeded,
    /// A cycle on fewer than all vertices was closed
    ShortCycle,
    /// Every vertex lies on a cycle, but there is more than one cycle
    DisjointCycles,
}

impl Classification {
    pub fn is_rejected(&self) -> bool {
        matches!(self, Classification::Rejected(_))
    }

    pub fn is_acceptable(&self) -> bool {
        *self == Classification::Acceptable
    }

    pub fn is_hamiltonian(&self) -> bool {
        *self == Classification::Hamiltonian
    }
}

/// Degrees of all vertices with respect to the not-yet-removed edges of a subset.
///
/// The scratch is filled from a subset via [`CycleScratch::fill`]; afterwards edges can be
/// removed (stripping, confirmation pass) without any effect on the subset itself.
#[derive(Clone, Debug, Default)]
pub struct CycleScratch {
    degrees: Vec<NumNodes>,
    /// positions (into `ends`) of the subset edges incident to each vertex
    incident: Vec<SmallVec<[usize; 2]>>,
    ends: Vec<(Node, Node)>,
    removed: Vec<bool>,
}

impl CycleScratch {
    pub fn new(number_of_nodes: NumNodes) -> Self {
        let mut scratch = Self::default();
        scratch.reset(number_of_nodes);
        scratch
    }

    /// Creates a scratch holding the degree vector of `subset`
    pub fn from_subset<G: IncidenceList>(graph: &G, subset: &EdgeSubset) -> Self {
        let mut scratch = Self::new(graph.number_of_nodes());
        scratch.fill(graph, subset);
        scratch
    }

    fn reset(&mut self, number_of_nodes: NumNodes) {
        let n = number_of_nodes as usize;

        self.degrees.clear();
        self.degrees.resize(n, 0);

        self.incident.iter_mut().for_each(|inc| inc.clear());
        self.incident.resize_with(n, SmallVec::new);

        self.ends.clear();
        self.removed.clear();
    }

    /// Recomputes the degree vector for `subset`, discarding all previous state
    pub fn fill<G: IncidenceList>(&mut self, graph: &G, subset: &EdgeSubset) {
        self.reset(graph.number_of_nodes());

        for (pos, id) in subset.iter().enumerate() {
            let WeightedEdge(u, v, _) = graph.edge(id);
            self.degrees[u as usize] += 1;
            self.degrees[v as usize] += 1;
            self.incident[u as usize].push(pos);
            self.incident[v as usize].push(pos);
            self.ends.push((u, v));
            self.removed.push(false);
        }
    }

    pub fn degree_of(&self, u: Node) -> NumNodes {
        self.degrees[u as usize]
    }

    pub fn degrees(&self) -> &[NumNodes] {
        &self.degrees
    }

    pub fn max_degree(&self) -> NumNodes {
        self.degrees.iter().copied().max().unwrap_or(0)
    }

    /// Number of vertices with degree exactly two, i.e. vertices on a cycle once all
    /// dangling paths were stripped
    pub fn number_of_cyclic_vertices(&self) -> NumNodes {
        self.degrees.iter().filter(|&&d| d == 2).count() as NumNodes
    }

    /// Number of subset edges that were not removed yet
    pub fn number_of_remaining_edges(&self) -> usize {
        self.removed.iter().filter(|&&r| !r).count()
    }

    fn remove(&mut self, pos: usize) {
        debug_assert!(!self.removed[pos]);
        self.removed[pos] = true;

        let (u, v) = self.ends[pos];
        self.degrees[u as usize] -= 1;
        self.degrees[v as usize] -= 1;
    }

    /// Removes one remaining edge incident to `u` and returns the opposite endpoint, or `None`
    /// if `u` has no remaining edge
    pub fn remove_edge_at(&mut self, u: Node) -> Option<Node> {
        let pos = self.incident[u as usize]
            .iter()
            .copied()
            .find(|&pos| !self.removed[pos])?;

        self.remove(pos);

        let (a, b) = self.ends[pos];
        Some(if a == u { b } else { a })
    }

    /// Repeatedly removes the edge at a vertex of degree one until no such vertex remains.
    /// What is left are exactly the edges lying on cycles. Returns the number of removed edges.
    pub fn strip_dangling_paths(&mut self) -> usize {
        let mut stack: Vec<Node> = (0..self.degrees.len() as Node)
            .filter(|&u| self.degrees[u as usize] == 1)
            .collect();

        let mut stripped = 0;
        while let Some(u) = stack.pop() {
            // the degree may have dropped to zero since `u` was pushed
            if self.degrees[u as usize] != 1 {
                continue;
            }

            let Some(v) = self.remove_edge_at(u) else {
                continue;
            };
            stripped += 1;

            if self.degrees[v as usize] == 1 {
                stack.push(v);
            }
        }

        stripped
    }
}

/// Reusable classifier; keeps its scratch buffers between calls.
#[derive(Clone, Debug, Default)]
pub struct FeasibilityChecker {
    scratch: CycleScratch,
}

impl FeasibilityChecker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Decides whether `subset` is rejected, may be extended, or is a Hamiltonian cycle.
    ///
    /// # Example
    /// ```
    /// use hamcycle::{exact::feasibility::*, graph::*};
    /// let graph = WeightedGraph::try_from_edges(3, [(0, 1, 1), (1, 2, 1), (2, 0, 1)]).unwrap();
    /// let mut checker = FeasibilityChecker::new();
    ///
    /// let path = EdgeSubset::from_ids(&graph, [0, 1]);
    /// assert_eq!(checker.classify(&graph, &path), Classification::Acceptable);
    ///
    /// let cycle = EdgeSubset::from_ids(&graph, [0, 1, 2]);
    /// assert_eq!(checker.classify(&graph, &cycle), Classification::Hamiltonian);
    /// ```
    pub fn classify<G: IncidenceList>(&mut self, graph: &G, subset: &EdgeSubset) -> Classification {
        let n = graph.number_of_nodes();

        if subset.len() > n as usize {
            return Classification::Rejected(Rejection::TooManyEdges);
        }

        let scratch = &mut self.scratch;
        scratch.fill(graph, subset);

        if scratch.max_degree() > 2 {
            return Classification::Rejected(Rejection::DegreeExceeded);
        }

        scratch.strip_dangling_paths();

        match scratch.number_of_cyclic_vertices() {
            0 => Classification::Acceptable,
            k if k < n => Classification::Rejected(Rejection::ShortCycle),
            _ if is_hamilton_like(scratch) => Classification::Hamiltonian,
            _ => Classification::Rejected(Rejection::DisjointCycles),
        }
    }
}

/// Convenience wrapper around [`FeasibilityChecker::classify`] for one-off calls
pub fn classify<G: IncidenceList>(graph: &G, subset: &EdgeSubset) -> Classification {
    FeasibilityChecker::new().classify(graph, subset)
}

/// Confirmation pass for a stripped scratch in which every vertex has degree two:
/// breaking one edge at vertex 0 and stripping again leaves nothing iff the edges form a
/// single cycle. The scratch is consumed in the process.
pub fn is_hamilton_like(scratch: &mut CycleScratch) -> bool {
    debug_assert!(scratch.degrees().iter().all(|&d| d == 2));

    if scratch.remove_edge_at(0).is_none() {
        return false;
    }
    scratch.strip_dangling_paths();

    scratch.number_of_cyclic_vertices() == 0
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{testing::*, utils::Tour};
    use itertools::Itertools;
    use rand::{Rng, SeedableRng, seq::IteratorRandom};
    use rand_pcg::Pcg64;

    #[test]
    fn empty_subset_is_acceptable() {
        let graph = square_with_diagonal();
        assert_eq!(
            classify(&graph, &EdgeSubset::new()),
            Classification::Acceptable
        );
    }

    #[test]
    fn square_with_diagonal_cases() {
        let graph = square_with_diagonal();
        let mut checker = FeasibilityChecker::new();
        let mut check = |ids: &[EdgeId]| {
            let subset = EdgeSubset::from_ids(&graph, ids.iter().copied());
            checker.classify(&graph, &subset)
        };

        assert_eq!(check(&[0]), Classification::Acceptable);
        assert_eq!(check(&[0, 1, 2]), Classification::Acceptable);
        assert_eq!(check(&[0, 1, 2, 3]), Classification::Hamiltonian);
        assert_eq!(check(&[3, 1, 0, 2]), Classification::Hamiltonian);
        assert_eq!(
            check(&[0, 1, 4]),
            Classification::Rejected(Rejection::ShortCycle)
        );
        assert_eq!(
            check(&[0, 3, 4]),
            Classification::Rejected(Rejection::DegreeExceeded)
        );
        assert_eq!(
            check(&[0, 1, 2, 3, 4]),
            Classification::Rejected(Rejection::TooManyEdges)
        );
    }

    #[test]
    fn disjoint_cycles_covering_all_vertices() {
        let graph = two_triangles();
        let all = EdgeSubset::from_ids(&graph, graph.edge_ids());
        assert_eq!(
            classify(&graph, &all),
            Classification::Rejected(Rejection::DisjointCycles)
        );

        let one = EdgeSubset::from_ids(&graph, [0, 1, 2]);
        assert_eq!(
            classify(&graph, &one),
            Classification::Rejected(Rejection::ShortCycle)
        );
    }

    #[test]
    fn cycle_with_tail_is_short_cycle() {
        // triangle 0-1-2 with pendant path 2-3-4
        let graph =
            WeightedGraph::test_only_from([(0, 1, 1), (1, 2, 1), (2, 0, 1), (2, 3, 1), (3, 4, 1)]);
        let subset = EdgeSubset::from_ids(&graph, [3, 4, 0, 1, 2]);

        let mut scratch = CycleScratch::from_subset(&graph, &subset);
        assert_eq!(scratch.degrees(), [2, 2, 3, 2, 1]);
        assert_eq!(
            classify(&graph, &subset),
            Classification::Rejected(Rejection::DegreeExceeded)
        );

        let subset = EdgeSubset::from_ids(&graph, [0, 1, 2, 4]);
        scratch.fill(&graph, &subset);
        assert_eq!(scratch.strip_dangling_paths(), 1);
        assert_eq!(scratch.number_of_cyclic_vertices(), 3);
        assert_eq!(scratch.number_of_remaining_edges(), 3);
        assert_eq!(
            classify(&graph, &subset),
            Classification::Rejected(Rejection::ShortCycle)
        );
    }

    #[test]
    fn subset_is_untouched() {
        let graph = square_with_diagonal();
        let subset = EdgeSubset::from_ids(&graph, [0, 1, 2, 3]);
        let before = subset.clone();
        let mut checker = FeasibilityChecker::new();
        for _ in 0..3 {
            assert!(checker.classify(&graph, &subset).is_hamiltonian());
        }
        assert_eq!(subset, before);
    }

    #[test]
    fn parallel_edges_form_cycle_on_two_vertices() {
        let graph = WeightedGraph::test_only_from([(0, 1, 3), (1, 0, 4), (0, 1, 1)]);
        let subset = EdgeSubset::from_ids(&graph, [0, 2]);
        assert!(classify(&graph, &subset).is_hamiltonian());
    }

    #[test]
    fn stripping_is_idempotent() {
        let mut rng = Pcg64::seed_from_u64(0x5eed);
        let mut checked = 0;

        for graph in random_graph_stream(&mut rng.clone(), 4..=9, 0.5).take(200) {
            let m = graph.number_of_edges();
            let k = rng.gen_range(0..=m.min(graph.number_of_nodes()));
            let ids = (0..m).choose_multiple(&mut rng, k as usize);
            let subset = EdgeSubset::from_ids(&graph, ids);

            let mut scratch = CycleScratch::from_subset(&graph, &subset);
            if scratch.max_degree() > 2 {
                continue;
            }

            scratch.strip_dangling_paths();
            let once = scratch.degrees().to_vec();
            let remaining = scratch.number_of_remaining_edges();

            assert_eq!(scratch.strip_dangling_paths(), 0);
            assert_eq!(scratch.degrees(), once.as_slice());
            assert_eq!(scratch.number_of_remaining_edges(), remaining);
            assert!(scratch.degrees().iter().all(|&d| d == 0 || d == 2));
            checked += 1;
        }

        assert!(checked > 30, "only {checked} subsets had degrees of at most two");
    }

    #[test]
    fn agrees_with_tour_validation() {
        let mut rng = Pcg64::seed_from_u64(42);
        for graph in random_graph_stream(&mut rng, 3..=7, 0.6).take(40) {
            let n = graph.number_of_nodes() as usize;
            for ids in graph.edge_ids().combinations(n) {
                let subset = EdgeSubset::from_ids(&graph, ids.iter().copied());
                let tour = Tour::from_subset(&subset);
                assert_eq!(
                    classify(&graph, &subset).is_hamiltonian(),
                    tour.is_hamiltonian(&graph),
                    "{graph:?} {ids:?}"
                );
            }
        }
    }
}
