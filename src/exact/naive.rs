use crate::{graph::*, utils::Tour};
use itertools::Itertools;
use log::debug;

/// Reference solver: tries every selection of |V| edges in lexicographic order of edge ids and
/// returns the first cheapest one forming a Hamiltonian cycle. Only usable for tiny graphs.
pub fn naive_solver(graph: &WeightedGraph) -> Option<Tour> {
    let mut best: Option<Tour> = None;
    let mut candidates = 0usize;

    for ids in graph.edge_ids().combinations(graph.len()) {
        candidates += 1;
        let cost = ids.iter().map(|&id| graph.edge(id).weight() as Cost).sum();
        if best.as_ref().is_some_and(|b| b.cost() <= cost) {
            continue;
        }

        let tour = Tour::new(ids, cost);
        if tour.is_hamiltonian(graph) {
            best = Some(tour);
        }
    }

    debug!(
        "Naive solver checked {candidates} subsets; best cost {:?}",
        best.as_ref().map(|t| t.cost())
    );

    best
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::testing::*;

    #[test]
    fn scenarios() {
        let tour = naive_solver(&square_with_diagonal()).unwrap();
        assert_eq!(tour.cost(), 4);
        assert_eq!(tour.edge_ids(), [0, 1, 2, 3]);

        assert!(naive_solver(&two_triangles()).is_none());
        assert!(naive_solver(&WeightedGraph::test_only_from([(0, 1, 1), (1, 2, 1)])).is_none());
    }

    #[test]
    fn first_cheapest_wins_ties() {
        // both 4-cycles through the two parallel edges cost 4
        let graph = WeightedGraph::test_only_from([
            (0, 1, 1),
            (1, 2, 1),
            (2, 3, 1),
            (3, 0, 1),
            (0, 1, 1),
        ]);
        assert_eq!(naive_solver(&graph).unwrap().edge_ids(), [0, 1, 2, 3]);
    }
}
