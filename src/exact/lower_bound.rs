use crate::graph::*;
use itertools::Itertools;

/// Returned by the estimator if some vertex cannot reach degree two anymore
pub const INFINITE_COST: Cost = Cost::MAX;

/// Admissible lower bound on the cost of every Hamiltonian cycle that extends `subset` using
/// only edges with id `>= next_edge`.
///
/// Each vertex still missing `need = 2 - degree` cycle edges contributes its `need` cheapest
/// incidences among the remaining edges. Since every completion edge is paid for at both of
/// its endpoints, half of that sum (rounded down) is added to the cost of the subset.
///
/// # Example
/// ```
/// use hamcycle::{exact::lower_bound::*, graph::*};
/// let graph = WeightedGraph::try_from_edges(3, [(0, 1, 2), (1, 2, 4), (2, 0, 6)]).unwrap();
/// assert_eq!(estimate_lower_bound(&graph, &EdgeSubset::new(), 0), 12);
/// assert_eq!(estimate_lower_bound(&graph, &EdgeSubset::new(), 1), INFINITE_COST);
/// ```
pub fn estimate_lower_bound<G: IncidenceList>(
    graph: &G,
    subset: &EdgeSubset,
    next_edge: EdgeId,
) -> Cost {
    BoundEstimator::new().estimate(graph, subset, next_edge)
}

/// Reusable version of [`estimate_lower_bound`]; keeps the degree buffer between calls.
#[derive(Clone, Debug, Default)]
pub struct BoundEstimator {
    degrees: Vec<NumNodes>,
}

impl BoundEstimator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn estimate<G: IncidenceList>(
        &mut self,
        graph: &G,
        subset: &EdgeSubset,
        next_edge: EdgeId,
    ) -> Cost {
        self.degrees.clear();
        self.degrees.resize(graph.len(), 0);

        for id in subset.iter() {
            let WeightedEdge(u, v, _) = graph.edge(id);
            self.degrees[u as usize] += 1;
            self.degrees[v as usize] += 1;
        }

        let mut additions: Cost = 0;
        for u in graph.vertices() {
            let need = 2usize.saturating_sub(self.degrees[u as usize] as usize);
            if need == 0 {
                continue;
            }

            let cheapest = graph
                .incidences_of(u)
                .iter()
                .filter(|inc| inc.edge >= next_edge)
                .map(|inc| inc.weight as Cost)
                .k_smallest(need)
                .collect_vec();

            if cheapest.len() < need {
                return INFINITE_COST;
            }

            additions += cheapest.into_iter().sum::<Cost>();
        }

        subset.cost() + additions / 2
    }
}
