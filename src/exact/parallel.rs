//! Subtree-parallel variant of [`BranchAndBound`](super::branch_and_bound::BranchAndBound).
//!
//! The search first runs sequentially until it reaches edge index `split_depth` and records
//! every state found there. These subproblems are then explored by rayon workers, which share
//! the incumbent and the termination flag.

use super::{branch_and_bound::*, incumbent::*};
use crate::{graph::*, utils::Termination};
use log::{debug, info};
use rayon::prelude::*;
use std::time::Instant;

pub struct ParallelBranchAndBound<'a> {
    graph: &'a WeightedGraph,
    config: SearchConfiguration,
}

impl<'a> ParallelBranchAndBound<'a> {
    pub fn new(graph: &'a WeightedGraph) -> Self {
        Self {
            graph,
            config: Default::default(),
        }
    }

    pub fn configure(&mut self, config: SearchConfiguration) {
        self.config = config;
    }

    pub fn solve(&self) -> SearchOutcome {
        info!(
            "Start parallel branch and bound with n={} m={} split_depth={} threads={}",
            self.graph.number_of_nodes(),
            self.graph.number_of_edges(),
            self.config.split_depth,
            rayon::current_num_threads()
        );

        let start = Instant::now();
        let termination = self.config.termination();
        let shared = SharedIncumbent::new(initial_upper_bound(self.graph));

        let (frontier, mut stats) = self.split(&shared, &termination);
        debug!(
            "Split into {} subproblems after {}ms; incumbent {}",
            frontier.len(),
            start.elapsed().as_millis(),
            shared
        );

        stats += frontier
            .into_par_iter()
            .map(|subproblem| self.solve_subproblem(subproblem, &shared, &termination))
            .reduce(SearchStats::default, |a, b| a + b);

        let outcome = SearchOutcome::new(shared.into_tour(), &termination, stats);
        outcome.log_summary(start.elapsed());

        outcome
    }

    fn split(
        &self,
        shared: &SharedIncumbent,
        termination: &Termination,
    ) -> (Vec<Subproblem>, SearchStats) {
        let mut search =
            Search::new(self.graph, shared, termination).with_split_depth(self.config.split_depth);

        let mut subset = EdgeSubset::with_capacity(self.graph.len());
        search.recurse(&mut subset, 0);

        let (_, stats, frontier) = search.into_parts();
        (frontier, stats)
    }

    fn solve_subproblem(
        &self,
        subproblem: Subproblem,
        shared: &SharedIncumbent,
        termination: &Termination,
    ) -> SearchStats {
        let Subproblem { index, mut subset } = subproblem;
        let mut search = Search::new(self.graph, shared, termination);

        // the incumbent may have improved since the subproblem was recorded
        let bound = search.lower_bound(&subset, index);
        if bound >= search.incumbent().upper_bound() {
            search.stats_mut().pruned_by_bound += 1;
        } else {
            search.recurse(&mut subset, index);
        }

        let (_, stats, _) = search.into_parts();
        stats
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::testing::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg64;
    use std::time::Duration;

    fn solve_with_depth(graph: &WeightedGraph, split_depth: EdgeId) -> SearchOutcome {
        let mut algo = ParallelBranchAndBound::new(graph);
        algo.configure(SearchConfiguration {
            split_depth,
            ..Default::default()
        });
        algo.solve()
    }

    #[test]
    fn scenarios() {
        for depth in [0, 1, 3, 100] {
            assert_eq!(solve_with_depth(&square_with_diagonal(), depth).cost(), Some(4));
            assert!(solve_with_depth(&two_triangles(), depth).is_infeasible());
        }
    }

    #[test]
    fn agrees_with_sequential() {
        let mut rng = Pcg64::seed_from_u64(77);
        for (i, graph) in random_graph_stream(&mut rng, 4..=10, 0.5).take(60).enumerate() {
            let sequential = BranchAndBound::new(&graph).solve();
            let parallel = solve_with_depth(&graph, (i % 7) as EdgeId);

            assert!(parallel.is_complete());
            assert_eq!(parallel.cost(), sequential.cost(), "{graph:?}");
            if let Some(tour) = &parallel.tour {
                assert!(tour.is_hamiltonian(&graph));
            }
        }
    }

    #[test]
    fn expired_deadline_interrupts() {
        let mut rng = Pcg64::seed_from_u64(9);
        let graph = WeightedGraph::random_weighted_complete(&mut rng, 12, 1..=100).unwrap();

        let mut algo = ParallelBranchAndBound::new(&graph);
        algo.configure(SearchConfiguration {
            timeout: Some(Duration::ZERO),
            ..Default::default()
        });

        assert_eq!(algo.solve().status, SearchStatus::Interrupted);
    }
}
