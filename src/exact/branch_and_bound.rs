use super::{feasibility::*, incumbent::*, lower_bound::*};
use crate::{
    graph::*,
    utils::{Termination, Tour},
};
use log::{info, trace};
use std::{
    fmt,
    ops::{Add, AddAssign},
    time::{Duration, Instant},
};

#[derive(Clone, Copy, Debug)]
pub struct SearchConfiguration {
    /// Stop after this duration and report the best cycle found so far
    pub timeout: Option<Duration>,
    /// Stop once a termination signal was received (see [`crate::utils::signal_handling`])
    pub respect_ctrl_c: bool,
    /// Edge index at which the parallel driver hands subtrees to its workers
    pub split_depth: EdgeId,
    /// Number of search nodes between two looks at the clock and the signal flag
    pub check_interval: u64,
}

impl Default for SearchConfiguration {
    fn default() -> Self {
        Self {
            timeout: None,
            respect_ctrl_c: true,
            split_depth: 8,
            check_interval: 1024,
        }
    }
}

impl SearchConfiguration {
    pub fn termination(&self) -> Termination {
        Termination::new(self.timeout, self.respect_ctrl_c, self.check_interval)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Number of (index, subset) states visited
    pub nodes: u64,
    /// Inclusions the feasibility check rejected
    pub rejected: u64,
    /// Branches cut since the lower bound did not beat the incumbent
    pub pruned_by_bound: u64,
    /// Branches cut since too few edges remained to reach |V|
    pub pruned_by_count: u64,
    /// Number of times the incumbent improved
    pub improvements: u64,
}

impl AddAssign for SearchStats {
    fn add_assign(&mut self, rhs: Self) {
        self.nodes += rhs.nodes;
        self.rejected += rhs.rejected;
        self.pruned_by_bound += rhs.pruned_by_bound;
        self.pruned_by_count += rhs.pruned_by_count;
        self.improvements += rhs.improvements;
    }
}

impl Add for SearchStats {
    type Output = Self;

    fn add(mut self, rhs: Self) -> Self::Output {
        self += rhs;
        self
    }
}

impl fmt::Display for SearchStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "nodes={} rejected={} pruned_by_bound={} pruned_by_count={} improvements={}",
            self.nodes, self.rejected, self.pruned_by_bound, self.pruned_by_count, self.improvements
        )
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SearchStatus {
    /// The whole search tree was explored; the reported tour (or its absence) is optimal
    Complete,
    /// The search was stopped early; the reported tour is the best one seen
    Interrupted,
}

#[derive(Clone, Debug)]
pub struct SearchOutcome {
    pub tour: Option<Tour>,
    pub status: SearchStatus,
    pub stats: SearchStats,
}

impl SearchOutcome {
    pub(super) fn new(tour: Option<Tour>, termination: &Termination, stats: SearchStats) -> Self {
        let status = if termination.is_aborted() {
            SearchStatus::Interrupted
        } else {
            SearchStatus::Complete
        };

        Self {
            tour,
            status,
            stats,
        }
    }

    pub fn cost(&self) -> Option<Cost> {
        self.tour.as_ref().map(|t| t.cost())
    }

    pub fn is_complete(&self) -> bool {
        self.status == SearchStatus::Complete
    }

    /// The graph provably has no Hamiltonian cycle
    pub fn is_infeasible(&self) -> bool {
        self.is_complete() && self.tour.is_none()
    }

    pub(super) fn log_summary(&self, elapsed: Duration) {
        match self.cost() {
            Some(cost) => info!(
                "Search {:?} after {}ms with best cost {cost}; {}",
                self.status,
                elapsed.as_millis(),
                self.stats
            ),
            None => info!(
                "Search {:?} after {}ms without a hamiltonian cycle; {}",
                self.status,
                elapsed.as_millis(),
                self.stats
            ),
        }
    }
}

/// Depth-first branch and bound over the include/exclude decisions of all edges in their
/// fixed order.
///
/// # Example
/// ```
/// use hamcycle::{exact::branch_and_bound::*, graph::*};
/// let graph = WeightedGraph::try_from_edges(
///     4,
///     [(0, 1, 1), (1, 2, 1), (2, 3, 1), (3, 0, 1), (0, 2, 5)],
/// ).unwrap();
///
/// let outcome = BranchAndBound::new(&graph).solve();
/// assert_eq!(outcome.status, SearchStatus::Complete);
/// assert_eq!(outcome.cost(), Some(4));
/// ```
pub struct BranchAndBound<'a> {
    graph: &'a WeightedGraph,
    config: SearchConfiguration,
}

impl<'a> BranchAndBound<'a> {
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
            "Start branch and bound with n={} m={}",
            self.graph.number_of_nodes(),
            self.graph.number_of_edges()
        );

        let start = Instant::now();
        let termination = self.config.termination();

        let incumbent = LocalIncumbent::new(initial_upper_bound(self.graph));
        let mut search = Search::new(self.graph, incumbent, &termination);

        let mut subset = EdgeSubset::with_capacity(self.graph.len());
        search.recurse(&mut subset, 0);
        debug_assert!(subset.is_empty());

        let (incumbent, stats, _) = search.into_parts();
        let outcome = SearchOutcome::new(incumbent.into_tour(), &termination, stats);
        outcome.log_summary(start.elapsed());

        outcome
    }
}

/// A subtree that was not explored yet: continue at edge `index` with `subset` selected
#[derive(Clone, Debug)]
pub(super) struct Subproblem {
    pub index: EdgeId,
    pub subset: EdgeSubset,
}

/// Mutable state of one (sequential) search; shared by both drivers.
pub(super) struct Search<'a, I: Incumbent> {
    graph: &'a WeightedGraph,
    incumbent: I,
    termination: &'a Termination,
    feasibility: FeasibilityChecker,
    bounds: BoundEstimator,
    stats: SearchStats,
    /// if set, states at this edge index are collected instead of explored
    split_depth: Option<EdgeId>,
    frontier: Vec<Subproblem>,
}

impl<'a, I: Incumbent> Search<'a, I> {
    pub(super) fn new(graph: &'a WeightedGraph, incumbent: I, termination: &'a Termination) -> Self {
        Self {
            graph,
            incumbent,
            termination,
            feasibility: FeasibilityChecker::new(),
            bounds: BoundEstimator::new(),
            stats: SearchStats::default(),
            split_depth: None,
            frontier: Vec::new(),
        }
    }

    pub(super) fn with_split_depth(mut self, split_depth: EdgeId) -> Self {
        self.split_depth = Some(split_depth);
        self
    }

    pub(super) fn into_parts(self) -> (I, SearchStats, Vec<Subproblem>) {
        (self.incumbent, self.stats, self.frontier)
    }

    pub(super) fn incumbent(&self) -> &I {
        &self.incumbent
    }

    pub(super) fn stats_mut(&mut self) -> &mut SearchStats {
        &mut self.stats
    }

    pub(super) fn lower_bound(&mut self, subset: &EdgeSubset, index: EdgeId) -> Cost {
        self.bounds.estimate(self.graph, subset, index)
    }

    /// Explores all extensions of `subset` by edges `index..m`. The subset is restored before
    /// returning.
    pub(super) fn recurse(&mut self, subset: &mut EdgeSubset, index: EdgeId) {
        let m = self.graph.number_of_edges();
        if index >= m || self.termination.should_stop(self.stats.nodes) {
            return;
        }

        self.stats.nodes += 1;

        if self.split_depth.is_some_and(|depth| index >= depth) {
            self.frontier.push(Subproblem {
                index,
                subset: subset.clone(),
            });
            return;
        }

        let n = self.graph.len();
        let remaining_after = (m - 1 - index) as usize;

        // exclude edge `index`
        if subset.len() + remaining_after >= n {
            self.recurse(subset, index + 1);
        } else {
            self.stats.pruned_by_count += 1;
        }

        // include edge `index`; the guard removes it again on every path out of this scope
        let mut included = subset.include(self.graph, index);

        match self.feasibility.classify(self.graph, &included) {
            Classification::Rejected(reason) => {
                trace!("Reject edge {index} at depth {}: {reason:?}", included.len());
                self.stats.rejected += 1;
            }

            Classification::Hamiltonian => {
                if self.incumbent.try_install(&included) {
                    self.stats.improvements += 1;
                    info!(
                        "Found hamiltonian cycle of cost {} after {} nodes",
                        included.cost(),
                        self.stats.nodes
                    );
                }
            }

            Classification::Acceptable => {
                if included.len() + remaining_after < n {
                    self.stats.pruned_by_count += 1;
                    return;
                }

                let bound = self.bounds.estimate(self.graph, &included, index + 1);
                if bound < self.incumbent.upper_bound() {
                    self.recurse(&mut included, index + 1);
                } else {
                    trace!(
                        "Prune at edge {index}: bound {bound} >= {}",
                        self.incumbent.upper_bound()
                    );
                    self.stats.pruned_by_bound += 1;
                }
            }
        }
    }
}
