//! Holders of the best cycle found so far. The search only needs to read the current upper
//! bound and to offer strictly better cycles; [`Incumbent`] abstracts over the single-threaded
//! [`LocalIncumbent`] and the [`SharedIncumbent`] used by parallel workers.

use crate::{graph::*, utils::Tour};
use std::{
    fmt,
    sync::{
        Mutex, PoisonError,
        atomic::{AtomicU64, Ordering},
    },
};

/// Upper bound before any cycle is known. Every Hamiltonian cycle costs at most the total
/// weight, so one more than that admits all of them under the strict `<` comparison.
pub fn initial_upper_bound(graph: &WeightedGraph) -> Cost {
    graph.total_weight().saturating_add(1)
}

pub trait Incumbent {
    /// A cycle is only accepted if it is strictly cheaper than this value
    fn upper_bound(&self) -> Cost;

    /// Offers a Hamiltonian subset; returns true if it became the new incumbent
    fn try_install(&mut self, subset: &EdgeSubset) -> bool;
}

#[derive(Clone, Debug)]
pub struct LocalIncumbent {
    upper_bound: Cost,
    tour: Option<Tour>,
}

impl LocalIncumbent {
    pub fn new(upper_bound: Cost) -> Self {
        Self {
            upper_bound,
            tour: None,
        }
    }

    pub fn into_tour(self) -> Option<Tour> {
        self.tour
    }
}

impl Incumbent for LocalIncumbent {
    fn upper_bound(&self) -> Cost {
        self.upper_bound
    }

    fn try_install(&mut self, subset: &EdgeSubset) -> bool {
        if subset.cost() >= self.upper_bound {
            return false;
        }

        self.upper_bound = subset.cost();
        self.tour = Some(Tour::from_subset(subset));
        true
    }
}

/// Incumbent shared between threads. The atomic bound allows lock-free pruning; the mutex
/// protects the tour and is the source of truth. The bound is only written under the lock.
#[derive(Debug)]
pub struct SharedIncumbent {
    upper_bound: AtomicU64,
    tour: Mutex<Option<Tour>>,
}

impl SharedIncumbent {
    pub fn new(upper_bound: Cost) -> Self {
        Self {
            upper_bound: AtomicU64::new(upper_bound),
            tour: Mutex::new(None),
        }
    }

    pub fn upper_bound(&self) -> Cost {
        self.upper_bound.load(Ordering::Relaxed)
    }

    pub fn snapshot(&self) -> Option<Tour> {
        self.tour
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn into_tour(self) -> Option<Tour> {
        self.tour.into_inner().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn try_install(&self, subset: &EdgeSubset) -> bool {
        // cheap pre-check without the lock
        if subset.cost() >= self.upper_bound() {
            return false;
        }

        let mut guard = self.tour.lock().unwrap_or_else(PoisonError::into_inner);

        // another thread may have installed a better cycle while we waited
        if subset.cost() >= self.upper_bound.load(Ordering::Relaxed) {
            return false;
        }

        *guard = Some(Tour::from_subset(subset));
        self.upper_bound.store(subset.cost(), Ordering::Relaxed);
        true
    }
}

impl fmt::Display for SharedIncumbent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SharedIncumbent(upper_bound: {})", self.upper_bound())
    }
}

impl Incumbent for &SharedIncumbent {
    fn upper_bound(&self) -> Cost {
        SharedIncumbent::upper_bound(self)
    }

    fn try_install(&mut self, subset: &EdgeSubset) -> bool {
        SharedIncumbent::try_install(self, subset)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::testing::*;
    use rayon::prelude::*;

    #[test]
    fn local_accepts_only_strict_improvements() {
        let graph = square_with_diagonal();
        let mut incumbent = LocalIncumbent::new(initial_upper_bound(&graph));
        assert_eq!(incumbent.upper_bound(), 10);

        let expensive = EdgeSubset::from_ids(&graph, [0, 1, 2, 4]);
        assert!(incumbent.try_install(&expensive));
        assert_eq!(incumbent.upper_bound(), 8);
        assert!(!incumbent.try_install(&expensive));

        let cheap = EdgeSubset::from_ids(&graph, [0, 1, 2, 3]);
        assert!(incumbent.try_install(&cheap));
        assert_eq!(incumbent.into_tour(), Some(Tour::new(vec![0, 1, 2, 3], 4)));
    }

    #[test]
    fn cycle_using_all_weight_is_admitted() {
        let graph = WeightedGraph::test_only_from([(0, 1, 3), (1, 2, 4), (2, 0, 5)]);
        let mut incumbent = LocalIncumbent::new(initial_upper_bound(&graph));
        assert!(incumbent.try_install(&EdgeSubset::from_ids(&graph, graph.edge_ids())));
    }

    #[test]
    fn shared_keeps_minimum_under_contention() {
        let graph = WeightedGraph::test_only_from((0..64).map(|i| (0, 1, 1000 - i)));
        let incumbent = SharedIncumbent::new(initial_upper_bound(&graph));

        let installed: usize = graph
            .edge_ids()
            .into_par_iter()
            .map(|id| incumbent.try_install(&EdgeSubset::from_ids(&graph, [id])) as usize)
            .sum();

        assert!(installed >= 1);
        assert_eq!(incumbent.upper_bound(), 1000 - 63);
        assert_eq!(
            incumbent.snapshot().map(|t| t.cost()),
            Some(incumbent.upper_bound())
        );
        assert_eq!(incumbent.into_tour().map(|t| t.edge_ids().to_vec()), Some(vec![63]));
    }
}
