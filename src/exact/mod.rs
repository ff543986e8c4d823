pub mod branch_and_bound;
pub mod feasibility;
pub mod incumbent;
pub mod lower_bound;
pub mod naive;
pub mod parallel;

pub use branch_and_bound::{
    BranchAndBound, SearchConfiguration, SearchOutcome, SearchStats, SearchStatus,
};
pub use feasibility::{Classification, FeasibilityChecker, Rejection, classify};
pub use lower_bound::{INFINITE_COST, estimate_lower_bound};
pub use naive::naive_solver;
pub use parallel::ParallelBranchAndBound;
