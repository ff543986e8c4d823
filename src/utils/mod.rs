pub mod signal_handling;
pub mod termination;
pub mod tour;

pub use termination::Termination;
pub use tour::*;
