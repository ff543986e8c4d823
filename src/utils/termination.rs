use super::signal_handling;
use std::{
    sync::atomic::{AtomicBool, Ordering},
    time::{Duration, Instant},
};

/// Cooperative cancellation shared by all threads of one search. Once a stop condition
/// (deadline, Ctrl-C, explicit abort) was observed, every later query returns true.
#[derive(Debug)]
pub struct Termination {
    deadline: Option<Instant>,
    respect_ctrl_c: bool,
    check_interval: u64,
    aborted: AtomicBool,
}

impl Termination {
    pub fn new(timeout: Option<Duration>, respect_ctrl_c: bool, check_interval: u64) -> Self {
        Self {
            deadline: timeout.map(|t| Instant::now() + t),
            respect_ctrl_c,
            check_interval: check_interval.max(1),
            aborted: AtomicBool::new(false),
        }
    }

    /// Never stops unless [`Termination::abort`] is called
    pub fn never() -> Self {
        Self::new(None, false, 1)
    }

    /// Polled once per search node with the caller's node counter; the clock and the signal
    /// flag are only consulted every `check_interval` nodes.
    pub fn should_stop(&self, nodes: u64) -> bool {
        if self.aborted.load(Ordering::Relaxed) {
            return true;
        }

        if nodes % self.check_interval != 0 {
            return false;
        }

        let stop = (self.respect_ctrl_c && signal_handling::received_ctrl_c())
            || self.deadline.is_some_and(|d| Instant::now() >= d);

        if stop {
            self.abort();
        }

        stop
    }

    pub fn abort(&self) {
        self.aborted.store(true, Ordering::Relaxed);
    }

    pub fn is_aborted(&self) -> bool {
        self.aborted.load(Ordering::Relaxed)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn never_stops() {
        let termination = Termination::never();
        assert!((0..10_000).all(|i| !termination.should_stop(i)));
        assert!(!termination.is_aborted());
    }

    #[test]
    fn expired_deadline_sticks() {
        let termination = Termination::new(Some(Duration::ZERO), false, 16);
        assert!(!termination.should_stop(3));
        assert!(termination.should_stop(16));
        assert!(termination.should_stop(17));
        assert!(termination.is_aborted());
    }

    #[test]
    fn abort() {
        let termination = Termination::new(Some(Duration::from_secs(3600)), true, 1);
        assert!(!termination.should_stop(0));
        termination.abort();
        assert!(termination.should_stop(1));
    }
}
