//! Process-wide Ctrl-C flag. Long-running solvers poll [`received_ctrl_c`] and wind down,
//! reporting the best solution known so far.

use log::{info, warn};
use std::sync::{
    Once,
    atomic::{AtomicBool, Ordering},
};

static RECEIVED_CTRL_C: AtomicBool = AtomicBool::new(false);
static INSTALL_HANDLER: Once = Once::new();

/// Installs the handler for SIGINT/SIGTERM; further calls are no-ops
pub fn initialize() {
    INSTALL_HANDLER.call_once(|| {
        let result = ctrlc::set_handler(|| {
            if !RECEIVED_CTRL_C.swap(true, Ordering::SeqCst) {
                info!("Received termination signal; finishing with the best cycle found so far");
            }
        });

        if let Err(e) = result {
            warn!("Cannot install signal handler: {e}");
        }
    });
}

/// Returns true once a termination signal was received. Without [`initialize`] this stays false.
pub fn received_ctrl_c() -> bool {
    RECEIVED_CTRL_C.load(Ordering::Relaxed)
}
