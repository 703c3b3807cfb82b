//! Health change events - Before (proposal) and After (committed) variants

use super::{Cancellable, Latch, Propagation};

/// Raised before a health mutation is committed
///
/// Hooks may rewrite [`BeforeHealthChange::new_health`]; the value left here
/// after the chain is what gets clamped and committed.
#[derive(Debug, Clone, PartialEq)]
pub struct BeforeHealthChange {
    old_health: f64,
    /// Proposed health. Hooks are free to rewrite it.
    pub new_health: f64,
    cancelled: Latch,
    propagation_stopped: Latch,
}

impl BeforeHealthChange {
    pub fn new(old_health: f64, new_health: f64) -> Self {
        BeforeHealthChange {
            old_health,
            new_health,
            cancelled: Latch::new(),
            propagation_stopped: Latch::new(),
        }
    }

    /// Health before the mutation was requested
    pub fn old_health(&self) -> f64 {
        self.old_health
    }

    /// Signed difference between the proposal and the current value
    pub fn delta(&self) -> f64 {
        self.new_health - self.old_health
    }
}

impl Propagation for BeforeHealthChange {
    fn is_propagation_stopped(&self) -> bool {
        self.propagation_stopped.is_set()
    }

    fn stop_propagation(&mut self) {
        self.propagation_stopped.set();
    }
}

impl Cancellable for BeforeHealthChange {
    fn is_cancelled(&self) -> bool {
        self.cancelled.is_set()
    }

    fn cancel(&mut self) {
        self.cancelled.set();
    }
}

/// Raised after a health mutation was committed
#[derive(Debug, Clone, PartialEq)]
pub struct AfterHealthChange {
    new_health: f64,
    propagation_stopped: Latch,
}

impl AfterHealthChange {
    pub fn new(new_health: f64) -> Self {
        AfterHealthChange {
            new_health,
            propagation_stopped: Latch::new(),
        }
    }

    /// The value that was actually committed (after clamping)
    pub fn new_health(&self) -> f64 {
        self.new_health
    }
}

impl Propagation for AfterHealthChange {
    fn is_propagation_stopped(&self) -> bool {
        self.propagation_stopped.is_set()
    }

    fn stop_propagation(&mut self) {
        self.propagation_stopped.set();
    }
}
