//! Change events - Mutable records passed down hook chains

mod attack;
mod health;

pub use attack::{AttackEvent, AttackPhase};
pub use health::{AfterHealthChange, BeforeHealthChange};

/// A boolean that can only move from `false` to `true`
///
/// Backs the cancellation, propagation-stop and modification flags.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Latch(bool);

impl Latch {
    /// Create an unset latch
    pub const fn new() -> Self {
        Latch(false)
    }

    /// Trip the latch. Calling this again has no further effect.
    pub fn set(&mut self) {
        self.0 = true;
    }

    /// Whether the latch has been tripped
    pub const fn is_set(&self) -> bool {
        self.0
    }
}

/// Events whose hook chain can be halted early
pub trait Propagation {
    /// Whether a hook asked the chain to stop
    fn is_propagation_stopped(&self) -> bool;

    /// Stop the remaining hooks from running. One-way.
    fn stop_propagation(&mut self);
}

/// Events that guard an operation which can be aborted
///
/// The chain owner inspects [`Cancellable::is_cancelled`] after the chain ran
/// and skips the guarded operation when it is set.
pub trait Cancellable: Propagation {
    /// Whether a hook cancelled the guarded operation
    fn is_cancelled(&self) -> bool;

    /// Cancel the guarded operation. One-way.
    fn cancel(&mut self);
}
