//! AttackEvent - The record shared by every phase of one attack

use super::{Cancellable, Latch, Propagation};
use crate::damage::DamageMap;
use crate::entity::Entity;
use std::fmt;

/// Phases an attack moves through, in execution order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AttackPhase {
    /// Event constructed, capabilities being checked
    Setup,
    BeforePerformingAttack,
    PerformAttack,
    BeforeBeingAttacked,
    ReceiveAttack,
    AfterBeingAttacked,
    AfterPerformingAttack,
}

impl AttackPhase {
    pub fn all() -> &'static [AttackPhase] {
        &[
            AttackPhase::Setup,
            AttackPhase::BeforePerformingAttack,
            AttackPhase::PerformAttack,
            AttackPhase::BeforeBeingAttacked,
            AttackPhase::ReceiveAttack,
            AttackPhase::AfterBeingAttacked,
            AttackPhase::AfterPerformingAttack,
        ]
    }
}

impl fmt::Display for AttackPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            AttackPhase::Setup => "setup",
            AttackPhase::BeforePerformingAttack => "before performing attack",
            AttackPhase::PerformAttack => "perform attack",
            AttackPhase::BeforeBeingAttacked => "before being attacked",
            AttackPhase::ReceiveAttack => "receive attack",
            AttackPhase::AfterBeingAttacked => "after being attacked",
            AttackPhase::AfterPerformingAttack => "after performing attack",
        };
        f.write_str(name)
    }
}

/// One attack from `performing` against `receiving`
///
/// Holds shared handles to both participants; the entities outlive the event
/// and are never owned by it. Cancellation and propagation stop are both
/// one-way for the whole attack: once propagation is stopped, every later
/// chain runs at most its first hook.
#[derive(Debug)]
pub struct AttackEvent {
    performing: Entity,
    receiving: Entity,
    /// Damage contributions keyed by attack type
    pub damages: DamageMap,
    phase: AttackPhase,
    cancelled: Latch,
    cancel_reason: Option<String>,
    propagation_stopped: Latch,
}

impl AttackEvent {
    pub fn new(performing: Entity, receiving: Entity) -> Self {
        AttackEvent {
            performing,
            receiving,
            damages: DamageMap::new(),
            phase: AttackPhase::Setup,
            cancelled: Latch::new(),
            cancel_reason: None,
            propagation_stopped: Latch::new(),
        }
    }

    /// The attacker
    pub fn performing_entity(&self) -> &Entity {
        &self.performing
    }

    /// The defender
    pub fn receiving_entity(&self) -> &Entity {
        &self.receiving
    }

    /// Phase currently executing (or the last one reached)
    pub fn phase(&self) -> AttackPhase {
        self.phase
    }

    pub(crate) fn enter_phase(&mut self, phase: AttackPhase) {
        self.phase = phase;
    }

    /// Cancel the attack and record why. Only the first reason is kept.
    pub fn cancel_with_reason(&mut self, reason: impl Into<String>) {
        if !self.cancelled.is_set() {
            self.cancel_reason = Some(reason.into());
        }
        self.cancelled.set();
    }

    /// Human-readable cancellation reason, if one was given
    pub fn cancel_reason(&self) -> Option<&str> {
        self.cancel_reason.as_deref()
    }

    /// Sum of all non-cancelled damage contributions
    pub fn total_damage(&self) -> f64 {
        self.damages.total()
    }
}

impl Propagation for AttackEvent {
    fn is_propagation_stopped(&self) -> bool {
        self.propagation_stopped.is_set()
    }

    fn stop_propagation(&mut self) {
        self.propagation_stopped.set();
    }
}

impl Cancellable for AttackEvent {
    fn is_cancelled(&self) -> bool {
        self.cancelled.is_set()
    }

    fn cancel(&mut self) {
        self.cancelled.set();
    }
}
