//! DamageInfo - A single damage contribution to an attack

use super::AttackType;
use crate::event::Latch;

/// One damage contribution: `base_damage × modifier` of a given type
///
/// Setting either factor marks the contribution as modified. Cancelling it is
/// one-way; the consumer that sums damages is responsible for skipping it.
#[derive(Debug, Clone, PartialEq)]
pub struct DamageInfo {
    base_damage: f64,
    modifier: f64,
    attack_type: AttackType,
    cancelled: Latch,
    modified: Latch,
}

impl Default for DamageInfo {
    fn default() -> Self {
        DamageInfo::new(0.0, 1.0, AttackType::basic())
    }
}

impl DamageInfo {
    pub fn new(base_damage: f64, modifier: f64, attack_type: AttackType) -> Self {
        DamageInfo {
            base_damage,
            modifier,
            attack_type,
            cancelled: Latch::new(),
            modified: Latch::new(),
        }
    }

    /// `basic` damage with a neutral modifier
    pub fn basic(base_damage: f64) -> Self {
        DamageInfo::new(base_damage, 1.0, AttackType::basic())
    }

    pub fn base_damage(&self) -> f64 {
        self.base_damage
    }

    pub fn set_base_damage(&mut self, base_damage: f64) {
        self.base_damage = base_damage;
        self.modified.set();
    }

    pub fn modifier(&self) -> f64 {
        self.modifier
    }

    pub fn set_modifier(&mut self, modifier: f64) {
        self.modifier = modifier;
        self.modified.set();
    }

    pub fn attack_type(&self) -> &AttackType {
        &self.attack_type
    }

    /// `base_damage × modifier`, regardless of cancellation
    pub fn total_damage(&self) -> f64 {
        self.base_damage * self.modifier
    }

    /// Contribution to a damage sum: zero once cancelled
    pub fn effective_damage(&self) -> f64 {
        if self.is_cancelled() {
            0.0
        } else {
            self.total_damage()
        }
    }

    pub fn cancel(&mut self) {
        self.cancelled.set();
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.is_set()
    }

    /// Whether either factor was set after construction
    pub fn has_been_modified(&self) -> bool {
        self.modified.is_set()
    }
}
