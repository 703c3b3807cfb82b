//! BattleEntity - Entity with all four attack hook chains

use super::capability::{CanPerformAttack, CanReceiveAttack, Combatant};
use crate::damage::apply_damages;
use crate::entity::{Entity, EntityError, EntityOptions};
use crate::event::AttackEvent;
use crate::hook::{Hook, HookChain};

/// The per-type part of an attack-capable entity
pub trait BattleBehavior {
    /// Populate `event.damages`
    fn perform_attack(&self, entity: &Entity, event: &mut AttackEvent);

    /// Apply the incoming attack. Defaults to deducting the damage total.
    fn receive_attack(&self, entity: &Entity, event: &mut AttackEvent) {
        apply_damages(entity, event);
    }
}

/// The four attack-phase hook chains
#[derive(Debug, Default)]
pub struct AttackHooks {
    pub before_performing_attack: HookChain<AttackEvent>,
    pub after_performing_attack: HookChain<AttackEvent>,
    pub before_being_attacked: HookChain<AttackEvent>,
    pub after_being_attacked: HookChain<AttackEvent>,
}

/// An entity that can attack and be attacked, with every hook chain available
#[derive(Debug)]
pub struct BattleEntity<B> {
    entity: Entity,
    hooks: AttackHooks,
    behavior: B,
}

impl<B: BattleBehavior> BattleEntity<B> {
    pub fn new(name: impl Into<String>, options: EntityOptions, behavior: B) -> Result<Self, EntityError> {
        Ok(BattleEntity {
            entity: Entity::with_options(name, options)?,
            hooks: AttackHooks::default(),
            behavior,
        })
    }

    /// Wrap an existing entity
    pub fn from_entity(entity: Entity, behavior: B) -> Self {
        BattleEntity {
            entity,
            hooks: AttackHooks::default(),
            behavior,
        }
    }

    pub fn behavior(&self) -> &B {
        &self.behavior
    }

    pub fn behavior_mut(&mut self) -> &mut B {
        &mut self.behavior
    }

    pub fn hooks(&self) -> &AttackHooks {
        &self.hooks
    }

    pub fn add_before_performing_attack_hook(&self, hook: Hook<AttackEvent>) {
        self.hooks.before_performing_attack.add(hook);
    }

    pub fn remove_before_performing_attack_hook(&self, hook: &Hook<AttackEvent>) -> bool {
        self.hooks.before_performing_attack.remove(hook)
    }

    pub fn add_after_performing_attack_hook(&self, hook: Hook<AttackEvent>) {
        self.hooks.after_performing_attack.add(hook);
    }

    pub fn remove_after_performing_attack_hook(&self, hook: &Hook<AttackEvent>) -> bool {
        self.hooks.after_performing_attack.remove(hook)
    }

    pub fn add_before_being_attacked_hook(&self, hook: Hook<AttackEvent>) {
        self.hooks.before_being_attacked.add(hook);
    }

    pub fn remove_before_being_attacked_hook(&self, hook: &Hook<AttackEvent>) -> bool {
        self.hooks.before_being_attacked.remove(hook)
    }

    pub fn add_after_being_attacked_hook(&self, hook: Hook<AttackEvent>) {
        self.hooks.after_being_attacked.add(hook);
    }

    pub fn remove_after_being_attacked_hook(&self, hook: &Hook<AttackEvent>) -> bool {
        self.hooks.after_being_attacked.remove(hook)
    }
}

impl<B: BattleBehavior> CanPerformAttack for BattleEntity<B> {
    fn perform_attack(&self, event: &mut AttackEvent) {
        self.behavior.perform_attack(&self.entity, event);
    }

    fn before_performing_attack_hooks(&self) -> Option<&HookChain<AttackEvent>> {
        Some(&self.hooks.before_performing_attack)
    }

    fn after_performing_attack_hooks(&self) -> Option<&HookChain<AttackEvent>> {
        Some(&self.hooks.after_performing_attack)
    }
}

impl<B: BattleBehavior> CanReceiveAttack for BattleEntity<B> {
    fn receive_attack(&self, event: &mut AttackEvent) {
        self.behavior.receive_attack(&self.entity, event);
    }

    fn before_being_attacked_hooks(&self) -> Option<&HookChain<AttackEvent>> {
        Some(&self.hooks.before_being_attacked)
    }

    fn after_being_attacked_hooks(&self) -> Option<&HookChain<AttackEvent>> {
        Some(&self.hooks.after_being_attacked)
    }
}

impl<B: BattleBehavior> Combatant for BattleEntity<B> {
    fn entity(&self) -> &Entity {
        &self.entity
    }

    fn as_attacker(&self) -> Option<&dyn CanPerformAttack> {
        Some(self as &dyn CanPerformAttack)
    }

    fn as_defender(&self) -> Option<&dyn CanReceiveAttack> {
        Some(self as &dyn CanReceiveAttack)
    }
}
