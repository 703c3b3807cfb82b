//! Combat capabilities - What an entity can do in an attack

use crate::entity::Entity;
use crate::event::AttackEvent;
use crate::hook::HookChain;

/// Attacker side of an attack
///
/// `perform_attack` is mandatory and fills `event.damages`. The hook chains
/// are optional; `None` means the entity does not have that chain at all.
pub trait CanPerformAttack {
    fn perform_attack(&self, event: &mut AttackEvent);

    fn before_performing_attack_hooks(&self) -> Option<&HookChain<AttackEvent>> {
        None
    }

    fn after_performing_attack_hooks(&self) -> Option<&HookChain<AttackEvent>> {
        None
    }
}

/// Defender side of an attack
///
/// `receive_attack` must deduct the sum of all non-cancelled damage
/// contributions from the entity's health.
pub trait CanReceiveAttack {
    fn receive_attack(&self, event: &mut AttackEvent);

    fn before_being_attacked_hooks(&self) -> Option<&HookChain<AttackEvent>> {
        None
    }

    fn after_being_attacked_hooks(&self) -> Option<&HookChain<AttackEvent>> {
        None
    }
}

/// Anything that can take part in an attack
///
/// Every participant is backed by an [`Entity`]. The capability accessors are
/// how the orchestrator learns what the participant supports.
pub trait Combatant {
    fn entity(&self) -> &Entity;

    fn as_attacker(&self) -> Option<&dyn CanPerformAttack> {
        None
    }

    fn as_defender(&self) -> Option<&dyn CanReceiveAttack> {
        None
    }
}

/// A bare entity can be named in an attack but can neither attack nor defend
impl Combatant for Entity {
    fn entity(&self) -> &Entity {
        self
    }
}
