//! BattleOrchestrator - Drives one attack through its phases

use super::capability::Combatant;
use crate::event::{AttackEvent, AttackPhase, Cancellable};
use crate::hook::HookChain;
use tracing::{debug, trace};

/// Stateless coordinator for attacks between two combatants
///
/// Phases run in a fixed order:
/// 1. before-performing-attack hooks (attacker)
/// 2. `perform_attack` (attacker)
/// 3. before-being-attacked hooks (defender)
/// 4. `receive_attack` (defender)
/// 5. after-being-attacked hooks (defender)
/// 6. after-performing-attack hooks (attacker)
///
/// Once the event is cancelled no later phase runs. Optional hook chains the
/// combatant does not have are skipped.
#[derive(Debug, Clone, Copy, Default)]
pub struct BattleOrchestrator;

impl BattleOrchestrator {
    pub fn new() -> Self {
        BattleOrchestrator
    }

    /// Execute an attack of `performing` against `receiving`
    ///
    /// Never fails; inspect the returned event for cancellation.
    pub fn execute_attack<A, D>(&self, performing: &A, receiving: &D) -> AttackEvent
    where
        A: Combatant + ?Sized,
        D: Combatant + ?Sized,
    {
        let mut event = AttackEvent::new(performing.entity().clone(), receiving.entity().clone());

        let Some(attacker) = performing.as_attacker() else {
            let entity = performing.entity();
            event.cancel_with_reason(format!(
                "Entity {} (identifier {}) does not implement CanPerformAttack",
                entity.name(),
                entity.id()
            ));
            log_cancelled(&event);
            return event;
        };
        let Some(defender) = receiving.as_defender() else {
            let entity = receiving.entity();
            event.cancel_with_reason(format!(
                "Entity {} (identifier {}) does not implement CanReceiveAttack",
                entity.name(),
                entity.id()
            ));
            log_cancelled(&event);
            return event;
        };

        run_hooks(
            &mut event,
            AttackPhase::BeforePerformingAttack,
            attacker.before_performing_attack_hooks(),
        );

        if !event.is_cancelled() {
            event.enter_phase(AttackPhase::PerformAttack);
            attacker.perform_attack(&mut event);
            trace!(contributions = event.damages.len(), "attack performed");
        }

        run_hooks(
            &mut event,
            AttackPhase::BeforeBeingAttacked,
            defender.before_being_attacked_hooks(),
        );

        if !event.is_cancelled() {
            event.enter_phase(AttackPhase::ReceiveAttack);
            defender.receive_attack(&mut event);
            trace!(total = event.total_damage(), "attack received");
        }

        run_hooks(
            &mut event,
            AttackPhase::AfterBeingAttacked,
            defender.after_being_attacked_hooks(),
        );
        run_hooks(
            &mut event,
            AttackPhase::AfterPerformingAttack,
            attacker.after_performing_attack_hooks(),
        );

        if event.is_cancelled() {
            log_cancelled(&event);
        } else {
            debug!(
                attacker = %event.performing_entity().name(),
                defender = %event.receiving_entity().name(),
                damage = event.total_damage(),
                defender_health = event.receiving_entity().current_health(),
                "attack resolved"
            );
        }
        event
    }
}

fn run_hooks(event: &mut AttackEvent, phase: AttackPhase, chain: Option<&HookChain<AttackEvent>>) {
    if event.is_cancelled() {
        return;
    }
    let Some(chain) = chain else {
        return;
    };
    event.enter_phase(phase);
    let ran = chain.run(event);
    trace!(%phase, ran, "attack hooks ran");
}

fn log_cancelled(event: &AttackEvent) {
    debug!(
        phase = %event.phase(),
        reason = event.cancel_reason().unwrap_or("cancelled by hook"),
        "attack cancelled"
    );
}
