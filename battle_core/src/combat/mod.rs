//! Combat - Attack capabilities and the attack orchestrator

mod battle_entity;
mod capability;
mod orchestrator;

pub use battle_entity::{AttackHooks, BattleBehavior, BattleEntity};
pub use capability::{CanPerformAttack, CanReceiveAttack, Combatant};
pub use orchestrator::BattleOrchestrator;
