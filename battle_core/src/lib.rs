//! battle_core - Entity health and attack pipeline for turn-based combat
//!
//! This library provides:
//! - Entity: Bounded health guarded by before/after hook chains, with a
//!   replaying health stream and destroy lifecycle
//! - BattleEntity: Entity with the four attack-phase hook chains
//! - BattleOrchestrator: Runs one attack end-to-end between two combatants
//! - DamageInfo / DamageMap: Per-type damage contributions of an attack
//! - Roster: Attack types and entity templates loaded from TOML
//!
//! Everything is single-threaded and synchronous. Cancellation is reported on
//! the returned events, never as an error.

pub mod broadcast;
pub mod combat;
pub mod config;
pub mod damage;
pub mod entity;
pub mod event;
pub mod hook;
pub mod prelude;

// Re-export core types for convenience
pub use broadcast::{Broadcast, Signal, Subscription};
pub use combat::{
    AttackHooks, BattleBehavior, BattleEntity, BattleOrchestrator, CanPerformAttack,
    CanReceiveAttack, Combatant,
};
pub use config::{load_roster, parse_roster, ConfigError, Roster};
pub use damage::{apply_damages, AttackType, AttackTypeRegistry, DamageInfo, DamageMap};
pub use entity::{Entity, EntityError, EntityId, EntityOptions, HealthOutcome, WeakEntity};
pub use event::{
    AfterHealthChange, AttackEvent, AttackPhase, BeforeHealthChange, Cancellable, Latch,
    Propagation,
};
pub use hook::{hook, Hook, HookChain};
