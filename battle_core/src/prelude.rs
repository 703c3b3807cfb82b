//! Prelude module for convenient imports
//!
//! ```rust
//! use battle_core::prelude::*;
//! ```

// Entities
pub use crate::entity::{Entity, EntityId, EntityOptions, HealthOutcome, WeakEntity};

// Events and hooks
pub use crate::event::{AfterHealthChange, AttackEvent, AttackPhase, BeforeHealthChange, Cancellable, Propagation};
pub use crate::hook::{hook, Hook};

// Combat
pub use crate::combat::{BattleBehavior, BattleEntity, BattleOrchestrator, CanPerformAttack, CanReceiveAttack, Combatant};

// Damage
pub use crate::damage::{AttackType, DamageInfo};

// Health stream
pub use crate::broadcast::Signal;
