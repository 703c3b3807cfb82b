//! Entity - Bounded health with before/after hook chains and a health stream

mod id;
mod options;

pub use id::EntityId;
pub use options::EntityOptions;

use crate::broadcast::{Broadcast, Signal, Subscription};
use crate::event::{AfterHealthChange, BeforeHealthChange, Cancellable, Latch};
use crate::hook::{hook, Hook, HookChain};
use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::{Rc, Weak};
use thiserror::Error;
use tracing::{debug, trace, warn};

/// Entity validation error
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EntityError {
    #[error("Maximum health must be greater than 0 (got {0})")]
    InvalidMaxHealth(f64),
}

/// Result of a health mutation
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HealthOutcome {
    /// The value stored after hooks and clamping
    Committed(f64),
    /// A before-hook cancelled the change (or the entity was already destroyed)
    Cancelled,
}

impl HealthOutcome {
    pub fn is_cancelled(&self) -> bool {
        matches!(self, HealthOutcome::Cancelled)
    }

    pub fn committed(&self) -> Option<f64> {
        match self {
            HealthOutcome::Committed(value) => Some(*value),
            HealthOutcome::Cancelled => None,
        }
    }
}

struct EntityCore {
    id: EntityId,
    name: RefCell<String>,
    max_health: Cell<f64>,
    immortal: Cell<bool>,
    destroy_on_zero_hit_points: Cell<bool>,
    destroyed: Cell<Latch>,
    health: Broadcast<f64>,
    before_health_change: HookChain<BeforeHealthChange>,
    after_health_change: HookChain<AfterHealthChange>,
}

impl EntityCore {
    fn destroy(&self) {
        if self.destroyed.get().is_set() {
            return;
        }
        let mut destroyed = self.destroyed.get();
        destroyed.set();
        self.destroyed.set(destroyed);
        self.health.complete();
        debug!(entity = %self.id, name = %self.name.borrow(), "entity destroyed");
    }
}

/// Shared handle to an entity
///
/// Cloning the handle does not copy the entity. All state uses interior
/// mutability so hooks can read and mutate the entity they are attached to,
/// including nested health changes from inside a running chain. Hooks that
/// capture their own entity should hold a [`WeakEntity`] to avoid a cycle.
#[derive(Clone)]
pub struct Entity {
    core: Rc<EntityCore>,
}

impl Entity {
    /// Create an entity with default options (max health 1)
    pub fn new(name: impl Into<String>) -> Self {
        Self::build(name.into(), EntityOptions::default())
    }

    /// Create an entity, validating the options
    pub fn with_options(name: impl Into<String>, options: EntityOptions) -> Result<Self, EntityError> {
        validate_max_health(options.max_health)?;
        Ok(Self::build(name.into(), options))
    }

    fn build(name: String, options: EntityOptions) -> Self {
        let core = Rc::new(EntityCore {
            id: options.identifier.unwrap_or_default(),
            name: RefCell::new(name),
            max_health: Cell::new(options.max_health),
            immortal: Cell::new(options.immortal),
            destroy_on_zero_hit_points: Cell::new(options.destroy_on_zero_hit_points),
            destroyed: Cell::new(Latch::new()),
            health: Broadcast::new(options.max_health),
            before_health_change: HookChain::new(),
            after_health_change: HookChain::new(),
        });

        // Built-in hooks always sit at the front of their chains
        let weak = Rc::downgrade(&core);
        core.before_health_change
            .add(hook(move |event: &mut BeforeHealthChange| {
                if weak.upgrade().is_some_and(|core| core.immortal.get()) {
                    event.cancel();
                }
            }));

        let weak = Rc::downgrade(&core);
        core.after_health_change
            .add(hook(move |event: &mut AfterHealthChange| {
                if let Some(core) = weak.upgrade() {
                    if event.new_health() == 0.0 && core.destroy_on_zero_hit_points.get() {
                        core.destroy();
                    }
                }
            }));

        Entity { core }
    }

    pub fn id(&self) -> EntityId {
        self.core.id
    }

    pub fn name(&self) -> String {
        self.core.name.borrow().clone()
    }

    pub fn set_name(&self, name: impl Into<String>) {
        *self.core.name.borrow_mut() = name.into();
    }

    pub fn max_health(&self) -> f64 {
        self.core.max_health.get()
    }

    /// Change the maximum health
    ///
    /// Current health is not clamped here; a value above the new maximum is
    /// corrected by the next health mutation.
    pub fn set_max_health(&self, max_health: f64) -> Result<(), EntityError> {
        validate_max_health(max_health)?;
        self.core.max_health.set(max_health);
        Ok(())
    }

    pub fn current_health(&self) -> f64 {
        self.core.health.value()
    }

    /// Request a new health value
    ///
    /// Runs the before-chain (immortality check first), clamps the possibly
    /// rewritten proposal to `[0, max_health]`, broadcasts the committed value
    /// and then runs the after-chain (auto-destroy first).
    pub fn set_current_health(&self, requested: f64) -> HealthOutcome {
        if self.is_destroyed() {
            warn!(entity = %self.core.id, requested, "health change on destroyed entity ignored");
            return HealthOutcome::Cancelled;
        }

        let mut before = BeforeHealthChange::new(self.current_health(), requested);
        self.core.before_health_change.run(&mut before);
        if before.is_cancelled() {
            trace!(entity = %self.core.id, requested, "health change cancelled");
            return HealthOutcome::Cancelled;
        }
        if before.new_health.is_nan() {
            warn!(entity = %self.core.id, requested, "health change resolved to NaN, ignored");
            return HealthOutcome::Cancelled;
        }

        let committed = before.new_health.clamp(0.0, self.max_health());
        self.core.health.emit(committed);
        debug!(
            entity = %self.core.id,
            old = before.old_health(),
            requested,
            committed,
            "health changed"
        );

        let mut after = AfterHealthChange::new(committed);
        self.core.after_health_change.run(&mut after);

        HealthOutcome::Committed(committed)
    }

    /// Shift health by `delta` (negative for damage)
    pub fn adjust_health(&self, delta: f64) -> HealthOutcome {
        self.set_current_health(self.current_health() + delta)
    }

    pub fn is_immortal(&self) -> bool {
        self.core.immortal.get()
    }

    pub fn set_immortal(&self, immortal: bool) {
        self.core.immortal.set(immortal);
    }

    pub fn destroy_on_zero_hit_points(&self) -> bool {
        self.core.destroy_on_zero_hit_points.get()
    }

    pub fn set_destroy_on_zero_hit_points(&self, enabled: bool) {
        self.core.destroy_on_zero_hit_points.set(enabled);
    }

    pub fn is_destroyed(&self) -> bool {
        self.core.destroyed.get().is_set()
    }

    /// Mark the entity destroyed and end its health stream. Idempotent.
    pub fn destroy(&self) {
        self.core.destroy();
    }

    /// Subscribe to committed health values
    ///
    /// The current value is delivered immediately, then every committed value,
    /// then [`Signal::Complete`] when the entity is destroyed.
    pub fn on_health_change<F>(&self, subscriber: F) -> Subscription
    where
        F: Fn(Signal<f64>) + 'static,
    {
        self.core.health.subscribe(subscriber)
    }

    pub fn add_before_health_change_hook(&self, hook: Hook<BeforeHealthChange>) {
        self.core.before_health_change.add(hook);
    }

    pub fn remove_before_health_change_hook(&self, hook: &Hook<BeforeHealthChange>) -> bool {
        self.core.before_health_change.remove(hook)
    }

    pub fn add_after_health_change_hook(&self, hook: Hook<AfterHealthChange>) {
        self.core.after_health_change.add(hook);
    }

    pub fn remove_after_health_change_hook(&self, hook: &Hook<AfterHealthChange>) -> bool {
        self.core.after_health_change.remove(hook)
    }

    /// Whether two handles point at the same entity
    pub fn ptr_eq(&self, other: &Entity) -> bool {
        Rc::ptr_eq(&self.core, &other.core)
    }

    pub fn downgrade(&self) -> WeakEntity {
        WeakEntity {
            core: Rc::downgrade(&self.core),
        }
    }
}

impl fmt::Debug for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Entity")
            .field("id", &self.core.id)
            .field("name", &*self.core.name.borrow())
            .field("current_health", &self.current_health())
            .field("max_health", &self.max_health())
            .field("immortal", &self.is_immortal())
            .field("destroyed", &self.is_destroyed())
            .finish()
    }
}

/// Non-owning entity handle, for hooks that refer back to their owner
#[derive(Clone, Debug)]
pub struct WeakEntity {
    core: Weak<EntityCore>,
}

impl WeakEntity {
    pub fn upgrade(&self) -> Option<Entity> {
        self.core.upgrade().map(|core| Entity { core })
    }
}

fn validate_max_health(max_health: f64) -> Result<(), EntityError> {
    // Written to also reject NaN
    if !(max_health > 0.0) {
        return Err(EntityError::InvalidMaxHealth(max_health));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::Propagation;

    fn make_entity(max_health: f64) -> Entity {
        Entity::with_options("test", EntityOptions::with_max_health(max_health)).unwrap()
    }

    #[test]
    fn test_starts_at_max_health() {
        let entity = make_entity(80.0);
        assert!((entity.current_health() - 80.0).abs() < f64::EPSILON);
        assert!(!entity.is_destroyed());
    }

    #[test]
    fn test_default_entity() {
        let entity = Entity::new("plain");
        assert_eq!(entity.name(), "plain");
        assert!((entity.max_health() - 1.0).abs() < f64::EPSILON);
        assert!(entity.destroy_on_zero_hit_points());
        assert!(!entity.is_immortal());
    }

    #[test]
    fn test_unique_identifiers() {
        let a = Entity::new("");
        let b = Entity::new("");
        let c = Entity::new("");
        assert_ne!(a.id(), b.id());
        assert_ne!(a.id(), c.id());
        assert_ne!(b.id(), c.id());
    }

    #[test]
    fn test_identifier_override() {
        let id = EntityId::new();
        let entity = Entity::with_options(
            "known",
            EntityOptions {
                identifier: Some(id),
                ..Default::default()
            },
        )
        .unwrap();
        assert_eq!(entity.id(), id);
    }

    #[test]
    fn test_rejects_non_positive_max_health() {
        let entity = make_entity(20.0);
        for bad in [0.0, -1.0, -30.0, -500.0, f64::NAN] {
            assert!(entity.set_max_health(bad).is_err());
        }
        assert!((entity.max_health() - 20.0).abs() < f64::EPSILON);

        let err = Entity::with_options("bad", EntityOptions::with_max_health(-5.0)).unwrap_err();
        assert_eq!(err, EntityError::InvalidMaxHealth(-5.0));
    }

    #[test]
    fn test_lowering_max_health_does_not_clamp_until_next_change() {
        let entity = make_entity(100.0);
        entity.set_max_health(40.0).unwrap();
        assert!((entity.current_health() - 100.0).abs() < f64::EPSILON);

        entity.adjust_health(-1.0);
        assert!((entity.current_health() - 40.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_clamps_to_bounds() {
        let entity = make_entity(50.0);
        entity.set_destroy_on_zero_hit_points(false);

        assert_eq!(entity.set_current_health(70.0), HealthOutcome::Committed(50.0));
        assert_eq!(entity.set_current_health(-10.0), HealthOutcome::Committed(0.0));
        assert!(!entity.is_destroyed());
    }

    #[test]
    fn test_zero_health_destroys() {
        let entity = make_entity(50.0);
        entity.set_current_health(-10.0);
        assert!((entity.current_health() - 0.0).abs() < f64::EPSILON);
        assert!(entity.is_destroyed());
    }

    #[test]
    fn test_immortal_blocks_changes() {
        let entity = make_entity(150.0);
        entity.set_current_health(25.0);

        entity.set_immortal(true);
        assert!(entity.adjust_health(50.0).is_cancelled());
        assert!((entity.current_health() - 25.0).abs() < f64::EPSILON);

        entity.set_immortal(false);
        entity.adjust_health(-5.0);
        assert!((entity.current_health() - 20.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_immortality_wins_over_later_stop_propagation() {
        let entity = make_entity(10.0);
        entity.set_immortal(true);
        entity.add_before_health_change_hook(hook(|event: &mut BeforeHealthChange| {
            event.stop_propagation()
        }));

        entity.set_current_health(1.0);
        assert!((entity.current_health() - 10.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_before_hooks_can_rewrite_proposal() {
        let entity = make_entity(50.0);
        entity.add_before_health_change_hook(hook(|event: &mut BeforeHealthChange| {
            event.new_health -= 35.0
        }));

        entity.set_current_health(49.0);
        assert!((entity.current_health() - 14.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_clamp_uses_rewritten_proposal() {
        let entity = make_entity(50.0);
        entity.set_current_health(10.0);
        entity.add_before_health_change_hook(hook(|event: &mut BeforeHealthChange| {
            event.new_health = 500.0
        }));

        entity.set_current_health(20.0);
        assert!((entity.current_health() - 50.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_remove_before_hook() {
        let entity = make_entity(50.0);
        let zero = hook(|event: &mut BeforeHealthChange| event.new_health = 0.0);
        entity.set_destroy_on_zero_hit_points(false);
        entity.add_before_health_change_hook(Rc::clone(&zero));

        entity.set_current_health(49.0);
        assert!((entity.current_health() - 0.0).abs() < f64::EPSILON);

        assert!(entity.remove_before_health_change_hook(&zero));
        entity.set_current_health(35.0);
        assert!((entity.current_health() - 35.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_cancel_skips_after_hooks() {
        let entity = make_entity(50.0);
        let after_ran = Rc::new(Cell::new(false));
        let flag = Rc::clone(&after_ran);

        entity.add_before_health_change_hook(hook(|event: &mut BeforeHealthChange| event.cancel()));
        entity.add_after_health_change_hook(hook(move |_: &mut AfterHealthChange| flag.set(true)));

        assert!(entity.set_current_health(1.0).is_cancelled());
        assert!(!after_ran.get());
    }

    #[test]
    fn test_destroy_is_idempotent() {
        let entity = make_entity(10.0);
        let completions = Rc::new(Cell::new(0));
        let counter = Rc::clone(&completions);
        let _sub = entity.on_health_change(move |signal| {
            if signal == Signal::Complete {
                counter.set(counter.get() + 1);
            }
        });

        entity.destroy();
        entity.destroy();
        assert!(entity.is_destroyed());
        assert_eq!(completions.get(), 1);
    }

    #[test]
    fn test_destroyed_entity_ignores_health_changes() {
        let entity = make_entity(10.0);
        entity.destroy();
        assert!(entity.set_current_health(3.0).is_cancelled());
        assert!((entity.current_health() - 10.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_nested_health_change_from_after_hook() {
        let entity = make_entity(100.0);
        let weak = entity.downgrade();
        // Regenerate to 30 whenever health drops below 30
        entity.add_after_health_change_hook(hook(move |event: &mut AfterHealthChange| {
            if event.new_health() < 30.0 {
                if let Some(entity) = weak.upgrade() {
                    entity.set_current_health(30.0);
                }
            }
        }));

        entity.set_current_health(10.0);
        assert!((entity.current_health() - 30.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_nested_health_change_from_before_hook() {
        let entity = make_entity(100.0);
        let weak = entity.downgrade();
        let nested = Rc::new(Cell::new(false));
        let committed = Rc::new(RefCell::new(Vec::new()));

        let guard = Rc::clone(&nested);
        entity.add_before_health_change_hook(hook(move |_: &mut BeforeHealthChange| {
            if !guard.replace(true) {
                if let Some(entity) = weak.upgrade() {
                    assert_eq!(entity.set_current_health(80.0), HealthOutcome::Committed(80.0));
                }
            }
        }));
        let log = Rc::clone(&committed);
        entity.add_after_health_change_hook(hook(move |event: &mut AfterHealthChange| {
            log.borrow_mut().push(event.new_health());
        }));

        // The outer proposal is still pending while the nested change commits
        let outcome = entity.set_current_health(50.0);

        assert_eq!(outcome, HealthOutcome::Committed(50.0));
        assert!((entity.current_health() - 50.0).abs() < f64::EPSILON);
        assert_eq!(*committed.borrow(), vec![80.0, 50.0]);
    }

    #[test]
    fn test_nan_proposal_is_rejected() {
        let entity = make_entity(10.0);
        assert!(entity.set_current_health(f64::NAN).is_cancelled());
        assert!((entity.current_health() - 10.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_handles_share_state() {
        let entity = make_entity(10.0);
        let other = entity.clone();
        other.set_current_health(4.0);
        other.set_name("renamed");

        assert!(entity.ptr_eq(&other));
        assert!((entity.current_health() - 4.0).abs() < f64::EPSILON);
        assert_eq!(entity.name(), "renamed");
        assert!(!entity.ptr_eq(&make_entity(10.0)));
    }
}
