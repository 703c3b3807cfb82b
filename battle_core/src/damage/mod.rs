//! Damage system - Attack types, damage contributions and the per-attack damage map

mod attack_type;
mod info;
mod map;

pub use attack_type::{AttackType, AttackTypeRegistry, BASIC_ATTACK_TYPE};
pub use info::DamageInfo;
pub use map::DamageMap;

use crate::entity::Entity;
use crate::event::AttackEvent;

/// Stock receive-attack behaviour: deduct every non-cancelled contribution
///
/// Returns the amount that was requested to be deducted. The committed change
/// may differ because the health hooks and clamping still apply.
pub fn apply_damages(entity: &Entity, event: &AttackEvent) -> f64 {
    let total = event.damages.total();
    entity.set_current_health(entity.current_health() - total);
    total
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::EntityOptions;

    #[test]
    fn test_apply_damages_skips_cancelled() {
        let defender = Entity::with_options(
            "defender",
            EntityOptions {
                max_health: 50.0,
                ..Default::default()
            },
        )
        .unwrap();
        let mut event = AttackEvent::new(Entity::new("attacker"), defender.clone());

        event.damages.insert(DamageInfo::basic(10.0));
        let mut blocked = DamageInfo::new(30.0, 1.0, AttackType::new("fire"));
        blocked.cancel();
        event.damages.insert(blocked);

        let requested = apply_damages(&defender, &event);

        assert!((requested - 10.0).abs() < f64::EPSILON);
        assert!((defender.current_health() - 40.0).abs() < f64::EPSILON);
    }
}
