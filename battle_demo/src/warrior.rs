//! Warrior - Melee fighter with random strength and flat defense

use battle_core::damage::BASIC_ATTACK_TYPE;
use battle_core::prelude::*;
use rand::prelude::*;
use rand_chacha::ChaCha8Rng;
use std::cell::RefCell;
use tracing::info;

/// Percentage points shaved off every modifier when hit by a basic attack
const DEFENSE: f64 = 2.0;

pub struct Warrior {
    strength: f64,
    defense: f64,
    rng: RefCell<ChaCha8Rng>,
}

impl Warrior {
    /// Turn an entity into a warrior with strength rolled from `rng`
    pub fn spawn(entity: Entity, rng: &mut ChaCha8Rng) -> BattleEntity<Warrior> {
        let warrior = Warrior {
            strength: rng.gen_range(0..10) as f64,
            defense: DEFENSE,
            rng: RefCell::new(ChaCha8Rng::seed_from_u64(rng.gen())),
        };
        let defense = warrior.defense;
        let battle = BattleEntity::from_entity(entity, warrior);

        battle.add_before_performing_attack_hook(hook(|event: &mut AttackEvent| {
            info!(
                "{} takes a deep breath to steady before attacking",
                event.performing_entity().name()
            );
        }));
        battle.add_before_being_attacked_hook(hook(move |event: &mut AttackEvent| {
            if event.damages.contains(BASIC_ATTACK_TYPE) {
                for damage in event.damages.iter_mut() {
                    damage.set_modifier(damage.modifier() - defense / 100.0);
                }
            }
        }));

        battle
    }

    pub fn strength(&self) -> f64 {
        self.strength
    }
}

impl BattleBehavior for Warrior {
    fn perform_attack(&self, _entity: &Entity, event: &mut AttackEvent) {
        let luck: f64 = self.rng.borrow_mut().gen();
        let amount = self.strength + self.strength * luck;
        event.damages.insert(DamageInfo::basic(amount));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_warrior(name: &str, rng: &mut ChaCha8Rng) -> BattleEntity<Warrior> {
        let entity = Entity::with_options(name, EntityOptions::with_max_health(50.0)).unwrap();
        Warrior::spawn(entity, rng)
    }

    #[test]
    fn test_strength_in_range() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        for _ in 0..20 {
            let warrior = make_warrior("w", &mut rng);
            let strength = warrior.behavior().strength();
            assert!((0.0..10.0).contains(&strength));
        }
    }

    #[test]
    fn test_defense_softens_basic_hits() {
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let attacker = make_warrior("foo", &mut rng);
        let defender = make_warrior("bar", &mut rng);

        let event = BattleOrchestrator::new().execute_attack(&attacker, &defender);

        let basic = event.damages.get(BASIC_ATTACK_TYPE).unwrap();
        assert!(basic.has_been_modified());
        assert!((basic.modifier() - 0.98).abs() < 1e-9);

        let strength = attacker.behavior().strength();
        assert!(basic.base_damage() >= strength);
        assert!(basic.base_damage() <= strength * 2.0);
        assert!((defender.entity().current_health() - (50.0 - basic.total_damage())).abs() < 1e-9);
    }

    #[test]
    fn test_same_seed_same_fight() {
        let run = || {
            let mut rng = ChaCha8Rng::seed_from_u64(99);
            let attacker = make_warrior("foo", &mut rng);
            let defender = make_warrior("bar", &mut rng);
            BattleOrchestrator::new().execute_attack(&attacker, &defender);
            defender.entity().current_health()
        };
        assert_eq!(run(), run());
    }
}
