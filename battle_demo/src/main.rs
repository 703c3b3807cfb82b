//! battle_demo - Two warriors trade blows until one falls
//!
//! Usage: `battle_demo [seed]`. Set `RUST_LOG=battle_core=debug` to trace
//! every phase of each attack.

mod warrior;

use battle_core::{
    parse_roster, BattleOrchestrator, Cancellable, Combatant, ConfigError, Entity, Roster, Signal,
};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::cell::Cell;
use std::rc::Rc;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use warrior::Warrior;

const ROSTER: &str = include_str!("../roster.toml");

/// Hard stop in case both warriors rolled zero strength
const MAX_ROUNDS: u32 = 200;

fn spawn(roster: &Roster, name: &str) -> Result<Entity, ConfigError> {
    roster
        .spawn(name)?
        .ok_or_else(|| ConfigError::ValidationError(format!("roster has no entity '{}'", name)))
}

fn main() -> Result<(), ConfigError> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "battle_demo=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let seed = std::env::args()
        .nth(1)
        .and_then(|arg| arg.parse().ok())
        .unwrap_or(42);
    let mut rng = ChaCha8Rng::seed_from_u64(seed);

    let roster = parse_roster(ROSTER)?;
    let foo = Warrior::spawn(spawn(&roster, "foo")?, &mut rng);
    let bar = Warrior::spawn(spawn(&roster, "bar")?, &mut rng);
    info!(
        seed,
        foo_strength = foo.behavior().strength(),
        bar_strength = bar.behavior().strength(),
        "warriors ready"
    );

    let should_stop = Rc::new(Cell::new(false));
    let _subscriptions = [foo.entity(), bar.entity()].map(|entity| {
        let should_stop = Rc::clone(&should_stop);
        entity.on_health_change(move |signal| match signal {
            Signal::Next(health) if health <= 0.0 => should_stop.set(true),
            Signal::Complete => should_stop.set(true),
            Signal::Next(_) => {}
        })
    });

    let orchestrator = BattleOrchestrator::new();
    let mut round = 0;
    while !should_stop.get() && round < MAX_ROUNDS {
        round += 1;
        for (attacker, defender) in [(&foo, &bar), (&bar, &foo)] {
            let event = orchestrator.execute_attack(attacker, defender);
            let receiving = event.receiving_entity();
            if event.is_cancelled() {
                println!(
                    "{} attacks {} but the attack is cancelled ({})",
                    event.performing_entity().name(),
                    receiving.name(),
                    event.cancel_reason().unwrap_or("no reason given")
                );
            } else {
                println!(
                    "{} attacks {} leaving {} with {:.1} health",
                    event.performing_entity().name(),
                    receiving.name(),
                    receiving.name(),
                    receiving.current_health()
                );
            }
            if should_stop.get() {
                break;
            }
        }
    }

    match (foo.entity().is_destroyed(), bar.entity().is_destroyed()) {
        (false, true) => info!(rounds = round, "{} wins", foo.entity().name()),
        (true, false) => info!(rounds = round, "{} wins", bar.entity().name()),
        _ => warn!(rounds = round, "no winner"),
    }

    Ok(())
}
