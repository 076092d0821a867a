//! # Raid Simulation
//!
//! Headless, fully deterministic bot session against the engine: a handful
//! of bots hammer the boss at their click cap, duel whenever their cooldown
//! allows, and praise each other once in a while. Simulated time advances
//! in fixed steps; the same seed always prints the same report.
//!
//! Run with: cargo run --package guildhall --bin raid_simulation

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use guildhall::{BalanceConfig, GuildhallEngine};
use guildhall_encounter::DamageUpgrades;
use guildhall_shared::{Fixed, Timestamp};

/// Simulated bots.
const BOT_COUNT: usize = 8;

/// Simulation step (one boss click per bot per step).
const STEP_MS: u64 = 500;

/// Total simulated steps. 2400 steps * 500ms = 20 minutes of raid night.
const STEPS: u64 = 2_400;

fn main() {
    let mut config = BalanceConfig::default();
    // A pool the bots can actually empty in one session.
    config.boss.max_hp = Fixed::from_whole(20_000);

    let engine = GuildhallEngine::with_config(config);
    let events = engine.events();
    let mut rng = ChaCha8Rng::seed_from_u64(0xB0_55);

    let names = [
        "Astrid", "Bjorn", "Cato", "Dagny", "Eirik", "Freya", "Gorm", "Hilda",
    ];
    let bots: Vec<_> = names
        .iter()
        .take(BOT_COUNT)
        .map(|name| engine.register_actor(name))
        .collect();

    println!("=== RAID NIGHT: {BOT_COUNT} bots, {STEPS} steps of {STEP_MS} ms ===");

    let mut bosses_slain = 0u64;
    let mut duels_fought = 0u64;
    let mut rejections = 0u64;

    for step in 0..STEPS {
        let now = Timestamp::from_millis(step * STEP_MS);

        for &bot in &bots {
            // Everyone clicks the boss every step; the gate allows it.
            match engine.attack_boss_at(bot, DamageUpgrades::default(), now) {
                Ok(report) if report.outcome.defeated => bosses_slain += 1,
                Ok(_) => {}
                Err(_) => rejections += 1,
            }

            // Roughly every 10th step, try to pick a fight.
            if rng.gen_range(0..10) == 0 {
                let opponents = engine.opponents_for(bot);
                if !opponents.is_empty() {
                    let target = opponents[rng.gen_range(0..opponents.len())].id;
                    match engine.attack_player_at(bot, target, now) {
                        Ok(_) => duels_fought += 1,
                        Err(_) => rejections += 1, // usually the cooldown
                    }
                }
            }

            // A praise now and then; the quota rejects the surplus.
            if rng.gen_range(0..200) == 0 {
                let _ = engine.give_praise_at(bot, now);
            }
        }
    }

    println!("\nbosses slain: {bosses_slain}");
    println!("duels fought: {duels_fought}");
    println!("rejections (cooldowns/limits): {rejections}");

    let boss = engine.active_boss_at(Timestamp::from_millis(STEPS * STEP_MS));
    println!("\nactive boss: {} at {}/{} HP", boss.name, boss.current_hp, boss.max_hp);

    println!("\n--- boss leaderboard ---");
    for entry in engine.boss_leaderboard_at(Timestamp::from_millis(STEPS * STEP_MS)) {
        println!(
            "{}: {} damage, {} XP",
            entry.actor_id, entry.total_damage, entry.total_xp
        );
    }

    println!("\n--- duel leaderboard ---");
    for row in engine.duel_leaderboard(BOT_COUNT) {
        println!(
            "{}: {}W/{}L ({:.1}%), {} damage dealt",
            row.actor_id, row.wins, row.losses, row.win_rate, row.total_damage_dealt
        );
    }

    println!("\n--- final standings ---");
    for &bot in &bots {
        if let Some(actor) = engine.actor(bot) {
            println!(
                "{} ({}): level {}, {} XP, {} gold",
                actor.name, actor.id, actor.level, actor.xp, actor.gold
            );
        }
    }

    let event_count = events.try_iter().count();
    println!("\nevents published to the badge collaborator: {event_count}");
}
