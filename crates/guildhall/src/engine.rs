//! # The Engine
//!
//! The facade the dashboard calls. Every operation exists twice: a
//! wall-clock wrapper and an `_at(now)` variant taking the timestamp
//! explicitly - the `_at` family is what tests and replays drive, and the
//! wrappers are one-liners on top.
//!
//! The engine owns the wiring the subsystem crates deliberately avoid:
//! XP grants against the registry, gold movement, the event bus to the
//! badge collaborator, and logging.

use crossbeam_channel::{unbounded, Receiver, Sender};
use parking_lot::Mutex;

use guildhall_arena::{
    Arena, ArenaRanking, DuelNotification, DuelOutcome, DuelStats, DuelistProfile,
};
use guildhall_encounter::{
    BossSnapshot, DamageOutcome, DamageUpgrades, Encounter, LeaderboardEntry,
};
use guildhall_progression::ledger::XpGrant;
use guildhall_progression::{
    ImportReceipt, PraiseBook, PraiseReceipt, PraiseStatus, PraiserRanking, XpImporter,
};
use guildhall_shared::{ActorId, DuelId, GameEvent, Timestamp};

use crate::actors::{Actor, ActorRegistry};
use crate::config::BalanceConfig;
use crate::error::{GuildhallError, GuildhallResult};

/// Result of one boss attack, engine view: the encounter outcome plus the
/// ledger grant it produced.
#[derive(Clone, Debug)]
pub struct BossAttackReport {
    /// What happened at the boss.
    pub outcome: DamageOutcome,
    /// The XP grant applied to the attacker.
    pub grant: XpGrant,
    /// Gold credited to the attacker (only the slayer sees non-zero).
    pub gold_earned: u64,
}

/// Result of one duel, engine view.
#[derive(Clone, Debug)]
pub struct DuelReport {
    /// The resolved duel.
    pub outcome: DuelOutcome,
    /// The XP grant applied to the attacker.
    pub grant: XpGrant,
}

/// Result of one praise, engine view.
#[derive(Clone, Copy, Debug)]
pub struct PraiseReport {
    /// The accepted praise.
    pub receipt: PraiseReceipt,
    /// The XP grant applied to the praiser.
    pub grant: XpGrant,
}

/// Result of one minigame XP import, engine view.
#[derive(Clone, Copy, Debug)]
pub struct ImportReport {
    /// The accepted import, after clamping.
    pub receipt: ImportReceipt,
    /// The XP grant applied to the actor.
    pub grant: XpGrant,
}

/// The progression and combat economy, assembled.
pub struct GuildhallEngine {
    registry: ActorRegistry,
    encounter: Encounter,
    arena: Mutex<Arena>,
    praise: Mutex<PraiseBook>,
    importer: Mutex<XpImporter>,
    events_tx: Sender<GameEvent>,
    events_rx: Receiver<GameEvent>,
}

impl GuildhallEngine {
    /// Creates an engine with the compiled default balance.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(BalanceConfig::default())
    }

    /// Creates an engine with an explicit balance sheet.
    #[must_use]
    pub fn with_config(config: BalanceConfig) -> Self {
        let (events_tx, events_rx) = unbounded();
        Self {
            registry: ActorRegistry::new(),
            encounter: Encounter::new(config.boss.settings(), config.boss.min_hit_interval_ms),
            arena: Mutex::new(Arena::new(config.duel.cooldown_ms)),
            praise: Mutex::new(PraiseBook::new(
                config.praise.xp_per_praise,
                config.praise.max_per_day,
            )),
            importer: Mutex::new(XpImporter::new(config.import.min_interval_ms)),
            events_tx,
            events_rx,
        }
    }

    /// Loads the balance sheet from a TOML file and builds the engine.
    ///
    /// # Errors
    ///
    /// Config loading errors; see [`BalanceConfig::load`].
    pub fn from_config_file(path: impl AsRef<std::path::Path>) -> GuildhallResult<Self> {
        Ok(Self::with_config(BalanceConfig::load(path)?))
    }

    /// A receiver on the event bus. The badge collaborator holds one and
    /// consumes [`GameEvent`]s at its own pace.
    #[must_use]
    pub fn events(&self) -> Receiver<GameEvent> {
        self.events_rx.clone()
    }

    // =========================================================================
    // ACTORS
    // =========================================================================

    /// Registers a new actor.
    pub fn register_actor(&self, name: &str) -> ActorId {
        self.registry.register(name)
    }

    /// An actor's current state.
    #[must_use]
    pub fn actor(&self, id: ActorId) -> Option<Actor> {
        self.registry.snapshot(id)
    }

    /// Active actors `id` may duel, strongest first.
    #[must_use]
    pub fn opponents_for(&self, id: ActorId) -> Vec<Actor> {
        self.registry.opponents_for(id)
    }

    /// Deactivates an actor. History survives; the actor stops acting.
    ///
    /// # Errors
    ///
    /// `ActorNotFound` for unknown ids.
    pub fn deactivate_actor(&self, id: ActorId) -> GuildhallResult<()> {
        if self.registry.deactivate(id) {
            Ok(())
        } else {
            Err(GuildhallError::ActorNotFound(id))
        }
    }

    /// Admin reset: the actor goes back to level 1, zero XP.
    ///
    /// # Errors
    ///
    /// `ActorNotFound` for unknown ids.
    pub fn reset_actor_progress(&self, id: ActorId) -> GuildhallResult<()> {
        if self.registry.reset_progress(id) {
            Ok(())
        } else {
            Err(GuildhallError::ActorNotFound(id))
        }
    }

    // =========================================================================
    // BOSS ENCOUNTER
    // =========================================================================

    /// The active boss, created if none exists.
    #[must_use]
    pub fn active_boss(&self) -> BossSnapshot {
        self.active_boss_at(Timestamp::now())
    }

    /// Deterministic variant of [`Self::active_boss`].
    #[must_use]
    pub fn active_boss_at(&self, now: Timestamp) -> BossSnapshot {
        self.encounter.get_or_create_active(now)
    }

    /// One hit against the boss.
    ///
    /// # Errors
    ///
    /// See [`Self::attack_boss_at`].
    pub fn attack_boss(
        &self,
        actor_id: ActorId,
        upgrades: DamageUpgrades,
    ) -> GuildhallResult<BossAttackReport> {
        self.attack_boss_at(actor_id, upgrades, Timestamp::now())
    }

    /// Deterministic variant of [`Self::attack_boss`].
    ///
    /// Applies the damage, grants the floored XP through the ledger, and -
    /// when the pool empties - pays the slayer and announces the defeat and
    /// the successor.
    ///
    /// # Errors
    ///
    /// - `ActorNotFound` / `ActorInactive` for bad attackers
    /// - `Encounter` rejections (rate limit, stale boss)
    pub fn attack_boss_at(
        &self,
        actor_id: ActorId,
        upgrades: DamageUpgrades,
        now: Timestamp,
    ) -> GuildhallResult<BossAttackReport> {
        let actor = self.active_actor(actor_id)?;

        let outcome = self
            .encounter
            .apply_damage(actor_id, actor.level, upgrades, now)?;

        let xp_whole = u64::try_from(outcome.xp_earned.floor_whole()).unwrap_or(0);
        let grant = self.apply_xp(actor_id, xp_whole)?;

        let mut gold_earned = 0;
        if outcome.defeated {
            gold_earned = outcome.gold_reward;
            self.registry.credit_gold(actor_id, gold_earned);
            tracing::info!("{actor_id} slew {} and earned {gold_earned} gold", outcome.boss_id);
            self.publish(GameEvent::BossDefeated {
                boss_id: outcome.boss_id,
                slayer: actor_id,
                gold_reward: gold_earned,
            });
            if let Some(successor) = &outcome.successor {
                self.publish(GameEvent::BossSpawned {
                    boss_id: successor.id,
                    max_hp: successor.max_hp,
                });
            }
        }

        Ok(BossAttackReport {
            outcome,
            grant,
            gold_earned,
        })
    }

    /// Leaderboard for the active boss.
    #[must_use]
    pub fn boss_leaderboard(&self) -> Vec<LeaderboardEntry> {
        self.boss_leaderboard_at(Timestamp::now())
    }

    /// Deterministic variant of [`Self::boss_leaderboard`].
    #[must_use]
    pub fn boss_leaderboard_at(&self, now: Timestamp) -> Vec<LeaderboardEntry> {
        let boss = self.encounter.get_or_create_active(now);
        self.encounter.leaderboard(boss.id)
    }

    // =========================================================================
    // DUELS
    // =========================================================================

    /// One PvP attack.
    ///
    /// # Errors
    ///
    /// See [`Self::attack_player_at`].
    pub fn attack_player(
        &self,
        attacker_id: ActorId,
        defender_id: ActorId,
    ) -> GuildhallResult<DuelReport> {
        self.attack_player_at(attacker_id, defender_id, Timestamp::now())
    }

    /// Deterministic variant of [`Self::attack_player`].
    ///
    /// Resolves the duel, grants the attacker's XP, and moves gold on a
    /// win: the attacker takes the purse, the defender bleeds - but never
    /// below zero.
    ///
    /// # Errors
    ///
    /// - `ActorNotFound` / `ActorInactive` for bad attackers
    /// - `DefenderNotFound` for unknown defenders
    /// - `Arena` rejections (self-attack, inactive defender, cooldown)
    pub fn attack_player_at(
        &self,
        attacker_id: ActorId,
        defender_id: ActorId,
        now: Timestamp,
    ) -> GuildhallResult<DuelReport> {
        let attacker = self.active_actor(attacker_id)?;
        let defender = self
            .registry
            .snapshot(defender_id)
            .ok_or(GuildhallError::DefenderNotFound(defender_id))?;

        let outcome = self.arena.lock().resolve(
            DuelistProfile {
                id: attacker.id,
                level: attacker.level,
                is_active: attacker.is_active,
            },
            DuelistProfile {
                id: defender.id,
                level: defender.level,
                is_active: defender.is_active,
            },
            now,
        )?;

        let grant = self.apply_xp(attacker_id, outcome.rewards.xp_earned)?;

        if outcome.computation.attacker_won {
            self.registry.credit_gold(attacker_id, outcome.rewards.gold_earned);
            self.registry.debit_gold(defender_id, outcome.rewards.gold_lost);
        }

        self.publish(GameEvent::DuelResolved {
            duel_id: outcome.record.id,
            attacker_id,
            defender_id,
            attacker_won: outcome.computation.attacker_won,
            damage_dealt: outcome.computation.actual_damage,
        });

        Ok(DuelReport { outcome, grant })
    }

    /// An actor's duel stats row, if any duel ever touched them.
    #[must_use]
    pub fn duel_stats(&self, actor_id: ActorId) -> Option<DuelStats> {
        self.arena.lock().stats_for(actor_id)
    }

    /// The PvP leaderboard, at most `limit` rows.
    #[must_use]
    pub fn duel_leaderboard(&self, limit: usize) -> Vec<ArenaRanking> {
        self.arena.lock().leaderboard(limit)
    }

    /// Recent attacks against `defender_id`, newest first, optionally only
    /// those after an already-seen record.
    #[must_use]
    pub fn duel_notifications(
        &self,
        defender_id: ActorId,
        after: Option<DuelId>,
    ) -> Vec<DuelNotification> {
        self.arena.lock().notifications_for(defender_id, after)
    }

    // =========================================================================
    // XP SOURCES
    // =========================================================================

    /// One praise from `actor_id`.
    ///
    /// # Errors
    ///
    /// See [`Self::give_praise_at`].
    pub fn give_praise(&self, actor_id: ActorId) -> GuildhallResult<PraiseReport> {
        self.give_praise_at(actor_id, Timestamp::now())
    }

    /// Deterministic variant of [`Self::give_praise`].
    ///
    /// # Errors
    ///
    /// - `ActorNotFound` / `ActorInactive` for bad actors
    /// - `Progression` rejection once today's quota is spent
    pub fn give_praise_at(
        &self,
        actor_id: ActorId,
        now: Timestamp,
    ) -> GuildhallResult<PraiseReport> {
        self.active_actor(actor_id)?;
        let receipt = self.praise.lock().give_praise(actor_id, now)?;
        let grant = self.apply_xp(actor_id, receipt.xp_earned)?;
        Ok(PraiseReport { receipt, grant })
    }

    /// An actor's standing against today's praise quota.
    ///
    /// # Errors
    ///
    /// `ActorNotFound` for unknown ids.
    pub fn praise_status_at(
        &self,
        actor_id: ActorId,
        now: Timestamp,
    ) -> GuildhallResult<PraiseStatus> {
        self.registry
            .snapshot(actor_id)
            .ok_or(GuildhallError::ActorNotFound(actor_id))?;
        Ok(self.praise.lock().status(actor_id, now))
    }

    /// The praiser toplist since `since` (the dashboard passes
    /// start-of-month).
    #[must_use]
    pub fn top_praisers_since(&self, since: Timestamp) -> Vec<PraiserRanking> {
        self.praise.lock().top_praisers_since(since)
    }

    /// Imports client-reported minigame XP.
    ///
    /// # Errors
    ///
    /// See [`Self::import_minigame_xp_at`].
    pub fn import_minigame_xp(
        &self,
        actor_id: ActorId,
        raw_xp: i64,
        raw_level: i64,
    ) -> GuildhallResult<ImportReport> {
        self.import_minigame_xp_at(actor_id, raw_xp, raw_level, Timestamp::now())
    }

    /// Deterministic variant of [`Self::import_minigame_xp`].
    ///
    /// Both numbers are untrusted and clamped; only the rate limit rejects.
    ///
    /// # Errors
    ///
    /// - `ActorNotFound` / `ActorInactive` for bad actors
    /// - `Progression` rejection when imports arrive too fast
    pub fn import_minigame_xp_at(
        &self,
        actor_id: ActorId,
        raw_xp: i64,
        raw_level: i64,
        now: Timestamp,
    ) -> GuildhallResult<ImportReport> {
        self.active_actor(actor_id)?;
        let receipt = self
            .importer
            .lock()
            .import_xp(actor_id, raw_xp, raw_level, now)?;
        let grant = self.apply_xp(actor_id, receipt.xp_earned)?;
        Ok(ImportReport { receipt, grant })
    }

    // =========================================================================
    // INTERNALS
    // =========================================================================

    /// Looks up an actor and insists they are active.
    fn active_actor(&self, id: ActorId) -> GuildhallResult<Actor> {
        let actor = self
            .registry
            .snapshot(id)
            .ok_or(GuildhallError::ActorNotFound(id))?;
        if !actor.is_active {
            return Err(GuildhallError::ActorInactive(id));
        }
        Ok(actor)
    }

    /// Grants XP and announces a level-up when thresholds are crossed.
    fn apply_xp(&self, actor_id: ActorId, amount: u64) -> GuildhallResult<XpGrant> {
        let grant = self
            .registry
            .grant_xp(actor_id, amount)
            .ok_or(GuildhallError::ActorNotFound(actor_id))?;

        if grant.leveled_up {
            tracing::info!(
                "{actor_id} reached level {} (was {})",
                grant.new_level,
                grant.old_level
            );
            self.publish(GameEvent::LevelUp {
                actor_id,
                old_level: grant.old_level,
                new_level: grant.new_level,
                total_xp: grant.new_xp,
            });
        }
        Ok(grant)
    }

    fn publish(&self, event: GameEvent) {
        // The engine holds a receiver, so the channel cannot be closed.
        let _ = self.events_tx.send(event);
    }
}

impl Default for GuildhallEngine {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use guildhall_shared::EventType;

    fn engine() -> GuildhallEngine {
        GuildhallEngine::new()
    }

    #[test]
    fn test_unknown_actor_is_rejected_everywhere() {
        let engine = engine();
        let ghost = ActorId::new(404);

        assert!(matches!(
            engine.attack_boss_at(ghost, DamageUpgrades::default(), Timestamp::from_millis(0)),
            Err(GuildhallError::ActorNotFound(_))
        ));
        assert!(matches!(
            engine.give_praise_at(ghost, Timestamp::from_millis(0)),
            Err(GuildhallError::ActorNotFound(_))
        ));
    }

    #[test]
    fn test_deactivated_actor_cannot_act() {
        let engine = engine();
        let actor = engine.register_actor("Astrid");
        engine.deactivate_actor(actor).unwrap();

        assert!(matches!(
            engine.attack_boss_at(actor, DamageUpgrades::default(), Timestamp::from_millis(0)),
            Err(GuildhallError::ActorInactive(_))
        ));
    }

    #[test]
    fn test_praise_grants_xp_and_level_up_fires_event() {
        let engine = engine();
        let actor = engine.register_actor("Astrid");
        let events = engine.events();

        // 10 praises at 10 XP each crosses the level-2 threshold; the daily
        // quota forces the calendar forward.
        let mut now = Timestamp::from_millis(0);
        let mut granted = 0;
        while granted < 10 {
            match engine.give_praise_at(actor, now) {
                Ok(_) => granted += 1,
                Err(_) => now = now.add_millis(86_400_000),
            }
        }

        let actor_state = engine.actor(actor).unwrap();
        assert_eq!(actor_state.xp, 100);
        assert_eq!(actor_state.level, 2);

        let level_ups: Vec<_> = events
            .try_iter()
            .filter(|e| e.event_type() == EventType::LevelUp)
            .collect();
        assert_eq!(level_ups.len(), 1);
    }

    #[test]
    fn test_duel_moves_gold_with_floor_at_zero() {
        let engine = engine();
        let attacker = engine.register_actor("Astrid");
        let defender = engine.register_actor("Bjorn");

        // Level the attacker to 5 so the duel is a guaranteed win.
        engine.registry.grant_xp(attacker, 400).unwrap();

        let report = engine
            .attack_player_at(attacker, defender, Timestamp::from_millis(0))
            .unwrap();
        assert!(report.outcome.computation.attacker_won);

        // Attacker pockets the purse; the broke defender loses nothing.
        assert_eq!(engine.actor(attacker).unwrap().gold, 100);
        assert_eq!(engine.actor(defender).unwrap().gold, 0);
    }

    #[test]
    fn test_minigame_import_feeds_the_ledger() {
        let engine = engine();
        let actor = engine.register_actor("Astrid");

        let report = engine
            .import_minigame_xp_at(actor, 100, 11, Timestamp::from_millis(0))
            .unwrap();
        // 100 XP * 1.5 bonus = 150.
        assert_eq!(report.receipt.xp_earned, 150);
        assert_eq!(engine.actor(actor).unwrap().xp, 150);
        assert!(report.grant.leveled_up);
    }

    #[test]
    fn test_reset_progress_is_the_sanctioned_xp_decrease() {
        let engine = engine();
        let actor = engine.register_actor("Astrid");
        engine.registry.grant_xp(actor, 999).unwrap();

        engine.reset_actor_progress(actor).unwrap();
        let state = engine.actor(actor).unwrap();
        assert_eq!(state.level, 1);
        assert_eq!(state.xp, 0);
    }
}
