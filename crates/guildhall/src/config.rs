//! # Balance Configuration
//!
//! Operator-tunable balance values, loaded once at startup from TOML.
//! Every field defaults to the compiled balance sheet in
//! `guildhall_shared::constants`, so an empty file is a valid config.
//!
//! Formulas are NOT configurable - damage curves and the XP-per-level
//! divisor are part of the code, like the rest of the rules.

use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

use guildhall_encounter::BossSettings;
use guildhall_shared::constants::{
    BOSS_DEFAULT_DESCRIPTION, BOSS_DEFAULT_NAME, BOSS_GOLD_REWARD, BOSS_LEVEL, BOSS_MAX_HP,
    BOSS_XP_PER_DAMAGE, DUEL_COOLDOWN_MS, MAX_PRAISES_PER_DAY, MIN_HIT_INTERVAL_MS,
    MIN_IMPORT_INTERVAL_MS, XP_PER_PRAISE,
};
use guildhall_shared::Fixed;

/// Errors that can occur while loading configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The file could not be read.
    #[error("cannot read config: {0}")]
    Io(#[from] std::io::Error),

    /// The file is not valid TOML for this schema.
    #[error("cannot parse config: {0}")]
    Parse(#[from] toml::de::Error),

    /// The values parsed but make no sense.
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Boss balance values.
#[derive(Clone, Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BossBalance {
    /// Display name of each incarnation.
    pub name: String,
    /// Flavor text.
    pub description: String,
    /// Full hit point pool.
    pub max_hp: Fixed,
    /// Boss level.
    pub level: u32,
    /// XP granted per point of damage.
    pub xp_per_damage: Fixed,
    /// Gold paid to the slayer.
    pub gold_reward: u64,
    /// Minimum interval between hits per actor (ms).
    pub min_hit_interval_ms: u64,
}

impl Default for BossBalance {
    fn default() -> Self {
        Self {
            name: BOSS_DEFAULT_NAME.to_owned(),
            description: BOSS_DEFAULT_DESCRIPTION.to_owned(),
            max_hp: BOSS_MAX_HP,
            level: BOSS_LEVEL,
            xp_per_damage: BOSS_XP_PER_DAMAGE,
            gold_reward: BOSS_GOLD_REWARD,
            min_hit_interval_ms: MIN_HIT_INTERVAL_MS,
        }
    }
}

impl BossBalance {
    /// The settings fresh boss incarnations are born with.
    #[must_use]
    pub fn settings(&self) -> BossSettings {
        BossSettings {
            name: self.name.clone(),
            description: self.description.clone(),
            max_hp: self.max_hp,
            level: self.level,
            xp_per_damage: self.xp_per_damage,
            gold_reward: self.gold_reward,
        }
    }
}

/// Duel balance values.
#[derive(Clone, Copy, Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DuelBalance {
    /// Cooldown between attacks per actor (ms).
    pub cooldown_ms: u64,
}

impl Default for DuelBalance {
    fn default() -> Self {
        Self {
            cooldown_ms: DUEL_COOLDOWN_MS,
        }
    }
}

/// Praise balance values.
#[derive(Clone, Copy, Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PraiseBalance {
    /// XP per accepted praise.
    pub xp_per_praise: u64,
    /// Daily quota per actor.
    pub max_per_day: u32,
}

impl Default for PraiseBalance {
    fn default() -> Self {
        Self {
            xp_per_praise: XP_PER_PRAISE,
            max_per_day: MAX_PRAISES_PER_DAY,
        }
    }
}

/// Minigame import balance values.
#[derive(Clone, Copy, Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ImportBalance {
    /// Minimum interval between imports per actor (ms).
    pub min_interval_ms: u64,
}

impl Default for ImportBalance {
    fn default() -> Self {
        Self {
            min_interval_ms: MIN_IMPORT_INTERVAL_MS,
        }
    }
}

/// The full balance sheet.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BalanceConfig {
    /// Boss encounter values.
    pub boss: BossBalance,
    /// Duel values.
    pub duel: DuelBalance,
    /// Praise values.
    pub praise: PraiseBalance,
    /// Minigame import values.
    pub import: ImportBalance,
}

impl BalanceConfig {
    /// Parses a TOML string.
    ///
    /// # Errors
    ///
    /// `Parse` for malformed TOML or unknown keys, `Invalid` for values
    /// that parse but make no sense.
    pub fn from_toml_str(input: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(input)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads and parses a TOML file.
    ///
    /// # Errors
    ///
    /// `Io` if the file cannot be read, plus everything
    /// [`Self::from_toml_str`] can return.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let input = std::fs::read_to_string(path)?;
        Self::from_toml_str(&input)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.boss.name.trim().is_empty() {
            return Err(ConfigError::Invalid("boss.name is empty".to_owned()));
        }
        if self.boss.max_hp <= Fixed::ZERO {
            return Err(ConfigError::Invalid(format!(
                "boss.max_hp must be positive, got {}",
                self.boss.max_hp
            )));
        }
        if self.boss.xp_per_damage.is_negative() {
            return Err(ConfigError::Invalid(format!(
                "boss.xp_per_damage must not be negative, got {}",
                self.boss.xp_per_damage
            )));
        }
        if self.praise.max_per_day == 0 {
            return Err(ConfigError::Invalid(
                "praise.max_per_day must be at least 1".to_owned(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_is_the_default_balance() {
        let config = BalanceConfig::from_toml_str("").unwrap();
        assert_eq!(config.boss.max_hp, Fixed::from_whole(1_000_000));
        assert_eq!(config.boss.gold_reward, 10_000);
        assert_eq!(config.duel.cooldown_ms, 30_000);
        assert_eq!(config.praise.max_per_day, 3);
    }

    #[test]
    fn test_partial_override() {
        let config = BalanceConfig::from_toml_str(
            r#"
            [boss]
            name = "Frost Wyrm"
            max_hp = 500000.0

            [duel]
            cooldown_ms = 10000
            "#,
        )
        .unwrap();

        assert_eq!(config.boss.name, "Frost Wyrm");
        assert_eq!(config.boss.max_hp, Fixed::from_whole(500_000));
        // Untouched sections keep their defaults.
        assert_eq!(config.boss.gold_reward, 10_000);
        assert_eq!(config.duel.cooldown_ms, 10_000);
        assert_eq!(config.import.min_interval_ms, 100);
    }

    #[test]
    fn test_unknown_keys_are_rejected() {
        let result = BalanceConfig::from_toml_str(
            r#"
            [boss]
            hitpoints = 5
            "#,
        );
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_nonsense_values_are_rejected() {
        let result = BalanceConfig::from_toml_str(
            r#"
            [boss]
            max_hp = 0.0
            "#,
        );
        assert!(matches!(result, Err(ConfigError::Invalid(_))));

        let result = BalanceConfig::from_toml_str(
            r#"
            [praise]
            max_per_day = 0
            "#,
        );
        assert!(matches!(result, Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_settings_conversion() {
        let config = BalanceConfig::default();
        let settings = config.boss.settings();
        assert_eq!(settings.name, "Ancient Dragon");
        assert_eq!(settings.max_hp, Fixed::from_whole(1_000_000));
    }
}
