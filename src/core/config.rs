//! Battle configuration.
//!
//! Both processes must run with the same `BattleConfig`: the guest uses the
//! status tuning to recompute displayed magnitudes from transmitted stacks.
//!
//! ```
//! use duel_engine::core::BattleConfig;
//!
//! let config = BattleConfig::new(7).with_max_rounds(10);
//! assert_eq!(config.seed, 7);
//! assert_eq!(config.max_rounds, 10);
//!
//! let loaded = BattleConfig::from_json(r#"{ "seed": 3, "status": { "poison_damage_per_stack": 25 } }"#).unwrap();
//! assert_eq!(loaded.status.poison_damage_per_stack, 25);
//! assert_eq!(loaded.status.burn_damage_per_stack, 60);
//! ```

use serde::{Deserialize, Serialize};

use super::error::BattleError;

/// Top-level battle settings.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BattleConfig {
    /// Seed of the host's authoritative RNG stream.
    pub seed: u64,

    /// Base of the casting formula `1 - base^(1 + level)`.
    pub cast_decline_base: f64,

    /// Resist chance contributed by each level of the `Resistance` ability.
    pub resistance_chance_per_level: f64,

    /// Rounds before the battle is declared a draw.
    pub max_rounds: u32,

    /// Status effect magnitudes.
    pub status: StatusTuning,

    /// Spell magnitudes.
    pub spells: SpellTuning,

    /// Cosmetic delays handed to the presenter.
    pub pacing: PacingConfig,
}

/// Per-stack magnitudes of status effects.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StatusTuning {
    pub poison_damage_per_stack: u32,
    pub burn_damage_per_stack: u32,
    pub stoneskin_reduction_per_stack: u32,
}

/// Base magnitudes used by the spell library.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpellTuning {
    pub fireball_base_damage: u32,
    pub fireball_damage_per_level: u32,
    pub storm_damage_per_level: u32,
    pub crash_landing_damage_per_success: u32,
    pub rallying_cry_heal: u32,
}

/// Cosmetic pacing in milliseconds. Never gates state.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PacingConfig {
    pub cast_delay_ms: u64,
    pub attack_delay_ms: u64,
    pub status_delay_ms: u64,
}

impl Default for BattleConfig {
    fn default() -> Self {
        Self {
            seed: 0,
            cast_decline_base: 0.9,
            resistance_chance_per_level: 0.2,
            max_rounds: 50,
            status: StatusTuning::default(),
            spells: SpellTuning::default(),
            pacing: PacingConfig::default(),
        }
    }
}

impl Default for StatusTuning {
    fn default() -> Self {
        Self {
            poison_damage_per_stack: 30,
            burn_damage_per_stack: 60,
            stoneskin_reduction_per_stack: 10,
        }
    }
}

impl Default for SpellTuning {
    fn default() -> Self {
        Self {
            fireball_base_damage: 50,
            fireball_damage_per_level: 20,
            storm_damage_per_level: 30,
            crash_landing_damage_per_success: 40,
            rallying_cry_heal: 50,
        }
    }
}

impl Default for PacingConfig {
    fn default() -> Self {
        Self {
            cast_delay_ms: 600,
            attack_delay_ms: 400,
            status_delay_ms: 250,
        }
    }
}

impl BattleConfig {
    /// Default configuration with the given seed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            ..Self::default()
        }
    }

    /// Load from JSON; missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, BattleError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Check value ranges.
    pub fn validate(&self) -> Result<(), BattleError> {
        if !(0.0..=1.0).contains(&self.cast_decline_base) {
            return Err(BattleError::InvalidConfig(format!(
                "cast_decline_base must be within [0, 1], got {}",
                self.cast_decline_base
            )));
        }
        if !(0.0..=1.0).contains(&self.resistance_chance_per_level) {
            return Err(BattleError::InvalidConfig(format!(
                "resistance_chance_per_level must be within [0, 1], got {}",
                self.resistance_chance_per_level
            )));
        }
        if self.max_rounds == 0 {
            return Err(BattleError::InvalidConfig("max_rounds must be positive".into()));
        }
        Ok(())
    }

    #[must_use]
    pub fn with_max_rounds(mut self, rounds: u32) -> Self {
        self.max_rounds = rounds;
        self
    }

    /// Base of the casting chance. `0.0` makes every roll succeed.
    #[must_use]
    pub fn with_cast_decline_base(mut self, base: f64) -> Self {
        self.cast_decline_base = base;
        self
    }

    #[must_use]
    pub fn with_resistance_chance(mut self, per_level: f64) -> Self {
        self.resistance_chance_per_level = per_level;
        self
    }

    #[must_use]
    pub fn with_status(mut self, status: StatusTuning) -> Self {
        self.status = status;
        self
    }

    #[must_use]
    pub fn with_spells(mut self, spells: SpellTuning) -> Self {
        self.spells = spells;
        self
    }
}
