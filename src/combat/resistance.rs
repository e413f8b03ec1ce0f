//! Spell resistance.
//!
//! Resistance is decided once, on the host, and transmitted as a flag. The
//! check may consume host RNG; guests never call it.

use crate::core::{BattleState, CombatantId, GameRng};
use crate::targeting::TargetDescriptor;

/// Ability name whose level gives a hero resistance.
pub const RESISTANCE_ABILITY: &str = "Resistance";

/// Decides whether a target shrugs off a spell.
pub trait ResistanceCheck: Send + Sync {
    /// Single-target spell resistance.
    fn should_resist_spell(
        &self,
        state: &BattleState,
        rng: &mut GameRng,
        target: &CombatantId,
        spell: &str,
        caster: &CombatantId,
    ) -> bool;

    /// Area spell resistance, checked once per target.
    fn should_resist_area_spell(
        &self,
        state: &BattleState,
        rng: &mut GameRng,
        target: &TargetDescriptor,
        spell: &str,
        caster: &CombatantId,
    ) -> bool {
        self.should_resist_spell(state, rng, &target.id, spell, caster)
    }
}

/// Heroes with the `Resistance` ability resist with chance
/// `min(1, level * per_level)`. Creatures never resist and draw nothing.
#[derive(Clone, Copy, Debug)]
pub struct StandardResistance {
    pub chance_per_level: f64,
}

impl StandardResistance {
    #[must_use]
    pub fn new(chance_per_level: f64) -> Self {
        Self { chance_per_level }
    }

    /// Resist chance for a hero at `level`.
    #[must_use]
    pub fn chance(&self, level: u32) -> f64 {
        (f64::from(level) * self.chance_per_level).clamp(0.0, 1.0)
    }
}

impl Default for StandardResistance {
    fn default() -> Self {
        Self::new(0.2)
    }
}

impl ResistanceCheck for StandardResistance {
    fn should_resist_spell(
        &self,
        state: &BattleState,
        rng: &mut GameRng,
        target: &CombatantId,
        _spell: &str,
        _caster: &CombatantId,
    ) -> bool {
        if !target.is_hero() {
            return false;
        }
        let Some(hero) = state.owner_of(target) else {
            return false;
        };
        let level = hero.ability_level(RESISTANCE_ABILITY);
        if level == 0 {
            return false;
        }
        rng.random() < self.chance(level)
    }
}

/// Never resists. Useful for previews and tests.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoResistance;

impl ResistanceCheck for NoResistance {
    fn should_resist_spell(
        &self,
        _state: &BattleState,
        _rng: &mut GameRng,
        _target: &CombatantId,
        _spell: &str,
        _caster: &CombatantId,
    ) -> bool {
        false
    }
}
