//! Per-turn casting decision.
//!
//! ## Phases
//!
//! `Idle -> SelectingCandidates -> RollingChance -> {AttackResolved | AbilityResolved}`
//!
//! 1. Gather the hero's spellbook, dropping traps and fighting spells. A
//!    spell held in several copies is one candidate.
//! 2. Keep spells whose module accepts `can_cast` this turn.
//! 3. Sort by level descending; shuffle each equal-level group with the
//!    battle RNG.
//! 4. Roll each candidate in order against `casting_chance`; the first
//!    success is cast. No success means a normal attack.
//!
//! Every step draws from the same RNG stream in a fixed order, so a replay
//! with the same seed makes the same decisions.

use smallvec::SmallVec;
use tracing::{debug, trace};

use super::registry::SpellRegistry;
use crate::cards::SpellDefinition;
use crate::core::{BattleState, CombatantId, GameRng};
use crate::status::StatusEffectEngine;

/// Chance to cast (or trigger) at a given mastery level:
/// `1 - base^(1 + level)`, rounded to 6 decimals.
///
/// ```
/// use duel_engine::spells::casting_chance;
///
/// assert_eq!(casting_chance(0, 0.9), 0.1);
/// assert_eq!(casting_chance(2, 0.9), 0.271);
/// ```
#[must_use]
pub fn casting_chance(level: u32, decline_base: f64) -> f64 {
    let exponent = i32::try_from(level).unwrap_or(i32::MAX).saturating_add(1);
    let raw = 1.0 - decline_base.powi(exponent);
    (raw * 1_000_000.0).round() / 1_000_000.0
}

/// One Bernoulli trial: draws exactly one value.
pub fn roll(rng: &mut GameRng, chance: f64) -> bool {
    let value = rng.random();
    chance > 0.0 && value <= chance
}

/// Where the pipeline is in the current turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CastPhase {
    Idle,
    SelectingCandidates,
    RollingChance,
    AttackResolved,
    AbilityResolved,
}

/// What the hero does this turn.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CastDecision {
    Cast(SpellDefinition),
    Attack,
}

pub type Candidates = SmallVec<[SpellDefinition; 4]>;

/// Runs the casting decision for one hero turn.
pub struct CastingPipeline<'r> {
    registry: &'r SpellRegistry,
    phase: CastPhase,
}

impl<'r> CastingPipeline<'r> {
    #[must_use]
    pub fn new(registry: &'r SpellRegistry) -> Self {
        Self {
            registry,
            phase: CastPhase::Idle,
        }
    }

    #[must_use]
    pub fn phase(&self) -> CastPhase {
        self.phase
    }

    /// Steps 1 and 2: castable spells, in spellbook order.
    pub fn candidates(&mut self, state: &BattleState, caster: &CombatantId) -> Candidates {
        self.phase = CastPhase::SelectingCandidates;
        let mut out = Candidates::new();
        let Some(hero) = state.owner_of(caster) else {
            return out;
        };
        if !hero.is_alive() || !StatusEffectEngine::can_cast_spells(&hero.base) {
            return out;
        }

        for spell in hero.spellbook.iter().filter(|s| s.is_castable()) {
            if out.iter().any(|c| c.name == spell.name) {
                continue;
            }
            let Some(module) = self.registry.resolver(&spell.name) else {
                debug!(spell = %spell.name, "no module registered, skipping");
                continue;
            };
            if module.can_cast(state, hero) {
                out.push(spell.clone());
            }
        }
        out
    }

    /// Step 3: level descending, equal levels shuffled.
    pub fn order(&mut self, rng: &mut GameRng, candidates: &mut Candidates) {
        candidates.sort_by(|a, b| b.level.cmp(&a.level));
        let mut start = 0;
        while start < candidates.len() {
            let level = candidates[start].level;
            let end = candidates[start..]
                .iter()
                .position(|c| c.level != level)
                .map_or(candidates.len(), |n| start + n);
            rng.shuffle(&mut candidates[start..end]);
            start = end;
        }
    }

    /// Full decision for `caster`.
    pub fn select(
        &mut self,
        state: &BattleState,
        rng: &mut GameRng,
        decline_base: f64,
        caster: &CombatantId,
    ) -> CastDecision {
        let mut candidates = self.candidates(state, caster);
        self.order(rng, &mut candidates);

        self.phase = CastPhase::RollingChance;
        for spell in candidates {
            let level = state.owner_of(caster).map_or(0, |h| h.school_level(spell.school));
            let chance = casting_chance(level, decline_base);
            let success = roll(rng, chance);
            trace!(spell = %spell.name, level, chance, success, "cast roll");
            if success {
                self.phase = CastPhase::AbilityResolved;
                return CastDecision::Cast(spell);
            }
        }

        self.phase = CastPhase::AttackResolved;
        CastDecision::Attack
    }
}
