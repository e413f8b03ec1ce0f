//! Post-attack fighting triggers.
//!
//! After a hero's normal attack lands, each distinct fighting spell in its
//! spellbook rolls, in spellbook order. The module's [`TriggerRule`] picks
//! the number of trials: one per copy, or one for presence. Successes are
//! counted and the module resolves once with the total.

use smallvec::SmallVec;
use tracing::{info, warn};

use super::contract::TriggerRule;
use super::pipeline::{casting_chance, roll};
use super::registry::SpellRegistry;
use crate::cards::{SpellDefinition, SpellSchool};
use crate::combat::LandedHit;
use crate::core::{BattleState, GameRng};

/// Aggregate result of one fighting spell's trials.
#[derive(Clone, Debug, PartialEq)]
pub struct TriggerRoll {
    pub spell: SpellDefinition,
    pub copies: u32,
    pub rule: TriggerRule,
    pub chance: f64,
    pub successes: u32,
}

impl TriggerRoll {
    #[must_use]
    pub fn triggered(&self) -> bool {
        self.successes > 0
    }
}

/// Rolls fighting triggers for a landed hit.
pub struct FightingTriggers;

impl FightingTriggers {
    /// Fighting spells of the attacker grouped by name, in first-seen order.
    #[must_use]
    pub fn grouped(state: &BattleState, hit: &LandedHit) -> SmallVec<[(SpellDefinition, u32); 2]> {
        let mut groups: SmallVec<[(SpellDefinition, u32); 2]> = SmallVec::new();
        // Creatures carry no spellbook.
        if !hit.attacker.is_hero() {
            return groups;
        }
        let Some(hero) = state.owner_of(&hit.attacker) else {
            return groups;
        };
        for spell in hero.spellbook.iter().filter(|s| s.is_fighting()) {
            match groups.iter_mut().find(|(s, _)| s.name == spell.name) {
                Some((_, copies)) => *copies += 1,
                None => groups.push((spell.clone(), 1)),
            }
        }
        groups
    }

    /// Roll every fighting spell of the attacker.
    pub fn roll(
        state: &BattleState,
        rng: &mut GameRng,
        registry: &SpellRegistry,
        decline_base: f64,
        hit: &LandedHit,
    ) -> SmallVec<[TriggerRoll; 2]> {
        let level = state
            .owner_of(&hit.attacker)
            .map_or(0, |h| h.school_level(SpellSchool::Fighting));

        let mut rolls = SmallVec::new();
        for (spell, copies) in Self::grouped(state, hit) {
            let Some(module) = registry.resolver(&spell.name) else {
                warn!(spell = %spell.name, "fighting spell has no module");
                continue;
            };
            let rule = module.trigger_rule();
            let chance = module
                .trigger_chance(state, hit)
                .unwrap_or_else(|| casting_chance(level, decline_base));
            let trials = match rule {
                TriggerRule::PerCopy => copies,
                TriggerRule::Presence => 1,
            };
            let successes = (0..trials).filter(|_| roll(rng, chance)).count() as u32;
            info!(attacker = %hit.attacker, "{copies} {} spells, {successes} successes", spell.name);

            rolls.push(TriggerRoll {
                spell,
                copies,
                rule,
                chance,
                successes,
            });
        }
        rolls
    }
}
