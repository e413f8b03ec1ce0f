//! Defensive trigger statuses.
//!
//! A toxic trap sits on a defender and intercepts the next attack against it
//! before damage is applied: the attacker is poisoned instead and the attack
//! deals no damage. The decision and the substitution happen together in
//! `combat::attack`; this module holds the rule itself.

use super::engine::StatusEffectEngine;
use super::kind::StatusKind;
use crate::cards::SpellSchool;
use crate::core::Combatant;

/// Rules of the `toxicTrap` status.
pub struct ToxicTrap;

impl ToxicTrap {
    pub const STATUS: StatusKind = StatusKind::ToxicTrap;

    /// Ability whose level scales the poison payload.
    pub const RELATED_SCHOOL: SpellSchool = SpellSchool::DecayMagic;

    /// The trap fires when the defender holds a stack and the attacker can
    /// still be poisoned.
    #[must_use]
    pub fn should_trigger(attacker: &Combatant, defender: &Combatant) -> bool {
        attacker.alive && StatusEffectEngine::has(defender, Self::STATUS)
    }

    /// Poison stacks delivered to the attacker.
    #[must_use]
    pub fn poison_stacks(trap_stacks: u32, related_level: u32) -> u32 {
        trap_stacks.saturating_mul(1 + related_level / 2)
    }
}
