//! The two halves of a spell module.
//!
//! A spell module implements [`SpellResolver`] (host: decide and commit the
//! outcome) and [`SpellReplicator`] (guest: apply and narrate a received
//! outcome). Nothing on the host path emits messages directly; resolution
//! returns the message body and the session emits it, so each resolved
//! effect produces exactly one message.

use crate::cards::{SpellDefinition, SpellSchool};
use crate::combat::{LandedHit, ResolveContext};
use crate::core::{BattleState, CombatantId, Hero};
use crate::replication::{describe, Mirror, MessageBody, ReplicationMessage, SpellEffect};

/// How a fighting spell's copies turn into trigger rolls.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TriggerRule {
    /// One roll per copy in the spellbook.
    PerCopy,
    /// One roll if any copy is present.
    Presence,
}

/// Host-side behavior of a spell.
pub trait SpellResolver: Send + Sync {
    /// Registered spell name.
    fn name(&self) -> &'static str;

    /// School whose mastery drives the casting chance.
    fn school(&self) -> SpellSchool;

    /// Extra casting precondition beyond the generic filters.
    fn can_cast(&self, _state: &BattleState, _caster: &Hero) -> bool {
        true
    }

    /// Roll rule for fighting spells.
    fn trigger_rule(&self) -> TriggerRule {
        TriggerRule::PerCopy
    }

    /// Chance override for fighting triggers. `None` uses the level-based
    /// casting chance.
    fn trigger_chance(&self, _state: &BattleState, _hit: &LandedHit) -> Option<f64> {
        None
    }

    /// Resolve a cast. Returns the message describing the outcome.
    fn resolve(&self, _ctx: &mut ResolveContext<'_>, caster: CombatantId, spell: &SpellDefinition) -> MessageBody {
        SpellEffect::fizzle(spell.name.clone(), caster).into()
    }

    /// Resolve a fighting trigger after a landed hit.
    fn resolve_trigger(
        &self,
        _ctx: &mut ResolveContext<'_>,
        hit: &LandedHit,
        _successes: u32,
    ) -> MessageBody {
        SpellEffect::fizzle(self.name(), hit.attacker).into()
    }

    /// Arm a trap before combat. `None` for non-trap spells.
    fn arm_trap(&self, _ctx: &mut ResolveContext<'_>, _owner: CombatantId, _copies: u32) -> Option<MessageBody> {
        None
    }
}

/// Guest-side behavior of a spell.
pub trait SpellReplicator: Send + Sync {
    /// Apply a received outcome to the mirror. The default applies the
    /// carried state changes; modules never re-roll.
    fn apply(&self, state: &mut BattleState, message: &ReplicationMessage) {
        Mirror::apply_changes(state, message.body.changes(), message.turn);
    }

    /// Log line for a received outcome, from the reader's perspective.
    fn describe(&self, state: &BattleState, body: &MessageBody) -> String {
        describe::describe(state, body)
    }
}
