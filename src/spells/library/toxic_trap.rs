use crate::cards::SpellSchool;
use crate::combat::ResolveContext;
use crate::core::{BattleState, CombatantId};
use crate::replication::describe::{describe, label};
use crate::replication::{MessageBody, TrapArmed};
use crate::spells::contract::{SpellReplicator, SpellResolver};
use crate::status::ToxicTrap as TrapRule;

/// Trap spell: armed on its owner before combat, one stack per copy.
///
/// Springing the trap is part of attack resolution; this module arms it
/// and narrates both messages.
pub struct ToxicTrap;

impl ToxicTrap {
    pub const NAME: &'static str = "ToxicTrap";
}

impl SpellResolver for ToxicTrap {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn school(&self) -> SpellSchool {
        SpellSchool::DecayMagic
    }

    fn arm_trap(&self, ctx: &mut ResolveContext<'_>, owner: CombatantId, copies: u32) -> Option<MessageBody> {
        if !ctx.apply_status_from_cast(&owner, TrapRule::STATUS, copies) {
            return None;
        }
        Some(MessageBody::TrapArmed(TrapArmed {
            owner,
            spell_name: Self::NAME.to_string(),
            stacks: copies,
            changes: ctx.take_changes(),
        }))
    }
}

impl SpellReplicator for ToxicTrap {
    fn describe(&self, state: &BattleState, body: &MessageBody) -> String {
        match body {
            MessageBody::TrapArmed(m) => {
                format!("{} sets {} toxic trap(s)", label(state, &m.owner), m.stacks)
            }
            MessageBody::ToxicTrapApplied(m) => format!(
                "{} walks into {}'s toxic trap: {} poison",
                label(state, &m.attacker),
                label(state, &m.defender),
                TrapRule::poison_stacks(m.trap_stacks, m.decay_level)
            ),
            other => describe(state, other),
        }
    }
}
