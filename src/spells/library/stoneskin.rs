use crate::cards::{SpellDefinition, SpellSchool};
use crate::combat::ResolveContext;
use crate::core::{BattleState, CombatantId};
use crate::replication::describe::{describe, label};
use crate::replication::{MessageBody, StoneskinApplied};
use crate::spells::contract::{SpellReplicator, SpellResolver};
use crate::status::StatusKind;

/// Permanent damage reduction on the caster.
pub struct Stoneskin;

impl Stoneskin {
    pub const NAME: &'static str = "Stoneskin";

    #[must_use]
    pub fn stacks(support_level: u32) -> u32 {
        support_level.saturating_add(1)
    }
}

impl SpellResolver for Stoneskin {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn school(&self) -> SpellSchool {
        SpellSchool::SupportMagic
    }

    fn resolve(&self, ctx: &mut ResolveContext<'_>, caster: CombatantId, _spell: &SpellDefinition) -> MessageBody {
        let stacks = Self::stacks(ctx.school_level(&caster, SpellSchool::SupportMagic));
        ctx.apply_status_from_cast(&caster, StatusKind::Stoneskin, stacks);

        MessageBody::StoneskinApplied(StoneskinApplied {
            caster,
            stacks,
            changes: ctx.take_changes(),
        })
    }
}

impl SpellReplicator for Stoneskin {
    fn describe(&self, state: &BattleState, body: &MessageBody) -> String {
        match body {
            MessageBody::StoneskinApplied(m) => {
                format!("{} hardens: +{} stoneskin", label(state, &m.caster), m.stacks)
            }
            other => describe(state, other),
        }
    }
}
