use super::enemies_of;
use crate::cards::{SpellDefinition, SpellSchool};
use crate::combat::{DamageSource, ResolveContext};
use crate::core::{BattleState, CombatantId, Hero, SpellTuning};
use crate::replication::describe::{describe, label, summarize_changes};
use crate::replication::{GatheringStormDamage, MessageBody};
use crate::spells::contract::{SpellReplicator, SpellResolver};

/// Damages every enemy. Each target checks resistance on its own.
pub struct GatheringStorm;

impl GatheringStorm {
    pub const NAME: &'static str = "GatheringStorm";

    #[must_use]
    pub fn damage(destruction_level: u32, tuning: &SpellTuning) -> u32 {
        tuning
            .storm_damage_per_level
            .saturating_mul(destruction_level.saturating_add(1))
    }
}

impl SpellResolver for GatheringStorm {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn school(&self) -> SpellSchool {
        SpellSchool::DestructionMagic
    }

    fn can_cast(&self, state: &BattleState, caster: &Hero) -> bool {
        !enemies_of(state, &caster.id()).is_empty()
    }

    fn resolve(&self, ctx: &mut ResolveContext<'_>, caster: CombatantId, _spell: &SpellDefinition) -> MessageBody {
        let level = ctx.school_level(&caster, SpellSchool::DestructionMagic);
        let damage = Self::damage(level, ctx.tuning());
        let source = DamageSource::Spell {
            caster,
            spell: Self::NAME.to_string(),
        };

        let mut resisted = Vec::new();
        for target in enemies_of(ctx.state, &caster) {
            if ctx.resists_area(&target, Self::NAME, &caster) {
                resisted.push(target.id);
            } else {
                ctx.deal_damage(&target.id, damage, &source);
            }
        }

        MessageBody::GatheringStormDamage(GatheringStormDamage {
            caster,
            damage_per_target: damage,
            resisted_targets: resisted,
            changes: ctx.take_changes(),
        })
    }
}

impl SpellReplicator for GatheringStorm {
    fn describe(&self, state: &BattleState, body: &MessageBody) -> String {
        let MessageBody::GatheringStormDamage(storm) = body else {
            return describe(state, body);
        };
        let mut line = format!(
            "{} unleashes a storm for {} each",
            label(state, &storm.caster),
            storm.damage_per_target
        );
        if !storm.changes.is_empty() {
            line.push_str(&format!(": {}", summarize_changes(state, &storm.changes)));
        }
        if !storm.resisted_targets.is_empty() {
            line.push_str(&format!(" ({} resisted)", storm.resisted_targets.len()));
        }
        line
    }
}
