use super::enemies_of;
use crate::cards::{SpellDefinition, SpellSchool};
use crate::combat::ResolveContext;
use crate::core::{BattleState, CombatantId, Hero};
use crate::replication::{EffectType, MessageBody, SpellEffect};
use crate::spells::contract::{SpellReplicator, SpellResolver};
use crate::status::StatusKind;

/// Poisons every enemy. Each target checks resistance on its own.
pub struct PoisonPollen;

impl PoisonPollen {
    pub const NAME: &'static str = "PoisonPollen";

    #[must_use]
    pub fn poison_stacks(decay_level: u32) -> u32 {
        1 + decay_level / 2
    }
}

impl SpellResolver for PoisonPollen {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn school(&self) -> SpellSchool {
        SpellSchool::DecayMagic
    }

    fn can_cast(&self, state: &BattleState, caster: &Hero) -> bool {
        !enemies_of(state, &caster.id()).is_empty()
    }

    fn resolve(&self, ctx: &mut ResolveContext<'_>, caster: CombatantId, _spell: &SpellDefinition) -> MessageBody {
        let targets = enemies_of(ctx.state, &caster);
        if targets.is_empty() {
            return SpellEffect::fizzle(Self::NAME, caster).into();
        }
        let level = ctx.school_level(&caster, SpellSchool::DecayMagic);
        let stacks = Self::poison_stacks(level);

        let mut resisted = Vec::new();
        for target in &targets {
            if ctx.resists_area(target, Self::NAME, &caster) {
                resisted.push(target.id);
            } else {
                ctx.apply_status(&target.id, StatusKind::Poisoned, stacks);
            }
        }

        SpellEffect::new(Self::NAME, caster, EffectType::Poison)
            .with_resisted_targets(resisted)
            .with_level(level)
            .with_changes(ctx.take_changes())
            .into()
    }
}

impl SpellReplicator for PoisonPollen {}
