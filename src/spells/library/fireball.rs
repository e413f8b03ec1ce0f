use crate::cards::{SpellDefinition, SpellSchool};
use crate::combat::{DamageSource, ResolveContext};
use crate::core::{BattleState, CombatantId, Hero, SpellTuning};
use crate::replication::{EffectType, MessageBody, SpellEffect};
use crate::spells::contract::{SpellReplicator, SpellResolver};
use crate::status::StatusKind;
use crate::targeting::TargetResolver;

/// Ranged single-target damage plus one burn stack: flies over creatures
/// straight at the enemy hero.
pub struct Fireball;

impl Fireball {
    pub const NAME: &'static str = "Fireball";

    #[must_use]
    pub fn damage(destruction_level: u32, tuning: &SpellTuning) -> u32 {
        tuning
            .fireball_base_damage
            .saturating_add(tuning.fireball_damage_per_level.saturating_mul(destruction_level))
    }
}

impl SpellResolver for Fireball {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn school(&self) -> SpellSchool {
        SpellSchool::DestructionMagic
    }

    fn can_cast(&self, state: &BattleState, caster: &Hero) -> bool {
        TargetResolver::find_target_for(state, &caster.id(), false).is_some()
    }

    fn resolve(&self, ctx: &mut ResolveContext<'_>, caster: CombatantId, _spell: &SpellDefinition) -> MessageBody {
        let Some(target) = TargetResolver::find_target_for(ctx.state, &caster, false) else {
            return SpellEffect::fizzle(Self::NAME, caster).into();
        };
        let level = ctx.school_level(&caster, SpellSchool::DestructionMagic);
        let resisted = ctx.resists(&target.id, Self::NAME, &caster);
        if !resisted {
            let amount = Self::damage(level, ctx.tuning());
            let source = DamageSource::Spell {
                caster,
                spell: Self::NAME.to_string(),
            };
            ctx.deal_damage(&target.id, amount, &source);
            ctx.apply_status(&target.id, StatusKind::Burned, 1);
        }

        SpellEffect::new(Self::NAME, caster, EffectType::Burn)
            .with_target(target.id)
            .resisted(resisted)
            .with_level(level)
            .with_changes(ctx.take_changes())
            .into()
    }
}

impl SpellReplicator for Fireball {}
