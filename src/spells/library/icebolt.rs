use crate::cards::{SpellDefinition, SpellSchool};
use crate::combat::ResolveContext;
use crate::core::{BattleState, CombatantId, Hero};
use crate::replication::describe::{describe, label};
use crate::replication::{EffectType, MessageBody, SpellEffect};
use crate::spells::contract::{SpellReplicator, SpellResolver};
use crate::status::StatusKind;
use crate::targeting::TargetResolver;

/// Freezes a single target. Creatures shield their hero.
pub struct Icebolt;

impl Icebolt {
    pub const NAME: &'static str = "Icebolt";

    /// Frozen stacks at a given decay mastery.
    #[must_use]
    pub fn frozen_stacks(decay_level: u32) -> u32 {
        1 + decay_level / 2
    }
}

impl SpellResolver for Icebolt {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn school(&self) -> SpellSchool {
        SpellSchool::DecayMagic
    }

    fn can_cast(&self, state: &BattleState, caster: &Hero) -> bool {
        TargetResolver::find_target_for(state, &caster.id(), true).is_some()
    }

    fn resolve(&self, ctx: &mut ResolveContext<'_>, caster: CombatantId, _spell: &SpellDefinition) -> MessageBody {
        let Some(target) = TargetResolver::find_target_for(ctx.state, &caster, true) else {
            return SpellEffect::fizzle(Self::NAME, caster).into();
        };
        let level = ctx.school_level(&caster, SpellSchool::DecayMagic);
        let resisted = ctx.resists(&target.id, Self::NAME, &caster);
        if !resisted {
            ctx.apply_status(&target.id, StatusKind::Frozen, Self::frozen_stacks(level));
        }

        SpellEffect::new(Self::NAME, caster, EffectType::Freeze)
            .with_target(target.id)
            .resisted(resisted)
            .with_level(level)
            .with_changes(ctx.take_changes())
            .into()
    }
}

impl SpellReplicator for Icebolt {
    fn describe(&self, state: &BattleState, body: &MessageBody) -> String {
        let MessageBody::SpellEffect(effect) = body else {
            return describe(state, body);
        };
        let Some(target) = &effect.target else {
            return describe(state, body);
        };
        if effect.is_resisted {
            return format!("{} resists Icebolt", label(state, target));
        }
        format!(
            "{} freezes {} ({} frozen)",
            label(state, &effect.caster),
            label(state, target),
            Self::frozen_stacks(effect.ability_level)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spells::library::fixture::{board, caster, with_ctx};
    use crate::status::StatusEffectEngine;

    #[test]
    fn test_freezes_frontmost_creature() {
        let mut state = board(SpellSchool::DecayMagic, 2);
        let spell = SpellDefinition::new(Icebolt::NAME, 1, SpellSchool::DecayMagic);
        let body = with_ctx(&mut state, |ctx| Icebolt.resolve(ctx, caster(), &spell));

        let MessageBody::SpellEffect(effect) = &body else {
            panic!("expected spell_effect");
        };
        let imp = CombatantId::creature(crate::core::AbsoluteSide::Guest, crate::core::Position::Left, 0);
        assert_eq!(effect.target, Some(imp));
        assert_eq!(effect.ability_level, 2);
        assert_eq!(
            StatusEffectEngine::stacks(state.combatant(&imp).unwrap(), StatusKind::Frozen),
            2
        );
        assert!(Icebolt.describe(&state, &body).contains("(2 frozen)"));
    }

    #[test]
    fn test_stack_formula() {
        assert_eq!(Icebolt::frozen_stacks(0), 1);
        assert_eq!(Icebolt::frozen_stacks(1), 1);
        assert_eq!(Icebolt::frozen_stacks(3), 2);
    }
}
