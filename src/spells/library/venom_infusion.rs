use super::enemies_of;
use crate::cards::{SpellDefinition, SpellSchool};
use crate::combat::ResolveContext;
use crate::core::{BattleState, CombatantId, Hero};
use crate::replication::{EffectType, MessageBody, SpellEffect};
use crate::spells::contract::{SpellReplicator, SpellResolver};
use crate::status::{StatusEffectEngine, StatusKind};

/// Deepens poison on every already-poisoned enemy.
pub struct VenomInfusion;

impl VenomInfusion {
    pub const NAME: &'static str = "VenomInfusion";

    #[must_use]
    pub fn extra_stacks(decay_level: u32) -> u32 {
        1 + decay_level / 2
    }

    fn poisoned_enemies(state: &BattleState, caster: &CombatantId) -> crate::targeting::TargetList {
        enemies_of(state, caster)
            .into_iter()
            .filter(|t| {
                state
                    .combatant(&t.id)
                    .is_some_and(|c| StatusEffectEngine::has(c, StatusKind::Poisoned))
            })
            .collect()
    }
}

impl SpellResolver for VenomInfusion {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn school(&self) -> SpellSchool {
        SpellSchool::DecayMagic
    }

    /// Needs at least one poisoned enemy.
    fn can_cast(&self, state: &BattleState, caster: &Hero) -> bool {
        !Self::poisoned_enemies(state, &caster.id()).is_empty()
    }

    fn resolve(&self, ctx: &mut ResolveContext<'_>, caster: CombatantId, _spell: &SpellDefinition) -> MessageBody {
        let targets = Self::poisoned_enemies(ctx.state, &caster);
        if targets.is_empty() {
            return SpellEffect::fizzle(Self::NAME, caster).into();
        }
        let level = ctx.school_level(&caster, SpellSchool::DecayMagic);

        let mut resisted = Vec::new();
        for target in &targets {
            if ctx.resists_area(target, Self::NAME, &caster) {
                resisted.push(target.id);
            } else {
                ctx.apply_status(&target.id, StatusKind::Poisoned, Self::extra_stacks(level));
            }
        }

        SpellEffect::new(Self::NAME, caster, EffectType::PoisonSpread)
            .with_resisted_targets(resisted)
            .with_level(level)
            .with_changes(ctx.take_changes())
            .into()
    }
}

impl SpellReplicator for VenomInfusion {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{AbsoluteSide, Position};
    use crate::spells::library::fixture::{board, caster, with_ctx};

    #[test]
    fn test_requires_poisoned_enemy() {
        let mut state = board(SpellSchool::DecayMagic, 0);
        let ida = state.hero(AbsoluteSide::Host, Position::Left).unwrap().clone();
        assert!(!VenomInfusion.can_cast(&state, &ida));

        let rook = CombatantId::hero(AbsoluteSide::Guest, Position::Right);
        StatusEffectEngine::apply(state.combatant_mut(&rook).unwrap(), StatusKind::Poisoned, 1, 0);
        assert!(VenomInfusion.can_cast(&state, &ida));
    }

    #[test]
    fn test_only_poisoned_targets_grow() {
        let mut state = board(SpellSchool::DecayMagic, 0);
        let rook = CombatantId::hero(AbsoluteSide::Guest, Position::Right);
        StatusEffectEngine::apply(state.combatant_mut(&rook).unwrap(), StatusKind::Poisoned, 2, 0);

        let spell = SpellDefinition::new(VenomInfusion::NAME, 1, SpellSchool::DecayMagic);
        let body = with_ctx(&mut state, |ctx| VenomInfusion.resolve(ctx, caster(), &spell));

        assert_eq!(body.changes().len(), 1);
        assert_eq!(*body.changes()[0].target(), rook);
        assert_eq!(
            StatusEffectEngine::stacks(state.combatant(&rook).unwrap(), StatusKind::Poisoned),
            3
        );
    }
}
