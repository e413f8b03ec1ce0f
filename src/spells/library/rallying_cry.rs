use super::allies_of;
use crate::cards::{SpellDefinition, SpellSchool};
use crate::combat::ResolveContext;
use crate::core::{BattleState, CombatantId, Hero};
use crate::replication::{EffectType, MessageBody, SpellEffect};
use crate::spells::contract::{SpellReplicator, SpellResolver};

/// Heals every living allied creature.
pub struct RallyingCry;

impl RallyingCry {
    pub const NAME: &'static str = "RallyingCry";
}

impl SpellResolver for RallyingCry {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn school(&self) -> SpellSchool {
        SpellSchool::SupportMagic
    }

    /// Needs at least one living ally creature.
    fn can_cast(&self, state: &BattleState, caster: &Hero) -> bool {
        state
            .heroes_of(caster.absolute_side)
            .any(Hero::has_living_creatures)
    }

    fn resolve(&self, ctx: &mut ResolveContext<'_>, caster: CombatantId, _spell: &SpellDefinition) -> MessageBody {
        let amount = ctx.tuning().rallying_cry_heal;
        let creatures: Vec<_> = allies_of(ctx.state, &caster)
            .into_iter()
            .filter(|t| t.is_creature())
            .collect();
        if creatures.is_empty() {
            return SpellEffect::fizzle(Self::NAME, caster).into();
        }
        for creature in &creatures {
            ctx.heal(&creature.id, amount);
        }

        SpellEffect::new(Self::NAME, caster, EffectType::Heal)
            .with_changes(ctx.take_changes())
            .into()
    }
}

impl SpellReplicator for RallyingCry {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::SpellSchool;
    use crate::core::{AbsoluteSide, Position};
    use crate::replication::StateChange;
    use crate::spells::library::fixture::{board, caster, with_ctx};

    #[test]
    fn test_heals_only_creatures() {
        let mut state = board(SpellSchool::SupportMagic, 0);
        let wolf = CombatantId::creature(AbsoluteSide::Host, Position::Left, 0);
        state.combatant_mut(&wolf).unwrap().set_hp(10);
        state.combatant_mut(&caster()).unwrap().set_hp(100);

        let spell = SpellDefinition::new(RallyingCry::NAME, 1, SpellSchool::SupportMagic);
        let body = with_ctx(&mut state, |ctx| RallyingCry.resolve(ctx, caster(), &spell));

        assert_eq!(
            body.changes(),
            &[StateChange::Heal {
                target: wolf,
                amount: 50,
                new_hp: 60
            }]
        );
        assert_eq!(state.combatant(&caster()).unwrap().current_hp, 100);
    }

    #[test]
    fn test_needs_living_creature() {
        let mut state = board(SpellSchool::SupportMagic, 0);
        let wolf = CombatantId::creature(AbsoluteSide::Host, Position::Left, 0);
        state.combatant_mut(&wolf).unwrap().set_hp(0);
        let ida = state.hero(AbsoluteSide::Host, Position::Left).unwrap().clone();
        assert!(!RallyingCry.can_cast(&state, &ida));
    }
}
