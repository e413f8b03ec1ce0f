use crate::cards::SpellSchool;
use crate::combat::{LandedHit, ResolveContext};
use crate::core::BattleState;
use crate::replication::{EffectType, MessageBody, SpellEffect};
use crate::spells::contract::{SpellReplicator, SpellResolver, TriggerRule};

/// Fighting trigger: after killing a creature, heal by the damage dealt.
///
/// Copies do not stack; one roll if any copy is held.
pub struct Bloodthirst;

impl Bloodthirst {
    pub const NAME: &'static str = "Bloodthirst";
}

impl SpellResolver for Bloodthirst {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn school(&self) -> SpellSchool {
        SpellSchool::Fighting
    }

    fn trigger_rule(&self) -> TriggerRule {
        TriggerRule::Presence
    }

    fn trigger_chance(&self, _state: &BattleState, hit: &LandedHit) -> Option<f64> {
        Some(if hit.target.is_creature() && hit.target_died {
            1.0
        } else {
            0.0
        })
    }

    fn resolve_trigger(&self, ctx: &mut ResolveContext<'_>, hit: &LandedHit, successes: u32) -> MessageBody {
        let level = ctx.school_level(&hit.attacker, SpellSchool::Fighting);
        ctx.heal(&hit.attacker, hit.damage);

        SpellEffect::new(Self::NAME, hit.attacker, EffectType::Lifesteal)
            .with_target(hit.target.id)
            .with_level(level)
            .with_successes(successes)
            .with_changes(ctx.take_changes())
            .into()
    }
}

impl SpellReplicator for Bloodthirst {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{AbsoluteSide, CombatantId, Position};
    use crate::spells::library::fixture::{board, caster, with_ctx};
    use crate::targeting::TargetDescriptor;

    #[test]
    fn test_heals_attacker() {
        let mut state = board(SpellSchool::Fighting, 0);
        state.combatant_mut(&caster()).unwrap().set_hp(200);
        let imp = CombatantId::creature(AbsoluteSide::Guest, Position::Left, 0);
        let hit = LandedHit {
            attacker: caster(),
            target: TargetDescriptor::for_id(&state, imp).unwrap(),
            damage: 40,
            target_died: true,
        };
        assert_eq!(Bloodthirst.trigger_chance(&state, &hit), Some(1.0));

        with_ctx(&mut state, |ctx| Bloodthirst.resolve_trigger(ctx, &hit, 1));
        assert_eq!(state.combatant(&caster()).unwrap().current_hp, 240);
    }
}
