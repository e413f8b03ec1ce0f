//! Normal attack resolution.
//!
//! An attack picks its target with creatures included. If the defender holds
//! toxic trap stacks and the attacker is alive, the trap replaces the attack
//! entirely: trap stacks are consumed, the attacker is poisoned, no damage is
//! dealt, and no fighting triggers follow. Otherwise stoneskin absorbs part
//! of the hit and the rest is applied as damage.

use tracing::{debug, info};

use super::context::ResolveContext;
use super::damage::DamageSource;
use crate::core::CombatantId;
use crate::replication::{AttackLanded, MessageBody, ToxicTrapApplied};
use crate::status::{StatusKind, ToxicTrap};
use crate::targeting::{TargetDescriptor, TargetResolver};

/// A hit that reached its target. Input to fighting triggers.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LandedHit {
    pub attacker: CombatantId,
    pub target: TargetDescriptor,
    /// HP removed by the hit.
    pub damage: u32,
    pub target_died: bool,
}

/// Outcome of one attack.
#[derive(Clone, Debug, PartialEq)]
pub enum AttackResolution {
    /// Nothing to attack.
    NoTarget,
    /// A toxic trap replaced the attack.
    Trapped(MessageBody),
    Landed { message: MessageBody, hit: LandedHit },
}

impl AttackResolution {
    /// The message to emit, if any.
    #[must_use]
    pub fn message(&self) -> Option<&MessageBody> {
        match self {
            AttackResolution::NoTarget => None,
            AttackResolution::Trapped(m) | AttackResolution::Landed { message: m, .. } => Some(m),
        }
    }
}

/// Resolves normal attacks.
pub struct AttackResolver;

impl AttackResolver {
    /// Resolve one attack by `attacker`.
    pub fn resolve(ctx: &mut ResolveContext<'_>, attacker: CombatantId) -> AttackResolution {
        let Some(target) = TargetResolver::find_target_for(ctx.state, &attacker, true) else {
            info!(%attacker, "attack has no target");
            return AttackResolution::NoTarget;
        };

        let trapped = match (ctx.state.combatant(&attacker), ctx.state.combatant(&target.id)) {
            (Some(a), Some(d)) => ToxicTrap::should_trigger(a, d),
            _ => false,
        };
        if trapped {
            return AttackResolution::Trapped(Self::spring_trap(ctx, attacker, target.id));
        }

        let base_damage = ctx.state.combatant(&attacker).map_or(0, |c| c.attack);
        let stoneskin = ctx.stacks(&target.id, StatusKind::Stoneskin);
        let blocked = stoneskin
            .saturating_mul(ctx.config.status.stoneskin_reduction_per_stack)
            .min(base_damage);

        let report = ctx.deal_damage(&target.id, base_damage - blocked, &DamageSource::Attack(attacker));
        let (damage, target_died) = report.map_or((0, false), |r| (r.amount, r.died));
        debug!(
            %attacker,
            target = %target.describe(ctx.state.perspective()),
            damage,
            blocked,
            "attack landed"
        );

        let message = MessageBody::Attack(AttackLanded {
            attacker,
            target: target.id,
            base_damage,
            blocked,
            changes: ctx.take_changes(),
        });
        AttackResolution::Landed {
            message,
            hit: LandedHit {
                attacker,
                target,
                damage,
                target_died,
            },
        }
    }

    fn spring_trap(ctx: &mut ResolveContext<'_>, attacker: CombatantId, defender: CombatantId) -> MessageBody {
        let trap_stacks = ctx.clear_status(&defender, ToxicTrap::STATUS);
        let decay_level = ctx.school_level(&defender, ToxicTrap::RELATED_SCHOOL);
        let poison_stacks = ToxicTrap::poison_stacks(trap_stacks, decay_level);
        ctx.apply_status(&attacker, StatusKind::Poisoned, poison_stacks);
        info!(%attacker, %defender, trap_stacks, poison_stacks, "toxic trap sprung");

        MessageBody::ToxicTrapApplied(ToxicTrapApplied {
            attacker,
            defender,
            trap_stacks,
            decay_level,
            poison_stacks,
            changes: ctx.take_changes(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{AbilityStack, SpellSchool};
    use crate::combat::{NoResistance, StandardDamage};
    use crate::core::{AbsoluteSide, BattleConfig, BattleState, Combatant, GameRng, Hero, Position};
    use crate::status::StatusEffectEngine;

    fn board() -> BattleState {
        BattleState::new(AbsoluteSide::Host)
            .with_hero(Hero::new("Ida", AbsoluteSide::Host, Position::Left, 300, 40))
            .with_hero(
                Hero::new("Gale", AbsoluteSide::Guest, Position::Left, 300, 30)
                    .with_ability(AbilityStack::school(SpellSchool::DecayMagic, 2))
                    .with_creature(Combatant::new("Imp", 50, 10)),
            )
    }

    fn attack(state: &mut BattleState, attacker: CombatantId) -> AttackResolution {
        let mut rng = GameRng::new(1);
        let config = BattleConfig::default();
        let mut ctx = ResolveContext::new(state, &mut rng, &config, &NoResistance, &StandardDamage);
        AttackResolver::resolve(&mut ctx, attacker)
    }

    #[test]
    fn test_creature_intercepts() {
        let mut state = board();
        let ida = CombatantId::hero(AbsoluteSide::Host, Position::Left);
        let AttackResolution::Landed { hit, .. } = attack(&mut state, ida) else {
            panic!("expected a landed hit");
        };
        assert_eq!(hit.target.name(), "Imp");
        assert_eq!(hit.damage, 40);
        assert!(!hit.target_died);
    }

    #[test]
    fn test_stoneskin_absorbs() {
        let mut state = board();
        let imp = CombatantId::creature(AbsoluteSide::Guest, Position::Left, 0);
        StatusEffectEngine::apply(state.combatant_mut(&imp).unwrap(), StatusKind::Stoneskin, 3, 0);

        let ida = CombatantId::hero(AbsoluteSide::Host, Position::Left);
        let resolution = attack(&mut state, ida);
        let Some(MessageBody::Attack(landed)) = resolution.message() else {
            panic!("expected an attack message");
        };
        assert_eq!(landed.blocked, 30);
        assert_eq!(state.combatant(&imp).unwrap().current_hp, 40);
    }

    #[test]
    fn test_trap_replaces_attack() {
        let mut state = board();
        let imp = CombatantId::creature(AbsoluteSide::Guest, Position::Left, 0);
        StatusEffectEngine::apply(state.combatant_mut(&imp).unwrap(), StatusKind::ToxicTrap, 2, 0);

        let ida = CombatantId::hero(AbsoluteSide::Host, Position::Left);
        let resolution = attack(&mut state, ida);
        let AttackResolution::Trapped(MessageBody::ToxicTrapApplied(trap)) = resolution else {
            panic!("expected the trap to fire");
        };

        // Decay 2: each trap stack poisons for 1 + 2/2 = 2.
        assert_eq!(trap.poison_stacks, 4);
        let imp_after = state.combatant(&imp).unwrap();
        assert_eq!(imp_after.current_hp, 50);
        assert!(!StatusEffectEngine::has(imp_after, StatusKind::ToxicTrap));
        assert_eq!(
            StatusEffectEngine::stacks(state.combatant(&ida).unwrap(), StatusKind::Poisoned),
            4
        );
    }

    #[test]
    fn test_no_target() {
        let mut state = BattleState::new(AbsoluteSide::Host)
            .with_hero(Hero::new("Ida", AbsoluteSide::Host, Position::Left, 300, 40));
        let ida = CombatantId::hero(AbsoluteSide::Host, Position::Left);
        assert_eq!(attack(&mut state, ida), AttackResolution::NoTarget);
    }
}
