//! Authoritative damage and healing.
//!
//! Host-only. The applicator mutates HP on the canonical state and reports
//! the result; the guest learns the result from the message and never runs
//! an applicator.

use tracing::debug;

use crate::core::{BattleState, CombatantId};
use crate::status::StatusKind;

/// What caused a damage event.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DamageSource {
    Attack(CombatantId),
    Spell { caster: CombatantId, spell: String },
    Status(StatusKind),
}

/// Outcome of one damage application.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DamageReport {
    pub target: CombatantId,
    /// HP actually removed.
    pub amount: u32,
    pub new_hp: u32,
    /// The target died from this hit.
    pub died: bool,
}

/// Applies damage to heroes and creatures.
///
/// Implementations must keep `alive == (current_hp > 0)` and clear statuses
/// on death, which [`Combatant::set_hp`](crate::core::Combatant::set_hp)
/// already guarantees.
pub trait DamageApplicator: Send + Sync {
    /// Damage a hero. Returns `None` if the target does not exist or is dead.
    fn apply_damage(
        &self,
        state: &mut BattleState,
        target: &CombatantId,
        amount: u32,
        source: &DamageSource,
    ) -> Option<DamageReport>;

    /// Damage a creature. Defaults to the hero path.
    fn apply_damage_to_creature(
        &self,
        state: &mut BattleState,
        target: &CombatantId,
        amount: u32,
        source: &DamageSource,
    ) -> Option<DamageReport> {
        self.apply_damage(state, target, amount, source)
    }

    /// Dispatch on the target kind.
    fn damage(
        &self,
        state: &mut BattleState,
        target: &CombatantId,
        amount: u32,
        source: &DamageSource,
    ) -> Option<DamageReport> {
        if target.is_hero() {
            self.apply_damage(state, target, amount, source)
        } else {
            self.apply_damage_to_creature(state, target, amount, source)
        }
    }

    /// Heal a living combatant. Returns the HP restored and the new HP.
    fn heal(&self, state: &mut BattleState, target: &CombatantId, amount: u32) -> Option<(u32, u32)> {
        let combatant = state.combatant_mut(target)?;
        if !combatant.alive {
            return None;
        }
        let healed = combatant.heal(amount);
        Some((healed, combatant.current_hp))
    }
}

/// Plain HP subtraction, no mitigation.
#[derive(Clone, Copy, Debug, Default)]
pub struct StandardDamage;

impl DamageApplicator for StandardDamage {
    fn apply_damage(
        &self,
        state: &mut BattleState,
        target: &CombatantId,
        amount: u32,
        source: &DamageSource,
    ) -> Option<DamageReport> {
        let combatant = state.combatant_mut(target)?;
        if !combatant.alive {
            return None;
        }

        let dealt = combatant.take_damage(amount);
        let report = DamageReport {
            target: *target,
            amount: dealt,
            new_hp: combatant.current_hp,
            died: !combatant.alive,
        };
        debug!(%target, dealt, new_hp = report.new_hp, died = report.died, ?source, "damage applied");
        Some(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{AbsoluteSide, Combatant, Hero, Position};

    fn state() -> BattleState {
        BattleState::new(AbsoluteSide::Host).with_hero(
            Hero::new("Gale", AbsoluteSide::Guest, Position::Left, 100, 10)
                .with_creature(Combatant::new("Imp", 30, 5)),
        )
    }

    #[test]
    fn test_overkill_clamps() {
        let mut s = state();
        let imp = CombatantId::creature(AbsoluteSide::Guest, Position::Left, 0);
        let report = StandardDamage
            .damage(&mut s, &imp, 50, &DamageSource::Status(StatusKind::Burned))
            .unwrap();
        assert_eq!(report.amount, 30);
        assert_eq!(report.new_hp, 0);
        assert!(report.died);
        assert!(!s.combatant(&imp).unwrap().alive);
    }

    #[test]
    fn test_dead_target_ignored() {
        let mut s = state();
        let imp = CombatantId::creature(AbsoluteSide::Guest, Position::Left, 0);
        let source = DamageSource::Status(StatusKind::Poisoned);
        StandardDamage.damage(&mut s, &imp, 30, &source);
        assert!(StandardDamage.damage(&mut s, &imp, 5, &source).is_none());
        assert!(StandardDamage.heal(&mut s, &imp, 5).is_none());
    }

    #[test]
    fn test_heal_caps_at_max() {
        let mut s = state();
        let gale = CombatantId::hero(AbsoluteSide::Guest, Position::Left);
        let source = DamageSource::Attack(CombatantId::hero(AbsoluteSide::Host, Position::Left));
        StandardDamage.damage(&mut s, &gale, 20, &source);
        assert_eq!(StandardDamage.heal(&mut s, &gale, 50), Some((20, 100)));
    }
}
