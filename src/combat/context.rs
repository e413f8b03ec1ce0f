//! Host resolution context.
//!
//! Every host-side mutation goes through a [`ResolveContext`], which applies
//! it to the canonical state and records the matching [`StateChange`]. The
//! recorded list is what the outgoing message carries, so the guest replays
//! exactly what the host committed.

use super::damage::{DamageApplicator, DamageReport, DamageSource};
use super::resistance::ResistanceCheck;
use crate::cards::SpellSchool;
use crate::core::{BattleConfig, BattleState, CombatantId, GameRng, Hero, SpellTuning};
use crate::replication::StateChange;
use crate::status::{StatusEffectEngine, StatusKind};
use crate::targeting::TargetDescriptor;

/// Mutable access to the canonical state plus the host-only collaborators.
pub struct ResolveContext<'a> {
    pub state: &'a mut BattleState,
    pub rng: &'a mut GameRng,
    pub config: &'a BattleConfig,
    resistance: &'a dyn ResistanceCheck,
    damage: &'a dyn DamageApplicator,
    changes: Vec<StateChange>,
}

impl<'a> ResolveContext<'a> {
    pub fn new(
        state: &'a mut BattleState,
        rng: &'a mut GameRng,
        config: &'a BattleConfig,
        resistance: &'a dyn ResistanceCheck,
        damage: &'a dyn DamageApplicator,
    ) -> Self {
        Self {
            state,
            rng,
            config,
            resistance,
            damage,
            changes: Vec::new(),
        }
    }

    #[must_use]
    pub fn turn(&self) -> u32 {
        self.state.turn
    }

    #[must_use]
    pub fn tuning(&self) -> &SpellTuning {
        &self.config.spells
    }

    #[must_use]
    pub fn hero(&self, id: &CombatantId) -> Option<&Hero> {
        self.state.owner_of(id)
    }

    /// Owner hero's level in `school`; 0 if the hero is gone.
    #[must_use]
    pub fn school_level(&self, id: &CombatantId, school: SpellSchool) -> u32 {
        self.hero(id).map_or(0, |h| h.school_level(school))
    }

    #[must_use]
    pub fn is_alive(&self, id: &CombatantId) -> bool {
        self.state.combatant(id).is_some_and(|c| c.alive)
    }

    #[must_use]
    pub fn stacks(&self, id: &CombatantId, kind: StatusKind) -> u32 {
        self.state
            .combatant(id)
            .map_or(0, |c| StatusEffectEngine::stacks(c, kind))
    }

    pub fn resists(&mut self, target: &CombatantId, spell: &str, caster: &CombatantId) -> bool {
        self.resistance
            .should_resist_spell(self.state, self.rng, target, spell, caster)
    }

    pub fn resists_area(&mut self, target: &TargetDescriptor, spell: &str, caster: &CombatantId) -> bool {
        self.resistance
            .should_resist_area_spell(self.state, self.rng, target, spell, caster)
    }

    /// Damage through the applicator and record the result.
    pub fn deal_damage(
        &mut self,
        target: &CombatantId,
        amount: u32,
        source: &DamageSource,
    ) -> Option<DamageReport> {
        let report = self.damage.damage(self.state, target, amount, source)?;
        self.changes.push(StateChange::Damage {
            target: report.target,
            amount: report.amount,
            new_hp: report.new_hp,
            died: report.died,
        });
        Some(report)
    }

    /// Heal and record. Returns HP restored.
    pub fn heal(&mut self, target: &CombatantId, amount: u32) -> Option<u32> {
        let (healed, new_hp) = self.damage.heal(self.state, target, amount)?;
        self.changes.push(StateChange::Heal {
            target: *target,
            amount: healed,
            new_hp,
        });
        Some(healed)
    }

    pub fn apply_status(&mut self, target: &CombatantId, kind: StatusKind, stacks: u32) -> bool {
        self.add_status(target, kind, stacks, false)
    }

    /// Apply a status refreshed by a spell cast (buffs, traps).
    pub fn apply_status_from_cast(&mut self, target: &CombatantId, kind: StatusKind, stacks: u32) -> bool {
        self.add_status(target, kind, stacks, true)
    }

    fn add_status(&mut self, target: &CombatantId, kind: StatusKind, stacks: u32, from_cast: bool) -> bool {
        let turn = self.state.turn;
        let Some(combatant) = self.state.combatant_mut(target) else {
            return false;
        };
        let applied = if from_cast {
            StatusEffectEngine::apply_from_cast(combatant, kind, stacks, turn)
        } else {
            StatusEffectEngine::apply(combatant, kind, stacks, turn)
        };
        if applied {
            self.changes.push(StateChange::StatusApplied {
                target: *target,
                status: kind,
                stacks,
                from_cast,
            });
        }
        applied
    }

    /// Remove up to `stacks` and record. Returns stacks removed.
    pub fn remove_status(&mut self, target: &CombatantId, kind: StatusKind, stacks: u32) -> u32 {
        let turn = self.state.turn;
        let Some(combatant) = self.state.combatant_mut(target) else {
            return 0;
        };
        let removed = StatusEffectEngine::remove_stacks(combatant, kind, stacks, turn);
        if removed > 0 {
            self.changes.push(StateChange::StatusRemoved {
                target: *target,
                status: kind,
                stacks: removed,
            });
        }
        removed
    }

    /// Remove every stack of `kind` and record. Returns stacks removed.
    pub fn clear_status(&mut self, target: &CombatantId, kind: StatusKind) -> u32 {
        let stacks = self.stacks(target, kind);
        self.remove_status(target, kind, stacks)
    }

    /// Record removals made outside the context (expiry).
    pub fn record(&mut self, change: StateChange) {
        self.changes.push(change);
    }

    /// Changes recorded since the last take.
    pub fn take_changes(&mut self) -> Vec<StateChange> {
        std::mem::take(&mut self.changes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combat::{NoResistance, StandardDamage};
    use crate::core::{AbsoluteSide, Position};

    #[test]
    fn test_changes_mirror_mutations() {
        let mut state = BattleState::new(AbsoluteSide::Host)
            .with_hero(Hero::new("Gale", AbsoluteSide::Guest, Position::Left, 100, 10));
        state.turn = 3;
        let mut guest = state.mirrored();
        let mut rng = GameRng::new(1);
        let config = BattleConfig::default();
        let target = CombatantId::hero(AbsoluteSide::Guest, Position::Left);

        let mut ctx = ResolveContext::new(&mut state, &mut rng, &config, &NoResistance, &StandardDamage);
        ctx.apply_status(&target, StatusKind::Poisoned, 3);
        ctx.deal_damage(&target, 40, &DamageSource::Status(StatusKind::Poisoned));
        ctx.remove_status(&target, StatusKind::Poisoned, 1);
        ctx.heal(&target, 15);
        let changes = ctx.take_changes();
        assert_eq!(changes.len(), 4);

        for change in &changes {
            assert!(change.apply(&mut guest, 3));
        }
        assert_eq!(guest.fingerprint().unwrap(), state.fingerprint().unwrap());
    }

    #[test]
    fn test_noop_records_nothing() {
        let mut state = BattleState::new(AbsoluteSide::Host)
            .with_hero(Hero::new("Gale", AbsoluteSide::Guest, Position::Left, 100, 10));
        let mut rng = GameRng::new(1);
        let config = BattleConfig::default();
        let target = CombatantId::hero(AbsoluteSide::Guest, Position::Left);

        let mut ctx = ResolveContext::new(&mut state, &mut rng, &config, &NoResistance, &StandardDamage);
        assert!(!ctx.apply_status(&target, StatusKind::Frozen, 0));
        assert_eq!(ctx.clear_status(&target, StatusKind::Frozen), 0);
        assert!(ctx.take_changes().is_empty());
    }
}
