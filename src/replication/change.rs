//! Recorded state changes.
//!
//! The host records every mutation it commits as a [`StateChange`]; the
//! guest applies the same list to its mirror. Changes carry results, never
//! inputs to a computation: damage carries the resulting HP, status changes
//! carry stack deltas.

use serde::{Deserialize, Serialize};

use crate::core::{BattleState, CombatantId};
use crate::status::{StatusEffectEngine, StatusKind};

/// One committed mutation of battle state.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "change", rename_all = "snake_case")]
pub enum StateChange {
    Damage {
        target: CombatantId,
        amount: u32,
        new_hp: u32,
        died: bool,
    },
    Heal {
        target: CombatantId,
        amount: u32,
        new_hp: u32,
    },
    StatusApplied {
        target: CombatantId,
        status: StatusKind,
        stacks: u32,
        from_cast: bool,
    },
    StatusRemoved {
        target: CombatantId,
        status: StatusKind,
        stacks: u32,
    },
}

impl StateChange {
    #[must_use]
    pub fn target(&self) -> &CombatantId {
        match self {
            StateChange::Damage { target, .. }
            | StateChange::Heal { target, .. }
            | StateChange::StatusApplied { target, .. }
            | StateChange::StatusRemoved { target, .. } => target,
        }
    }

    /// Apply to a mirrored state. Returns `false` if the target is unknown.
    pub fn apply(&self, state: &mut BattleState, turn: u32) -> bool {
        let Some(combatant) = state.combatant_mut(self.target()) else {
            return false;
        };

        match self {
            StateChange::Damage { new_hp, .. } | StateChange::Heal { new_hp, .. } => {
                combatant.set_hp(*new_hp);
            }
            StateChange::StatusApplied {
                status,
                stacks,
                from_cast,
                ..
            } => {
                if *from_cast {
                    StatusEffectEngine::apply_from_cast(combatant, *status, *stacks, turn);
                } else {
                    StatusEffectEngine::apply(combatant, *status, *stacks, turn);
                }
            }
            StateChange::StatusRemoved { status, stacks, .. } => {
                StatusEffectEngine::remove_stacks(combatant, *status, *stacks, turn);
            }
        }
        true
    }

    /// Stacks of `status` this change added to `target`, if any.
    #[must_use]
    pub fn applied_stacks(&self, status: StatusKind) -> Option<u32> {
        match self {
            StateChange::StatusApplied {
                status: s, stacks, ..
            } if *s == status => Some(*stacks),
            _ => None,
        }
    }
}
