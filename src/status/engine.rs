//! Stacking status effect engine.
//!
//! `StatusEffectEngine` is stateless: status instances live on the
//! [`Combatant`] they affect, and the engine applies the stacking rules to
//! them. Resistance is decided by callers before `apply` is invoked; once
//! called, application is unconditional (dead combatants excepted).

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::kind::{ExpiryPhase, StatusKind};
use crate::core::Combatant;

/// One active status effect on a combatant.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StatusEffectInstance {
    pub kind: StatusKind,
    pub stacks: u32,
    pub permanent: bool,
    /// Battle turn of the first application.
    pub applied_at: u32,
    /// Battle turn of the latest stack change.
    pub last_updated: u32,
    /// Battle turn a spell last refreshed this status, if any.
    pub last_cast_turn: Option<u32>,
}

/// Stacks removed from one status kind.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Expired {
    pub kind: StatusKind,
    pub stacks: u32,
}

/// Applies stacking rules to a combatant's status list.
///
/// ```
/// use duel_engine::core::Combatant;
/// use duel_engine::status::{StatusEffectEngine, StatusKind};
///
/// let mut target = Combatant::new("Wolf", 100, 10);
/// StatusEffectEngine::apply(&mut target, StatusKind::Poisoned, 2, 1);
/// StatusEffectEngine::apply(&mut target, StatusKind::Poisoned, 3, 2);
/// assert_eq!(StatusEffectEngine::stacks(&target, StatusKind::Poisoned), 5);
/// ```
pub struct StatusEffectEngine;

impl StatusEffectEngine {
    /// Add `stacks` of `kind`, creating the instance if absent.
    ///
    /// Returns `false` (and changes nothing) for zero stacks or a dead target.
    pub fn apply(target: &mut Combatant, kind: StatusKind, stacks: u32, turn: u32) -> bool {
        if stacks == 0 || !target.alive {
            return false;
        }

        match target.statuses.iter_mut().find(|s| s.kind == kind) {
            Some(existing) => {
                existing.stacks = existing.stacks.saturating_add(stacks);
                existing.last_updated = turn;
            }
            None => target.statuses.push(StatusEffectInstance {
                kind,
                stacks,
                permanent: kind.is_permanent(),
                applied_at: turn,
                last_updated: turn,
                last_cast_turn: None,
            }),
        }
        true
    }

    /// Apply and record the turn a spell cast it.
    pub fn apply_from_cast(target: &mut Combatant, kind: StatusKind, stacks: u32, turn: u32) -> bool {
        let applied = Self::apply(target, kind, stacks, turn);
        if applied {
            if let Some(instance) = target.statuses.iter_mut().find(|s| s.kind == kind) {
                instance.last_cast_turn = Some(turn);
            }
        }
        applied
    }

    #[must_use]
    pub fn has(target: &Combatant, kind: StatusKind) -> bool {
        Self::stacks(target, kind) > 0
    }

    #[must_use]
    pub fn stacks(target: &Combatant, kind: StatusKind) -> u32 {
        target
            .statuses
            .iter()
            .find(|s| s.kind == kind)
            .map_or(0, |s| s.stacks)
    }

    #[must_use]
    pub fn get(target: &Combatant, kind: StatusKind) -> Option<&StatusEffectInstance> {
        target.statuses.iter().find(|s| s.kind == kind)
    }

    /// Remove up to `stacks`; the instance disappears at zero.
    ///
    /// Returns the number of stacks actually removed.
    pub fn remove_stacks(target: &mut Combatant, kind: StatusKind, stacks: u32, turn: u32) -> u32 {
        let Some(index) = target.statuses.iter().position(|s| s.kind == kind) else {
            return 0;
        };

        let instance = &mut target.statuses[index];
        let removed = stacks.min(instance.stacks);
        instance.stacks -= removed;
        instance.last_updated = turn;

        if instance.stacks == 0 {
            target.statuses.remove(index);
        }
        removed
    }

    /// Remove the status entirely. Returns the stacks it held.
    pub fn clear(target: &mut Combatant, kind: StatusKind) -> u32 {
        match target.statuses.iter().position(|s| s.kind == kind) {
            Some(index) => target.statuses.remove(index).stacks,
            None => 0,
        }
    }

    pub fn clear_all(target: &mut Combatant) {
        target.statuses.clear();
    }

    /// False while a casting-blocking status is present.
    #[must_use]
    pub fn can_cast_spells(target: &Combatant) -> bool {
        !target
            .statuses
            .iter()
            .any(|s| s.stacks > 0 && s.kind.blocks_casting())
    }

    /// First turn-skipping status present, in list order.
    #[must_use]
    pub fn skip_reason(target: &Combatant) -> Option<StatusKind> {
        target
            .statuses
            .iter()
            .find(|s| s.stacks > 0 && s.kind.skips_turn())
            .map(|s| s.kind)
    }

    /// Damage-over-time statuses present with their stacks, in list order.
    #[must_use]
    pub fn damage_over_time(target: &Combatant) -> SmallVec<[(StatusKind, u32); 2]> {
        target
            .statuses
            .iter()
            .filter(|s| matches!(s.kind, StatusKind::Poisoned | StatusKind::Burned))
            .map(|s| (s.kind, s.stacks))
            .collect()
    }

    /// Apply every kind's expiry rule for `phase`.
    pub fn expire(target: &mut Combatant, phase: ExpiryPhase, turn: u32) -> SmallVec<[Expired; 2]> {
        let due: SmallVec<[Expired; 2]> = target
            .statuses
            .iter()
            .filter_map(|s| {
                let stacks = s.kind.expires_at(phase, s.stacks);
                (stacks > 0).then_some(Expired { kind: s.kind, stacks })
            })
            .collect();

        for expired in &due {
            Self::remove_stacks(target, expired.kind, expired.stacks, turn);
        }
        due
    }
}
