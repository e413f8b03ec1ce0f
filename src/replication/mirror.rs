//! Guest-side application of received changes.

use super::change::StateChange;
use super::message::MessageBody;
use crate::core::{BattleState, CombatantId};

/// Applies host-reported changes to a mirrored state.
pub struct Mirror;

impl Mirror {
    /// First combatant the message refers to that this state cannot resolve.
    ///
    /// A message with any unresolved reference must be skipped whole.
    #[must_use]
    pub fn unresolved(state: &BattleState, body: &MessageBody) -> Option<CombatantId> {
        body.referenced_ids()
            .into_iter()
            .find(|id| !state.contains(id))
    }

    /// Apply changes in order. Returns how many resolved.
    pub fn apply_changes(state: &mut BattleState, changes: &[StateChange], turn: u32) -> usize {
        changes
            .iter()
            .filter(|change| change.apply(state, turn))
            .count()
    }
}
