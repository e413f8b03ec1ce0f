//! Battle log narration.
//!
//! Log lines are written from the reader's perspective: combatants are
//! labelled with their local side (`player` or `opponent`), derived from the
//! state's perspective, so the same message reads correctly on both peers.

use super::change::StateChange;
use super::message::MessageBody;
use crate::core::{BattleState, CombatantId};

/// `"Name (player)"`, or the raw id if it does not resolve.
#[must_use]
pub fn label(state: &BattleState, id: &CombatantId) -> String {
    match state.combatant(id) {
        Some(c) => format!("{} ({})", c.name, state.local_side(id.absolute_side)),
        None => id.to_string(),
    }
}

/// Short summary of a change list: `"Imp -40 (0 hp, died)"`.
#[must_use]
pub fn summarize_changes(state: &BattleState, changes: &[StateChange]) -> String {
    let parts: Vec<String> = changes
        .iter()
        .map(|change| match change {
            StateChange::Damage {
                target,
                amount,
                new_hp,
                died,
            } => {
                let tail = if *died { ", died" } else { "" };
                format!("{} -{amount} ({new_hp} hp{tail})", label(state, target))
            }
            StateChange::Heal {
                target,
                amount,
                new_hp,
            } => format!("{} +{amount} ({new_hp} hp)", label(state, target)),
            StateChange::StatusApplied {
                target,
                status,
                stacks,
                ..
            } => format!("{} +{stacks} {status}", label(state, target)),
            StateChange::StatusRemoved {
                target,
                status,
                stacks,
            } => format!("{} -{stacks} {status}", label(state, target)),
        })
        .collect();
    parts.join(", ")
}

/// Generic narration for any message body.
#[must_use]
pub fn describe(state: &BattleState, body: &MessageBody) -> String {
    match body {
        MessageBody::SpellCast(m) => format!(
            "{} casts {} (level {}, {})",
            label(state, &m.caster),
            m.spell_name,
            m.spell_level,
            m.spell_school
        ),
        MessageBody::SpellEffect(m) => {
            let mut line = format!("{} resolves for {}", m.spell_name, label(state, &m.caster));
            if let Some(target) = &m.target {
                line.push_str(&format!(" on {}", label(state, target)));
            }
            if m.is_resisted {
                line.push_str(": resisted");
            } else if !m.changes.is_empty() {
                line.push_str(&format!(": {}", summarize_changes(state, &m.changes)));
            }
            line
        }
        MessageBody::ToxicTrapApplied(m) => format!(
            "{} springs a toxic trap on {}: {} poison",
            label(state, &m.defender),
            label(state, &m.attacker),
            m.poison_stacks
        ),
        MessageBody::StoneskinApplied(m) => {
            format!("{} hardens: +{} stoneskin", label(state, &m.caster), m.stacks)
        }
        MessageBody::GatheringStormDamage(m) => format!(
            "{} calls a storm: {}",
            label(state, &m.caster),
            summarize_changes(state, &m.changes)
        ),
        MessageBody::TrapArmed(m) => format!(
            "{} arms {} x{}",
            label(state, &m.owner),
            m.spell_name,
            m.stacks
        ),
        MessageBody::Attack(m) => {
            let mut line = format!(
                "{} attacks {}: {}",
                label(state, &m.attacker),
                label(state, &m.target),
                summarize_changes(state, &m.changes)
            );
            if m.blocked > 0 {
                line.push_str(&format!(" ({} blocked)", m.blocked));
            }
            line
        }
        MessageBody::TriggerRolled(m) => format!(
            "{}: {} {} spells, {} successes",
            label(state, &m.attacker),
            m.copies,
            m.spell_name,
            m.successes
        ),
        MessageBody::StatusTick(m) => format!(
            "{} suffers {} x{}: {}",
            label(state, &m.target),
            m.status,
            m.stacks,
            summarize_changes(state, &m.changes)
        ),
        MessageBody::TurnSkipped(m) => {
            format!("{} is {} and skips the turn", label(state, &m.actor), m.reason)
        }
        MessageBody::StatusExpired(m) => format!(
            "{} recovers: {}",
            label(state, &m.target),
            summarize_changes(state, &m.changes)
        ),
        MessageBody::BattleEnded(m) => match m.winner {
            Some(side) => format!(
                "battle over after {} rounds: {} wins",
                m.rounds,
                state.local_side(side)
            ),
            None => format!("battle over after {} rounds: draw", m.rounds),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{AbsoluteSide, Hero, Position};

    #[test]
    fn test_labels_follow_perspective() {
        let host_view = BattleState::new(AbsoluteSide::Host)
            .with_hero(Hero::new("Ida", AbsoluteSide::Host, Position::Left, 100, 10));
        let guest_view = host_view.mirrored();
        let id = CombatantId::hero(AbsoluteSide::Host, Position::Left);

        assert_eq!(label(&host_view, &id), "Ida (player)");
        assert_eq!(label(&guest_view, &id), "Ida (opponent)");
    }
}
