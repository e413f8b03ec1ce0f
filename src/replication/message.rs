//! The replication message catalog.
//!
//! Every message is `{timestamp, turn, round, body}` where `body` is adjacently
//! tagged as `{"kind": ..., "payload": ...}`. Combatants are always named by
//! [`CombatantId`] (absolute side, position, creature index); the receiver
//! derives its own local labels.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::change::StateChange;
use crate::cards::SpellSchool;
use crate::core::{AbsoluteSide, CombatantId};
use crate::status::StatusKind;

/// One host-to-guest message.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ReplicationMessage {
    /// Logical send order, starting at 0 and gapless.
    pub timestamp: u64,
    /// Battle turn the message was produced in.
    pub turn: u32,
    /// Round the message was produced in (0 before the first round).
    pub round: u32,
    pub body: MessageBody,
}

impl ReplicationMessage {
    #[must_use]
    pub fn kind(&self) -> &'static str {
        self.body.kind()
    }
}

/// Message payloads, one variant per message kind.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "payload", rename_all = "snake_case")]
pub enum MessageBody {
    SpellCast(SpellCast),
    SpellEffect(SpellEffect),
    ToxicTrapApplied(ToxicTrapApplied),
    StoneskinApplied(StoneskinApplied),
    GatheringStormDamage(GatheringStormDamage),
    TrapArmed(TrapArmed),
    Attack(AttackLanded),
    TriggerRolled(TriggerRolled),
    StatusTick(StatusTick),
    TurnSkipped(TurnSkipped),
    StatusExpired(StatusExpired),
    BattleEnded(BattleEnded),
}

impl MessageBody {
    /// Wire name of the message kind.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            MessageBody::SpellCast(_) => "spell_cast",
            MessageBody::SpellEffect(_) => "spell_effect",
            MessageBody::ToxicTrapApplied(_) => "toxic_trap_applied",
            MessageBody::StoneskinApplied(_) => "stoneskin_applied",
            MessageBody::GatheringStormDamage(_) => "gathering_storm_damage",
            MessageBody::TrapArmed(_) => "trap_armed",
            MessageBody::Attack(_) => "attack",
            MessageBody::TriggerRolled(_) => "trigger_rolled",
            MessageBody::StatusTick(_) => "status_tick",
            MessageBody::TurnSkipped(_) => "turn_skipped",
            MessageBody::StatusExpired(_) => "status_expired",
            MessageBody::BattleEnded(_) => "battle_ended",
        }
    }

    /// The spell whose effect module owns this message, if any.
    #[must_use]
    pub fn spell_name(&self) -> Option<&str> {
        match self {
            MessageBody::SpellEffect(e) => Some(&e.spell_name),
            MessageBody::StoneskinApplied(_) => Some("Stoneskin"),
            MessageBody::GatheringStormDamage(_) => Some("GatheringStorm"),
            MessageBody::TrapArmed(t) => Some(&t.spell_name),
            MessageBody::ToxicTrapApplied(_) => Some("ToxicTrap"),
            _ => None,
        }
    }

    /// State changes carried by this message.
    #[must_use]
    pub fn changes(&self) -> &[StateChange] {
        match self {
            MessageBody::SpellEffect(m) => &m.changes,
            MessageBody::ToxicTrapApplied(m) => &m.changes,
            MessageBody::StoneskinApplied(m) => &m.changes,
            MessageBody::GatheringStormDamage(m) => &m.changes,
            MessageBody::TrapArmed(m) => &m.changes,
            MessageBody::Attack(m) => &m.changes,
            MessageBody::StatusTick(m) => &m.changes,
            MessageBody::TurnSkipped(m) => &m.changes,
            MessageBody::StatusExpired(m) => &m.changes,
            MessageBody::SpellCast(_) | MessageBody::TriggerRolled(_) | MessageBody::BattleEnded(_) => &[],
        }
    }

    /// Every combatant the message refers to, actors and change targets.
    #[must_use]
    pub fn referenced_ids(&self) -> SmallVec<[CombatantId; 8]> {
        let mut ids: SmallVec<[CombatantId; 8]> = SmallVec::new();
        match self {
            MessageBody::SpellCast(m) => ids.push(m.caster),
            MessageBody::SpellEffect(m) => {
                ids.push(m.caster);
                ids.extend(m.target);
                ids.extend(m.resisted_targets.iter().copied());
            }
            MessageBody::ToxicTrapApplied(m) => {
                ids.push(m.attacker);
                ids.push(m.defender);
            }
            MessageBody::StoneskinApplied(m) => ids.push(m.caster),
            MessageBody::GatheringStormDamage(m) => {
                ids.push(m.caster);
                ids.extend(m.resisted_targets.iter().copied());
            }
            MessageBody::TrapArmed(m) => ids.push(m.owner),
            MessageBody::Attack(m) => {
                ids.push(m.attacker);
                ids.push(m.target);
            }
            MessageBody::TriggerRolled(m) => ids.push(m.attacker),
            MessageBody::StatusTick(m) => ids.push(m.target),
            MessageBody::TurnSkipped(m) => ids.push(m.actor),
            MessageBody::StatusExpired(m) => ids.push(m.target),
            MessageBody::BattleEnded(_) => {}
        }
        ids.extend(self.changes().iter().map(|c| *c.target()));
        ids
    }
}

/// A hero committed to a spell.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SpellCast {
    pub caster: CombatantId,
    pub hero_name: String,
    pub spell_name: String,
    pub spell_level: u32,
    pub spell_school: SpellSchool,
}

/// Category of a generic spell effect, used for presentation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EffectType {
    Freeze,
    Burn,
    Poison,
    PoisonSpread,
    Heal,
    Stun,
    Lifesteal,
    /// Resolved with nothing to act on.
    Fizzle,
}

/// Result of a spell or fighting trigger without a dedicated message kind.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SpellEffect {
    pub spell_name: String,
    pub caster: CombatantId,
    /// Primary target of single-target effects.
    pub target: Option<CombatantId>,
    pub effect_type: EffectType,
    pub is_resisted: bool,
    /// Targets of area effects that resisted.
    #[serde(default)]
    pub resisted_targets: Vec<CombatantId>,
    /// Caster's level in the spell's governing ability.
    pub ability_level: u32,
    /// Successful trigger rolls, for fighting spells.
    pub successes: Option<u32>,
    pub changes: Vec<StateChange>,
}

impl SpellEffect {
    #[must_use]
    pub fn new(spell_name: impl Into<String>, caster: CombatantId, effect_type: EffectType) -> Self {
        Self {
            spell_name: spell_name.into(),
            caster,
            target: None,
            effect_type,
            is_resisted: false,
            resisted_targets: Vec::new(),
            ability_level: 0,
            successes: None,
            changes: Vec::new(),
        }
    }

    /// An effect that found nothing to act on.
    #[must_use]
    pub fn fizzle(spell_name: impl Into<String>, caster: CombatantId) -> Self {
        Self::new(spell_name, caster, EffectType::Fizzle)
    }

    #[must_use]
    pub fn with_target(mut self, target: CombatantId) -> Self {
        self.target = Some(target);
        self
    }

    #[must_use]
    pub fn resisted(mut self, resisted: bool) -> Self {
        self.is_resisted = resisted;
        self
    }

    #[must_use]
    pub fn with_resisted_targets(mut self, targets: Vec<CombatantId>) -> Self {
        self.resisted_targets = targets;
        self
    }

    #[must_use]
    pub fn with_level(mut self, level: u32) -> Self {
        self.ability_level = level;
        self
    }

    #[must_use]
    pub fn with_successes(mut self, successes: u32) -> Self {
        self.successes = Some(successes);
        self
    }

    #[must_use]
    pub fn with_changes(mut self, changes: Vec<StateChange>) -> Self {
        self.changes = changes;
        self
    }
}

impl From<SpellEffect> for MessageBody {
    fn from(effect: SpellEffect) -> Self {
        MessageBody::SpellEffect(effect)
    }
}

/// A toxic trap intercepted an attack.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ToxicTrapApplied {
    pub attacker: CombatantId,
    /// The trapped combatant that was attacked.
    pub defender: CombatantId,
    pub trap_stacks: u32,
    pub decay_level: u32,
    pub poison_stacks: u32,
    pub changes: Vec<StateChange>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StoneskinApplied {
    pub caster: CombatantId,
    pub stacks: u32,
    pub changes: Vec<StateChange>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GatheringStormDamage {
    pub caster: CombatantId,
    pub damage_per_target: u32,
    #[serde(default)]
    pub resisted_targets: Vec<CombatantId>,
    pub changes: Vec<StateChange>,
}

/// A trap spell was armed before combat.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TrapArmed {
    pub owner: CombatantId,
    pub spell_name: String,
    pub stacks: u32,
    pub changes: Vec<StateChange>,
}

/// A normal attack that reached its target.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AttackLanded {
    pub attacker: CombatantId,
    pub target: CombatantId,
    pub base_damage: u32,
    /// Damage absorbed by stoneskin.
    pub blocked: u32,
    pub changes: Vec<StateChange>,
}

/// Aggregate of one fighting spell's trigger rolls after a landed hit.
///
/// Sent for every rolled group, successful or not; a successful group is
/// followed by the spell's own effect message.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TriggerRolled {
    pub attacker: CombatantId,
    pub spell_name: String,
    pub copies: u32,
    pub successes: u32,
}

/// Damage-over-time tick at turn start.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StatusTick {
    pub target: CombatantId,
    pub status: StatusKind,
    pub stacks: u32,
    pub changes: Vec<StateChange>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TurnSkipped {
    pub actor: CombatantId,
    pub reason: StatusKind,
    pub changes: Vec<StateChange>,
}

/// Statuses that ran out on their own.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StatusExpired {
    pub target: CombatantId,
    pub changes: Vec<StateChange>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BattleEnded {
    /// `None` for a draw.
    pub winner: Option<AbsoluteSide>,
    pub rounds: u32,
}
