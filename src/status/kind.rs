//! Status effect kinds and their expiry rules.

use serde::{Deserialize, Serialize};

use crate::core::StatusTuning;

/// A named, stackable condition.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum StatusKind {
    Poisoned,
    Burned,
    Frozen,
    Stunned,
    Silenced,
    Stoneskin,
    ToxicTrap,
}

/// When stacks of a status go away on their own.
///
/// Every kind has exactly one rule; death clears all of them regardless.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ExpiryRule {
    /// Only removed by an effect or by death.
    UntilCleared,
    /// A buff that stays for the whole battle.
    Permanent,
    /// One stack consumed per turn it makes its owner skip.
    ConsumedPerSkippedTurn,
    /// Removed entirely at the top of the owner's next turn.
    ClearedAtTurnStart,
    /// One stack consumed at the end of each of the owner's turns.
    ConsumedAtTurnEnd,
    /// Removed entirely when it triggers.
    ConsumedOnTrigger,
}

/// Point of the owner's turn at which expiry rules are applied.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ExpiryPhase {
    TurnStart,
    SkippedTurn,
    TurnEnd,
}

impl StatusKind {
    pub const ALL: [StatusKind; 7] = [
        StatusKind::Poisoned,
        StatusKind::Burned,
        StatusKind::Frozen,
        StatusKind::Stunned,
        StatusKind::Silenced,
        StatusKind::Stoneskin,
        StatusKind::ToxicTrap,
    ];

    #[must_use]
    pub const fn expiry(self) -> ExpiryRule {
        match self {
            StatusKind::Poisoned | StatusKind::Burned => ExpiryRule::UntilCleared,
            StatusKind::Frozen => ExpiryRule::ConsumedPerSkippedTurn,
            StatusKind::Stunned => ExpiryRule::ClearedAtTurnStart,
            StatusKind::Silenced => ExpiryRule::ConsumedAtTurnEnd,
            StatusKind::Stoneskin => ExpiryRule::Permanent,
            StatusKind::ToxicTrap => ExpiryRule::ConsumedOnTrigger,
        }
    }

    /// Buffs the owner keeps until explicitly cleared.
    #[must_use]
    pub const fn is_permanent(self) -> bool {
        matches!(self, StatusKind::Stoneskin | StatusKind::ToxicTrap)
    }

    /// Harmful to its holder (subject to resistance when applied by a spell).
    #[must_use]
    pub const fn is_harmful(self) -> bool {
        !self.is_permanent()
    }

    /// Makes the owner lose its turn.
    #[must_use]
    pub const fn skips_turn(self) -> bool {
        matches!(self, StatusKind::Frozen | StatusKind::Stunned)
    }

    /// Prevents spell casting.
    #[must_use]
    pub const fn blocks_casting(self) -> bool {
        matches!(self, StatusKind::Silenced | StatusKind::Stunned)
    }

    /// Damage dealt at the top of the owner's turn for `stacks` stacks.
    ///
    /// Pure function of stacks and tuning so both processes agree on the
    /// displayed magnitude without transmitting it.
    #[must_use]
    pub fn tick_damage(self, stacks: u32, tuning: &StatusTuning) -> u32 {
        let per_stack = match self {
            StatusKind::Poisoned => tuning.poison_damage_per_stack,
            StatusKind::Burned => tuning.burn_damage_per_stack,
            _ => 0,
        };
        per_stack.saturating_mul(stacks)
    }

    /// Stacks removed by `phase` from an instance holding `stacks`.
    #[must_use]
    pub fn expires_at(self, phase: ExpiryPhase, stacks: u32) -> u32 {
        match (self.expiry(), phase) {
            (ExpiryRule::ClearedAtTurnStart, ExpiryPhase::TurnStart) => stacks,
            (ExpiryRule::ConsumedPerSkippedTurn, ExpiryPhase::SkippedTurn) => stacks.min(1),
            (ExpiryRule::ConsumedAtTurnEnd, ExpiryPhase::TurnEnd) => stacks.min(1),
            _ => 0,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            StatusKind::Poisoned => "poisoned",
            StatusKind::Burned => "burned",
            StatusKind::Frozen => "frozen",
            StatusKind::Stunned => "stunned",
            StatusKind::Silenced => "silenced",
            StatusKind::Stoneskin => "stoneskin",
            StatusKind::ToxicTrap => "toxicTrap",
        }
    }
}

impl std::fmt::Display for StatusKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
