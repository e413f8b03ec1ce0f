//! Host-to-guest replication protocol.
//!
//! The host is authoritative: it resolves every outcome and emits exactly one
//! message per resolved effect. The guest never re-rolls; it applies the
//! [`StateChange`]s each message carries and narrates them.
//!
//! - [`ReplicationMessage`] / [`MessageBody`]: the message catalog
//! - [`Outbox`]: ordered, gapless host queue
//! - [`Mirror`]: guest-side validation and application
//! - [`codec`]: JSON wire format
//! - [`describe`]: perspective-aware log lines

pub mod codec;
pub mod describe;

mod change;
mod message;
mod mirror;
mod outbox;

pub use change::StateChange;
pub use message::{
    AttackLanded, BattleEnded, EffectType, GatheringStormDamage, MessageBody, ReplicationMessage,
    SpellCast, SpellEffect, StatusExpired, StatusTick, StoneskinApplied, ToxicTrapApplied,
    TrapArmed, TriggerRolled, TurnSkipped,
};
pub use mirror::Mirror;
pub use outbox::Outbox;
