//! Presentation hooks.
//!
//! A [`Presenter`] is told about every message after its state changes are
//! committed. Pacing is cosmetic: a UI may block inside `pace` to line up
//! animations, which cannot affect outcomes.

use std::time::Duration;

use crate::core::PacingConfig;
use crate::replication::{MessageBody, ReplicationMessage};

/// Kind of pause a message calls for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PacingCue {
    Cast,
    Attack,
    Status,
    /// No pause.
    Instant,
}

impl PacingCue {
    #[must_use]
    pub fn for_body(body: &MessageBody) -> Self {
        match body {
            MessageBody::SpellCast(_)
            | MessageBody::SpellEffect(_)
            | MessageBody::StoneskinApplied(_)
            | MessageBody::GatheringStormDamage(_) => PacingCue::Cast,
            MessageBody::Attack(_) | MessageBody::ToxicTrapApplied(_) => PacingCue::Attack,
            MessageBody::StatusTick(_) | MessageBody::TurnSkipped(_) | MessageBody::StatusExpired(_) => {
                PacingCue::Status
            }
            MessageBody::TrapArmed(_) | MessageBody::TriggerRolled(_) | MessageBody::BattleEnded(_) => {
                PacingCue::Instant
            }
        }
    }

    #[must_use]
    pub fn delay(self, pacing: &PacingConfig) -> Duration {
        let ms = match self {
            PacingCue::Cast => pacing.cast_delay_ms,
            PacingCue::Attack => pacing.attack_delay_ms,
            PacingCue::Status => pacing.status_delay_ms,
            PacingCue::Instant => 0,
        };
        Duration::from_millis(ms)
    }
}

/// Visual layer collaborator.
pub trait Presenter: Send {
    /// A message was applied; `line` is its log narration.
    fn present(&mut self, message: &ReplicationMessage, line: &str);

    /// Cosmetic pause after a message.
    fn pace(&mut self, _cue: PacingCue, _delay: Duration) {}
}

/// Does nothing. The default for headless sessions.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullPresenter;

impl Presenter for NullPresenter {
    fn present(&mut self, _message: &ReplicationMessage, _line: &str) {}
}

/// Records what it is shown, without sleeping.
#[derive(Clone, Debug, Default)]
pub struct RecordingPresenter {
    pub kinds: Vec<&'static str>,
    pub lines: Vec<String>,
    pub total_delay: Duration,
}

impl Presenter for RecordingPresenter {
    fn present(&mut self, message: &ReplicationMessage, line: &str) {
        self.kinds.push(message.kind());
        self.lines.push(line.to_string());
    }

    fn pace(&mut self, _cue: PacingCue, delay: Duration) {
        self.total_delay += delay;
    }
}
