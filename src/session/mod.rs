//! Battle sessions: the host driver and the guest replica.
//!
//! Sessions own their collaborators (registry, resistance check, damage
//! applicator, presenter) and inject them into resolution. There is no
//! process-wide state.

mod guest;
mod host;
mod log;
mod presenter;

pub use guest::{ApplyOutcome, GuestSession};
pub use host::{HostCheckpoint, HostSession, TurnAction};
pub use log::{narrate, BattleLog};
pub use presenter::{NullPresenter, PacingCue, Presenter, RecordingPresenter};

use serde::{Deserialize, Serialize};

use crate::core::AbsoluteSide;

/// How a battle ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BattleResult {
    /// `None` for a draw.
    pub winner: Option<AbsoluteSide>,
    pub rounds: u32,
}
