//! Core engine types: sides, combatants, state, RNG, configuration, errors.
//!
//! Everything in here is shared verbatim by the host and the guest. Nothing
//! in `core` decides outcomes; it only stores and addresses them.

pub mod combatant;
pub mod config;
pub mod error;
pub mod rng;
pub mod side;
pub mod state;

pub use combatant::{Combatant, CombatantId, Hero};
pub use config::{BattleConfig, PacingConfig, SpellTuning, StatusTuning};
pub use error::BattleError;
pub use rng::{GameRng, GameRngState};
pub use side::{AbsoluteSide, LocalSide, Position};
pub use state::BattleState;
