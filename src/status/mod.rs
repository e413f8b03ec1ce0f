//! Status effects: stacking conditions and their trigger hooks.
//!
//! ## Key Types
//!
//! - [`StatusKind`]: The named conditions (poisoned, frozen, stoneskin, ...)
//! - [`ExpiryRule`]: How each kind goes away on its own
//! - [`StatusEffectInstance`]: Stacks of one kind on one combatant
//! - [`StatusEffectEngine`]: Stacking, removal, expiry and casting checks
//! - [`ToxicTrap`]: The attack-intercepting trap rule
//!
//! Stack counts are what crosses the wire. Magnitudes (poison damage, frozen
//! turns) are recomputed from stacks on each side.

mod engine;
mod kind;
mod trigger;

pub use engine::{Expired, StatusEffectEngine, StatusEffectInstance};
pub use kind::{ExpiryPhase, ExpiryRule, StatusKind};
pub use trigger::ToxicTrap;
