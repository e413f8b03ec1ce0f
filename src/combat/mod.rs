//! Host-side combat resolution: damage, resistance and normal attacks.
//!
//! Everything here runs on the host only. [`ResolveContext`] is the single
//! path through which canonical state changes, so every mutation ends up in
//! the state-change list of exactly one outgoing message.

mod attack;
mod context;
mod damage;
mod resistance;

pub use attack::{AttackResolution, AttackResolver, LandedHit};
pub use context::ResolveContext;
pub use damage::{DamageApplicator, DamageReport, DamageSource, StandardDamage};
pub use resistance::{NoResistance, ResistanceCheck, StandardResistance, RESISTANCE_ABILITY};
