//! Spells: casting decisions, fighting triggers and the effect modules.
//!
//! ## Key Types
//!
//! - [`SpellResolver`] / [`SpellReplicator`]: host and guest halves of a module
//! - [`SpellRegistry`]: name-keyed module lookup
//! - [`CastingPipeline`]: which spell (if any) a hero casts this turn
//! - [`FightingTriggers`]: post-attack trigger rolls
//! - [`library`]: the built-in modules

pub mod library;

mod contract;
mod fighting;
mod pipeline;
mod registry;

pub use contract::{SpellReplicator, SpellResolver, TriggerRule};
pub use fighting::{FightingTriggers, TriggerRoll};
pub use pipeline::{casting_chance, roll, CastDecision, CastPhase, Candidates, CastingPipeline};
pub use registry::SpellRegistry;
