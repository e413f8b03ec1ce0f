//! Spell data: definitions, ability stacks, and the read-only catalog.
//!
//! ## Key Types
//!
//! - `SpellDefinition`: Static spell data (`name`, `level`, `school`, `subtype`)
//! - `SpellSchool`: School of magic, doubling as the mastery ability name
//! - `AbilityStack`: A hero's stacked ability (e.g. `DecayMagic` x2)
//! - `AbilityCatalog`: Definition lookup

pub mod definition;
pub mod registry;

pub use definition::{AbilityStack, SpellDefinition, SpellSchool, Subtype};
pub use registry::AbilityCatalog;
