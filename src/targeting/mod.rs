//! Targeting: who an actor hits.
//!
//! - [`TargetResolver`]: single-target and all-target selection
//! - [`TargetDescriptor`]: the transient result handed to effect modules
//!
//! Callers treat "no target" as a logged no-op, never as an error.

mod descriptor;
mod resolver;

pub use descriptor::{TargetDescriptor, TargetKind};
pub use resolver::{TargetList, TargetResolver};
