//! User-visible combat log.

use im::Vector;
use tracing::info;

use crate::core::BattleState;
use crate::replication::{describe, MessageBody};
use crate::spells::SpellRegistry;

/// Ordered combat log lines. Cloning is O(1).
#[derive(Clone, Debug, Default)]
pub struct BattleLog {
    lines: Vector<String>,
}

impl BattleLog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a line and mirror it to `tracing`.
    pub fn push(&mut self, turn: u32, line: impl Into<String>) {
        let line = line.into();
        info!(target: "battle_log", turn, "{line}");
        self.lines.push_back(line);
    }

    #[must_use]
    pub fn lines(&self) -> &Vector<String> {
        &self.lines
    }

    #[must_use]
    pub fn snapshot(&self) -> Vector<String> {
        self.lines.clone()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Whether any line contains `needle`.
    #[must_use]
    pub fn contains(&self, needle: &str) -> bool {
        self.lines.iter().any(|l| l.contains(needle))
    }
}

/// Narration for a message, through the owning spell module when there is one.
#[must_use]
pub fn narrate(state: &BattleState, registry: &SpellRegistry, body: &MessageBody) -> String {
    match body.spell_name().and_then(|name| registry.replicator(name)) {
        Some(module) => module.describe(state, body),
        None => describe::describe(state, body),
    }
}
