//! Error type shared by the engine.
//!
//! No-op battle conditions (no target, nothing castable) are not errors; they
//! are logged and skipped. `BattleError` covers programming and integration
//! faults: registry misuse, transport ordering, codecs and configuration.

/// Errors surfaced by the battle engine.
#[derive(Debug, thiserror::Error)]
pub enum BattleError {
    #[error("no effect module registered for spell `{0}`")]
    UnknownSpell(String),

    #[error("spell `{0}` is already registered")]
    DuplicateSpell(String),

    #[error("out-of-order replication message: expected timestamp {expected}, got {actual}")]
    OutOfOrder { expected: u64, actual: u64 },

    #[error("invalid battle configuration: {0}")]
    InvalidConfig(String),

    #[error("json codec failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("binary codec failed: {0}")]
    Binary(#[from] bincode::Error),
}
