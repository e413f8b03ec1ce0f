//! # duel-engine
//!
//! A deterministic, host-authoritative battle engine for two-player
//! turn-based duels.
//!
//! ## Design Principles
//!
//! 1. **Host Decides, Guest Replays**: Every roll, resistance check and
//!    damage number is computed once on the host. The guest applies the
//!    reported outcome and never re-rolls.
//!
//! 2. **Absolute Sides**: State and messages name combatants by
//!    `absolute_side` (`host`/`guest`) and position. The view-relative
//!    `player`/`opponent` label is derived on read.
//!
//! 3. **One Message per Effect**: Resolvers return their message instead of
//!    emitting it, so a resolved effect cannot go unreported.
//!
//! 4. **Seeded Everything**: One ChaCha8 stream per battle; the same seed
//!    and actor turns give a byte-identical message stream.
//!
//! ## Modules
//!
//! - `core`: Sides, combatants, state, RNG, configuration, errors
//! - `cards`: Spell definitions and the catalog
//! - `status`: Stacking status effects and the toxic trap rule
//! - `targeting`: Canonical target selection
//! - `combat`: Damage, resistance and attack resolution (host only)
//! - `spells`: Casting pipeline, fighting triggers, spell modules
//! - `replication`: Message catalog, outbox, guest mirror, JSON codec
//! - `session`: Host driver and guest replica
//!
//! ```
//! use duel_engine::core::{AbsoluteSide, BattleConfig, BattleState, Hero, Position};
//! use duel_engine::session::{GuestSession, HostSession};
//!
//! let board = BattleState::new(AbsoluteSide::Host)
//!     .with_hero(Hero::new("Ida", AbsoluteSide::Host, Position::Left, 150, 40))
//!     .with_hero(Hero::new("Gale", AbsoluteSide::Guest, Position::Left, 150, 35));
//!
//! let config = BattleConfig::new(42);
//! let mut host = HostSession::new(board.clone(), config.clone()).unwrap();
//! let mut guest = GuestSession::new(board.mirrored(), config).unwrap();
//!
//! host.run_battle();
//! guest.apply_all(&host.drain_messages()).unwrap();
//!
//! assert_eq!(
//!     host.state().fingerprint().unwrap(),
//!     guest.state().fingerprint().unwrap(),
//! );
//! ```

pub mod cards;
pub mod combat;
pub mod core;
pub mod replication;
pub mod session;
pub mod spells;
pub mod status;
pub mod targeting;

pub use crate::core::{
    AbsoluteSide, BattleConfig, BattleError, BattleState, Combatant, CombatantId, GameRng,
    GameRngState, Hero, LocalSide, Position,
};

pub use crate::cards::{AbilityCatalog, AbilityStack, SpellDefinition, SpellSchool, Subtype};

pub use crate::status::{StatusEffectEngine, StatusKind};

pub use crate::targeting::{TargetDescriptor, TargetResolver};

pub use crate::replication::{MessageBody, ReplicationMessage, StateChange};

pub use crate::spells::{SpellRegistry, SpellReplicator, SpellResolver};

pub use crate::session::{BattleResult, GuestSession, HostSession};
