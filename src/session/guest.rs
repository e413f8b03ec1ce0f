//! Guest replica.
//!
//! The guest owns a mirrored state and changes it only by applying host
//! messages, strictly in timestamp order. It never draws from the battle
//! RNG; a separate cosmetic stream adds presentation jitter.

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, warn};

use super::log::{narrate, BattleLog};
use super::presenter::{NullPresenter, PacingCue, Presenter};
use super::BattleResult;
use crate::core::{AbsoluteSide, BattleConfig, BattleError, BattleState, CombatantId, GameRng};
use crate::replication::{codec, MessageBody, Mirror, ReplicationMessage};
use crate::spells::SpellRegistry;

/// Upper bound of the cosmetic jitter added to pacing delays, in ms.
const PACING_JITTER_MS: i32 = 80;

/// Result of applying one message.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ApplyOutcome {
    Applied,
    /// Skipped whole because a referenced combatant does not resolve.
    Skipped { unresolved: CombatantId },
}

/// The guest's battle: a mirror driven by host messages.
pub struct GuestSession {
    state: BattleState,
    config: BattleConfig,
    registry: Arc<SpellRegistry>,
    log: BattleLog,
    presenter: Box<dyn Presenter>,
    cosmetic: GameRng,
    next_timestamp: u64,
    result: Option<BattleResult>,
}

impl GuestSession {
    /// Start a replica over a guest-perspective state.
    pub fn new(state: BattleState, config: BattleConfig) -> Result<Self, BattleError> {
        config.validate()?;
        if state.perspective() != AbsoluteSide::Guest {
            return Err(BattleError::InvalidConfig(
                "guest session needs a guest-perspective state".to_string(),
            ));
        }
        Ok(Self {
            state,
            cosmetic: GameRng::new(config.seed).for_context("cosmetic"),
            config,
            registry: Arc::new(SpellRegistry::standard()?),
            log: BattleLog::new(),
            presenter: Box::new(NullPresenter),
            next_timestamp: 0,
            result: None,
        })
    }

    #[must_use]
    pub fn with_registry(mut self, registry: Arc<SpellRegistry>) -> Self {
        self.registry = registry;
        self
    }

    #[must_use]
    pub fn with_presenter(mut self, presenter: impl Presenter + 'static) -> Self {
        self.presenter = Box::new(presenter);
        self
    }

    #[must_use]
    pub fn state(&self) -> &BattleState {
        &self.state
    }

    #[must_use]
    pub fn log(&self) -> &BattleLog {
        &self.log
    }

    #[must_use]
    pub fn result(&self) -> Option<BattleResult> {
        self.result
    }

    /// Timestamp the next message must carry.
    #[must_use]
    pub fn expected_timestamp(&self) -> u64 {
        self.next_timestamp
    }

    /// Apply one host message.
    ///
    /// Fails with [`BattleError::OutOfOrder`] (nothing applied) unless the
    /// message is the next expected one. A message naming a combatant this
    /// mirror cannot resolve is skipped whole and the battle continues.
    pub fn apply(&mut self, message: &ReplicationMessage) -> Result<ApplyOutcome, BattleError> {
        if message.timestamp != self.next_timestamp {
            return Err(BattleError::OutOfOrder {
                expected: self.next_timestamp,
                actual: message.timestamp,
            });
        }
        self.next_timestamp += 1;
        self.state.turn = message.turn;
        self.state.round = message.round;

        if let Some(unresolved) = Mirror::unresolved(&self.state, &message.body) {
            warn!(
                timestamp = message.timestamp,
                kind = message.kind(),
                %unresolved,
                "skipping message with unresolved combatant"
            );
            self.log.push(
                message.turn,
                format!("skipped {} message: unknown combatant {unresolved}", message.kind()),
            );
            return Ok(ApplyOutcome::Skipped { unresolved });
        }

        match message.body.spell_name().and_then(|name| self.registry.replicator(name)) {
            Some(module) => module.apply(&mut self.state, message),
            None => {
                Mirror::apply_changes(&mut self.state, message.body.changes(), message.turn);
            }
        }
        if let MessageBody::BattleEnded(end) = &message.body {
            self.result = Some(BattleResult {
                winner: end.winner,
                rounds: end.rounds,
            });
        }

        let line = narrate(&self.state, &self.registry, &message.body);
        debug!(timestamp = message.timestamp, kind = message.kind(), "applied");
        self.log.push(message.turn, line.clone());
        self.presenter.present(message, &line);

        let cue = PacingCue::for_body(&message.body);
        let delay = cue.delay(&self.config.pacing);
        if !delay.is_zero() {
            let jitter = self.cosmetic.gen_range(0..PACING_JITTER_MS);
            let delay = delay + Duration::from_millis(u64::try_from(jitter).unwrap_or(0));
            self.presenter.pace(cue, delay);
        }
        Ok(ApplyOutcome::Applied)
    }

    /// Apply a batch in order, stopping at the first ordering error.
    pub fn apply_all<'m>(
        &mut self,
        messages: impl IntoIterator<Item = &'m ReplicationMessage>,
    ) -> Result<usize, BattleError> {
        let mut applied = 0;
        for message in messages {
            if self.apply(message)? == ApplyOutcome::Applied {
                applied += 1;
            }
        }
        Ok(applied)
    }

    /// Decode and apply newline-delimited JSON from the transport.
    pub fn receive(&mut self, text: &str) -> Result<usize, BattleError> {
        let messages = codec::decode_stream(text)?;
        self.apply_all(&messages)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Hero, Position};
    use crate::replication::{BattleEnded, StateChange, StatusTick};
    use crate::status::StatusKind;

    fn guest() -> GuestSession {
        let state = BattleState::new(AbsoluteSide::Guest)
            .with_hero(Hero::new("Ida", AbsoluteSide::Host, Position::Left, 100, 10))
            .with_hero(Hero::new("Gale", AbsoluteSide::Guest, Position::Left, 100, 10));
        GuestSession::new(state, BattleConfig::new(3)).unwrap()
    }

    fn tick(timestamp: u64, target: CombatantId) -> ReplicationMessage {
        ReplicationMessage {
            timestamp,
            turn: 1,
            round: 1,
            body: MessageBody::StatusTick(StatusTick {
                target,
                status: StatusKind::Poisoned,
                stacks: 1,
                changes: vec![StateChange::Damage {
                    target,
                    amount: 30,
                    new_hp: 70,
                    died: false,
                }],
            }),
        }
    }

    #[test]
    fn test_out_of_order_rejected() {
        let mut g = guest();
        let gale = CombatantId::hero(AbsoluteSide::Guest, Position::Left);
        let err = g.apply(&tick(1, gale)).unwrap_err();
        assert!(matches!(err, BattleError::OutOfOrder { expected: 0, actual: 1 }));
        assert_eq!(g.state().combatant(&gale).unwrap().current_hp, 100);
        assert_eq!(g.expected_timestamp(), 0);
    }

    #[test]
    fn test_unresolved_message_skipped() {
        let mut g = guest();
        let ghost = CombatantId::hero(AbsoluteSide::Guest, Position::Right);
        assert_eq!(
            g.apply(&tick(0, ghost)).unwrap(),
            ApplyOutcome::Skipped { unresolved: ghost }
        );

        // The stream continues after a skip.
        let gale = CombatantId::hero(AbsoluteSide::Guest, Position::Left);
        assert_eq!(g.apply(&tick(1, gale)).unwrap(), ApplyOutcome::Applied);
        assert_eq!(g.state().combatant(&gale).unwrap().current_hp, 70);
        assert!(g.log().contains("(player)"));
    }

    #[test]
    fn test_battle_end_recorded() {
        let mut g = guest();
        let end = ReplicationMessage {
            timestamp: 0,
            turn: 4,
            round: 2,
            body: MessageBody::BattleEnded(BattleEnded {
                winner: Some(AbsoluteSide::Guest),
                rounds: 2,
            }),
        };
        g.apply(&end).unwrap();
        assert_eq!(g.result().unwrap().winner, Some(AbsoluteSide::Guest));
        assert_eq!(g.state().round, 2);
        assert!(g.log().contains("player wins"));
    }
}
