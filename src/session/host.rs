//! Authoritative battle driver.
//!
//! ## Turn order
//!
//! Each round walks positions `left, center, right`; at each position the
//! host side acts before the guest side, and a hero's living creatures act
//! (in array order) before the hero.
//!
//! ## Actor turn
//!
//! 1. Damage-over-time ticks (`status_tick`)
//! 2. Skip check, then turn-start expiry (`turn_skipped` / `status_expired`)
//! 3. Action: heroes run the casting pipeline, creatures attack
//! 4. Turn-end expiry (`status_expired`)
//!
//! Every state change is committed before the message describing it is
//! emitted, and each emitted message goes to the outbox, the log and the
//! presenter in that order.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use tracing::{debug, debug_span, info, warn};

use super::log::{narrate, BattleLog};
use super::presenter::{NullPresenter, PacingCue, Presenter};
use super::BattleResult;
use crate::combat::{
    AttackResolution, AttackResolver, DamageApplicator, DamageSource, LandedHit, ResistanceCheck,
    ResolveContext, StandardDamage, StandardResistance,
};
use crate::core::{
    AbsoluteSide, BattleConfig, BattleError, BattleState, CombatantId, GameRng, GameRngState, Position,
};
use crate::replication::{
    BattleEnded, MessageBody, Outbox, ReplicationMessage, SpellCast, StateChange, StatusExpired,
    StatusTick, TriggerRolled, TurnSkipped,
};
use crate::spells::{CastDecision, CastingPipeline, FightingTriggers, SpellRegistry};
use crate::status::{ExpiryPhase, StatusEffectEngine, StatusKind};

/// What an actor did with its turn.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TurnAction {
    /// Not taken: actor dead or battle over.
    Idle,
    /// Killed by damage over time before acting.
    Died,
    Skipped(StatusKind),
    Cast(String),
    Attacked,
}

/// Message sink: outbox, log and presenter.
struct Channel {
    outbox: Outbox,
    log: BattleLog,
    presenter: Box<dyn Presenter>,
}

impl Channel {
    fn emit(&mut self, state: &BattleState, registry: &SpellRegistry, config: &BattleConfig, body: MessageBody) {
        let line = narrate(state, registry, &body);
        let cue = PacingCue::for_body(&body);
        let message = self.outbox.emit(state.turn, state.round, body);
        debug!(timestamp = message.timestamp, kind = message.kind(), "emit");
        self.log.push(message.turn, line.clone());
        self.presenter.present(message, &line);
        self.presenter.pace(cue, cue.delay(&config.pacing));
    }
}

/// Everything needed to pick a host battle up where it stopped.
///
/// Pending (undrained) messages are not part of the checkpoint; drain them
/// before taking one.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct HostCheckpoint {
    pub state: BattleState,
    pub rng: GameRngState,
    pub next_timestamp: u64,
    pub traps_armed: bool,
    pub result: Option<BattleResult>,
}

/// The host's battle: canonical state plus everything needed to resolve it.
///
/// ```
/// use duel_engine::core::{AbsoluteSide, BattleConfig, BattleState, Hero, Position};
/// use duel_engine::session::HostSession;
///
/// let state = BattleState::new(AbsoluteSide::Host)
///     .with_hero(Hero::new("Ida", AbsoluteSide::Host, Position::Left, 120, 40))
///     .with_hero(Hero::new("Gale", AbsoluteSide::Guest, Position::Left, 100, 30));
///
/// let mut host = HostSession::new(state, BattleConfig::new(7)).unwrap();
/// let result = host.run_battle();
/// assert_eq!(result.winner, Some(AbsoluteSide::Host));
/// assert_eq!(host.drain_messages().last().unwrap().kind(), "battle_ended");
/// ```
pub struct HostSession {
    state: BattleState,
    rng: GameRng,
    config: BattleConfig,
    registry: Arc<SpellRegistry>,
    resistance: Box<dyn ResistanceCheck>,
    damage: Box<dyn DamageApplicator>,
    channel: Channel,
    traps_armed: bool,
    result: Option<BattleResult>,
}

impl HostSession {
    /// Start a session over a host-perspective state.
    pub fn new(state: BattleState, config: BattleConfig) -> Result<Self, BattleError> {
        config.validate()?;
        if state.perspective() != AbsoluteSide::Host {
            return Err(BattleError::InvalidConfig(
                "host session needs a host-perspective state".to_string(),
            ));
        }
        Ok(Self {
            state,
            rng: GameRng::new(config.seed),
            resistance: Box::new(StandardResistance::new(config.resistance_chance_per_level)),
            damage: Box::new(StandardDamage),
            config,
            registry: Arc::new(SpellRegistry::standard()?),
            channel: Channel {
                outbox: Outbox::new(),
                log: BattleLog::new(),
                presenter: Box::new(NullPresenter),
            },
            traps_armed: false,
            result: None,
        })
    }

    /// Continue a checkpointed battle; the message stream and random draws
    /// carry on exactly as if the session had never stopped.
    pub fn resume(checkpoint: HostCheckpoint, config: BattleConfig) -> Result<Self, BattleError> {
        let mut session = Self::new(checkpoint.state, config)?;
        session.rng = GameRng::from_state(&checkpoint.rng);
        session.channel.outbox = Outbox::starting_at(checkpoint.next_timestamp);
        session.traps_armed = checkpoint.traps_armed;
        session.result = checkpoint.result;
        info!(
            round = session.state.round,
            next_timestamp = checkpoint.next_timestamp,
            "host session resumed"
        );
        Ok(session)
    }

    #[must_use]
    pub fn with_registry(mut self, registry: Arc<SpellRegistry>) -> Self {
        self.registry = registry;
        self
    }

    #[must_use]
    pub fn with_resistance(mut self, resistance: impl ResistanceCheck + 'static) -> Self {
        self.resistance = Box::new(resistance);
        self
    }

    #[must_use]
    pub fn with_damage(mut self, damage: impl DamageApplicator + 'static) -> Self {
        self.damage = Box::new(damage);
        self
    }

    #[must_use]
    pub fn with_presenter(mut self, presenter: impl Presenter + 'static) -> Self {
        self.channel.presenter = Box::new(presenter);
        self
    }

    #[must_use]
    pub fn state(&self) -> &BattleState {
        &self.state
    }

    #[must_use]
    pub fn config(&self) -> &BattleConfig {
        &self.config
    }

    #[must_use]
    pub fn log(&self) -> &BattleLog {
        &self.channel.log
    }

    #[must_use]
    pub fn result(&self) -> Option<BattleResult> {
        self.result
    }

    #[must_use]
    pub fn rng_state(&self) -> GameRngState {
        self.rng.state()
    }

    #[must_use]
    pub fn checkpoint(&self) -> HostCheckpoint {
        HostCheckpoint {
            state: self.state.clone(),
            rng: self.rng.state(),
            next_timestamp: self.channel.outbox.next_timestamp(),
            traps_armed: self.traps_armed,
            result: self.result,
        }
    }

    /// Every message emitted so far, including drained ones.
    #[must_use]
    pub fn history(&self) -> im::Vector<ReplicationMessage> {
        self.channel.outbox.history()
    }

    /// Hand pending messages to the transport.
    pub fn drain_messages(&mut self) -> Vec<ReplicationMessage> {
        self.channel.outbox.drain()
    }

    /// Actors for one round, in acting order.
    #[must_use]
    pub fn turn_order(&self) -> Vec<CombatantId> {
        let mut order = Vec::new();
        for position in Position::ALL {
            for side in AbsoluteSide::ALL {
                let Some(hero) = self.state.hero(side, position) else {
                    continue;
                };
                order.extend(hero.living_creatures().map(|i| CombatantId::creature(side, position, i)));
                order.push(hero.id());
            }
        }
        order
    }

    /// Arm every hero's trap spells, once, before the first round.
    pub fn arm_traps(&mut self) {
        if self.traps_armed {
            return;
        }
        self.traps_armed = true;

        let mut plan: Vec<(CombatantId, String, u32)> = Vec::new();
        for hero in self.state.heroes().filter(|h| h.is_alive()) {
            let mut traps: SmallVec<[(String, u32); 2]> = SmallVec::new();
            for spell in hero.spellbook.iter().filter(|s| s.is_trap()) {
                match traps.iter_mut().find(|(name, _)| *name == spell.name) {
                    Some((_, copies)) => *copies += 1,
                    None => traps.push((spell.name.clone(), 1)),
                }
            }
            plan.extend(traps.into_iter().map(|(name, copies)| (hero.id(), name, copies)));
        }

        let registry = Arc::clone(&self.registry);
        for (owner, name, copies) in plan {
            let Some(module) = registry.resolver(&name) else {
                warn!(spell = %name, "trap spell has no module");
                continue;
            };
            if let Some(body) = self.with_ctx(|ctx| module.arm_trap(ctx, owner, copies)) {
                self.emit(body);
            }
        }
    }

    /// Resolve one actor's turn.
    pub fn take_turn(&mut self, actor: CombatantId) -> TurnAction {
        if self.result.is_some() || !self.is_alive(&actor) {
            return TurnAction::Idle;
        }
        self.state.turn += 1;
        let span = debug_span!("turn", turn = self.state.turn, %actor);
        let _enter = span.enter();

        let action = self.resolve_turn(actor);
        self.check_battle_end();
        action
    }

    /// Play one full round. Returns the result once the battle is over.
    pub fn run_round(&mut self) -> Option<BattleResult> {
        if self.result.is_some() {
            return self.result;
        }
        self.arm_traps();
        if let Some(result) = self.check_battle_end() {
            return Some(result);
        }
        if self.state.round >= self.config.max_rounds {
            return Some(self.finish(None));
        }

        self.state.round += 1;
        debug!(round = self.state.round, "round start");
        for actor in self.turn_order() {
            if self.result.is_some() {
                break;
            }
            self.take_turn(actor);
        }
        self.check_battle_end()
    }

    /// Play rounds until the battle ends.
    pub fn run_battle(&mut self) -> BattleResult {
        loop {
            if let Some(result) = self.run_round() {
                return result;
            }
        }
    }

    fn resolve_turn(&mut self, actor: CombatantId) -> TurnAction {
        let ticks = self
            .state
            .combatant(&actor)
            .map(StatusEffectEngine::damage_over_time)
            .unwrap_or_default();
        for (status, stacks) in ticks {
            let amount = status.tick_damage(stacks, &self.config.status);
            let body = self.with_ctx(|ctx| {
                ctx.deal_damage(&actor, amount, &DamageSource::Status(status));
                MessageBody::StatusTick(StatusTick {
                    target: actor,
                    status,
                    stacks,
                    changes: ctx.take_changes(),
                })
            });
            self.emit(body);
            if !self.is_alive(&actor) {
                return TurnAction::Died;
            }
        }

        let skip = self.state.combatant(&actor).and_then(StatusEffectEngine::skip_reason);
        let mut expired = self.expire(&actor, ExpiryPhase::TurnStart);
        if let Some(reason) = skip {
            expired.extend(self.expire(&actor, ExpiryPhase::SkippedTurn));
            self.emit(MessageBody::TurnSkipped(TurnSkipped {
                actor,
                reason,
                changes: expired,
            }));
            return TurnAction::Skipped(reason);
        }
        if !expired.is_empty() {
            self.emit(MessageBody::StatusExpired(StatusExpired {
                target: actor,
                changes: expired,
            }));
        }

        let action = if actor.is_hero() {
            self.hero_action(actor)
        } else {
            self.attack(actor);
            TurnAction::Attacked
        };

        if self.is_alive(&actor) {
            let expired = self.expire(&actor, ExpiryPhase::TurnEnd);
            if !expired.is_empty() {
                self.emit(MessageBody::StatusExpired(StatusExpired {
                    target: actor,
                    changes: expired,
                }));
            }
        }
        action
    }

    fn hero_action(&mut self, actor: CombatantId) -> TurnAction {
        let registry = Arc::clone(&self.registry);
        let decision = CastingPipeline::new(&registry).select(
            &self.state,
            &mut self.rng,
            self.config.cast_decline_base,
            &actor,
        );

        let CastDecision::Cast(spell) = decision else {
            self.attack(actor);
            return TurnAction::Attacked;
        };
        let Some(module) = registry.resolver(&spell.name) else {
            // Candidates are filtered on registration; nothing to resolve.
            warn!(spell = %spell.name, "selected spell has no module");
            return TurnAction::Idle;
        };

        let hero_name = self
            .state
            .owner_of(&actor)
            .map(|h| h.name().to_string())
            .unwrap_or_default();
        self.emit(MessageBody::SpellCast(SpellCast {
            caster: actor,
            hero_name,
            spell_name: spell.name.clone(),
            spell_level: spell.level,
            spell_school: spell.school,
        }));

        let body = self.with_ctx(|ctx| module.resolve(ctx, actor, &spell));
        self.emit(body);
        TurnAction::Cast(spell.name)
    }

    fn attack(&mut self, actor: CombatantId) {
        match self.with_ctx(|ctx| AttackResolver::resolve(ctx, actor)) {
            AttackResolution::NoTarget => {
                let turn = self.state.turn;
                self.channel.log.push(turn, format!("{actor} has nothing to attack"));
            }
            AttackResolution::Trapped(body) => self.emit(body),
            AttackResolution::Landed { message, hit } => {
                self.emit(message);
                self.fighting_triggers(&hit);
            }
        }
    }

    fn fighting_triggers(&mut self, hit: &LandedHit) {
        let registry = Arc::clone(&self.registry);
        let rolls = FightingTriggers::roll(
            &self.state,
            &mut self.rng,
            &registry,
            self.config.cast_decline_base,
            hit,
        );
        for roll in &rolls {
            self.emit(MessageBody::TriggerRolled(TriggerRolled {
                attacker: hit.attacker,
                spell_name: roll.spell.name.clone(),
                copies: roll.copies,
                successes: roll.successes,
            }));
            if !roll.triggered() {
                continue;
            }
            let Some(module) = registry.resolver(&roll.spell.name) else {
                continue;
            };
            let body = self.with_ctx(|ctx| module.resolve_trigger(ctx, hit, roll.successes));
            self.emit(body);
        }
    }

    fn expire(&mut self, actor: &CombatantId, phase: ExpiryPhase) -> Vec<StateChange> {
        let turn = self.state.turn;
        let Some(combatant) = self.state.combatant_mut(actor) else {
            return Vec::new();
        };
        StatusEffectEngine::expire(combatant, phase, turn)
            .into_iter()
            .map(|e| StateChange::StatusRemoved {
                target: *actor,
                status: e.kind,
                stacks: e.stacks,
            })
            .collect()
    }

    fn check_battle_end(&mut self) -> Option<BattleResult> {
        if self.result.is_some() {
            return self.result;
        }
        let host_down = self.state.is_defeated(AbsoluteSide::Host);
        let guest_down = self.state.is_defeated(AbsoluteSide::Guest);
        let winner = match (host_down, guest_down) {
            (false, false) => return None,
            (false, true) => Some(AbsoluteSide::Host),
            (true, false) => Some(AbsoluteSide::Guest),
            (true, true) => None,
        };
        Some(self.finish(winner))
    }

    fn finish(&mut self, winner: Option<AbsoluteSide>) -> BattleResult {
        let result = BattleResult {
            winner,
            rounds: self.state.round,
        };
        info!(?winner, rounds = result.rounds, "battle ended");
        self.emit(MessageBody::BattleEnded(BattleEnded {
            winner,
            rounds: result.rounds,
        }));
        self.result = Some(result);
        result
    }

    fn is_alive(&self, id: &CombatantId) -> bool {
        self.state.combatant(id).is_some_and(|c| c.alive)
    }

    fn with_ctx<R>(&mut self, f: impl FnOnce(&mut ResolveContext<'_>) -> R) -> R {
        let mut ctx = ResolveContext::new(
            &mut self.state,
            &mut self.rng,
            &self.config,
            self.resistance.as_ref(),
            self.damage.as_ref(),
        );
        f(&mut ctx)
    }

    fn emit(&mut self, body: MessageBody) {
        self.channel.emit(&self.state, &self.registry, &self.config, body);
    }
}
