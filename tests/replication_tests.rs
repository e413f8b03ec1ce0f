//! Host to guest replication integration tests.
//!
//! These tests drive a host session, ship its messages to a guest replica
//! (directly or through the JSON codec) and check that the two boards agree.

use duel_engine::cards::{AbilityCatalog, AbilityStack, SpellSchool};
use duel_engine::core::{
    AbsoluteSide, BattleConfig, BattleError, BattleState, Combatant, CombatantId, Hero, Position,
};
use duel_engine::replication::codec;
use duel_engine::session::{ApplyOutcome, GuestSession, HostSession, RecordingPresenter, TurnAction};
use duel_engine::status::{StatusEffectEngine, StatusKind};

fn icebolt_board() -> BattleState {
    let catalog = AbilityCatalog::standard();
    BattleState::new(AbsoluteSide::Host)
        .with_hero(
            Hero::new("Ida", AbsoluteSide::Host, Position::Left, 200, 30)
                .with_ability(AbilityStack::school(SpellSchool::DecayMagic, 2))
                .with_spell(catalog.spell("Icebolt").unwrap()),
        )
        .with_hero(Hero::new("Gale", AbsoluteSide::Guest, Position::Left, 200, 30))
}

/// A board exercising every spell module, creatures and traps.
fn full_roster() -> BattleState {
    let catalog = AbilityCatalog::standard();
    let ida = Hero::new("Ida", AbsoluteSide::Host, Position::Left, 400, 35)
        .with_ability(AbilityStack::school(SpellSchool::DecayMagic, 2))
        .with_ability(AbilityStack::new("Resistance", 1))
        .with_spells(catalog.copies("ToxicTrap", 2).unwrap())
        .with_spell(catalog.spell("Icebolt").unwrap())
        .with_spell(catalog.spell("PoisonPollen").unwrap())
        .with_spell(catalog.spell("VenomInfusion").unwrap())
        .with_creature(Combatant::new("Wolf", 90, 20));
    let bram = Hero::new("Bram", AbsoluteSide::Host, Position::Right, 380, 45)
        .with_ability(AbilityStack::school(SpellSchool::DestructionMagic, 1))
        .with_ability(AbilityStack::school(SpellSchool::Fighting, 1))
        .with_spell(catalog.spell("Fireball").unwrap())
        .with_spell(catalog.spell("GatheringStorm").unwrap())
        .with_spells(catalog.copies("CrashLanding", 2).unwrap())
        .with_spell(catalog.spell("Bloodthirst").unwrap());
    let gale = Hero::new("Gale", AbsoluteSide::Guest, Position::Left, 420, 30)
        .with_ability(AbilityStack::school(SpellSchool::SupportMagic, 2))
        .with_spell(catalog.spell("Stoneskin").unwrap())
        .with_spell(catalog.spell("RallyingCry").unwrap())
        .with_creature(Combatant::new("Imp", 60, 15))
        .with_creature(Combatant::new("Bat", 40, 10));
    let rook = Hero::new("Rook", AbsoluteSide::Guest, Position::Center, 400, 40)
        .with_ability(AbilityStack::new("Resistance", 2))
        .with_ability(AbilityStack::school(SpellSchool::DecayMagic, 1))
        .with_spell(catalog.spell("Icebolt").unwrap())
        .with_spell(catalog.spell("ToxicTrap").unwrap())
        .with_spell(catalog.spell("CrashLanding").unwrap());

    BattleState::new(AbsoluteSide::Host)
        .with_hero(ida)
        .with_hero(bram)
        .with_hero(gale)
        .with_hero(rook)
}

/// A forced Icebolt cast freezes the target on both boards.
#[test]
fn test_icebolt_replicates_frozen_stacks() {
    let board = icebolt_board();
    let config = BattleConfig::new(5).with_cast_decline_base(0.0);
    let mut host = HostSession::new(board.clone(), config.clone()).unwrap();
    let mut guest = GuestSession::new(board.mirrored(), config).unwrap();

    let ida = CombatantId::hero(AbsoluteSide::Host, Position::Left);
    let gale = CombatantId::hero(AbsoluteSide::Guest, Position::Left);

    let action = host.take_turn(ida);
    assert_eq!(action, TurnAction::Cast("Icebolt".to_string()));

    let messages = host.drain_messages();
    let kinds: Vec<_> = messages.iter().map(|m| m.kind()).collect();
    assert_eq!(kinds, vec!["spell_cast", "spell_effect"]);

    let host_frozen = StatusEffectEngine::stacks(host.state().combatant(&gale).unwrap(), StatusKind::Frozen);
    assert_eq!(host_frozen, 2, "DecayMagic 2 freezes for 1 + 2/2 stacks");

    assert_eq!(guest.apply_all(&messages).unwrap(), 2);
    let guest_frozen = StatusEffectEngine::stacks(guest.state().combatant(&gale).unwrap(), StatusKind::Frozen);
    assert_eq!(guest_frozen, 2);
    assert!(guest.log().contains("(2 frozen)"), "guest log: {:?}", guest.log().lines());
    assert!(guest.log().contains("Gale (player)"));
}

/// Messages survive the NDJSON transport unchanged.
#[test]
fn test_json_transport() {
    let board = full_roster();
    let config = BattleConfig::new(21).with_max_rounds(12);
    let mut host = HostSession::new(board.clone(), config.clone()).unwrap();
    let mut guest = GuestSession::new(board.mirrored(), config).unwrap();

    host.run_battle();
    let messages = host.drain_messages();
    let wire = codec::encode_stream(&messages).unwrap();
    assert_eq!(wire.lines().count(), messages.len());

    let applied = guest.receive(&wire).unwrap();
    assert_eq!(applied, messages.len());
    assert_eq!(guest.expected_timestamp(), messages.len() as u64);
    assert_eq!(
        host.state().fingerprint().unwrap(),
        guest.state().fingerprint().unwrap()
    );
    assert_eq!(host.result(), guest.result());
}

/// Full battles with spells, creatures and traps converge on the guest.
#[test]
fn test_full_battle_converges() {
    for seed in [1, 2, 3, 17, 99] {
        let board = full_roster();
        let config = BattleConfig::new(seed);
        let mut host = HostSession::new(board.clone(), config.clone()).unwrap();
        let mut guest = GuestSession::new(board.mirrored(), config).unwrap();

        // Ship messages after every round, as a live transport would.
        loop {
            let done = host.run_round();
            guest.apply_all(&host.drain_messages()).unwrap();
            assert_eq!(
                host.state().fingerprint().unwrap(),
                guest.state().fingerprint().unwrap(),
                "seed {seed} diverged in round {}",
                host.state().round
            );
            assert_eq!(host.state().round, guest.state().round, "seed {seed}: round counter drifted");
            if done.is_some() {
                break;
            }
        }
        assert!(guest.result().is_some(), "seed {seed}: guest saw no battle end");
        assert_eq!(host.result(), guest.result());
    }
}

/// Swaps the perspective words so host and guest lines compare directly.
fn as_seen_by_other_side(line: &str) -> String {
    line.replace("player", "\u{0}")
        .replace("opponent", "player")
        .replace('\u{0}', "opponent")
}

/// Fighting trigger aggregates reach the guest log, not only the host's.
#[test]
fn test_fighting_rolls_logged_on_both_sides() {
    let catalog = AbilityCatalog::standard();
    let board = BattleState::new(AbsoluteSide::Host)
        .with_hero(
            Hero::new("Bram", AbsoluteSide::Host, Position::Left, 400, 45)
                .with_ability(AbilityStack::school(SpellSchool::Fighting, 1))
                .with_spells(catalog.copies("CrashLanding", 3).unwrap()),
        )
        .with_hero(Hero::new("Gale", AbsoluteSide::Guest, Position::Left, 400, 30));
    let config = BattleConfig::new(4).with_max_rounds(3);
    let mut host = HostSession::new(board.clone(), config.clone()).unwrap();
    let mut guest = GuestSession::new(board.mirrored(), config).unwrap();

    host.run_battle();
    let messages = host.drain_messages();
    assert!(messages.iter().any(|m| m.kind() == "trigger_rolled"));
    guest.apply_all(&messages).unwrap();

    let host_lines: Vec<String> = host.log().lines().iter().map(|l| as_seen_by_other_side(l)).collect();
    let guest_lines: Vec<String> = guest.log().lines().iter().map(|l| l.to_string()).collect();
    assert_eq!(host_lines, guest_lines);
    assert!(guest.log().contains("3 CrashLanding spells"), "guest log: {:?}", guest.log().lines());
}

/// Traps are armed before the first round and announced to the guest.
#[test]
fn test_traps_armed_message() {
    let board = full_roster();
    let config = BattleConfig::new(8);
    let mut host = HostSession::new(board.clone(), config).unwrap();
    host.arm_traps();

    let messages = host.drain_messages();
    let armed: Vec<_> = messages.iter().filter(|m| m.kind() == "trap_armed").collect();
    assert_eq!(armed.len(), 2, "Ida and Rook each arm one trap group");

    let ida = CombatantId::hero(AbsoluteSide::Host, Position::Left);
    let trap = StatusEffectEngine::stacks(host.state().combatant(&ida).unwrap(), StatusKind::ToxicTrap);
    assert_eq!(trap, 2);
}

/// A message naming a combatant the guest does not know is skipped whole.
#[test]
fn test_malformed_message_skipped() {
    let board = icebolt_board();
    let config = BattleConfig::new(5).with_cast_decline_base(0.0);
    let mut host = HostSession::new(board.clone(), config.clone()).unwrap();

    // The guest's board lacks Gale, so the Icebolt messages cannot resolve.
    let stripped = BattleState::new(AbsoluteSide::Guest).with_hero(
        board
            .hero(AbsoluteSide::Host, Position::Left)
            .cloned()
            .unwrap(),
    );
    let mut guest = GuestSession::new(stripped, config).unwrap();

    host.take_turn(CombatantId::hero(AbsoluteSide::Host, Position::Left));
    let messages = host.drain_messages();

    let outcome = guest.apply(&messages[1]).err();
    assert!(matches!(outcome, Some(BattleError::OutOfOrder { expected: 0, actual: 1 })));

    let gale = CombatantId::hero(AbsoluteSide::Guest, Position::Left);
    assert_eq!(guest.apply(&messages[0]).unwrap(), ApplyOutcome::Applied);
    assert_eq!(
        guest.apply(&messages[1]).unwrap(),
        ApplyOutcome::Skipped { unresolved: gale }
    );
    assert!(guest.log().contains("skipped spell_effect"));
}

/// Broken JSON is reported instead of applied.
#[test]
fn test_receive_rejects_garbage() {
    let board = icebolt_board();
    let mut guest = GuestSession::new(board.mirrored(), BattleConfig::new(1)).unwrap();
    let err = guest.receive("{\"timestamp\": 0, \"turn\"").unwrap_err();
    assert!(matches!(err, BattleError::Json(_)));
    assert_eq!(guest.expected_timestamp(), 0);
}

/// The presenter sees every applied message, in order.
#[test]
fn test_presenter_receives_stream() {
    let board = icebolt_board();
    let config = BattleConfig::new(5).with_cast_decline_base(0.0);
    let mut host = HostSession::new(board.clone(), config.clone()).unwrap();
    let presenter = RecordingPresenter::default();
    let mut guest = GuestSession::new(board.mirrored(), config)
        .unwrap()
        .with_presenter(presenter);

    host.take_turn(CombatantId::hero(AbsoluteSide::Host, Position::Left));
    let messages = host.drain_messages();
    guest.apply_all(&messages).unwrap();
    assert_eq!(guest.log().len(), messages.len());
}
