//! Targeting integration tests.
//!
//! Targets are computed from absolute sides, so the host and the guest pick
//! the same combatant whichever perspective they look from.

use duel_engine::core::{
    AbsoluteSide, BattleState, Combatant, CombatantId, Hero, LocalSide, Position,
};
use duel_engine::targeting::{TargetDescriptor, TargetResolver};
use proptest::prelude::*;

fn side() -> impl Strategy<Value = AbsoluteSide> {
    prop::sample::select(AbsoluteSide::ALL.to_vec())
}

fn position() -> impl Strategy<Value = Position> {
    prop::sample::select(Position::ALL.to_vec())
}

fn board() -> BattleState {
    BattleState::new(AbsoluteSide::Host)
        .with_hero(
            Hero::new("Ida", AbsoluteSide::Host, Position::Left, 300, 40)
                .with_creature(Combatant::new("Wolf", 60, 15)),
        )
        .with_hero(Hero::new("Bram", AbsoluteSide::Host, Position::Right, 300, 40))
        .with_hero(
            Hero::new("Gale", AbsoluteSide::Guest, Position::Center, 300, 40)
                .with_creature(Combatant::new("Imp", 40, 10)),
        )
        .with_hero(Hero::new("Rook", AbsoluteSide::Guest, Position::Right, 300, 40))
}

/// With no hero at the mirrored slot the search falls back to left first.
#[test]
fn test_fallback_search_order() {
    let state = board();
    let ida = CombatantId::hero(AbsoluteSide::Host, Position::Left);
    let target = TargetResolver::find_target_for(&state, &ida, false).unwrap();
    assert_eq!(target.id, CombatantId::hero(AbsoluteSide::Guest, Position::Center));
}

/// The living creature in front is hit before its hero.
#[test]
fn test_creature_shields_until_dead() {
    let mut state = board();
    let rook = CombatantId::hero(AbsoluteSide::Guest, Position::Right);
    let wolf = CombatantId::creature(AbsoluteSide::Host, Position::Left, 0);

    // Bram stands at the mirrored slot, so Rook targets Bram.
    let target = TargetResolver::find_target_for(&state, &rook, true).unwrap();
    assert_eq!(target.id, CombatantId::hero(AbsoluteSide::Host, Position::Right));

    // Gale has no mirror at center and falls back to Ida, shielded by Wolf.
    let gale = CombatantId::hero(AbsoluteSide::Guest, Position::Center);
    let target = TargetResolver::find_target_for(&state, &gale, true).unwrap();
    assert_eq!(target.id, wolf);

    state.combatant_mut(&wolf).unwrap().set_hp(0);
    let target = TargetResolver::find_target_for(&state, &gale, true).unwrap();
    assert_eq!(target.id, CombatantId::hero(AbsoluteSide::Host, Position::Left));
}

/// Area targets: positions in order, each hero before its creatures.
#[test]
fn test_all_targets_canonical_order() {
    let state = board();
    let ids: Vec<_> = TargetResolver::find_all_enemy_targets(&state, LocalSide::Player)
        .iter()
        .map(|t| t.id)
        .collect();
    assert_eq!(
        ids,
        vec![
            CombatantId::hero(AbsoluteSide::Guest, Position::Center),
            CombatantId::creature(AbsoluteSide::Guest, Position::Center, 0),
            CombatantId::hero(AbsoluteSide::Guest, Position::Right),
        ]
    );
}

/// Labels depend on who is looking.
#[test]
fn test_describe_per_perspective() {
    let state = board();
    let gale = CombatantId::hero(AbsoluteSide::Guest, Position::Center);
    let target = TargetResolver::find_target_for(&state, &gale, true).unwrap();
    assert_eq!(target.describe(AbsoluteSide::Host), "Wolf (Ida's creature, player)");
    assert_eq!(target.describe(AbsoluteSide::Guest), "Wolf (Ida's creature, opponent)");
}

/// A wiped-out side offers no target.
#[test]
fn test_no_target() {
    let mut state = board();
    for id in [
        CombatantId::hero(AbsoluteSide::Guest, Position::Center),
        CombatantId::creature(AbsoluteSide::Guest, Position::Center, 0),
        CombatantId::hero(AbsoluteSide::Guest, Position::Right),
    ] {
        state.combatant_mut(&id).unwrap().set_hp(0);
    }
    let ida = CombatantId::hero(AbsoluteSide::Host, Position::Left);
    assert!(TargetResolver::find_target_for(&state, &ida, true).is_none());
    assert!(state.is_defeated(AbsoluteSide::Guest));
}

proptest! {
    /// `to_absolute` undoes `from_absolute` for every pair of sides.
    #[test]
    fn prop_side_mapping_round_trip(subject in side(), me in side()) {
        let local = LocalSide::from_absolute(subject, me);
        prop_assert_eq!(local.to_absolute(me), subject);
        prop_assert_eq!(LocalSide::from_absolute(subject, me.opposite()), local.opposite());
    }

    /// Both perspectives pick the same target for the same actor.
    #[test]
    fn prop_target_independent_of_perspective(
        actor_side in side(),
        pos in position(),
        include_creatures in any::<bool>(),
    ) {
        let host_view = board();
        let guest_view = host_view.mirrored();
        let actor = CombatantId::hero(actor_side, pos);

        let from_host = TargetResolver::find_target_for(&host_view, &actor, include_creatures);
        let from_guest = TargetResolver::find_target_for(&guest_view, &actor, include_creatures);
        prop_assert_eq!(from_host.clone(), from_guest);

        if let Some(target) = from_host {
            prop_assert_ne!(target.absolute_side(), actor_side);
            prop_assert_eq!(TargetDescriptor::for_id(&host_view, target.id), Some(target));
        }
    }
}
