//! Canonical target selection.
//!
//! ## Rules
//!
//! - Single target: the opposing hero at the mirrored position, then the
//!   other positions in `left, center, right` order. When creatures are
//!   included, the frontmost living creature (lowest index) of that position
//!   shields its hero; otherwise creatures are ignored and only a living
//!   hero qualifies.
//! - All targets: positions in `left, center, right` order, each living hero
//!   followed by its living creatures in array order. This order drives
//!   animation stagger and equal-priority tie-breaks.

use smallvec::SmallVec;

use super::descriptor::TargetDescriptor;
use crate::core::{AbsoluteSide, BattleState, CombatantId, Hero, LocalSide, Position};

/// Target list sized for a full side (three heroes and a few creatures).
pub type TargetList = SmallVec<[TargetDescriptor; 6]>;

/// Computes targets from battle state.
pub struct TargetResolver;

impl TargetResolver {
    /// Single target for an actor at `position` on local `side`.
    #[must_use]
    pub fn find_target(
        state: &BattleState,
        position: Position,
        side: LocalSide,
        include_creatures: bool,
    ) -> Option<TargetDescriptor> {
        let enemy = state.absolute_side(side).opposite();

        position.search_order().find_map(|pos| {
            let hero = state.hero(enemy, pos)?;
            Self::target_at(hero, include_creatures)
        })
    }

    /// Single target for the combatant `actor`.
    #[must_use]
    pub fn find_target_for(
        state: &BattleState,
        actor: &CombatantId,
        include_creatures: bool,
    ) -> Option<TargetDescriptor> {
        let side = state.local_side(actor.absolute_side);
        Self::find_target(state, actor.position, side, include_creatures)
    }

    /// Every living enemy of local `side`, in canonical order.
    #[must_use]
    pub fn find_all_enemy_targets(state: &BattleState, side: LocalSide) -> TargetList {
        Self::all_on(state, state.absolute_side(side).opposite())
    }

    /// Every living ally of local `side` (heroes and creatures), in canonical order.
    #[must_use]
    pub fn find_all_ally_targets(state: &BattleState, side: LocalSide) -> TargetList {
        Self::all_on(state, state.absolute_side(side))
    }

    fn target_at(hero: &Hero, include_creatures: bool) -> Option<TargetDescriptor> {
        if include_creatures {
            if let Some(index) = hero.living_creatures().next() {
                let id = CombatantId::creature(hero.absolute_side, hero.position, index);
                return Some(TargetDescriptor::creature(id, hero.name(), &hero.creatures[index].name));
            }
        }
        hero.is_alive()
            .then(|| TargetDescriptor::hero(hero.id(), hero.name()))
    }

    fn all_on(state: &BattleState, side: AbsoluteSide) -> TargetList {
        let mut targets = TargetList::new();
        for pos in Position::ALL {
            let Some(hero) = state.hero(side, pos) else {
                continue;
            };
            if hero.is_alive() {
                targets.push(TargetDescriptor::hero(hero.id(), hero.name()));
            }
            for index in hero.living_creatures() {
                let id = CombatantId::creature(side, pos, index);
                targets.push(TargetDescriptor::creature(id, hero.name(), &hero.creatures[index].name));
            }
        }
        targets
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Combatant;
    use crate::targeting::TargetKind;

    fn board() -> BattleState {
        BattleState::new(AbsoluteSide::Host)
            .with_hero(Hero::new("Ida", AbsoluteSide::Host, Position::Left, 300, 40))
            .with_hero(
                Hero::new("Gale", AbsoluteSide::Guest, Position::Left, 300, 40)
                    .with_creature(Combatant::new("Imp", 40, 10))
                    .with_creature(Combatant::new("Bat", 30, 5)),
            )
            .with_hero(Hero::new("Rook", AbsoluteSide::Guest, Position::Right, 300, 40))
    }

    #[test]
    fn test_creature_shields_hero() {
        let state = board();
        let target = TargetResolver::find_target(&state, Position::Left, LocalSide::Player, true).unwrap();
        assert_eq!(target.kind, TargetKind::Creature);
        assert_eq!(target.name(), "Imp");
        assert_eq!(target.creature_index(), Some(0));
    }

    #[test]
    fn test_ignoring_creatures_hits_hero() {
        let state = board();
        let target = TargetResolver::find_target(&state, Position::Left, LocalSide::Player, false).unwrap();
        assert_eq!(target.kind, TargetKind::Hero);
        assert_eq!(target.name(), "Gale");
    }

    #[test]
    fn test_frontmost_living_creature() {
        let mut state = board();
        state
            .combatant_mut(&CombatantId::creature(AbsoluteSide::Guest, Position::Left, 0))
            .unwrap()
            .set_hp(0);
        let target = TargetResolver::find_target(&state, Position::Left, LocalSide::Player, true).unwrap();
        assert_eq!(target.name(), "Bat");
    }

    #[test]
    fn test_falls_back_to_other_positions() {
        let state = board();
        // Nothing at guest/center: left is searched next.
        let target = TargetResolver::find_target(&state, Position::Center, LocalSide::Player, false).unwrap();
        assert_eq!(target.name(), "Gale");
    }

    #[test]
    fn test_dead_hero_with_creatures() {
        let mut state = board();
        state
            .combatant_mut(&CombatantId::hero(AbsoluteSide::Guest, Position::Left))
            .unwrap()
            .set_hp(0);

        let shielded = TargetResolver::find_target(&state, Position::Left, LocalSide::Player, true).unwrap();
        assert_eq!(shielded.name(), "Imp");

        let direct = TargetResolver::find_target(&state, Position::Left, LocalSide::Player, false).unwrap();
        assert_eq!(direct.name(), "Rook");
    }

    #[test]
    fn test_no_target() {
        let state = BattleState::new(AbsoluteSide::Host)
            .with_hero(Hero::new("Ida", AbsoluteSide::Host, Position::Left, 300, 40));
        assert!(TargetResolver::find_target(&state, Position::Left, LocalSide::Player, true).is_none());
        assert!(TargetResolver::find_all_enemy_targets(&state, LocalSide::Player).is_empty());
    }

    #[test]
    fn test_all_enemy_order() {
        let state = board();
        let names: Vec<_> = TargetResolver::find_all_enemy_targets(&state, LocalSide::Player)
            .iter()
            .map(|t| t.name().to_string())
            .collect();
        assert_eq!(names, vec!["Gale", "Imp", "Bat", "Rook"]);
    }

    #[test]
    fn test_guest_view_targets_host() {
        let state = board().mirrored();
        let enemies = TargetResolver::find_all_enemy_targets(&state, LocalSide::Player);
        assert_eq!(enemies.len(), 1);
        assert_eq!(enemies[0].name(), "Ida");

        let allies = TargetResolver::find_all_ally_targets(&state, LocalSide::Player);
        assert_eq!(allies.len(), 4);
    }

    #[test]
    fn test_find_target_for_actor() {
        let state = board();
        let actor = CombatantId::hero(AbsoluteSide::Guest, Position::Right);
        let target = TargetResolver::find_target_for(&state, &actor, true).unwrap();
        assert_eq!(target.absolute_side(), AbsoluteSide::Host);
        assert_eq!(target.name(), "Ida");
    }
}
