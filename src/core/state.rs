//! Battle state.
//!
//! `BattleState` holds every hero (and its creatures) keyed by absolute side
//! and position, plus the viewing process's own side. Nothing stored here is
//! viewpoint-relative: the host's canonical state and the guest's mirror hold
//! identical hero data, which is what [`BattleState::fingerprint`] checks.

use rustc_hash::FxHasher;
use serde::{Deserialize, Serialize};
use std::hash::Hasher;

use super::combatant::{Combatant, CombatantId, Hero};
use super::error::BattleError;
use super::side::{AbsoluteSide, LocalSide, Position};

/// All heroes on the board as seen by one process.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct BattleState {
    /// The side this process plays.
    perspective: AbsoluteSide,

    /// Actor turns resolved so far (starts at 0, first turn is 1).
    pub turn: u32,

    /// Rounds started so far.
    pub round: u32,

    /// Sorted by `(absolute_side, position)`.
    heroes: Vec<Hero>,
}

impl BattleState {
    #[must_use]
    pub fn new(perspective: AbsoluteSide) -> Self {
        Self {
            perspective,
            turn: 0,
            round: 0,
            heroes: Vec::new(),
        }
    }

    #[must_use]
    pub fn perspective(&self) -> AbsoluteSide {
        self.perspective
    }

    /// Same board viewed from the other process.
    #[must_use]
    pub fn mirrored(&self) -> Self {
        Self {
            perspective: self.perspective.opposite(),
            ..self.clone()
        }
    }

    /// Place a hero, replacing any hero in the same slot.
    pub fn place_hero(&mut self, hero: Hero) {
        let key = (hero.absolute_side, hero.position);
        match self
            .heroes
            .binary_search_by_key(&key, |h| (h.absolute_side, h.position))
        {
            Ok(i) => self.heroes[i] = hero,
            Err(i) => self.heroes.insert(i, hero),
        }
    }

    #[must_use]
    pub fn with_hero(mut self, hero: Hero) -> Self {
        self.place_hero(hero);
        self
    }

    #[must_use]
    pub fn hero(&self, side: AbsoluteSide, position: Position) -> Option<&Hero> {
        self.heroes
            .iter()
            .find(|h| h.absolute_side == side && h.position == position)
    }

    pub fn hero_mut(&mut self, side: AbsoluteSide, position: Position) -> Option<&mut Hero> {
        self.heroes
            .iter_mut()
            .find(|h| h.absolute_side == side && h.position == position)
    }

    /// Every hero, host first, then by position.
    pub fn heroes(&self) -> impl Iterator<Item = &Hero> {
        self.heroes.iter()
    }

    /// Heroes of one side in position order.
    pub fn heroes_of(&self, side: AbsoluteSide) -> impl Iterator<Item = &Hero> {
        self.heroes.iter().filter(move |h| h.absolute_side == side)
    }

    #[must_use]
    pub fn combatant(&self, id: &CombatantId) -> Option<&Combatant> {
        let hero = self.hero(id.absolute_side, id.position)?;
        match id.creature_index {
            None => Some(&hero.base),
            Some(i) => hero.creatures.get(i),
        }
    }

    pub fn combatant_mut(&mut self, id: &CombatantId) -> Option<&mut Combatant> {
        let hero = self.hero_mut(id.absolute_side, id.position)?;
        match id.creature_index {
            None => Some(&mut hero.base),
            Some(i) => hero.creatures.get_mut(i),
        }
    }

    /// The hero owning `id` (the hero itself, or the creature's master).
    #[must_use]
    pub fn owner_of(&self, id: &CombatantId) -> Option<&Hero> {
        self.hero(id.absolute_side, id.position)
    }

    #[must_use]
    pub fn contains(&self, id: &CombatantId) -> bool {
        self.combatant(id).is_some()
    }

    /// Local label of an absolute side for this process.
    #[must_use]
    pub fn local_side(&self, side: AbsoluteSide) -> LocalSide {
        LocalSide::from_absolute(side, self.perspective)
    }

    /// Absolute side behind a local label for this process.
    #[must_use]
    pub fn absolute_side(&self, side: LocalSide) -> AbsoluteSide {
        side.to_absolute(self.perspective)
    }

    /// True when the side has no living hero and no living creature.
    #[must_use]
    pub fn is_defeated(&self, side: AbsoluteSide) -> bool {
        !self.heroes_of(side).any(Hero::is_standing)
    }

    /// Hash of the viewpoint-independent hero data.
    ///
    /// Host and guest states that agree on every hero, creature, HP value and
    /// status stack produce the same fingerprint.
    pub fn fingerprint(&self) -> Result<u64, BattleError> {
        let bytes = bincode::serialize(&self.heroes)?;
        let mut hasher = FxHasher::default();
        hasher.write(&bytes);
        Ok(hasher.finish())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> BattleState {
        BattleState::new(AbsoluteSide::Host)
            .with_hero(Hero::new("Gale", AbsoluteSide::Guest, Position::Right, 200, 30))
            .with_hero(Hero::new("Ida", AbsoluteSide::Host, Position::Center, 250, 40))
            .with_hero(
                Hero::new("Bram", AbsoluteSide::Host, Position::Left, 300, 50)
                    .with_creature(Combatant::new("Wolf", 50, 10)),
            )
    }

    #[test]
    fn test_heroes_sorted() {
        let state = sample();
        let names: Vec<_> = state.heroes().map(Hero::name).collect();
        assert_eq!(names, vec!["Bram", "Ida", "Gale"]);
    }

    #[test]
    fn test_place_replaces_slot() {
        let mut state = sample();
        state.place_hero(Hero::new("Ivy", AbsoluteSide::Host, Position::Center, 10, 1));
        assert_eq!(state.heroes().count(), 3);
        assert_eq!(state.hero(AbsoluteSide::Host, Position::Center).unwrap().name(), "Ivy");
    }

    #[test]
    fn test_combatant_lookup() {
        let state = sample();
        let wolf = CombatantId::creature(AbsoluteSide::Host, Position::Left, 0);
        assert_eq!(state.combatant(&wolf).unwrap().name, "Wolf");

        let missing = CombatantId::creature(AbsoluteSide::Host, Position::Left, 3);
        assert!(state.combatant(&missing).is_none());
        assert!(!state.contains(&CombatantId::hero(AbsoluteSide::Guest, Position::Left)));
    }

    #[test]
    fn test_local_side_per_perspective() {
        let host_view = sample();
        let guest_view = host_view.mirrored();

        assert_eq!(host_view.local_side(AbsoluteSide::Host), LocalSide::Player);
        assert_eq!(guest_view.local_side(AbsoluteSide::Host), LocalSide::Opponent);
        assert_eq!(guest_view.absolute_side(LocalSide::Player), AbsoluteSide::Guest);
    }

    #[test]
    fn test_fingerprint_ignores_perspective() {
        let host_view = sample();
        let guest_view = host_view.mirrored();
        assert_eq!(host_view.fingerprint().unwrap(), guest_view.fingerprint().unwrap());

        let mut changed = host_view.clone();
        changed
            .combatant_mut(&CombatantId::hero(AbsoluteSide::Guest, Position::Right))
            .unwrap()
            .take_damage(1);
        assert_ne!(host_view.fingerprint().unwrap(), changed.fingerprint().unwrap());
    }

    #[test]
    fn test_defeat() {
        let mut state = sample();
        assert!(!state.is_defeated(AbsoluteSide::Guest));
        state
            .combatant_mut(&CombatantId::hero(AbsoluteSide::Guest, Position::Right))
            .unwrap()
            .set_hp(0);
        assert!(state.is_defeated(AbsoluteSide::Guest));

        state
            .combatant_mut(&CombatantId::hero(AbsoluteSide::Host, Position::Left))
            .unwrap()
            .set_hp(0);
        state
            .combatant_mut(&CombatantId::hero(AbsoluteSide::Host, Position::Center))
            .unwrap()
            .set_hp(0);
        assert!(!state.is_defeated(AbsoluteSide::Host), "wolf still stands");
    }
}
