//! Heroes, creatures, and how to address them.
//!
//! A [`CombatantId`] names one combatant in viewpoint-independent terms
//! (`absolute_side` + `position` + optional `creature_index`), so the same id
//! resolves to the same combatant on the host and on the guest.

use serde::{Deserialize, Serialize};

use super::side::{AbsoluteSide, Position};
use crate::cards::{AbilityStack, SpellDefinition, SpellSchool};
use crate::status::StatusEffectInstance;

/// Stable address of a hero or one of its creatures.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CombatantId {
    pub absolute_side: AbsoluteSide,
    pub position: Position,
    /// Index into the hero's creature list; `None` addresses the hero.
    pub creature_index: Option<usize>,
}

impl CombatantId {
    #[must_use]
    pub const fn hero(absolute_side: AbsoluteSide, position: Position) -> Self {
        Self {
            absolute_side,
            position,
            creature_index: None,
        }
    }

    #[must_use]
    pub const fn creature(absolute_side: AbsoluteSide, position: Position, index: usize) -> Self {
        Self {
            absolute_side,
            position,
            creature_index: Some(index),
        }
    }

    #[must_use]
    pub const fn is_hero(&self) -> bool {
        self.creature_index.is_none()
    }

    /// The hero this combatant belongs to (itself for heroes).
    #[must_use]
    pub const fn owner(&self) -> Self {
        Self::hero(self.absolute_side, self.position)
    }
}

impl std::fmt::Display for CombatantId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.creature_index {
            Some(i) => write!(f, "{}/{}#{}", self.absolute_side, self.position, i),
            None => write!(f, "{}/{}", self.absolute_side, self.position),
        }
    }
}

/// Hit points, status effects and attack of any fighter.
///
/// `alive == (current_hp > 0)` holds after every mutation made through these
/// methods; dying clears all status effects.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Combatant {
    pub name: String,
    pub max_hp: u32,
    pub current_hp: u32,
    pub alive: bool,
    pub attack: u32,
    pub statuses: Vec<StatusEffectInstance>,
}

impl Combatant {
    pub fn new(name: impl Into<String>, max_hp: u32, attack: u32) -> Self {
        Self {
            name: name.into(),
            max_hp,
            current_hp: max_hp,
            alive: max_hp > 0,
            attack,
            statuses: Vec::new(),
        }
    }

    /// Set HP directly (clamped to `max_hp`). Returns `true` if this killed it.
    pub fn set_hp(&mut self, hp: u32) -> bool {
        let was_alive = self.alive;
        self.current_hp = hp.min(self.max_hp);
        self.alive = self.current_hp > 0;
        if !self.alive {
            self.statuses.clear();
        }
        was_alive && !self.alive
    }

    /// Subtract HP. Returns the damage actually taken.
    pub fn take_damage(&mut self, amount: u32) -> u32 {
        let dealt = amount.min(self.current_hp);
        self.set_hp(self.current_hp - dealt);
        dealt
    }

    /// Restore HP up to `max_hp`. Dead combatants cannot be healed.
    pub fn heal(&mut self, amount: u32) -> u32 {
        if !self.alive {
            return 0;
        }
        let healed = amount.min(self.max_hp - self.current_hp);
        self.set_hp(self.current_hp + healed);
        healed
    }
}

/// A hero: a combatant with a board slot, abilities, spells and creatures.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Hero {
    pub base: Combatant,
    pub absolute_side: AbsoluteSide,
    pub position: Position,
    pub abilities: Vec<AbilityStack>,
    pub spellbook: Vec<SpellDefinition>,
    pub creatures: Vec<Combatant>,
}

impl Hero {
    pub fn new(
        name: impl Into<String>,
        absolute_side: AbsoluteSide,
        position: Position,
        max_hp: u32,
        attack: u32,
    ) -> Self {
        Self {
            base: Combatant::new(name, max_hp, attack),
            absolute_side,
            position,
            abilities: Vec::new(),
            spellbook: Vec::new(),
            creatures: Vec::new(),
        }
    }

    #[must_use]
    pub fn id(&self) -> CombatantId {
        CombatantId::hero(self.absolute_side, self.position)
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.base.name
    }

    #[must_use]
    pub fn is_alive(&self) -> bool {
        self.base.alive
    }

    /// Stack count of a named ability, 0 if absent.
    #[must_use]
    pub fn ability_level(&self, name: &str) -> u32 {
        self.abilities
            .iter()
            .filter(|a| a.name == name)
            .map(|a| a.level)
            .sum()
    }

    /// Mastery of a spell school.
    #[must_use]
    pub fn school_level(&self, school: SpellSchool) -> u32 {
        self.ability_level(school.ability_name())
    }

    /// Indices of living creatures, front first.
    pub fn living_creatures(&self) -> impl Iterator<Item = usize> + '_ {
        self.creatures
            .iter()
            .enumerate()
            .filter(|(_, c)| c.alive)
            .map(|(i, _)| i)
    }

    #[must_use]
    pub fn has_living_creatures(&self) -> bool {
        self.creatures.iter().any(|c| c.alive)
    }

    /// Hero alive or any creature alive.
    #[must_use]
    pub fn is_standing(&self) -> bool {
        self.is_alive() || self.has_living_creatures()
    }

    #[must_use]
    pub fn with_ability(mut self, ability: AbilityStack) -> Self {
        match self.abilities.iter_mut().find(|a| a.name == ability.name) {
            Some(existing) => existing.level += ability.level,
            None => self.abilities.push(ability),
        }
        self
    }

    #[must_use]
    pub fn with_spell(mut self, spell: SpellDefinition) -> Self {
        self.spellbook.push(spell);
        self
    }

    #[must_use]
    pub fn with_spells(mut self, spells: impl IntoIterator<Item = SpellDefinition>) -> Self {
        self.spellbook.extend(spells);
        self
    }

    #[must_use]
    pub fn with_creature(mut self, creature: Combatant) -> Self {
        self.creatures.push(creature);
        self
    }
}
