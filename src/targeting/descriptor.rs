//! Target descriptors.

use crate::core::{AbsoluteSide, BattleState, CombatantId, LocalSide, Position};

/// Whether a target is a hero or one of its creatures.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TargetKind {
    Hero,
    Creature,
}

/// A resolved target. Transient: produced by the resolver, consumed by
/// effect modules, never stored.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TargetDescriptor {
    pub kind: TargetKind,
    pub id: CombatantId,
    pub hero_name: String,
    pub creature_name: Option<String>,
}

impl TargetDescriptor {
    pub(crate) fn hero(id: CombatantId, hero_name: &str) -> Self {
        Self {
            kind: TargetKind::Hero,
            id,
            hero_name: hero_name.to_string(),
            creature_name: None,
        }
    }

    pub(crate) fn creature(id: CombatantId, hero_name: &str, creature_name: &str) -> Self {
        Self {
            kind: TargetKind::Creature,
            id,
            hero_name: hero_name.to_string(),
            creature_name: Some(creature_name.to_string()),
        }
    }

    /// Descriptor for an existing combatant id, if it resolves.
    #[must_use]
    pub fn for_id(state: &BattleState, id: CombatantId) -> Option<Self> {
        let hero = state.owner_of(&id)?;
        match id.creature_index {
            None => Some(Self::hero(id, hero.name())),
            Some(i) => hero
                .creatures
                .get(i)
                .map(|c| Self::creature(id, hero.name(), &c.name)),
        }
    }

    #[must_use]
    pub fn is_creature(&self) -> bool {
        self.kind == TargetKind::Creature
    }

    #[must_use]
    pub fn absolute_side(&self) -> AbsoluteSide {
        self.id.absolute_side
    }

    #[must_use]
    pub fn position(&self) -> Position {
        self.id.position
    }

    #[must_use]
    pub fn creature_index(&self) -> Option<usize> {
        self.id.creature_index
    }

    /// Side label as seen from `perspective`.
    #[must_use]
    pub fn local_side(&self, perspective: AbsoluteSide) -> LocalSide {
        LocalSide::from_absolute(self.id.absolute_side, perspective)
    }

    /// Display name: the creature's, or the hero's.
    #[must_use]
    pub fn name(&self) -> &str {
        self.creature_name.as_deref().unwrap_or(&self.hero_name)
    }

    /// Log label, e.g. `Imp (Gale's creature, opponent)`.
    #[must_use]
    pub fn describe(&self, perspective: AbsoluteSide) -> String {
        let side = self.local_side(perspective);
        match &self.creature_name {
            Some(creature) => format!("{creature} ({}'s creature, {side})", self.hero_name),
            None => format!("{} ({side})", self.hero_name),
        }
    }
}
