//! Read-only spell catalog.
//!
//! The `AbilityCatalog` stores the static definition of every spell a game
//! knows about and supplies `level` / `school` / `subtype` lookups. Loadouts
//! are built from it; the engine never mutates it during a battle.

use rustc_hash::FxHashMap;

use super::definition::{SpellDefinition, SpellSchool, Subtype};
use crate::core::BattleError;

/// Catalog of spell definitions keyed by name.
///
/// ```
/// use duel_engine::cards::AbilityCatalog;
///
/// let catalog = AbilityCatalog::standard();
/// let bolt = catalog.get("Icebolt").unwrap();
/// assert_eq!(bolt.level, 1);
/// ```
#[derive(Clone, Debug, Default)]
pub struct AbilityCatalog {
    spells: FxHashMap<String, SpellDefinition>,
}

impl AbilityCatalog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Catalog of every spell shipped in `spells::library`.
    #[must_use]
    pub fn standard() -> Self {
        let mut catalog = Self::new();
        let entries = [
            SpellDefinition::new("Icebolt", 1, SpellSchool::DecayMagic),
            SpellDefinition::new("PoisonPollen", 2, SpellSchool::DecayMagic),
            SpellDefinition::new("VenomInfusion", 1, SpellSchool::DecayMagic),
            SpellDefinition::new("ToxicTrap", 1, SpellSchool::DecayMagic).with_subtype(Subtype::Trap),
            SpellDefinition::new("Fireball", 1, SpellSchool::DestructionMagic),
            SpellDefinition::new("GatheringStorm", 3, SpellSchool::DestructionMagic),
            SpellDefinition::new("Stoneskin", 1, SpellSchool::SupportMagic),
            SpellDefinition::new("RallyingCry", 1, SpellSchool::SupportMagic),
            SpellDefinition::new("CrashLanding", 1, SpellSchool::Fighting),
            SpellDefinition::new("Bloodthirst", 2, SpellSchool::Fighting),
        ];
        for spell in entries {
            // Names above are unique.
            catalog.spells.insert(spell.name.clone(), spell);
        }
        catalog
    }

    /// Register a definition. Names must be unique.
    pub fn register(&mut self, spell: SpellDefinition) -> Result<(), BattleError> {
        if self.spells.contains_key(&spell.name) {
            return Err(BattleError::DuplicateSpell(spell.name));
        }
        self.spells.insert(spell.name.clone(), spell);
        Ok(())
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&SpellDefinition> {
        self.spells.get(name)
    }

    /// Owned copy of a definition, for building a spellbook.
    pub fn spell(&self, name: &str) -> Result<SpellDefinition, BattleError> {
        self.get(name)
            .cloned()
            .ok_or_else(|| BattleError::UnknownSpell(name.to_string()))
    }

    /// Several copies of one spell, for loadouts with duplicates.
    pub fn copies(&self, name: &str, count: usize) -> Result<Vec<SpellDefinition>, BattleError> {
        let spell = self.spell(name)?;
        Ok(vec![spell; count])
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.spells.contains_key(name)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.spells.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.spells.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &SpellDefinition> {
        self.spells.values()
    }

    pub fn by_school(&self, school: SpellSchool) -> impl Iterator<Item = &SpellDefinition> {
        self.spells.values().filter(move |s| s.school == school)
    }
}
