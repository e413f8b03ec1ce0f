//! Spell definitions - static card data.
//!
//! A `SpellDefinition` is what a hero carries in its spellbook. It never
//! changes during a battle. The hero's mastery of the spell's school lives
//! separately in its ability stacks (`AbilityStack`).

use serde::{Deserialize, Serialize};

/// School a spell belongs to.
///
/// Each school is also the name of the hero ability whose stack count is the
/// caster's mastery of that school.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SpellSchool {
    DecayMagic,
    DestructionMagic,
    SupportMagic,
    SummoningMagic,
    MagicArts,
    /// Resolved as post-attack triggers, never cast.
    Fighting,
}

impl SpellSchool {
    /// Name of the hero ability that measures mastery of this school.
    #[must_use]
    pub const fn ability_name(self) -> &'static str {
        match self {
            SpellSchool::DecayMagic => "DecayMagic",
            SpellSchool::DestructionMagic => "DestructionMagic",
            SpellSchool::SupportMagic => "SupportMagic",
            SpellSchool::SummoningMagic => "SummoningMagic",
            SpellSchool::MagicArts => "MagicArts",
            SpellSchool::Fighting => "Fighting",
        }
    }
}

impl std::fmt::Display for SpellSchool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.ability_name())
    }
}

/// Spell subtype.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Subtype {
    #[default]
    Normal,
    /// Set before combat; never cast mid-combat.
    Trap,
}

/// Static spell data.
///
/// ```
/// use duel_engine::cards::{SpellDefinition, SpellSchool, Subtype};
///
/// let trap = SpellDefinition::new("ToxicTrap", 1, SpellSchool::DecayMagic)
///     .with_subtype(Subtype::Trap);
///
/// assert!(trap.is_trap());
/// assert!(!trap.is_castable());
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SpellDefinition {
    pub name: String,
    pub level: u32,
    pub school: SpellSchool,
    #[serde(default)]
    pub subtype: Subtype,
}

impl SpellDefinition {
    pub fn new(name: impl Into<String>, level: u32, school: SpellSchool) -> Self {
        Self {
            name: name.into(),
            level,
            school,
            subtype: Subtype::Normal,
        }
    }

    #[must_use]
    pub fn with_subtype(mut self, subtype: Subtype) -> Self {
        self.subtype = subtype;
        self
    }

    #[must_use]
    pub fn is_trap(&self) -> bool {
        self.subtype == Subtype::Trap
    }

    #[must_use]
    pub fn is_fighting(&self) -> bool {
        self.school == SpellSchool::Fighting
    }

    /// Whether the spell may be chosen by the pre-attack casting pipeline.
    #[must_use]
    pub fn is_castable(&self) -> bool {
        !self.is_trap() && !self.is_fighting()
    }
}

/// A stacked hero ability such as `DecayMagic` x2.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AbilityStack {
    pub name: String,
    pub level: u32,
}

impl AbilityStack {
    pub fn new(name: impl Into<String>, level: u32) -> Self {
        Self {
            name: name.into(),
            level,
        }
    }

    /// Mastery stack for a school.
    pub fn school(school: SpellSchool, level: u32) -> Self {
        Self::new(school.ability_name(), level)
    }
}
