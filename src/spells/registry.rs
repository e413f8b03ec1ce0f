//! Spell module registry.
//!
//! Maps spell names to their resolver (host) and replicator (guest). Both
//! sides build the same registry; each uses only its half.

use std::sync::Arc;

use rustc_hash::FxHashMap;
use tracing::trace;

use super::contract::{SpellReplicator, SpellResolver};
use super::library;
use crate::core::BattleError;

/// Name-keyed spell modules.
///
/// ```
/// use duel_engine::spells::SpellRegistry;
///
/// let registry = SpellRegistry::standard().unwrap();
/// assert!(registry.resolver("Icebolt").is_some());
/// assert!(registry.replicator("Icebolt").is_some());
/// assert!(registry.resolver("Meteor").is_none());
/// ```
#[derive(Clone, Default)]
pub struct SpellRegistry {
    resolvers: FxHashMap<&'static str, Arc<dyn SpellResolver>>,
    replicators: FxHashMap<&'static str, Arc<dyn SpellReplicator>>,
}

impl SpellRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with every built-in spell module.
    pub fn standard() -> Result<Self, BattleError> {
        let mut registry = Self::new();
        library::register_all(&mut registry)?;
        Ok(registry)
    }

    /// Register a module under its resolver name.
    pub fn register<M>(&mut self, module: M) -> Result<(), BattleError>
    where
        M: SpellResolver + SpellReplicator + 'static,
    {
        let name = module.name();
        if self.resolvers.contains_key(name) {
            return Err(BattleError::DuplicateSpell(name.to_string()));
        }
        trace!(spell = name, school = %module.school(), "registered spell module");
        let module = Arc::new(module);
        self.resolvers.insert(name, module.clone());
        self.replicators.insert(name, module);
        Ok(())
    }

    #[must_use]
    pub fn resolver(&self, name: &str) -> Option<&Arc<dyn SpellResolver>> {
        self.resolvers.get(name)
    }

    #[must_use]
    pub fn replicator(&self, name: &str) -> Option<&Arc<dyn SpellReplicator>> {
        self.replicators.get(name)
    }

    /// Resolver or `UnknownSpell`.
    pub fn require(&self, name: &str) -> Result<&Arc<dyn SpellResolver>, BattleError> {
        self.resolver(name)
            .ok_or_else(|| BattleError::UnknownSpell(name.to_string()))
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.resolvers.contains_key(name)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.resolvers.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.resolvers.is_empty()
    }
}

impl std::fmt::Debug for SpellRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut names: Vec<_> = self.resolvers.keys().collect();
        names.sort();
        f.debug_struct("SpellRegistry").field("spells", &names).finish()
    }
}
