//! Named, ordered collection of scenario factories.
//!
//! The entry point that orchestrates a run owns the catalog; nothing is registered behind its back.

use thiserror::Error;

use crate::engine::{RegistryManager, ScenarioError};

/// Builds a fresh, unrun scenario.
pub type ScenarioFactory = fn() -> Result<RegistryManager, ScenarioError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    #[error("a scenario named '{0}' is already registered")]
    DuplicateScenario(String),

    #[error("unknown scenario '{0}'")]
    UnknownScenario(String),

    #[error(transparent)]
    Scenario(#[from] ScenarioError),
}

/// Scenario factories keyed by name, in registration order.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    entries: Vec<(String, ScenarioFactory)>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, name: impl Into<String>, factory: ScenarioFactory) -> Result<&mut Self, CatalogError> {
        let name = name.into();
        if self.contains(&name) {
            return Err(CatalogError::DuplicateScenario(name));
        }
        self.entries.push((name, factory));
        Ok(self)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> + '_ {
        self.entries.iter().map(|(name, _)| name.as_str())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.iter().any(|(entry, _)| entry == name)
    }

    /// Build a fresh manager for `name`.
    pub fn build(&self, name: &str) -> Result<RegistryManager, CatalogError> {
        let (_, factory) = self
            .entries
            .iter()
            .find(|(entry, _)| entry == name)
            .ok_or_else(|| CatalogError::UnknownScenario(name.to_string()))?;
        Ok(factory()?)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
