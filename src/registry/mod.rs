//! Provider registry
//!
//! Maps stable string keys to factories of physical models, variable sets
//! and transformers. Keys appear in saved configurations, so they are
//! case-sensitive and never change.
//!
//! # Lifecycle
//!
//! Providers are collected in a [`RegistryBuilder`], which rejects duplicate
//! `(contract, dimension, key)` registrations. [`RegistryBuilder::build`]
//! freezes the table into a [`ProviderRegistry`] that is only ever read,
//! from any number of threads.
//!
//! The built-in providers are available through [`ProviderRegistry::global`],
//! built on first use:
//!
//! ```rust
//! use varset_rs::physics::{Contract, Dimension};
//! use varset_rs::registry::ProviderRegistry;
//!
//! let registry = ProviderRegistry::global().unwrap();
//! assert!(registry.contains(Contract::PhysicalModel, "ICPNEQ3D", Dimension::Dim3));
//! assert!(registry.contains(Contract::VarSetTransformer, "EulerMFMHD2DRhoiViTiToCons", Dimension::Dim2));
//! ```

mod builtin;

pub use builtin::register_builtin;

use std::collections::HashMap;
use std::fmt;
use std::sync::OnceLock;

use crate::models::config::ModelConfig;
use crate::physics::error::{Contract, PhysicsError, PhysicsResult};
use crate::physics::term::ConvectiveTerm;
use crate::physics::traits::{Dimension, PhysicalModel};
use crate::transform::VarSetTransformer;
use crate::varset::VarSet;

// =================================================================================================
// Factories
// =================================================================================================

/// Builds a physical model from its configuration
pub type ModelFactory = fn(Dimension, &ModelConfig) -> PhysicsResult<Box<dyn PhysicalModel>>;

/// Builds a variable set (not yet set up) from a model's term
pub type VarSetFactory = fn(Dimension, &ConvectiveTerm) -> PhysicsResult<Box<dyn VarSet>>;

/// Builds a transformer from a model's term
pub type TransformerFactory = fn(Dimension, &ConvectiveTerm) -> PhysicsResult<Box<dyn VarSetTransformer>>;

/// A factory tagged with the contract it satisfies
#[derive(Clone, Copy)]
pub enum Provider {
    Model(ModelFactory),
    VarSet(VarSetFactory),
    Transformer(TransformerFactory),
}

impl Provider {
    pub fn contract(&self) -> Contract {
        match self {
            Provider::Model(_) => Contract::PhysicalModel,
            Provider::VarSet(_) => Contract::VarSet,
            Provider::Transformer(_) => Contract::VarSetTransformer,
        }
    }
}

impl fmt::Debug for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Provider({})", self.contract())
    }
}

type ProviderKey = (Contract, Dimension, String);

// =================================================================================================
// Builder
// =================================================================================================

/// Mutable registration phase
#[derive(Debug, Default)]
pub struct RegistryBuilder {
    providers: HashMap<ProviderKey, Provider>,
}

impl RegistryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `provider` under `key` for `dimension`
    ///
    /// Fails with [`PhysicsError::DuplicateProvider`] if the key is already
    /// taken for the provider's contract and this dimension. The first
    /// registration is kept.
    pub fn register(&mut self, key: &str, dimension: Dimension, provider: Provider) -> PhysicsResult<&mut Self> {
        let contract = provider.contract();
        let entry = (contract, dimension, key.to_string());
        if self.providers.contains_key(&entry) {
            return Err(PhysicsError::DuplicateProvider {
                key: key.to_string(),
                contract,
                dimension,
            });
        }

        log::debug!("registering {} provider '{}' ({})", contract, key, dimension);
        self.providers.insert(entry, provider);
        Ok(self)
    }

    /// Freeze the table
    pub fn build(self) -> ProviderRegistry {
        ProviderRegistry { providers: self.providers }
    }
}

// =================================================================================================
// Frozen registry
// =================================================================================================

/// Read-only table of providers
#[derive(Debug)]
pub struct ProviderRegistry {
    providers: HashMap<ProviderKey, Provider>,
}

static GLOBAL: OnceLock<PhysicsResult<ProviderRegistry>> = OnceLock::new();

impl ProviderRegistry {
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::new()
    }

    /// A new registry holding every built-in provider
    pub fn with_builtin() -> PhysicsResult<Self> {
        let mut builder = RegistryBuilder::new();
        register_builtin(&mut builder)?;
        Ok(builder.build())
    }

    /// Process-wide registry of built-in providers, built on first call
    pub fn global() -> PhysicsResult<&'static ProviderRegistry> {
        let registry = GLOBAL.get_or_init(|| {
            let result = Self::with_builtin();
            match &result {
                Ok(registry) => log::info!("provider registry ready ({} providers)", registry.len()),
                Err(err) => log::warn!("failed to build the provider registry: {}", err),
            }
            result
        });
        registry.as_ref().map_err(Clone::clone)
    }

    fn lookup(&self, contract: Contract, key: &str, dimension: Dimension) -> PhysicsResult<&Provider> {
        self.providers
            .get(&(contract, dimension, key.to_string()))
            .ok_or_else(|| PhysicsError::ProviderNotFound {
                key: key.to_string(),
                contract,
                dimension,
            })
    }

    /// Build the physical model registered under `key`
    pub fn create_model(
        &self,
        key: &str,
        dimension: Dimension,
        config: &ModelConfig,
    ) -> PhysicsResult<Box<dyn PhysicalModel>> {
        log::debug!("creating physical model '{}' ({})", key, dimension);
        match self.lookup(Contract::PhysicalModel, key, dimension)? {
            Provider::Model(factory) => factory(dimension, config),
            other => Err(mismatched(key, other)),
        }
    }

    /// Build the variable set registered under `key` for a model's term
    pub fn create_var_set(
        &self,
        key: &str,
        dimension: Dimension,
        term: &ConvectiveTerm,
    ) -> PhysicsResult<Box<dyn VarSet>> {
        log::debug!("creating variable set '{}' ({})", key, dimension);
        match self.lookup(Contract::VarSet, key, dimension)? {
            Provider::VarSet(factory) => factory(dimension, term),
            other => Err(mismatched(key, other)),
        }
    }

    /// Build the transformer registered under `key` for a model's term
    pub fn create_transformer(
        &self,
        key: &str,
        dimension: Dimension,
        term: &ConvectiveTerm,
    ) -> PhysicsResult<Box<dyn VarSetTransformer>> {
        log::debug!("creating transformer '{}' ({})", key, dimension);
        match self.lookup(Contract::VarSetTransformer, key, dimension)? {
            Provider::Transformer(factory) => factory(dimension, term),
            other => Err(mismatched(key, other)),
        }
    }

    pub fn contains(&self, contract: Contract, key: &str, dimension: Dimension) -> bool {
        self.providers.contains_key(&(contract, dimension, key.to_string()))
    }

    /// Registered `(key, dimension)` pairs of a contract, sorted
    pub fn keys(&self, contract: Contract) -> Vec<(&str, Dimension)> {
        let mut keys: Vec<(&str, Dimension)> = self
            .providers
            .keys()
            .filter(|(c, _, _)| *c == contract)
            .map(|(_, dimension, key)| (key.as_str(), *dimension))
            .collect();
        keys.sort();
        keys
    }

    /// Number of registrations, all contracts
    pub fn len(&self) -> usize {
        self.providers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }
}

fn mismatched(key: &str, provider: &Provider) -> PhysicsError {
    PhysicsError::config(format!("provider '{}' is a {} provider", key, provider.contract()))
}

/// Fail unless a term built for `available` is requested in `requested`
pub(crate) fn check_dimension(component: &str, available: Dimension, requested: Dimension) -> PhysicsResult<()> {
    if available == requested {
        Ok(())
    } else {
        Err(PhysicsError::config(format!(
            "{} built for {} requested in {}",
            component, available, requested
        )))
    }
}

// =================================================================================================
// Tests
// =================================================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::EulerModel;

    fn euler(dimension: Dimension, config: &ModelConfig) -> PhysicsResult<Box<dyn PhysicalModel>> {
        Ok(Box::new(EulerModel::new(dimension, &config.euler)?))
    }

    #[test]
    fn test_duplicate_is_rejected() {
        let mut builder = RegistryBuilder::new();
        builder.register("Custom", Dimension::Dim2, Provider::Model(euler)).unwrap();
        builder.register("Custom", Dimension::Dim3, Provider::Model(euler)).unwrap();

        let err = builder.register("Custom", Dimension::Dim2, Provider::Model(euler)).unwrap_err();
        assert!(matches!(err, PhysicsError::DuplicateProvider { contract: Contract::PhysicalModel, .. }));
        assert_eq!(builder.build().len(), 2);
    }

    #[test]
    fn test_not_found() {
        let registry = RegistryBuilder::new().build();
        let err = registry
            .create_model("Euler2D", Dimension::Dim2, &ModelConfig::default())
            .err()
            .unwrap();
        assert!(matches!(err, PhysicsError::ProviderNotFound { .. }));
        assert!(registry.is_empty());
    }

    #[test]
    fn test_dimension_is_part_of_the_key() {
        let mut builder = RegistryBuilder::new();
        builder.register("Custom", Dimension::Dim2, Provider::Model(euler)).unwrap();
        let registry = builder.build();

        assert!(registry.contains(Contract::PhysicalModel, "Custom", Dimension::Dim2));
        assert!(!registry.contains(Contract::PhysicalModel, "Custom", Dimension::Dim3));
        assert!(!registry.contains(Contract::VarSet, "Custom", Dimension::Dim2));
        assert!(registry.create_model("Custom", Dimension::Dim3, &ModelConfig::default()).is_err());
    }

    #[test]
    fn test_check_dimension() {
        assert!(check_dimension("X", Dimension::Dim2, Dimension::Dim2).is_ok());
        assert!(check_dimension("X", Dimension::Dim2, Dimension::Dim3).unwrap_err().is_configuration_error());
    }
}
