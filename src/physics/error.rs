//! Error types for physical models, variable sets and transformers
//!
//! Every fallible operation of the crate returns [`PhysicsResult`]. The
//! variants fall in four families, which drivers can query through the
//! `is_*` helpers:
//!
//! - **configuration**: unknown or duplicate provider keys, inconsistent
//!   scalar-group layouts, non-physical constants. Fatal at setup time.
//! - **invalid state**: operation before `setup()`, wrong vector sizes,
//!   malformed normals.
//! - **invalid cast**: a term accessed as the wrong physics kind.
//! - **numeric domain**: non-physical inputs reaching `sqrt`-like formulas.

use thiserror::Error;

use crate::physics::traits::{Dimension, PhysicalQuantity};

/// Result alias used across the crate
pub type PhysicsResult<T> = Result<T, PhysicsError>;

/// Abstract contract a provider satisfies in the registry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Contract {
    /// Factory of a [`PhysicalModel`](crate::physics::PhysicalModel)
    PhysicalModel,
    /// Factory of a [`VarSet`](crate::varset::VarSet)
    VarSet,
    /// Factory of a [`VarSetTransformer`](crate::transform::VarSetTransformer)
    VarSetTransformer,
}

impl std::fmt::Display for Contract {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Contract::PhysicalModel => "PhysicalModel",
            Contract::VarSet => "VarSet",
            Contract::VarSetTransformer => "VarSetTransformer",
        };
        f.write_str(name)
    }
}

/// Unified error type
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PhysicsError {
    // ============================================================================================
    // Configuration errors
    // ============================================================================================

    /// Invalid configuration value
    #[error("configuration error: {message}")]
    Configuration {
        /// Description of the invalid value
        message: String,
    },

    /// A provider key is registered twice for the same contract and dimension
    #[error("provider '{key}' already registered as {contract} ({dimension})")]
    DuplicateProvider {
        key: String,
        contract: Contract,
        dimension: Dimension,
    },

    /// No provider matches the requested key
    #[error("no {contract} provider '{key}' registered for {dimension}")]
    ProviderNotFound {
        key: String,
        contract: Contract,
        dimension: Dimension,
    },

    /// Scalar groups do not partition the state
    #[error("inconsistent scalar groups: {message}")]
    InconsistentScalarGroups {
        message: String,
    },

    // ============================================================================================
    // Invalid state errors
    // ============================================================================================

    /// Operation called before `setup()`
    #[error("{component}::{operation} called before setup()")]
    NotInitialized {
        component: &'static str,
        operation: &'static str,
    },

    /// `setup()` called twice
    #[error("{component} is already set up")]
    AlreadyInitialized {
        component: &'static str,
    },

    /// Vector length mismatch
    #[error("size mismatch for {name}: expected {expected}, got {actual}")]
    SizeMismatch {
        name: &'static str,
        expected: usize,
        actual: usize,
    },

    /// Argument outside its valid range
    #[error("invalid argument: {message}")]
    InvalidArgument {
        message: String,
    },

    // ============================================================================================
    // Invalid cast
    // ============================================================================================

    /// Term accessed as the wrong physics kind
    #[error("invalid term cast: expected {expected}, found {found}")]
    InvalidCast {
        expected: &'static str,
        found: &'static str,
    },

    // ============================================================================================
    // Numeric domain
    // ============================================================================================

    /// Non-physical value reaching a formula that requires a positive input
    #[error("non-physical {quantity} = {value:e} in {operation}")]
    NumericDomain {
        operation: &'static str,
        quantity: PhysicalQuantity,
        value: f64,
    },

    /// Right eigenvector matrix could not be inverted
    #[error("singular eigenvector matrix in {operation}")]
    SingularEigenSystem {
        operation: &'static str,
    },

    // ============================================================================================
    // Context
    // ============================================================================================

    /// Failure of a per-entity computation, with driver context
    #[error("entity {entity} ({model}, {operation}): {source}")]
    Entity {
        entity: usize,
        model: String,
        operation: &'static str,
        #[source]
        source: Box<PhysicsError>,
    },
}

impl PhysicsError {
    /// Configuration error from any message
    pub fn config(message: impl Into<String>) -> Self {
        Self::Configuration { message: message.into() }
    }

    /// Invalid argument from any message
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument { message: message.into() }
    }

    /// Wrap an error with the entity, model and operation it occurred in
    pub fn at_entity(self, entity: usize, model: impl Into<String>, operation: &'static str) -> Self {
        Self::Entity {
            entity,
            model: model.into(),
            operation,
            source: Box::new(self),
        }
    }

    /// Innermost error, without entity context
    pub fn root(&self) -> &PhysicsError {
        match self {
            PhysicsError::Entity { source, .. } => source.root(),
            other => other,
        }
    }

    /// Fatal setup-time error
    pub fn is_configuration_error(&self) -> bool {
        matches!(
            self.root(),
            PhysicsError::Configuration { .. }
                | PhysicsError::DuplicateProvider { .. }
                | PhysicsError::ProviderNotFound { .. }
                | PhysicsError::InconsistentScalarGroups { .. }
        )
    }

    /// Misuse of a component or wrongly sized input
    pub fn is_invalid_state(&self) -> bool {
        matches!(
            self.root(),
            PhysicsError::NotInitialized { .. }
                | PhysicsError::AlreadyInitialized { .. }
                | PhysicsError::SizeMismatch { .. }
                | PhysicsError::InvalidArgument { .. }
        )
    }

    /// Term kind mismatch
    pub fn is_invalid_cast(&self) -> bool {
        matches!(self.root(), PhysicsError::InvalidCast { .. })
    }

    /// Non-physical input or degenerate eigen-system
    pub fn is_numeric_domain(&self) -> bool {
        matches!(
            self.root(),
            PhysicsError::NumericDomain { .. } | PhysicsError::SingularEigenSystem { .. }
        )
    }
}

/// Check that a vector has the expected length
pub(crate) fn check_size(name: &'static str, expected: usize, actual: usize) -> PhysicsResult<()> {
    if expected == actual {
        Ok(())
    } else {
        Err(PhysicsError::SizeMismatch { name, expected, actual })
    }
}

/// Check that a physical quantity is strictly positive and finite
pub(crate) fn check_positive(
    operation: &'static str,
    quantity: PhysicalQuantity,
    value: f64,
) -> PhysicsResult<f64> {
    if value > 0.0 && value.is_finite() {
        Ok(value)
    } else {
        Err(PhysicsError::NumericDomain { operation, quantity, value })
    }
}
