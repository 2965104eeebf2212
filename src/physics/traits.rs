//! Physical model traits and types
//!
//! This module defines the core API shared by every physics:
//! - `PhysicalModel`: trait for all physical models
//! - `Dimension`: spatial dimension of a model
//! - `Representation`: variable convention of a state vector
//! - `PhysicalQuantity`: type-safe quantity identifiers (used in diagnostics)

use std::fmt;

use crate::physics::error::{PhysicsError, PhysicsResult};
use crate::physics::term::ConvectiveTerm;
use crate::registry::ProviderRegistry;
use crate::transform::VarSetTransformer;
use crate::varset::VarSet;

// =================================================================================================
// Physical quantities (Type-safe Identifiers)
// =================================================================================================

/// Known physical quantities
///
/// Used to name the offending quantity when a non-physical value reaches a
/// formula (negative density, pressure, temperature ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PhysicalQuantity {
    /// Mixture or species density (kg/m³)
    Density,

    /// Pressure (Pa)
    Pressure,

    /// Temperature (K)
    Temperature,

    /// Squared speed of sound (m²/s²)
    SoundSpeedSquared,

    /// Total energy per unit volume (J/m³)
    Energy,

    /// Mass fraction (-)
    MassFraction,

    /// Molecular or molar mass
    MolecularMass,
}

impl fmt::Display for PhysicalQuantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

// =================================================================================================
// Dimension
// =================================================================================================

/// Spatial dimension of a physical model
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Dimension {
    /// Two space dimensions
    Dim2,
    /// Three space dimensions
    Dim3,
}

impl Dimension {
    /// Number of coordinates
    pub fn size(self) -> usize {
        match self {
            Dimension::Dim2 => 2,
            Dimension::Dim3 => 3,
        }
    }

    /// Build from a number of coordinates
    pub fn from_size(size: usize) -> PhysicsResult<Self> {
        match size {
            2 => Ok(Dimension::Dim2),
            3 => Ok(Dimension::Dim3),
            other => Err(PhysicsError::invalid_argument(format!(
                "unsupported spatial dimension {}",
                other
            ))),
        }
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}D", self.size())
    }
}

// =================================================================================================
// Representation
// =================================================================================================

/// Variable convention of a state vector
///
/// The display form is the suffix used in registry keys
/// (`Euler2DCons`, `EulerMFMHD2DRhoiViTiToCons`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Representation {
    /// Conservative variables
    Conservative,

    /// Primitive variables `[ρ, u, v, (w), p]`
    Primitive,

    /// Multi-fluid primitive variables: species densities, velocities, temperatures
    RhoiViTi,
}

impl fmt::Display for Representation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let suffix = match self {
            Representation::Conservative => "Cons",
            Representation::Primitive => "Prim",
            Representation::RhoiViTi => "RhoiViTi",
        };
        f.write_str(suffix)
    }
}

// =================================================================================================
// Physical Model Trait
// =================================================================================================

/// Trait for physical models
///
/// # Responsibility
///
/// Binds a convective term (constants + scalar-group layout) to a spatial
/// dimension and an equation count. The model is also the entry point to
/// obtain the variable sets and transformers that are valid for its physics.
///
/// `name()` is the registry key of the model. Variable-set keys are
/// `name() + representation` and transformer keys are
/// `name() + from + "To" + to`.
pub trait PhysicalModel: Send + Sync {
    /// Registry key of the model (e.g. `"EulerMFMHD2D"`)
    fn name(&self) -> &str;

    /// Spatial dimension
    fn dimension(&self) -> Dimension;

    /// Convective term shared with variable sets and transformers
    fn get_convective_term(&self) -> &ConvectiveTerm;

    /// Number of equations
    fn nb_eqs(&self) -> usize {
        self.get_convective_term().scalar_groups().nb_eqs()
    }

    /// Size of scalar group `group`
    fn get_nb_scalar_vars(&self, group: usize) -> PhysicsResult<usize> {
        self.get_convective_term().scalar_groups().nb_scalar_vars(group)
    }

    /// State offset where scalar group `group` begins
    fn get_first_scalar_var(&self, group: usize) -> PhysicsResult<usize> {
        self.get_convective_term().scalar_groups().first_scalar_var(group)
    }

    /// Description of the model (optional)
    fn description(&self) -> Option<&str> {
        None
    }

    /// Registry key of the variable set for `representation`
    fn var_set_key(&self, representation: Representation) -> String {
        format!("{}{}", self.name(), representation)
    }

    /// Registry key of the transformer `from -> to`
    fn transformer_key(&self, from: Representation, to: Representation) -> String {
        format!("{}{}To{}", self.name(), from, to)
    }

    /// Create the variable set for `representation` (not yet set up)
    fn var_set(
        &self,
        registry: &ProviderRegistry,
        representation: Representation,
    ) -> PhysicsResult<Box<dyn VarSet>> {
        registry.create_var_set(
            &self.var_set_key(representation),
            self.dimension(),
            self.get_convective_term(),
        )
    }

    /// Create the transformer `from -> to`
    fn transformer(
        &self,
        registry: &ProviderRegistry,
        from: Representation,
        to: Representation,
    ) -> PhysicsResult<Box<dyn VarSetTransformer>> {
        registry.create_transformer(
            &self.transformer_key(from, to),
            self.dimension(),
            self.get_convective_term(),
        )
    }
}

// =================================================================================================
// Tests
// =================================================================================================
