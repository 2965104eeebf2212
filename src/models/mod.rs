//! Concrete physical models
//!
//! All models implement the [`PhysicalModel`](crate::physics::PhysicalModel) trait
//! and own one convective term. The model provides constants and layout; the
//! numerics are obtained from the registry as variable sets and transformers.
//!
//! # Available Models
//!
//! ## [`EulerModel`]: perfect-gas Euler (`Euler2D`, `Euler3D`)
//!
//! Reference single-fluid gas dynamics, `dim + 2` equations.
//!
//! ## [`MaxwellProjectionModel`]: Maxwell with divergence cleaning
//!
//! Eight electromagnetic unknowns in 2D and 3D, with the cleaning potentials
//! ψ and φ.
//!
//! ## [`EulerMfmhdModel`]: multi-fluid MHD (`EulerMFMHD2D`)
//!
//! The Maxwell block followed by one Euler system per species. Source of the
//! `RhoiViTi` representation.
//!
//! ## [`IcpneqModel`]: ICP plasma, frozen chemistry
//!
//! Species densities, momentum, energy and the two induction unknowns.
//!
//! ## [`PassiveScalarModel`]: temperature advection
//!
//! One scalar transported by a prescribed velocity.
//!
//! # Configuration
//!
//! Every model is built from its section of [`config::ModelConfig`].

// =================================================================================================
// Module Declarations
// =================================================================================================

pub mod config;
pub mod euler;
pub mod icp_neq;
pub mod maxwell;
pub mod multi_fluid_mhd;
pub mod passive_scalar;

// =================================================================================================
// Public Re-exports
// =================================================================================================

pub use euler::{EulerModel, EulerTerm};
pub use icp_neq::{IcpneqModel, IcpneqTerm, Species};
pub use maxwell::{MaxwellConstants, MaxwellProjectionModel, MaxwellProjectionTerm};
pub use multi_fluid_mhd::{EulerMfmhdModel, EulerMfmhdTerm, MfmhdReferenceLayout, SpeciesState};
pub use passive_scalar::{PassiveScalarModel, PassiveScalarTerm};

use crate::physics::PhysicsResult;
use crate::registry::RegistryBuilder;

/// Register the physical models of every physics
pub(crate) fn register_providers(builder: &mut RegistryBuilder) -> PhysicsResult<()> {
    euler::register_providers(builder)?;
    maxwell::register_providers(builder)?;
    multi_fluid_mhd::register_providers(builder)?;
    icp_neq::register_providers(builder)?;
    passive_scalar::register_providers(builder)
}
