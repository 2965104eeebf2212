//! varset-rs: Physical Models and Variable Sets for Conservation-Law Solvers
//!
//! The physics layer of a multi-physics finite-volume / residual-distribution
//! solver: physical models (constants and state layout), variable sets
//! (flux, Jacobians, eigen-decomposition, flux-vector splitting) and
//! transformers between state representations.
//!
//! # Architecture
//!
//! varset-rs is built on two core principles:
//!
//! 1. **Separation of Physics and Numerics**
//!    - Physical models hold the constants and the state layout
//!    - Variable sets provide the numerics of one representation
//!    - The driver (outside this crate) owns meshes, time stepping and I/O
//!
//! 2. **Explicit lifecycles**
//!    - Providers are registered in a builder, then frozen in a registry
//!    - Variable sets must be `setup()` once before use
//!    - Terms are immutable and shared behind `Arc`
//!
//! # Quick Start
//!
//! ```rust
//! use varset_rs::prelude::*;
//!
//! # fn main() -> Result<(), PhysicsError> {
//! // 1. Create the physical model from configuration
//! let registry = ProviderRegistry::global()?;
//! let model = registry.create_model("EulerMFMHD2D", Dimension::Dim2, &ModelConfig::default())?;
//!
//! // 2. Ask the model for its numerics
//! let mut var_set = model.var_set(registry, Representation::Conservative)?;
//! var_set.setup()?;
//! let to_cons = model.transformer(registry, Representation::RhoiViTi, Representation::Conservative)?;
//!
//! // 3. Per mesh entity: transform, compute reference data, flux and wave speed
//! let mut state = State::zeros(model.nb_eqs());
//! state[8] = 1.0e-3;   // ion density
//! state[9] = 1.0e-3;   // neutral density
//! state[14] = 1.0e4;   // ion temperature
//! state[15] = 1.0e4;   // neutral temperature
//!
//! let conservative = to_cons.transform(&state)?;
//! let pdata = var_set.compute_physical_data(&conservative)?;
//! let flux = var_set.compute_flux(&pdata, &[1.0, 0.0])?;
//! let speed = var_set.get_max_abs_eigen_value(&pdata, &[1.0, 0.0])?;
//!
//! assert_eq!(flux.len(), 16);
//! assert!(speed >= 1.0);
//! # Ok(())
//! # }
//! ```
//!
//! # Modules
//!
//! - [`physics`]: traits, state types, terms and errors
//! - [`models`]: concrete physical models and their configuration
//! - [`varset`]: variable sets and eigenstructure building blocks
//! - [`transform`]: variable-set transformers
//! - [`registry`]: provider registry

// Core modules
pub mod physics;

pub mod models;
pub mod registry;
pub mod transform;
pub mod varset;

pub mod prelude {
    //! Convenient imports for common usage
    //!
    //! ```rust
    //! use varset_rs::prelude::*;
    //! ```
    pub use crate::models::config::ModelConfig;
    pub use crate::physics::{
        ConvectiveTerm, Dimension, PhysicalModel, PhysicsError, PhysicsResult, RealMatrix,
        RealVector, Representation, State,
    };
    pub use crate::registry::ProviderRegistry;
    pub use crate::transform::VarSetTransformer;
    pub use crate::varset::{EigenSystem, JacobianSplit, VarSet};
}
