//! Physical models
//!
//! This module provides the traits and core types shared by every physics.
//! A physical model encapsulates the constants and the state layout of a
//! system of conservation laws (Euler, Maxwell, multi-fluid MHD, ...).
//!
//! # Core Concepts
//!
//! - **Physical Model**: binds a term to a dimension and an equation count
//! - **Convective Term**: immutable constants + scalar-group layout
//! - **State**: unknowns of one mesh entity in a variable convention
//! - **Reference data**: derived quantities (pressure, sound speed, ...) at
//!   named offsets
//!
//! # Architecture
//!
//! Physical models are **separate from the numerics**:
//! - The model provides the **constants and layout** (physics)
//! - Variable sets provide the **flux and eigenstructure** for one representation
//! - Transformers convert between **representations**
//! - The driver (external) decides how to discretise
//!
//! # Example
//!
//! ```rust
//! use varset_rs::models::config::ModelConfig;
//! use varset_rs::physics::{Dimension, PhysicalModel, Representation};
//! use varset_rs::registry::ProviderRegistry;
//!
//! let registry = ProviderRegistry::global().unwrap();
//! let model = registry
//!     .create_model("Euler2D", Dimension::Dim2, &ModelConfig::default())
//!     .unwrap();
//!
//! let mut var_set = model.var_set(registry, Representation::Conservative).unwrap();
//! var_set.setup().unwrap();
//! assert_eq!(var_set.get_nb_eqs(), 4);
//! ```

// module declaration
pub mod constants;
pub mod data;
pub mod error;
pub mod term;
pub mod traits;

// re-export commonly used types for convenience
pub use data::{RealMatrix, RealVector, State};
pub use error::{Contract, PhysicsError, PhysicsResult};
pub use term::{ConvectiveTerm, ScalarGroup, ScalarGroupKind, ScalarGroupTable, TermKind};
pub use traits::{Dimension, PhysicalModel, PhysicalQuantity, Representation};
