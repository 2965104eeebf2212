//! Built-in providers

use crate::physics::error::PhysicsResult;
use crate::registry::RegistryBuilder;
use crate::{models, transform, varset};

/// Register every physical model, variable set and transformer of the crate
///
/// Fails only if one of the keys is already taken in `builder`.
pub fn register_builtin(builder: &mut RegistryBuilder) -> PhysicsResult<()> {
    models::register_providers(builder)?;
    varset::register_providers(builder)?;
    transform::register_providers(builder)
}
