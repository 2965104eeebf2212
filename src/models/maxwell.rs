//! Maxwell equations with hyperbolic divergence cleaning (projection)
//!
//! State `[Bx, By, Bz, Ex, Ey, Ez, ψ, φ]` in both 2D and 3D. The cleaning
//! potentials ψ and φ carry the divergence errors of B and E away at speeds
//! `γc` and `χc`:
//!
//! $$\partial_t \mathbf{B} + \nabla\times\mathbf{E} + \nabla\psi = 0$$
//! $$\partial_t \mathbf{E} - c^2\nabla\times\mathbf{B} + \chi c^2\nabla\phi = 0$$
//! $$\partial_t \psi + \gamma^2 c^2\nabla\cdot\mathbf{B} = 0$$
//! $$\partial_t \phi + \chi\nabla\cdot\mathbf{E} = 0$$
//!
//! The reference data of this physics is the state itself.

use std::sync::Arc;

use crate::models::config::{MaxwellConfig, ModelConfig};
use crate::physics::data::RealVector;
use crate::physics::error::{check_size, PhysicsResult};
use crate::physics::term::{ConvectiveTerm, ScalarGroupTable};
use crate::physics::traits::{Dimension, PhysicalModel};
use crate::registry::{Provider, RegistryBuilder};

/// Number of electromagnetic unknowns
pub const NB_EM_EQS: usize = 8;

/// Light speed and divergence cleaning factors
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MaxwellConstants {
    pub light_speed: f64,
    pub div_b_cleaning: f64,
    pub div_e_cleaning: f64,
}

impl MaxwellConstants {
    pub fn new(config: &MaxwellConfig) -> PhysicsResult<Self> {
        config.validate()?;
        Ok(Self {
            light_speed: config.light_speed,
            div_b_cleaning: config.div_b_cleaning,
            div_e_cleaning: config.div_e_cleaning,
        })
    }

    /// Fastest electromagnetic or cleaning wave
    pub fn max_wave_speed(&self) -> f64 {
        self.light_speed * 1.0f64.max(self.div_b_cleaning).max(self.div_e_cleaning)
    }
}

impl Default for MaxwellConstants {
    fn default() -> Self {
        // defaults are valid by construction
        let config = MaxwellConfig::default();
        Self {
            light_speed: config.light_speed,
            div_b_cleaning: config.div_b_cleaning,
            div_e_cleaning: config.div_e_cleaning,
        }
    }
}

/// Constants and layout of the Maxwell projection scheme
#[derive(Debug, Clone, PartialEq)]
pub struct MaxwellProjectionTerm {
    constants: MaxwellConstants,
    dimension: Dimension,
    groups: ScalarGroupTable,
}

impl MaxwellProjectionTerm {
    pub const BX: usize = 0;
    pub const BY: usize = 1;
    pub const BZ: usize = 2;
    pub const EX: usize = 3;
    pub const EY: usize = 4;
    pub const EZ: usize = 5;
    pub const PSI: usize = 6;
    pub const PHI: usize = 7;

    pub fn new(dimension: Dimension, config: &MaxwellConfig) -> PhysicsResult<Self> {
        Ok(Self {
            constants: MaxwellConstants::new(config)?,
            dimension,
            groups: ScalarGroupTable::contiguous(NB_EM_EQS, &[])?,
        })
    }

    pub fn constants(&self) -> &MaxwellConstants {
        &self.constants
    }

    pub fn dimension(&self) -> Dimension {
        self.dimension
    }

    pub fn nb_eqs(&self) -> usize {
        NB_EM_EQS
    }

    pub fn scalar_groups(&self) -> &ScalarGroupTable {
        &self.groups
    }

    /// Reference data (a copy of the state)
    pub fn physical_data_from_state(&self, state: &[f64]) -> PhysicsResult<RealVector> {
        check_size("state", NB_EM_EQS, state.len())?;
        Ok(RealVector::from_column_slice(state))
    }
}

// =================================================================================================
// Physical model
// =================================================================================================

/// Maxwell projection model (`Maxwell2DProjection`, `Maxwell3DProjection`)
#[derive(Debug, Clone)]
pub struct MaxwellProjectionModel {
    name: String,
    dimension: Dimension,
    term: ConvectiveTerm,
}

impl MaxwellProjectionModel {
    pub fn new(dimension: Dimension, config: &MaxwellConfig) -> PhysicsResult<Self> {
        let term = MaxwellProjectionTerm::new(dimension, config)?;
        Ok(Self {
            name: format!("Maxwell{}Projection", dimension),
            dimension,
            term: ConvectiveTerm::MaxwellProjection(Arc::new(term)),
        })
    }
}

impl PhysicalModel for MaxwellProjectionModel {
    fn name(&self) -> &str {
        &self.name
    }

    fn dimension(&self) -> Dimension {
        self.dimension
    }

    fn get_convective_term(&self) -> &ConvectiveTerm {
        &self.term
    }

    fn description(&self) -> Option<&str> {
        Some("Maxwell equations with divergence cleaning")
    }
}

fn create(dimension: Dimension, config: &ModelConfig) -> PhysicsResult<Box<dyn PhysicalModel>> {
    Ok(Box::new(MaxwellProjectionModel::new(dimension, &config.maxwell)?))
}

pub(crate) fn register_providers(builder: &mut RegistryBuilder) -> PhysicsResult<()> {
    builder.register("Maxwell2DProjection", Dimension::Dim2, Provider::Model(create))?;
    builder.register("Maxwell3DProjection", Dimension::Dim3, Provider::Model(create))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout() {
        let model = MaxwellProjectionModel::new(Dimension::Dim2, &MaxwellConfig::default()).unwrap();
        assert_eq!(model.name(), "Maxwell2DProjection");
        assert_eq!(model.nb_eqs(), 8);

        let groups = model.get_convective_term().scalar_groups();
        assert_eq!(groups.fixed_block_size(), 8);
        assert_eq!(groups.nb_groups(), 0);
    }

    #[test]
    fn test_max_wave_speed() {
        let config = MaxwellConfig {
            light_speed: 2.0,
            div_b_cleaning: 1.5,
            div_e_cleaning: 0.5,
        };
        let constants = MaxwellConstants::new(&config).unwrap();
        assert_eq!(constants.max_wave_speed(), 3.0);
        assert_eq!(MaxwellConstants::default().max_wave_speed(), 1.0);
    }

    #[test]
    fn test_physical_data_is_state() {
        let term = MaxwellProjectionTerm::new(Dimension::Dim3, &MaxwellConfig::default()).unwrap();
        let state = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0];
        let data = term.physical_data_from_state(&state).unwrap();
        assert_eq!(data.as_slice(), &state);
        assert!(term.physical_data_from_state(&state[..7]).is_err());
    }
}
