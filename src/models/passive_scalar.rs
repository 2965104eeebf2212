//! Passive scalar (temperature) advection
//!
//! A temperature field carried by a prescribed velocity. The convective
//! flux is `(a·n) T`; the laminar conductivity and heat capacity options
//! feed the diffusive part of the driver through
//! [`PassiveScalarTerm::thermal_diffusivity`].

use std::sync::Arc;

use nalgebra::DVector;

use crate::models::config::{ModelConfig, PassiveScalarConfig};
use crate::physics::data::{dot, RealVector};
use crate::physics::error::{check_size, PhysicsResult};
use crate::physics::term::{ConvectiveTerm, ScalarGroupKind, ScalarGroupTable};
use crate::physics::traits::{Dimension, PhysicalModel};
use crate::registry::{Provider, RegistryBuilder};

/// Constants of the passive scalar equation
#[derive(Debug, Clone, PartialEq)]
pub struct PassiveScalarTerm {
    co_lam: f64,
    cp: f64,
    density: f64,
    velocity: Vec<f64>,
    dimension: Dimension,
    groups: ScalarGroupTable,
}

impl PassiveScalarTerm {
    pub const T: usize = 0;
    pub const VX: usize = 1;
    pub const VY: usize = 2;
    pub const VZ: usize = 3;

    pub fn new(dimension: Dimension, config: &PassiveScalarConfig) -> PhysicsResult<Self> {
        config.validate()?;
        let dim = dimension.size();
        if config.velocity.len() > dim {
            return Err(crate::physics::PhysicsError::config(format!(
                "PassiveScalar.Velocity has {} components in {}",
                config.velocity.len(),
                dimension
            )));
        }
        let mut velocity = config.velocity.clone();
        velocity.resize(dim, 0.0);

        Ok(Self {
            co_lam: config.co_lam,
            cp: config.cp,
            density: config.density,
            velocity,
            dimension,
            groups: ScalarGroupTable::contiguous(0, &[(ScalarGroupKind::Scalar, 1)])?,
        })
    }

    /// Laminar heat conductivity
    pub fn get_co_lam(&self) -> f64 {
        self.co_lam
    }

    pub fn get_cp(&self) -> f64 {
        self.cp
    }

    pub fn get_density(&self) -> f64 {
        self.density
    }

    pub fn velocity(&self) -> &[f64] {
        &self.velocity
    }

    /// `k / (ρ cp)`
    pub fn thermal_diffusivity(&self) -> f64 {
        self.co_lam / (self.density * self.cp)
    }

    /// Advection speed along `normal`
    pub fn normal_speed(&self, normal: &[f64]) -> f64 {
        dot(&self.velocity, normal)
    }

    pub fn dimension(&self) -> Dimension {
        self.dimension
    }

    pub fn nb_eqs(&self) -> usize {
        1
    }

    pub fn scalar_groups(&self) -> &ScalarGroupTable {
        &self.groups
    }

    pub fn physical_data_size(&self) -> usize {
        1 + self.dimension.size()
    }

    /// Reference data `[T, vx, vy, (vz)]`
    pub fn physical_data_from_state(&self, state: &[f64]) -> PhysicsResult<RealVector> {
        check_size("state", 1, state.len())?;
        let mut data = DVector::zeros(self.physical_data_size());
        data[Self::T] = state[0];
        for (k, v) in self.velocity.iter().enumerate() {
            data[Self::VX + k] = *v;
        }
        Ok(data)
    }
}

/// Passive scalar physical model (`PassiveScalar2D`, `PassiveScalar3D`)
#[derive(Debug, Clone)]
pub struct PassiveScalarModel {
    name: String,
    dimension: Dimension,
    term: ConvectiveTerm,
}

impl PassiveScalarModel {
    pub fn new(dimension: Dimension, config: &PassiveScalarConfig) -> PhysicsResult<Self> {
        let term = PassiveScalarTerm::new(dimension, config)?;
        Ok(Self {
            name: format!("PassiveScalar{}", dimension),
            dimension,
            term: ConvectiveTerm::PassiveScalar(Arc::new(term)),
        })
    }
}

impl PhysicalModel for PassiveScalarModel {
    fn name(&self) -> &str {
        &self.name
    }

    fn dimension(&self) -> Dimension {
        self.dimension
    }

    fn get_convective_term(&self) -> &ConvectiveTerm {
        &self.term
    }
}

fn create(dimension: Dimension, config: &ModelConfig) -> PhysicsResult<Box<dyn PhysicalModel>> {
    Ok(Box::new(PassiveScalarModel::new(dimension, &config.passive_scalar)?))
}

pub(crate) fn register_providers(builder: &mut RegistryBuilder) -> PhysicsResult<()> {
    builder.register("PassiveScalar2D", Dimension::Dim2, Provider::Model(create))?;
    builder.register("PassiveScalar3D", Dimension::Dim3, Provider::Model(create))?;
    Ok(())
}
