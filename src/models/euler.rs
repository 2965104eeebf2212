//! Perfect-gas Euler model
//!
//! # Physical background
//!
//! Inviscid compressible flow of a calorically perfect gas:
//!
//! $$\partial_t \rho + \nabla\cdot(\rho \mathbf{u}) = 0$$
//! $$\partial_t (\rho \mathbf{u}) + \nabla\cdot(\rho \mathbf{u}\otimes\mathbf{u} + p I) = 0$$
//! $$\partial_t (\rho E) + \nabla\cdot(\rho H \mathbf{u}) = 0$$
//!
//! closed by $p = (\gamma - 1)(\rho E - \tfrac12 \rho |\mathbf{u}|^2)$.
//!
//! # State layout
//!
//! `[ρ, ρu, ρv, (ρw), ρE]`, scalar groups Density / Momentum / Energy.
//!
//! # Reference data layout
//!
//! Named offsets [`EulerTerm::RHO`] ... [`EulerTerm::VZ`]; `VZ` is zero in 2D.

use std::sync::Arc;

use nalgebra::DVector;

use crate::models::config::{EulerConfig, ModelConfig};
use crate::physics::data::{dot, RealVector};
use crate::physics::error::{check_positive, check_size, PhysicsResult};
use crate::physics::term::{ConvectiveTerm, ScalarGroupKind, ScalarGroupTable};
use crate::physics::traits::{Dimension, PhysicalModel, PhysicalQuantity};
use crate::registry::{Provider, RegistryBuilder};

/// Constants and layout of the Euler equations
#[derive(Debug, Clone, PartialEq)]
pub struct EulerTerm {
    gamma: f64,
    gas_constant: f64,
    dimension: Dimension,
    groups: ScalarGroupTable,
}

impl EulerTerm {
    /// Density
    pub const RHO: usize = 0;
    /// Pressure
    pub const P: usize = 1;
    /// Specific total enthalpy
    pub const H: usize = 2;
    /// Specific total energy
    pub const E: usize = 3;
    /// Speed of sound
    pub const A: usize = 4;
    /// Temperature
    pub const T: usize = 5;
    /// Velocity magnitude
    pub const V: usize = 6;
    /// Velocity components
    pub const VX: usize = 7;
    pub const VY: usize = 8;
    pub const VZ: usize = 9;
    /// Size of the reference data vector
    pub const DATA_SIZE: usize = 10;

    /// Create a term from validated options
    pub fn new(dimension: Dimension, config: &EulerConfig) -> PhysicsResult<Self> {
        config.validate()?;

        let dim = dimension.size();
        let groups = ScalarGroupTable::contiguous(
            0,
            &[
                (ScalarGroupKind::Density, 1),
                (ScalarGroupKind::Momentum, dim),
                (ScalarGroupKind::Energy, 1),
            ],
        )?;

        Ok(Self {
            gamma: config.gamma,
            gas_constant: config.gas_constant,
            dimension,
            groups,
        })
    }

    /// Specific heat ratio
    pub fn get_gamma(&self) -> f64 {
        self.gamma
    }

    /// Specific gas constant
    pub fn get_r(&self) -> f64 {
        self.gas_constant
    }

    pub fn dimension(&self) -> Dimension {
        self.dimension
    }

    /// Number of equations (`dim + 2`)
    pub fn nb_eqs(&self) -> usize {
        self.groups.nb_eqs()
    }

    pub fn scalar_groups(&self) -> &ScalarGroupTable {
        &self.groups
    }

    /// Reference data from density, velocity and pressure
    pub fn physical_data_from_primitive(
        &self,
        rho: f64,
        velocity: &[f64],
        pressure: f64,
    ) -> PhysicsResult<RealVector> {
        check_size("velocity", self.dimension.size(), velocity.len())?;
        let rho = check_positive("physical_data_from_primitive", PhysicalQuantity::Density, rho)?;
        let p = check_positive("physical_data_from_primitive", PhysicalQuantity::Pressure, pressure)?;

        let q2 = dot(velocity, velocity);
        let a2 = self.gamma * p / rho;
        let e = p / ((self.gamma - 1.0) * rho) + 0.5 * q2;

        let mut data = DVector::zeros(Self::DATA_SIZE);
        data[Self::RHO] = rho;
        data[Self::P] = p;
        data[Self::E] = e;
        data[Self::H] = e + p / rho;
        data[Self::A] = a2.sqrt();
        data[Self::T] = p / (rho * self.gas_constant);
        data[Self::V] = q2.sqrt();
        for (k, u) in velocity.iter().enumerate() {
            data[Self::VX + k] = *u;
        }
        Ok(data)
    }

    /// Reference data from a conservative state `[ρ, ρu, ρv, (ρw), ρE]`
    pub fn physical_data_from_conservative(&self, state: &[f64]) -> PhysicsResult<RealVector> {
        let (rho, velocity, pressure) = self.primitive_from_conservative(state)?;
        self.physical_data_from_primitive(rho, &velocity, pressure)
    }

    /// `(ρ, velocity, p)` from a conservative state
    pub fn primitive_from_conservative(&self, state: &[f64]) -> PhysicsResult<(f64, Vec<f64>, f64)> {
        check_size("state", self.nb_eqs(), state.len())?;
        let dim = self.dimension.size();

        let rho = check_positive("primitive_from_conservative", PhysicalQuantity::Density, state[0])?;
        let velocity: Vec<f64> = state[1..=dim].iter().map(|m| m / rho).collect();
        let rho_e = state[dim + 1];
        let pressure = (self.gamma - 1.0) * (rho_e - 0.5 * rho * dot(&velocity, &velocity));
        let pressure = check_positive("primitive_from_conservative", PhysicalQuantity::Pressure, pressure)?;

        Ok((rho, velocity, pressure))
    }

    /// Total energy per unit volume `ρE`
    pub fn total_energy(&self, rho: f64, velocity: &[f64], pressure: f64) -> f64 {
        pressure / (self.gamma - 1.0) + 0.5 * rho * dot(velocity, velocity)
    }
}

// =================================================================================================
// Physical model
// =================================================================================================

/// Euler physical model (`Euler2D`, `Euler3D`)
#[derive(Debug, Clone)]
pub struct EulerModel {
    name: String,
    dimension: Dimension,
    term: ConvectiveTerm,
}

impl EulerModel {
    pub fn new(dimension: Dimension, config: &EulerConfig) -> PhysicsResult<Self> {
        let term = EulerTerm::new(dimension, config)?;
        Ok(Self {
            name: format!("Euler{}", dimension),
            dimension,
            term: ConvectiveTerm::Euler(Arc::new(term)),
        })
    }
}

impl PhysicalModel for EulerModel {
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
        Some("Perfect-gas Euler equations")
    }
}

fn create(dimension: Dimension, config: &ModelConfig) -> PhysicsResult<Box<dyn PhysicalModel>> {
    Ok(Box::new(EulerModel::new(dimension, &config.euler)?))
}

pub(crate) fn register_providers(builder: &mut RegistryBuilder) -> PhysicsResult<()> {
    builder.register("Euler2D", Dimension::Dim2, Provider::Model(create))?;
    builder.register("Euler3D", Dimension::Dim3, Provider::Model(create))?;
    Ok(())
}

// =================================================================================================
// Tests
// =================================================================================================
