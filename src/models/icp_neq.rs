//! Inductively coupled plasma, chemical non-equilibrium (`ICPNEQ2D`, `ICPNEQ3D`)
//!
//! Frozen-mixture Navier-Stokes for the plasma torch, coupled to the
//! induction equations of the electric field (real and imaginary parts).
//! Only the convective part lives here: the species are advected with the
//! mixture velocity and the induction unknowns carry no convective flux.
//!
//! # State layout
//!
//! `[ρ_1..ρ_ns, ρu, ρv, (ρw), ρE, Er, Ei]`
//!
//! # Reference data layout
//!
//! The Euler offsets of [`EulerTerm`](crate::models::EulerTerm) followed by
//! `GAMMA`, the mass fractions from [`IcpneqTerm::Y`] and the two induction
//! unknowns.

use std::sync::Arc;

use nalgebra::DVector;

use crate::models::config::{IcpConfig, ModelConfig};
use crate::models::euler::EulerTerm;
use crate::physics::data::{dot, RealVector};
use crate::physics::error::{check_positive, check_size, PhysicsResult};
use crate::physics::term::{ConvectiveTerm, ScalarGroupKind, ScalarGroupTable};
use crate::physics::traits::{Dimension, PhysicalModel, PhysicalQuantity};
use crate::registry::{Provider, RegistryBuilder};

/// One species of the frozen mixture
#[derive(Debug, Clone, PartialEq)]
pub struct Species {
    pub name: String,
    /// Molar mass \[kg/mol\]
    pub molar_mass: f64,
}

/// Constants and layout of the ICP non-equilibrium equations
#[derive(Debug, Clone, PartialEq)]
pub struct IcpneqTerm {
    species: Vec<Species>,
    gamma: f64,
    universal_gas_constant: f64,
    dimension: Dimension,
    groups: ScalarGroupTable,
}

impl IcpneqTerm {
    /// Frozen specific heat ratio
    pub const GAMMA: usize = EulerTerm::DATA_SIZE;
    /// First mass fraction
    pub const Y: usize = EulerTerm::DATA_SIZE + 1;

    pub fn new(dimension: Dimension, config: &IcpConfig) -> PhysicsResult<Self> {
        config.validate()?;
        let species: Vec<Species> = config
            .species
            .iter()
            .map(|s| Species { name: s.name.clone(), molar_mass: s.molar_mass })
            .collect();

        let groups = ScalarGroupTable::contiguous(
            0,
            &[
                (ScalarGroupKind::Species, species.len()),
                (ScalarGroupKind::Momentum, dimension.size()),
                (ScalarGroupKind::Energy, 1),
                (ScalarGroupKind::Induction, 2),
            ],
        )?;

        Ok(Self {
            species,
            gamma: config.gamma,
            universal_gas_constant: config.universal_gas_constant,
            dimension,
            groups,
        })
    }

    pub fn species(&self) -> &[Species] {
        &self.species
    }

    pub fn nb_species(&self) -> usize {
        self.species.len()
    }

    pub fn get_gamma(&self) -> f64 {
        self.gamma
    }

    /// Universal gas constant `Ru` the mixture closure is built on
    pub fn gas_constant(&self) -> f64 {
        self.universal_gas_constant
    }

    pub fn dimension(&self) -> Dimension {
        self.dimension
    }

    pub fn nb_eqs(&self) -> usize {
        self.groups.nb_eqs()
    }

    pub fn scalar_groups(&self) -> &ScalarGroupTable {
        &self.groups
    }

    /// Number of unknowns advected as a gas: species, momentum and energy
    pub fn nb_flow_eqs(&self) -> usize {
        self.nb_species() + self.dimension.size() + 1
    }

    /// Offset of the real part of the electric field in the reference data
    pub fn er_index(&self) -> usize {
        Self::Y + self.nb_species()
    }

    /// Offset of the imaginary part of the electric field in the reference data
    pub fn ei_index(&self) -> usize {
        Self::Y + self.nb_species() + 1
    }

    pub fn physical_data_size(&self) -> usize {
        Self::Y + self.nb_species() + 2
    }

    /// Mixture gas constant `Ru Σ y_i / M_i`
    pub fn mixture_gas_constant(&self, mass_fractions: &[f64]) -> f64 {
        self.universal_gas_constant
            * self
                .species
                .iter()
                .zip(mass_fractions)
                .map(|(s, y)| y / s.molar_mass)
                .sum::<f64>()
    }

    /// Reference data vector from a conservative state
    pub fn physical_data_from_state(&self, state: &[f64]) -> PhysicsResult<RealVector> {
        const OP: &str = "physical_data_from_state";
        check_size("state", self.nb_eqs(), state.len())?;
        let ns = self.nb_species();
        let dim = self.dimension.size();

        let rho: f64 = state[..ns].iter().sum();
        let rho = check_positive(OP, PhysicalQuantity::Density, rho)?;
        let mass_fractions: Vec<f64> = state[..ns].iter().map(|r| r / rho).collect();
        let velocity: Vec<f64> = state[ns..ns + dim].iter().map(|m| m / rho).collect();
        let q2 = dot(&velocity, &velocity);

        let rho_e = state[ns + dim];
        let pressure = (self.gamma - 1.0) * (rho_e - 0.5 * rho * q2);
        let pressure = check_positive(OP, PhysicalQuantity::Pressure, pressure)?;
        let r_mix = check_positive(OP, PhysicalQuantity::MolecularMass, self.mixture_gas_constant(&mass_fractions))?;

        let mut data = DVector::zeros(self.physical_data_size());
        data[EulerTerm::RHO] = rho;
        data[EulerTerm::P] = pressure;
        data[EulerTerm::E] = rho_e / rho;
        data[EulerTerm::H] = (rho_e + pressure) / rho;
        data[EulerTerm::A] = (self.gamma * pressure / rho).sqrt();
        data[EulerTerm::T] = pressure / (rho * r_mix);
        data[EulerTerm::V] = q2.sqrt();
        for (k, u) in velocity.iter().enumerate() {
            data[EulerTerm::VX + k] = *u;
        }
        data[Self::GAMMA] = self.gamma;
        for (i, y) in mass_fractions.iter().enumerate() {
            data[Self::Y + i] = *y;
        }
        data[self.er_index()] = state[ns + dim + 1];
        data[self.ei_index()] = state[ns + dim + 2];
        Ok(data)
    }
}

// =================================================================================================
// Physical model
// =================================================================================================

/// ICP non-equilibrium physical model
#[derive(Debug, Clone)]
pub struct IcpneqModel {
    name: String,
    dimension: Dimension,
    term: ConvectiveTerm,
}

impl IcpneqModel {
    pub fn new(dimension: Dimension, config: &IcpConfig) -> PhysicsResult<Self> {
        let term = IcpneqTerm::new(dimension, config)?;
        Ok(Self {
            name: format!("ICPNEQ{}", dimension),
            dimension,
            term: ConvectiveTerm::Icpneq(Arc::new(term)),
        })
    }
}

impl PhysicalModel for IcpneqModel {
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
        Some("ICP plasma with frozen chemistry and induction equations")
    }
}

fn create(dimension: Dimension, config: &ModelConfig) -> PhysicsResult<Box<dyn PhysicalModel>> {
    Ok(Box::new(IcpneqModel::new(dimension, &config.icp)?))
}

pub(crate) fn register_providers(builder: &mut RegistryBuilder) -> PhysicsResult<()> {
    builder.register("ICPNEQ2D", Dimension::Dim2, Provider::Model(create))?;
    builder.register("ICPNEQ3D", Dimension::Dim3, Provider::Model(create))?;
    Ok(())
}
