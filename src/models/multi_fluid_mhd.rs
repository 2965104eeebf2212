//! Multi-fluid MHD model (2D)
//!
//! Each species carries its own density, momentum and total energy, coupled
//! to the Maxwell projection block through source terms (not part of this
//! crate). The convective part is the Maxwell projection flux for the first
//! eight unknowns plus one independent Euler system per species.
//!
//! # State layout (conservative)
//!
//! ```text
//! [Bx By Bz Ex Ey Ez ψ φ | ρ_1..ρ_ns | ρ_1u_1 ρ_1v_1 .. ρ_ns u_ns ρ_ns v_ns | ρ_1E_1..ρ_ns E_ns]
//! ```
//!
//! The `RhoiViTi` representation has the same layout with velocities
//! in place of momenta and temperatures in place of energies.
//!
//! # Species gas constants
//!
//! With two species (ions, neutrals) the gas constants are fixed by the
//! Boltzmann constant `k_B`. The ion fluid also carries the electron
//! pressure, so `R_ion = 2k_B/m_ion` and `R_neutral = k_B/m_neutral`.
//! Otherwise `R_i = K/m_i` with the configured `K`. In both cases
//! `Cv_i = R_i/(γ-1)`.

use std::sync::Arc;

use nalgebra::DVector;

use crate::models::config::{ModelConfig, MultiFluidMhdConfig};
use crate::models::maxwell::{MaxwellConstants, NB_EM_EQS};
use crate::physics::constants::BOLTZMANN;
use crate::physics::data::RealVector;
use crate::physics::error::{check_positive, check_size, PhysicsError, PhysicsResult};
use crate::physics::term::{ConvectiveTerm, ScalarGroupKind, ScalarGroupTable};
use crate::physics::traits::{Dimension, PhysicalModel, PhysicalQuantity};
use crate::registry::{Provider, RegistryBuilder};

/// Offsets of the multi-fluid reference data vector
///
/// ```text
/// [EM (8) | ρ | y_1..y_ns | u_1 v_1 .. u_ns v_ns | T_1 p_1 a_1 H_1 .. T_ns p_ns a_ns H_ns]
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MfmhdReferenceLayout {
    /// Total density
    pub rho: usize,
    /// First mass fraction
    pub first_species: usize,
    /// First velocity component (two per species)
    pub first_velocity: usize,
    /// Temperature of the first species
    pub first_temperature: usize,
    /// Distance between two species' thermodynamic records `[T, p, a, H]`
    pub temperature_stride: usize,
    /// Total size
    pub size: usize,
}

impl MfmhdReferenceLayout {
    fn new(nb_species: usize) -> Self {
        let rho = NB_EM_EQS;
        let first_species = rho + 1;
        let first_velocity = first_species + nb_species;
        let first_temperature = first_velocity + 2 * nb_species;
        Self {
            rho,
            first_species,
            first_velocity,
            first_temperature,
            temperature_stride: 4,
            size: first_temperature + 4 * nb_species,
        }
    }

    pub fn temperature(&self, species: usize) -> usize {
        self.first_temperature + self.temperature_stride * species
    }

    pub fn pressure(&self, species: usize) -> usize {
        self.temperature(species) + 1
    }

    pub fn sound_speed(&self, species: usize) -> usize {
        self.temperature(species) + 2
    }

    pub fn enthalpy(&self, species: usize) -> usize {
        self.temperature(species) + 3
    }
}

/// Primitive quantities of one species
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpeciesState {
    pub rho: f64,
    pub velocity: [f64; 2],
    pub temperature: f64,
    pub pressure: f64,
    pub sound_speed: f64,
    /// Specific total enthalpy
    pub enthalpy: f64,
}

/// Constants and layout of the multi-fluid MHD equations
#[derive(Debug, Clone, PartialEq)]
pub struct EulerMfmhdTerm {
    maxwell: MaxwellConstants,
    nb_species: usize,
    molecular_mass1: f64,
    molecular_mass2: f64,
    molecular_mass3: f64,
    species_masses: Vec<f64>,
    gamma: f64,
    k: f64,
    groups: ScalarGroupTable,
    layout: MfmhdReferenceLayout,
}

impl EulerMfmhdTerm {
    pub fn new(config: &MultiFluidMhdConfig, maxwell: MaxwellConstants) -> PhysicsResult<Self> {
        config.validate()?;
        let ns = config.nb_species;

        let species_masses = match &config.species_masses {
            Some(masses) => masses.clone(),
            None if ns == 2 => vec![config.molecular_mass3, config.molecular_mass2],
            None if ns == 3 => vec![config.molecular_mass1, config.molecular_mass2, config.molecular_mass3],
            None => {
                return Err(PhysicsError::config(format!(
                    "no default species masses for {} species",
                    ns
                )));
            }
        };

        let groups = ScalarGroupTable::contiguous(
            NB_EM_EQS,
            &[
                (ScalarGroupKind::Species, ns),
                (ScalarGroupKind::Momentum, 2 * ns),
                (ScalarGroupKind::Energy, ns),
            ],
        )?;

        Ok(Self {
            maxwell,
            nb_species: ns,
            molecular_mass1: config.molecular_mass1,
            molecular_mass2: config.molecular_mass2,
            molecular_mass3: config.molecular_mass3,
            species_masses,
            gamma: config.gamma,
            k: config.k,
            groups,
            layout: MfmhdReferenceLayout::new(ns),
        })
    }

    pub fn maxwell(&self) -> &MaxwellConstants {
        &self.maxwell
    }

    pub fn nb_species(&self) -> usize {
        self.nb_species
    }

    /// Electron mass option
    pub fn get_molecular_mass1(&self) -> f64 {
        self.molecular_mass1
    }

    /// Neutral mass option
    pub fn get_molecular_mass2(&self) -> f64 {
        self.molecular_mass2
    }

    /// Ion mass option
    pub fn get_molecular_mass3(&self) -> f64 {
        self.molecular_mass3
    }

    pub fn get_gamma(&self) -> f64 {
        self.gamma
    }

    pub fn get_k(&self) -> f64 {
        self.k
    }

    /// Resolved mass of every species, in state order
    pub fn species_masses(&self) -> &[f64] {
        &self.species_masses
    }

    pub fn species_gas_constant(&self, species: usize) -> f64 {
        let mass = self.species_masses[species];
        match (self.nb_species, species) {
            (2, 0) => 2.0 * BOLTZMANN / mass,
            (2, _) => BOLTZMANN / mass,
            _ => self.k / mass,
        }
    }

    pub fn species_cv(&self, species: usize) -> f64 {
        self.species_gas_constant(species) / (self.gamma - 1.0)
    }

    pub fn nb_eqs(&self) -> usize {
        self.groups.nb_eqs()
    }

    pub fn scalar_groups(&self) -> &ScalarGroupTable {
        &self.groups
    }

    pub fn reference_layout(&self) -> MfmhdReferenceLayout {
        self.layout
    }

    /// State offset of the density of `species`
    pub fn density_index(&self, species: usize) -> usize {
        NB_EM_EQS + species
    }

    /// State offset of the x momentum (or velocity) of `species`
    pub fn momentum_index(&self, species: usize) -> usize {
        NB_EM_EQS + self.nb_species + 2 * species
    }

    /// State offset of the energy (or temperature) of `species`
    pub fn energy_index(&self, species: usize) -> usize {
        NB_EM_EQS + 3 * self.nb_species + species
    }

    /// Primitive quantities of one species from a conservative state
    pub fn species_from_conservative(&self, state: &[f64], species: usize) -> PhysicsResult<SpeciesState> {
        const OP: &str = "species_from_conservative";
        check_size("state", self.nb_eqs(), state.len())?;

        let rho = check_positive(OP, PhysicalQuantity::Density, state[self.density_index(species)])?;
        let m = self.momentum_index(species);
        let velocity = [state[m] / rho, state[m + 1] / rho];
        let kinetic = 0.5 * (velocity[0] * velocity[0] + velocity[1] * velocity[1]);
        let rho_e = state[self.energy_index(species)];

        let temperature = (rho_e / rho - kinetic) / self.species_cv(species);
        let temperature = check_positive(OP, PhysicalQuantity::Temperature, temperature)?;
        let pressure = rho * self.species_gas_constant(species) * temperature;
        let sound_speed = (self.gamma * pressure / rho).sqrt();

        Ok(SpeciesState {
            rho,
            velocity,
            temperature,
            pressure,
            sound_speed,
            enthalpy: (rho_e + pressure) / rho,
        })
    }

    /// Reference data vector from a conservative state
    pub fn physical_data_from_state(&self, state: &[f64]) -> PhysicsResult<RealVector> {
        let layout = self.layout;
        check_size("state", self.nb_eqs(), state.len())?;
        let mut data = DVector::zeros(layout.size);
        data.rows_mut(0, NB_EM_EQS).copy_from_slice(&state[..NB_EM_EQS]);

        let species: Vec<SpeciesState> = (0..self.nb_species)
            .map(|i| self.species_from_conservative(state, i))
            .collect::<PhysicsResult<_>>()?;
        let rho: f64 = species.iter().map(|s| s.rho).sum();
        data[layout.rho] = rho;

        for (i, s) in species.iter().enumerate() {
            data[layout.first_species + i] = s.rho / rho;
            data[layout.first_velocity + 2 * i] = s.velocity[0];
            data[layout.first_velocity + 2 * i + 1] = s.velocity[1];
            data[layout.temperature(i)] = s.temperature;
            data[layout.pressure(i)] = s.pressure;
            data[layout.sound_speed(i)] = s.sound_speed;
            data[layout.enthalpy(i)] = s.enthalpy;
        }
        Ok(data)
    }
}

// =================================================================================================
// Physical model
// =================================================================================================

/// Multi-fluid MHD physical model (`EulerMFMHD2D`)
#[derive(Debug, Clone)]
pub struct EulerMfmhdModel {
    term: ConvectiveTerm,
}

impl EulerMfmhdModel {
    pub const NAME: &'static str = "EulerMFMHD2D";

    pub fn new(config: &ModelConfig) -> PhysicsResult<Self> {
        let maxwell = MaxwellConstants::new(&config.maxwell)?;
        let term = EulerMfmhdTerm::new(&config.multi_fluid_mhd, maxwell)?;
        Ok(Self {
            term: ConvectiveTerm::EulerMfmhd(Arc::new(term)),
        })
    }
}

impl PhysicalModel for EulerMfmhdModel {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn dimension(&self) -> Dimension {
        Dimension::Dim2
    }

    fn get_convective_term(&self) -> &ConvectiveTerm {
        &self.term
    }

    fn description(&self) -> Option<&str> {
        Some("Multi-fluid MHD with Maxwell projection")
    }
}

fn create(dimension: Dimension, config: &ModelConfig) -> PhysicsResult<Box<dyn PhysicalModel>> {
    if dimension != Dimension::Dim2 {
        return Err(PhysicsError::config(format!(
            "{} is only available in 2D, requested {}",
            EulerMfmhdModel::NAME,
            dimension
        )));
    }
    Ok(Box::new(EulerMfmhdModel::new(config)?))
}

pub(crate) fn register_providers(builder: &mut RegistryBuilder) -> PhysicsResult<()> {
    builder.register(EulerMfmhdModel::NAME, Dimension::Dim2, Provider::Model(create))?;
    Ok(())
}

// =================================================================================================
// Tests
// =================================================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn two_species() -> EulerMfmhdTerm {
        let config = MultiFluidMhdConfig {
            gamma: 1.4,
            molecular_mass2: 2.3e-26,
            molecular_mass3: 1.67e-27,
            ..MultiFluidMhdConfig::default()
        };
        EulerMfmhdTerm::new(&config, MaxwellConstants::default()).unwrap()
    }

    #[test]
    fn test_layout_two_species() {
        let term = two_species();
        assert_eq!(term.nb_eqs(), 16);
        assert_eq!(term.density_index(1), 9);
        assert_eq!(term.momentum_index(1), 12);
        assert_eq!(term.energy_index(0), 14);

        let groups = term.scalar_groups();
        assert_eq!(groups.fixed_block_size(), 8);
        assert_eq!(groups.first_scalar_var(2).unwrap(), 14);

        let layout = term.reference_layout();
        assert_eq!(layout.rho, 8);
        assert_eq!(layout.first_velocity, 11);
        assert_eq!(layout.first_temperature, 15);
        assert_eq!(layout.temperature(1), 19);
        assert_eq!(layout.size, 23);
    }

    #[test]
    fn test_two_species_gas_constants() {
        let term = two_species();
        assert_relative_eq!(term.species_gas_constant(0), 2.0 * BOLTZMANN / 1.67e-27);
        assert_relative_eq!(term.species_gas_constant(1), BOLTZMANN / 2.3e-26);
        assert_relative_eq!(term.species_cv(1), BOLTZMANN / 2.3e-26 / 0.4, max_relative = 1e-14);
    }

    #[test]
    fn test_two_species_ignore_configured_k() {
        let config = MultiFluidMhdConfig {
            gamma: 1.4,
            k: 1.0e-20,
            molecular_mass2: 2.3e-26,
            molecular_mass3: 1.67e-27,
            ..MultiFluidMhdConfig::default()
        };
        let term = EulerMfmhdTerm::new(&config, MaxwellConstants::default()).unwrap();
        assert_relative_eq!(term.species_gas_constant(0), 2.0 * BOLTZMANN / 1.67e-27);
        assert_relative_eq!(term.species_gas_constant(1), BOLTZMANN / 2.3e-26);

        let three = MultiFluidMhdConfig { nb_species: 3, ..config };
        let term = EulerMfmhdTerm::new(&three, MaxwellConstants::default()).unwrap();
        assert_relative_eq!(term.species_gas_constant(1), 1.0e-20 / 2.3e-26);
    }

    #[test]
    fn test_three_species_default_masses() {
        let config = MultiFluidMhdConfig { nb_species: 3, ..MultiFluidMhdConfig::default() };
        let term = EulerMfmhdTerm::new(&config, MaxwellConstants::default()).unwrap();

        assert_eq!(term.species_masses()[0], term.get_molecular_mass1());
        assert_eq!(term.species_masses()[2], term.get_molecular_mass3());
        assert_relative_eq!(term.species_gas_constant(0), BOLTZMANN / term.get_molecular_mass1());
    }

    #[test]
    fn test_physical_data() {
        let term = two_species();
        let cv0 = term.species_cv(0);
        let cv1 = term.species_cv(1);

        let mut state = vec![0.0; 16];
        state[8] = 1.0;
        state[9] = 0.5;
        state[10] = 10.0;
        state[14] = 1.0 * (cv0 * 300.0 + 50.0);
        state[15] = 0.5 * cv1 * 250.0;

        let data = term.physical_data_from_state(&state).unwrap();
        let layout = term.reference_layout();
        assert_relative_eq!(data[layout.rho], 1.5);
        assert_relative_eq!(data[layout.first_species], 1.0 / 1.5);
        assert_relative_eq!(data[layout.first_velocity], 10.0);
        assert_relative_eq!(data[layout.temperature(0)], 300.0, max_relative = 1e-12);
        assert_relative_eq!(data[layout.temperature(1)], 250.0, max_relative = 1e-12);
        assert_relative_eq!(
            data[layout.pressure(1)],
            0.5 * term.species_gas_constant(1) * 250.0,
            max_relative = 1e-12
        );
    }

    #[test]
    fn test_model_is_2d_only() {
        let config = ModelConfig::default();
        assert!(create(Dimension::Dim3, &config).err().unwrap().is_configuration_error());

        let model = create(Dimension::Dim2, &config).unwrap();
        assert_eq!(model.name(), "EulerMFMHD2D");
        assert_eq!(model.transformer_key(
            crate::physics::Representation::RhoiViTi,
            crate::physics::Representation::Conservative,
        ), "EulerMFMHD2DRhoiViTiToCons");
    }
}
