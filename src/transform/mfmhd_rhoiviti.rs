//! `RhoiViTi` ↔ conservative transformers of the multi-fluid MHD model
//!
//! The `RhoiViTi` state stores, per species, the partial density, the two
//! velocity components and the temperature, at the same offsets the
//! conservative state uses for density, momentum and total energy. The
//! eight electromagnetic unknowns are copied verbatim.
//!
//! Total energy per species is `ρ_i (Cv_i T_i + ½|V_i|²)`, with the gas
//! constants of [`EulerMfmhdTerm::species_gas_constant`].

use std::sync::Arc;

use nalgebra::DVector;

use crate::models::maxwell::NB_EM_EQS;
use crate::models::EulerMfmhdTerm;
use crate::physics::data::{RealVector, State};
use crate::physics::error::{check_positive, check_size, PhysicsResult};
use crate::physics::term::ConvectiveTerm;
use crate::physics::traits::{Dimension, PhysicalQuantity, Representation};
use crate::registry::{check_dimension, Provider, RegistryBuilder};
use crate::transform::VarSetTransformer;

fn log_gas_constants(name: &str, term: &EulerMfmhdTerm) {
    if term.nb_species() == 2 {
        log::debug!(
            "{}: two-species gas constants, R_ion = 2k_B/m = {:e}, R_neutral = k_B/m = {:e}",
            name,
            term.species_gas_constant(0),
            term.species_gas_constant(1)
        );
    } else {
        log::debug!("{}: {} species, R_i = K/m_i", name, term.nb_species());
    }
}

// =================================================================================================
// RhoiViTi -> Cons
// =================================================================================================

/// `EulerMFMHD2DRhoiViTiToCons`
#[derive(Debug, Clone)]
pub struct EulerMfmhdRhoiViTiToCons {
    term: Arc<EulerMfmhdTerm>,
}

impl EulerMfmhdRhoiViTiToCons {
    pub const NAME: &'static str = "EulerMFMHD2DRhoiViTiToCons";

    pub fn new(term: Arc<EulerMfmhdTerm>) -> Self {
        log_gas_constants(Self::NAME, &term);
        Self { term }
    }

    fn species_energy(&self, species: usize, rho: f64, u: f64, v: f64, temperature: f64) -> f64 {
        rho * (self.term.species_cv(species) * temperature + 0.5 * (u * u + v * v))
    }
}

impl VarSetTransformer for EulerMfmhdRhoiViTiToCons {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn source_representation(&self) -> Representation {
        Representation::RhoiViTi
    }

    fn target_representation(&self) -> Representation {
        Representation::Conservative
    }

    fn nb_eqs(&self) -> usize {
        self.term.nb_eqs()
    }

    fn transform(&self, state: &State) -> PhysicsResult<State> {
        check_size("state", self.nb_eqs(), state.len())?;
        let term = &self.term;

        let mut result = DVector::zeros(self.nb_eqs());
        result.rows_mut(0, NB_EM_EQS).copy_from(&state.rows(0, NB_EM_EQS));

        for i in 0..term.nb_species() {
            let (d, m, e) = (term.density_index(i), term.momentum_index(i), term.energy_index(i));
            let rho = state[d];
            let (u, v) = (state[m], state[m + 1]);

            result[d] = rho;
            result[m] = rho * u;
            result[m + 1] = rho * v;
            result[e] = self.species_energy(i, rho, u, v, state[e]);
        }
        Ok(result)
    }

    fn transform_from_ref(&self, pdata: &RealVector) -> PhysicsResult<State> {
        let term = &self.term;
        let layout = term.reference_layout();
        check_size("physical data", layout.size, pdata.len())?;

        let mut result = DVector::zeros(self.nb_eqs());
        result.rows_mut(0, NB_EM_EQS).copy_from(&pdata.rows(0, NB_EM_EQS));

        let rho_total = pdata[layout.rho];
        for i in 0..term.nb_species() {
            let (d, m, e) = (term.density_index(i), term.momentum_index(i), term.energy_index(i));
            let rho = rho_total * pdata[layout.first_species + i];
            let u = pdata[layout.first_velocity + 2 * i];
            let v = pdata[layout.first_velocity + 2 * i + 1];

            result[d] = rho;
            result[m] = rho * u;
            result[m + 1] = rho * v;
            result[e] = self.species_energy(i, rho, u, v, pdata[layout.temperature(i)]);
        }
        Ok(result)
    }
}

// =================================================================================================
// Cons -> RhoiViTi
// =================================================================================================

/// `EulerMFMHD2DConsToRhoiViTi`
#[derive(Debug, Clone)]
pub struct EulerMfmhdConsToRhoiViTi {
    term: Arc<EulerMfmhdTerm>,
}

impl EulerMfmhdConsToRhoiViTi {
    pub const NAME: &'static str = "EulerMFMHD2DConsToRhoiViTi";

    pub fn new(term: Arc<EulerMfmhdTerm>) -> Self {
        log_gas_constants(Self::NAME, &term);
        Self { term }
    }
}

impl VarSetTransformer for EulerMfmhdConsToRhoiViTi {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn source_representation(&self) -> Representation {
        Representation::Conservative
    }

    fn target_representation(&self) -> Representation {
        Representation::RhoiViTi
    }

    fn nb_eqs(&self) -> usize {
        self.term.nb_eqs()
    }

    fn transform(&self, state: &State) -> PhysicsResult<State> {
        const OP: &str = "EulerMfmhdConsToRhoiViTi::transform";
        check_size("state", self.nb_eqs(), state.len())?;
        let term = &self.term;

        let mut result = DVector::zeros(self.nb_eqs());
        result.rows_mut(0, NB_EM_EQS).copy_from(&state.rows(0, NB_EM_EQS));

        for i in 0..term.nb_species() {
            let (d, m, e) = (term.density_index(i), term.momentum_index(i), term.energy_index(i));
            let rho = check_positive(OP, PhysicalQuantity::Density, state[d])?;
            let (u, v) = (state[m] / rho, state[m + 1] / rho);
            let temperature = (state[e] / rho - 0.5 * (u * u + v * v)) / term.species_cv(i);

            result[d] = rho;
            result[m] = u;
            result[m + 1] = v;
            result[e] = check_positive(OP, PhysicalQuantity::Temperature, temperature)?;
        }
        Ok(result)
    }

    fn transform_from_ref(&self, pdata: &RealVector) -> PhysicsResult<State> {
        let term = &self.term;
        let layout = term.reference_layout();
        check_size("physical data", layout.size, pdata.len())?;

        let mut result = DVector::zeros(self.nb_eqs());
        result.rows_mut(0, NB_EM_EQS).copy_from(&pdata.rows(0, NB_EM_EQS));

        for i in 0..term.nb_species() {
            let m = term.momentum_index(i);
            result[term.density_index(i)] = pdata[layout.rho] * pdata[layout.first_species + i];
            result[m] = pdata[layout.first_velocity + 2 * i];
            result[m + 1] = pdata[layout.first_velocity + 2 * i + 1];
            result[term.energy_index(i)] = pdata[layout.temperature(i)];
        }
        Ok(result)
    }
}

// =================================================================================================
// Registration
// =================================================================================================

fn create_to_cons(dimension: Dimension, term: &ConvectiveTerm) -> PhysicsResult<Box<dyn VarSetTransformer>> {
    let term = term.cast::<EulerMfmhdTerm>()?;
    check_dimension(EulerMfmhdRhoiViTiToCons::NAME, Dimension::Dim2, dimension)?;
    Ok(Box::new(EulerMfmhdRhoiViTiToCons::new(term)))
}

fn create_to_rhoiviti(dimension: Dimension, term: &ConvectiveTerm) -> PhysicsResult<Box<dyn VarSetTransformer>> {
    let term = term.cast::<EulerMfmhdTerm>()?;
    check_dimension(EulerMfmhdConsToRhoiViTi::NAME, Dimension::Dim2, dimension)?;
    Ok(Box::new(EulerMfmhdConsToRhoiViTi::new(term)))
}

pub(crate) fn register_providers(builder: &mut RegistryBuilder) -> PhysicsResult<()> {
    builder.register(
        EulerMfmhdRhoiViTiToCons::NAME,
        Dimension::Dim2,
        Provider::Transformer(create_to_cons),
    )?;
    builder.register(
        EulerMfmhdConsToRhoiViTi::NAME,
        Dimension::Dim2,
        Provider::Transformer(create_to_rhoiviti),
    )?;
    Ok(())
}
