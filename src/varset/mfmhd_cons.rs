//! Conservative variable set of the multi-fluid MHD model
//!
//! The convective operator is block diagonal: the Maxwell projection block
//! on equations `0..8` and one single-species Euler block per fluid, whose
//! unknowns `[ρ_i, ρ_i u_i, ρ_i v_i, ρ_i E_i]` are scattered through the
//! state. Each block is computed locally and embedded through its index map.

use std::sync::Arc;

use nalgebra::{DMatrix, DVector};

use crate::models::maxwell::NB_EM_EQS;
use crate::models::EulerMfmhdTerm;
use crate::physics::data::{RealMatrix, RealVector, State};
use crate::physics::error::{check_size, PhysicsResult};
use crate::physics::term::ConvectiveTerm;
use crate::physics::traits::{Dimension, Representation};
use crate::registry::{check_dimension, Provider, RegistryBuilder};
use crate::varset::eigen::{embed_matrix, EigenSystem, MaxwellBlock, MixtureEulerBlock};
use crate::varset::{EquationSetData, VarSet, VarSetCore};

/// `EulerMFMHD2DCons`
#[derive(Debug, Clone)]
pub struct EulerMfmhdConsVarSet {
    core: VarSetCore,
    maxwell: MaxwellBlock,
    term: Arc<EulerMfmhdTerm>,
}

impl EulerMfmhdConsVarSet {
    pub fn new(term: Arc<EulerMfmhdTerm>) -> Self {
        let core = VarSetCore::new(
            "EulerMfmhdConsVarSet",
            "EulerMFMHD2DCons".to_string(),
            Dimension::Dim2,
            Representation::Conservative,
            term.nb_eqs(),
            NB_EM_EQS,
        );
        Self {
            core,
            maxwell: MaxwellBlock::new(*term.maxwell()),
            term,
        }
    }

    /// State indices of the Euler block of `species`
    pub fn species_indices(&self, species: usize) -> [usize; 4] {
        let m = self.term.momentum_index(species);
        [
            self.term.density_index(species),
            m,
            m + 1,
            self.term.energy_index(species),
        ]
    }

    fn species_block(&self, pdata: &RealVector, species: usize) -> MixtureEulerBlock {
        let layout = self.term.reference_layout();
        let u = layout.first_velocity + 2 * species;
        MixtureEulerBlock {
            densities: vec![pdata[layout.rho] * pdata[layout.first_species + species]],
            velocity: vec![pdata[u], pdata[u + 1]],
            pressure: pdata[layout.pressure(species)],
            enthalpy: pdata[layout.enthalpy(species)],
            sound_speed: pdata[layout.sound_speed(species)],
            gamma: self.term.get_gamma(),
        }
    }

    fn em_indices() -> Vec<usize> {
        (0..NB_EM_EQS).collect()
    }

    fn assemble_jacobian(&self, pdata: &RealVector, normal: &[f64]) -> RealMatrix {
        let n = self.term.nb_eqs();
        let mut jac = DMatrix::zeros(n, n);
        embed_matrix(&mut jac, &self.maxwell.jacobian(normal), &Self::em_indices());
        for i in 0..self.term.nb_species() {
            let block = self.species_block(pdata, i).jacobian(normal);
            embed_matrix(&mut jac, &block, &self.species_indices(i));
        }
        jac
    }
}

impl VarSet for EulerMfmhdConsVarSet {
    fn core(&self) -> &VarSetCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut VarSetCore {
        &mut self.core
    }

    fn equation_sets(&self) -> Vec<EquationSetData> {
        vec![
            EquationSetData::new(0, 0, NB_EM_EQS),
            EquationSetData::new(1, NB_EM_EQS, self.term.nb_eqs() - NB_EM_EQS),
        ]
    }

    fn physical_data_size(&self) -> usize {
        self.term.reference_layout().size
    }

    fn compute_physical_data(&self, state: &State) -> PhysicsResult<RealVector> {
        self.core.check_state("compute_physical_data", state)?;
        self.term.physical_data_from_state(state.as_slice())
    }

    fn compute_flux(&self, pdata: &RealVector, normal: &[f64]) -> PhysicsResult<RealVector> {
        self.core.check_call("compute_flux", pdata, self.physical_data_size(), normal)?;

        let mut flux = DVector::zeros(self.term.nb_eqs());
        let em = self.maxwell.flux(&pdata.as_slice()[..NB_EM_EQS], normal);
        flux.rows_mut(0, NB_EM_EQS).copy_from(&em);

        for i in 0..self.term.nb_species() {
            let block = self.species_block(pdata, i).flux(normal);
            for (a, &k) in self.species_indices(i).iter().enumerate() {
                flux[k] = block[a];
            }
        }
        Ok(flux)
    }

    fn compute_jacobians(&self, pdata: &RealVector) -> PhysicsResult<Vec<RealMatrix>> {
        self.core.ensure_setup("compute_jacobians")?;
        check_size("physical data", self.physical_data_size(), pdata.len())?;
        Ok(vec![
            self.assemble_jacobian(pdata, &[1.0, 0.0]),
            self.assemble_jacobian(pdata, &[0.0, 1.0]),
        ])
    }

    fn compute_eigen_values_vectors(&self, pdata: &RealVector, normal: &[f64]) -> PhysicsResult<EigenSystem> {
        self.core
            .check_call("compute_eigen_values_vectors", pdata, self.physical_data_size(), normal)?;

        let mut system = EigenSystem::zeros(self.term.nb_eqs());
        system.embed(&self.maxwell.eigen_system(normal)?, &Self::em_indices());
        for i in 0..self.term.nb_species() {
            let block = self.species_block(pdata, i).eigen_system(normal)?;
            system.embed(&block, &self.species_indices(i));
        }
        Ok(system)
    }

    fn compute_eigen_values(&self, pdata: &RealVector, normal: &[f64]) -> PhysicsResult<RealVector> {
        self.core.check_call("compute_eigen_values", pdata, self.physical_data_size(), normal)?;

        let mut lambda = DVector::zeros(self.term.nb_eqs());
        lambda.rows_mut(0, NB_EM_EQS).copy_from(&self.maxwell.eigen_values());
        for i in 0..self.term.nb_species() {
            let block = self.species_block(pdata, i).eigen_values(normal);
            for (a, &k) in self.species_indices(i).iter().enumerate() {
                lambda[k] = block[a];
            }
        }
        Ok(lambda)
    }
}

fn create(dimension: Dimension, term: &ConvectiveTerm) -> PhysicsResult<Box<dyn VarSet>> {
    let term = term.cast::<EulerMfmhdTerm>()?;
    check_dimension("EulerMfmhdConsVarSet", Dimension::Dim2, dimension)?;
    Ok(Box::new(EulerMfmhdConsVarSet::new(term)))
}

pub(crate) fn register_providers(builder: &mut RegistryBuilder) -> PhysicsResult<()> {
    builder.register("EulerMFMHD2DCons", Dimension::Dim2, Provider::VarSet(create))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::config::MultiFluidMhdConfig;
    use crate::models::MaxwellConstants;
    use approx::assert_relative_eq;

    fn var_set() -> EulerMfmhdConsVarSet {
        let config = MultiFluidMhdConfig {
            gamma: 1.4,
            molecular_mass2: 2.3e-26,
            molecular_mass3: 1.67e-27,
            ..MultiFluidMhdConfig::default()
        };
        let term = EulerMfmhdTerm::new(&config, MaxwellConstants::default()).unwrap();
        let mut var_set = EulerMfmhdConsVarSet::new(Arc::new(term));
        var_set.setup().unwrap();
        var_set
    }

    fn sample_state(var_set: &EulerMfmhdConsVarSet) -> State {
        let term = &var_set.term;
        let mut state = State::zeros(16);
        for k in 0..8 {
            state[k] = 0.1 * (k as f64 + 1.0);
        }
        state[8] = 1.0e-3;
        state[9] = 4.0e-3;
        state[10] = 1.0e-3 * 200.0;
        state[11] = 1.0e-3 * -50.0;
        state[12] = 4.0e-3 * 80.0;
        state[13] = 4.0e-3 * 30.0;
        state[14] = 1.0e-3 * (term.species_cv(0) * 5000.0 + 0.5 * (200.0f64.powi(2) + 50.0f64.powi(2)));
        state[15] = 4.0e-3 * (term.species_cv(1) * 1000.0 + 0.5 * (80.0f64.powi(2) + 30.0f64.powi(2)));
        state
    }

    #[test]
    fn test_equation_sets() {
        let var_set = var_set();
        let sets = var_set.eq_set_data();
        assert_eq!(sets, &[EquationSetData::new(0, 0, 8), EquationSetData::new(1, 8, 8)]);
        assert_eq!(var_set.get_block_separator(), 8);
        assert_eq!(var_set.species_indices(1), [9, 12, 13, 15]);
    }

    #[test]
    fn test_species_flux() {
        let var_set = var_set();
        let state = sample_state(&var_set);
        let pdata = var_set.compute_physical_data(&state).unwrap();
        let flux = var_set.compute_flux(&pdata, &[1.0, 0.0]).unwrap();

        assert_relative_eq!(flux[8], 1.0e-3 * 200.0, max_relative = 1e-12);
        assert_relative_eq!(flux[9], 4.0e-3 * 80.0, max_relative = 1e-12);
        let p_ion = pdata[var_set.term.reference_layout().pressure(0)];
        assert_relative_eq!(flux[10], 1.0e-3 * 200.0 * 200.0 + p_ion, max_relative = 1e-12);
    }

    #[test]
    fn test_eigen_reconstruction() {
        let var_set = var_set();
        let state = sample_state(&var_set);
        let pdata = var_set.compute_physical_data(&state).unwrap();
        let normal = [0.6, -0.8];

        let system = var_set.compute_eigen_values_vectors(&pdata, &normal).unwrap();
        let jac = var_set.normal_jacobian(&pdata, &normal).unwrap();
        let reconstructed = system.reconstruct();
        for i in 0..16 {
            for j in 0..16 {
                assert_relative_eq!(reconstructed[(i, j)], jac[(i, j)], epsilon = 1e-6 * jac.amax());
            }
        }
        assert_eq!(system.eigen_values, var_set.compute_eigen_values(&pdata, &normal).unwrap());
    }
}
