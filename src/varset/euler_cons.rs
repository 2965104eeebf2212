//! Conservative variable set of the perfect-gas Euler model
//!
//! State `[ρ, ρu, ρv, (ρw), ρE]`, a single-species mixture-Euler block.

use std::sync::Arc;

use crate::models::EulerTerm;
use crate::physics::data::{RealMatrix, RealVector, State};
use crate::physics::error::{check_size, PhysicsResult};
use crate::physics::term::ConvectiveTerm;
use crate::physics::traits::{Dimension, Representation};
use crate::registry::{check_dimension, Provider, RegistryBuilder};
use crate::varset::eigen::{EigenSystem, MixtureEulerBlock};
use crate::varset::{axis_jacobians, VarSet, VarSetCore};

/// `Euler2DCons` / `Euler3DCons`
#[derive(Debug, Clone)]
pub struct EulerConsVarSet {
    core: VarSetCore,
    term: Arc<EulerTerm>,
}

impl EulerConsVarSet {
    pub fn new(term: Arc<EulerTerm>) -> Self {
        let nb_eqs = term.nb_eqs();
        let core = VarSetCore::new(
            "EulerConsVarSet",
            format!("Euler{}Cons", term.dimension()),
            term.dimension(),
            Representation::Conservative,
            nb_eqs,
            nb_eqs,
        );
        Self { core, term }
    }

    pub fn term(&self) -> &EulerTerm {
        &self.term
    }

    fn block(&self, pdata: &RealVector) -> MixtureEulerBlock {
        let dim = self.term.dimension().size();
        MixtureEulerBlock {
            densities: vec![pdata[EulerTerm::RHO]],
            velocity: pdata.as_slice()[EulerTerm::VX..EulerTerm::VX + dim].to_vec(),
            pressure: pdata[EulerTerm::P],
            enthalpy: pdata[EulerTerm::H],
            sound_speed: pdata[EulerTerm::A],
            gamma: self.term.get_gamma(),
        }
    }
}

impl VarSet for EulerConsVarSet {
    fn core(&self) -> &VarSetCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut VarSetCore {
        &mut self.core
    }

    fn physical_data_size(&self) -> usize {
        EulerTerm::DATA_SIZE
    }

    fn compute_physical_data(&self, state: &State) -> PhysicsResult<RealVector> {
        self.core.check_state("compute_physical_data", state)?;
        self.term.physical_data_from_conservative(state.as_slice())
    }

    fn compute_flux(&self, pdata: &RealVector, normal: &[f64]) -> PhysicsResult<RealVector> {
        self.core.check_call("compute_flux", pdata, EulerTerm::DATA_SIZE, normal)?;
        Ok(self.block(pdata).flux(normal))
    }

    fn compute_jacobians(&self, pdata: &RealVector) -> PhysicsResult<Vec<RealMatrix>> {
        self.core.ensure_setup("compute_jacobians")?;
        check_size("physical data", EulerTerm::DATA_SIZE, pdata.len())?;
        let block = self.block(pdata);
        Ok(axis_jacobians(self.term.dimension(), |n| block.jacobian(n)))
    }

    fn compute_eigen_values_vectors(&self, pdata: &RealVector, normal: &[f64]) -> PhysicsResult<EigenSystem> {
        self.core.check_call("compute_eigen_values_vectors", pdata, EulerTerm::DATA_SIZE, normal)?;
        self.block(pdata).eigen_system(normal)
    }

    fn compute_eigen_values(&self, pdata: &RealVector, normal: &[f64]) -> PhysicsResult<RealVector> {
        self.core.check_call("compute_eigen_values", pdata, EulerTerm::DATA_SIZE, normal)?;
        Ok(self.block(pdata).eigen_values(normal))
    }
}

fn create(dimension: Dimension, term: &ConvectiveTerm) -> PhysicsResult<Box<dyn VarSet>> {
    let term = term.cast::<EulerTerm>()?;
    check_dimension("EulerConsVarSet", term.dimension(), dimension)?;
    Ok(Box::new(EulerConsVarSet::new(term)))
}

pub(crate) fn register_providers(builder: &mut RegistryBuilder) -> PhysicsResult<()> {
    builder.register("Euler2DCons", Dimension::Dim2, Provider::VarSet(create))?;
    builder.register("Euler3DCons", Dimension::Dim3, Provider::VarSet(create))?;
    Ok(())
}
