//! Variable set of the Maxwell projection model
//!
//! The state is its own reference data and the flux is linear, so the
//! Jacobian and its eigen-decomposition do not depend on the state.

use std::sync::Arc;

use crate::models::maxwell::NB_EM_EQS;
use crate::models::MaxwellProjectionTerm;
use crate::physics::data::{RealMatrix, RealVector, State};
use crate::physics::error::{check_size, PhysicsResult};
use crate::physics::term::ConvectiveTerm;
use crate::physics::traits::{Dimension, Representation};
use crate::registry::{check_dimension, Provider, RegistryBuilder};
use crate::varset::eigen::{EigenSystem, MaxwellBlock};
use crate::varset::{axis_jacobians, VarSet, VarSetCore};

/// `Maxwell2DProjectionCons` / `Maxwell3DProjectionCons`
#[derive(Debug, Clone)]
pub struct MaxwellProjectionVarSet {
    core: VarSetCore,
    block: MaxwellBlock,
    term: Arc<MaxwellProjectionTerm>,
}

impl MaxwellProjectionVarSet {
    pub fn new(term: Arc<MaxwellProjectionTerm>) -> Self {
        let core = VarSetCore::new(
            "MaxwellProjectionVarSet",
            format!("Maxwell{}ProjectionCons", term.dimension()),
            term.dimension(),
            Representation::Conservative,
            NB_EM_EQS,
            NB_EM_EQS,
        );
        Self {
            core,
            block: MaxwellBlock::new(*term.constants()),
            term,
        }
    }
}

impl VarSet for MaxwellProjectionVarSet {
    fn core(&self) -> &VarSetCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut VarSetCore {
        &mut self.core
    }

    fn physical_data_size(&self) -> usize {
        NB_EM_EQS
    }

    fn compute_physical_data(&self, state: &State) -> PhysicsResult<RealVector> {
        self.core.check_state("compute_physical_data", state)?;
        self.term.physical_data_from_state(state.as_slice())
    }

    fn compute_flux(&self, pdata: &RealVector, normal: &[f64]) -> PhysicsResult<RealVector> {
        self.core.check_call("compute_flux", pdata, NB_EM_EQS, normal)?;
        Ok(self.block.flux(pdata.as_slice(), normal))
    }

    fn compute_jacobians(&self, pdata: &RealVector) -> PhysicsResult<Vec<RealMatrix>> {
        self.core.ensure_setup("compute_jacobians")?;
        check_size("physical data", NB_EM_EQS, pdata.len())?;
        Ok(axis_jacobians(self.term.dimension(), |n| self.block.jacobian(n)))
    }

    fn compute_eigen_values_vectors(&self, pdata: &RealVector, normal: &[f64]) -> PhysicsResult<EigenSystem> {
        self.core.check_call("compute_eigen_values_vectors", pdata, NB_EM_EQS, normal)?;
        self.block.eigen_system(normal)
    }

    fn compute_eigen_values(&self, pdata: &RealVector, normal: &[f64]) -> PhysicsResult<RealVector> {
        self.core.check_call("compute_eigen_values", pdata, NB_EM_EQS, normal)?;
        Ok(self.block.eigen_values())
    }

    fn get_max_abs_eigen_value(&self, pdata: &RealVector, normal: &[f64]) -> PhysicsResult<f64> {
        self.core.check_call("get_max_abs_eigen_value", pdata, NB_EM_EQS, normal)?;
        Ok(self.block.max_abs_eigen_value())
    }
}

fn create(dimension: Dimension, term: &ConvectiveTerm) -> PhysicsResult<Box<dyn VarSet>> {
    let term = term.cast::<MaxwellProjectionTerm>()?;
    check_dimension("MaxwellProjectionVarSet", term.dimension(), dimension)?;
    Ok(Box::new(MaxwellProjectionVarSet::new(term)))
}

pub(crate) fn register_providers(builder: &mut RegistryBuilder) -> PhysicsResult<()> {
    builder.register("Maxwell2DProjectionCons", Dimension::Dim2, Provider::VarSet(create))?;
    builder.register("Maxwell3DProjectionCons", Dimension::Dim3, Provider::VarSet(create))?;
    Ok(())
}
