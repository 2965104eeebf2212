//! Conservative variable set of the ICP non-equilibrium model
//!
//! Species, momentum and energy form a frozen-mixture Euler block. The two
//! induction unknowns `Er`, `Ei` have no convective flux: zero rows and
//! columns in the Jacobian, eigenvalue 0 and unit eigenvectors.

use std::sync::Arc;

use nalgebra::DMatrix;

use crate::models::{EulerTerm, IcpneqTerm};
use crate::physics::data::{RealMatrix, RealVector, State};
use crate::physics::error::{check_size, PhysicsResult};
use crate::physics::term::ConvectiveTerm;
use crate::physics::traits::{Dimension, Representation};
use crate::registry::{check_dimension, Provider, RegistryBuilder};
use crate::varset::eigen::{embed_matrix, EigenSystem, MixtureEulerBlock};
use crate::varset::{axis_jacobians, EquationSetData, VarSet, VarSetCore};

/// `ICPNEQ2DCons` / `ICPNEQ3DCons`
#[derive(Debug, Clone)]
pub struct IcpneqConsVarSet {
    core: VarSetCore,
    term: Arc<IcpneqTerm>,
}

impl IcpneqConsVarSet {
    pub fn new(term: Arc<IcpneqTerm>) -> Self {
        let core = VarSetCore::new(
            "IcpneqConsVarSet",
            format!("ICPNEQ{}Cons", term.dimension()),
            term.dimension(),
            Representation::Conservative,
            term.nb_eqs(),
            term.nb_flow_eqs(),
        );
        Self { core, term }
    }

    fn flow_block(&self, pdata: &RealVector) -> MixtureEulerBlock {
        let dim = self.term.dimension().size();
        let rho = pdata[EulerTerm::RHO];
        MixtureEulerBlock {
            densities: (0..self.term.nb_species()).map(|i| rho * pdata[IcpneqTerm::Y + i]).collect(),
            velocity: pdata.as_slice()[EulerTerm::VX..EulerTerm::VX + dim].to_vec(),
            pressure: pdata[EulerTerm::P],
            enthalpy: pdata[EulerTerm::H],
            sound_speed: pdata[EulerTerm::A],
            gamma: pdata[IcpneqTerm::GAMMA],
        }
    }

    fn flow_indices(&self) -> Vec<usize> {
        (0..self.term.nb_flow_eqs()).collect()
    }

    fn padded_jacobian(&self, block: &MixtureEulerBlock, normal: &[f64]) -> RealMatrix {
        let n = self.term.nb_eqs();
        let mut jac = DMatrix::zeros(n, n);
        embed_matrix(&mut jac, &block.jacobian(normal), &self.flow_indices());
        jac
    }
}

impl VarSet for IcpneqConsVarSet {
    fn core(&self) -> &VarSetCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut VarSetCore {
        &mut self.core
    }

    fn equation_sets(&self) -> Vec<EquationSetData> {
        let flow = self.term.nb_flow_eqs();
        vec![
            EquationSetData::new(0, 0, flow),
            EquationSetData::new(1, flow, self.term.nb_eqs() - flow),
        ]
    }

    fn physical_data_size(&self) -> usize {
        self.term.physical_data_size()
    }

    fn compute_physical_data(&self, state: &State) -> PhysicsResult<RealVector> {
        self.core.check_state("compute_physical_data", state)?;
        self.term.physical_data_from_state(state.as_slice())
    }

    fn compute_flux(&self, pdata: &RealVector, normal: &[f64]) -> PhysicsResult<RealVector> {
        self.core.check_call("compute_flux", pdata, self.physical_data_size(), normal)?;
        let flow = self.flow_block(pdata).flux(normal);
        Ok(flow.resize_vertically(self.term.nb_eqs(), 0.0))
    }

    fn compute_jacobians(&self, pdata: &RealVector) -> PhysicsResult<Vec<RealMatrix>> {
        self.core.ensure_setup("compute_jacobians")?;
        check_size("physical data", self.physical_data_size(), pdata.len())?;
        let block = self.flow_block(pdata);
        Ok(axis_jacobians(self.term.dimension(), |n| self.padded_jacobian(&block, n)))
    }

    fn compute_eigen_values_vectors(&self, pdata: &RealVector, normal: &[f64]) -> PhysicsResult<EigenSystem> {
        self.core
            .check_call("compute_eigen_values_vectors", pdata, self.physical_data_size(), normal)?;

        let flow = self.term.nb_flow_eqs();
        let mut system = EigenSystem::zeros(self.term.nb_eqs());
        system.embed(&self.flow_block(pdata).eigen_system(normal)?, &self.flow_indices());
        system.set_trivial(flow, 0.0);
        system.set_trivial(flow + 1, 0.0);
        Ok(system)
    }

    fn compute_eigen_values(&self, pdata: &RealVector, normal: &[f64]) -> PhysicsResult<RealVector> {
        self.core.check_call("compute_eigen_values", pdata, self.physical_data_size(), normal)?;
        let lambda = self.flow_block(pdata).eigen_values(normal);
        Ok(lambda.resize_vertically(self.term.nb_eqs(), 0.0))
    }
}

fn create(dimension: Dimension, term: &ConvectiveTerm) -> PhysicsResult<Box<dyn VarSet>> {
    let term = term.cast::<IcpneqTerm>()?;
    check_dimension("IcpneqConsVarSet", term.dimension(), dimension)?;
    Ok(Box::new(IcpneqConsVarSet::new(term)))
}

pub(crate) fn register_providers(builder: &mut RegistryBuilder) -> PhysicsResult<()> {
    builder.register("ICPNEQ2DCons", Dimension::Dim2, Provider::VarSet(create))?;
    builder.register("ICPNEQ3DCons", Dimension::Dim3, Provider::VarSet(create))?;
    Ok(())
}
