//! Variable set of the passive scalar model

use std::sync::Arc;

use crate::models::PassiveScalarTerm;
use crate::physics::data::{RealMatrix, RealVector, State};
use crate::physics::error::{check_size, PhysicsResult};
use crate::physics::term::ConvectiveTerm;
use crate::physics::traits::{Dimension, Representation};
use crate::registry::{check_dimension, Provider, RegistryBuilder};
use crate::varset::eigen::{EigenSystem, ScalarAdvectionBlock};
use crate::varset::{axis_jacobians, VarSet, VarSetCore};

/// `PassiveScalar2DCons` / `PassiveScalar3DCons`
#[derive(Debug, Clone)]
pub struct ScalarAdvectionVarSet {
    core: VarSetCore,
    term: Arc<PassiveScalarTerm>,
}

impl ScalarAdvectionVarSet {
    pub fn new(term: Arc<PassiveScalarTerm>) -> Self {
        let core = VarSetCore::new(
            "ScalarAdvectionVarSet",
            format!("PassiveScalar{}Cons", term.dimension()),
            term.dimension(),
            Representation::Conservative,
            1,
            1,
        );
        Self { core, term }
    }

    fn block(pdata: &RealVector, normal: &[f64]) -> ScalarAdvectionBlock {
        let speed = normal
            .iter()
            .enumerate()
            .map(|(d, n)| pdata[PassiveScalarTerm::VX + d] * n)
            .sum();
        ScalarAdvectionBlock { normal_speed: speed }
    }
}

impl VarSet for ScalarAdvectionVarSet {
    fn core(&self) -> &VarSetCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut VarSetCore {
        &mut self.core
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
        Ok(Self::block(pdata, normal).flux(pdata[PassiveScalarTerm::T]))
    }

    fn compute_jacobians(&self, pdata: &RealVector) -> PhysicsResult<Vec<RealMatrix>> {
        self.core.ensure_setup("compute_jacobians")?;
        check_size("physical data", self.physical_data_size(), pdata.len())?;
        Ok(axis_jacobians(self.term.dimension(), |n| Self::block(pdata, n).jacobian()))
    }

    fn compute_eigen_values_vectors(&self, pdata: &RealVector, normal: &[f64]) -> PhysicsResult<EigenSystem> {
        self.core
            .check_call("compute_eigen_values_vectors", pdata, self.physical_data_size(), normal)?;
        Ok(Self::block(pdata, normal).eigen_system())
    }

    fn compute_eigen_values(&self, pdata: &RealVector, normal: &[f64]) -> PhysicsResult<RealVector> {
        self.core.check_call("compute_eigen_values", pdata, self.physical_data_size(), normal)?;
        Ok(Self::block(pdata, normal).eigen_system().eigen_values)
    }
}

fn create(dimension: Dimension, term: &ConvectiveTerm) -> PhysicsResult<Box<dyn VarSet>> {
    let term = term.cast::<PassiveScalarTerm>()?;
    check_dimension("ScalarAdvectionVarSet", term.dimension(), dimension)?;
    Ok(Box::new(ScalarAdvectionVarSet::new(term)))
}

pub(crate) fn register_providers(builder: &mut RegistryBuilder) -> PhysicsResult<()> {
    builder.register("PassiveScalar2DCons", Dimension::Dim2, Provider::VarSet(create))?;
    builder.register("PassiveScalar3DCons", Dimension::Dim3, Provider::VarSet(create))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::config::PassiveScalarConfig;

    #[test]
    fn test_upwind_split() {
        let config = PassiveScalarConfig { velocity: vec![3.0, 4.0], ..PassiveScalarConfig::default() };
        let term = PassiveScalarTerm::new(Dimension::Dim2, &config).unwrap();
        let mut var_set = ScalarAdvectionVarSet::new(Arc::new(term));
        var_set.setup().unwrap();

        let pdata = var_set.compute_physical_data(&State::from_vec(vec![300.0])).unwrap();
        let flux = var_set.compute_flux(&pdata, &[1.0, 0.0]).unwrap();
        assert_eq!(flux[0], 900.0);

        let split = var_set.split_jacobian(&pdata, &[-1.0, 0.0]).unwrap();
        assert_eq!(split.plus[(0, 0)], 0.0);
        assert_eq!(split.minus[(0, 0)], -3.0);
        assert_eq!(var_set.get_max_abs_eigen_value(&pdata, &[0.0, 1.0]).unwrap(), 4.0);
    }
}
