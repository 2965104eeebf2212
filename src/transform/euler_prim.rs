//! Primitive ↔ conservative transformers of the Euler model
//!
//! Primitive state `[ρ, u, v, (w), p]`, conservative `[ρ, ρu, ρv, (ρw), ρE]`.

use std::sync::Arc;

use nalgebra::DVector;

use crate::models::EulerTerm;
use crate::physics::data::{RealVector, State};
use crate::physics::error::{check_positive, check_size, PhysicsResult};
use crate::physics::term::ConvectiveTerm;
use crate::physics::traits::{Dimension, PhysicalQuantity, Representation};
use crate::registry::{check_dimension, Provider, RegistryBuilder};
use crate::transform::VarSetTransformer;

/// Conservative state from density, velocity and pressure
fn conservative(term: &EulerTerm, rho: f64, velocity: &[f64], pressure: f64) -> State {
    let dim = velocity.len();
    let mut state = DVector::zeros(dim + 2);
    state[0] = rho;
    for (k, u) in velocity.iter().enumerate() {
        state[1 + k] = rho * u;
    }
    state[dim + 1] = term.total_energy(rho, velocity, pressure);
    state
}

fn primitive(rho: f64, velocity: &[f64], pressure: f64) -> State {
    let mut values = Vec::with_capacity(velocity.len() + 2);
    values.push(rho);
    values.extend_from_slice(velocity);
    values.push(pressure);
    DVector::from_vec(values)
}

fn reference_velocity(term: &EulerTerm, pdata: &RealVector) -> PhysicsResult<Vec<f64>> {
    check_size("physical data", EulerTerm::DATA_SIZE, pdata.len())?;
    let dim = term.dimension().size();
    Ok(pdata.as_slice()[EulerTerm::VX..EulerTerm::VX + dim].to_vec())
}

// =================================================================================================
// Prim -> Cons
// =================================================================================================

/// `Euler2DPrimToCons` / `Euler3DPrimToCons`
#[derive(Debug, Clone)]
pub struct EulerPrimToCons {
    name: String,
    term: Arc<EulerTerm>,
}

impl EulerPrimToCons {
    pub fn new(term: Arc<EulerTerm>) -> Self {
        Self {
            name: format!("Euler{}PrimToCons", term.dimension()),
            term,
        }
    }
}

impl VarSetTransformer for EulerPrimToCons {
    fn name(&self) -> &str {
        &self.name
    }

    fn source_representation(&self) -> Representation {
        Representation::Primitive
    }

    fn target_representation(&self) -> Representation {
        Representation::Conservative
    }

    fn nb_eqs(&self) -> usize {
        self.term.nb_eqs()
    }

    fn transform(&self, state: &State) -> PhysicsResult<State> {
        check_size("state", self.nb_eqs(), state.len())?;
        let dim = self.term.dimension().size();
        let rho = check_positive("EulerPrimToCons::transform", PhysicalQuantity::Density, state[0])?;
        let pressure =
            check_positive("EulerPrimToCons::transform", PhysicalQuantity::Pressure, state[dim + 1])?;
        Ok(conservative(&self.term, rho, &state.as_slice()[1..=dim], pressure))
    }

    fn transform_from_ref(&self, pdata: &RealVector) -> PhysicsResult<State> {
        let velocity = reference_velocity(&self.term, pdata)?;
        Ok(conservative(&self.term, pdata[EulerTerm::RHO], &velocity, pdata[EulerTerm::P]))
    }
}

// =================================================================================================
// Cons -> Prim
// =================================================================================================

/// `Euler2DConsToPrim` / `Euler3DConsToPrim`
#[derive(Debug, Clone)]
pub struct EulerConsToPrim {
    name: String,
    term: Arc<EulerTerm>,
}

impl EulerConsToPrim {
    pub fn new(term: Arc<EulerTerm>) -> Self {
        Self {
            name: format!("Euler{}ConsToPrim", term.dimension()),
            term,
        }
    }
}

impl VarSetTransformer for EulerConsToPrim {
    fn name(&self) -> &str {
        &self.name
    }

    fn source_representation(&self) -> Representation {
        Representation::Conservative
    }

    fn target_representation(&self) -> Representation {
        Representation::Primitive
    }

    fn nb_eqs(&self) -> usize {
        self.term.nb_eqs()
    }

    fn transform(&self, state: &State) -> PhysicsResult<State> {
        let (rho, velocity, pressure) = self.term.primitive_from_conservative(state.as_slice())?;
        Ok(primitive(rho, &velocity, pressure))
    }

    fn transform_from_ref(&self, pdata: &RealVector) -> PhysicsResult<State> {
        let velocity = reference_velocity(&self.term, pdata)?;
        Ok(primitive(pdata[EulerTerm::RHO], &velocity, pdata[EulerTerm::P]))
    }
}

// =================================================================================================
// Registration
// =================================================================================================

fn create_prim_to_cons(dimension: Dimension, term: &ConvectiveTerm) -> PhysicsResult<Box<dyn VarSetTransformer>> {
    let term = term.cast::<EulerTerm>()?;
    check_dimension("EulerPrimToCons", term.dimension(), dimension)?;
    Ok(Box::new(EulerPrimToCons::new(term)))
}

fn create_cons_to_prim(dimension: Dimension, term: &ConvectiveTerm) -> PhysicsResult<Box<dyn VarSetTransformer>> {
    let term = term.cast::<EulerTerm>()?;
    check_dimension("EulerConsToPrim", term.dimension(), dimension)?;
    Ok(Box::new(EulerConsToPrim::new(term)))
}

pub(crate) fn register_providers(builder: &mut RegistryBuilder) -> PhysicsResult<()> {
    for dimension in [Dimension::Dim2, Dimension::Dim3] {
        builder.register(
            &format!("Euler{}PrimToCons", dimension),
            dimension,
            Provider::Transformer(create_prim_to_cons),
        )?;
        builder.register(
            &format!("Euler{}ConsToPrim", dimension),
            dimension,
            Provider::Transformer(create_cons_to_prim),
        )?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::config::EulerConfig;
    use approx::assert_relative_eq;

    fn term(dimension: Dimension) -> Arc<EulerTerm> {
        Arc::new(EulerTerm::new(dimension, &EulerConfig::default()).unwrap())
    }

    #[test]
    fn test_prim_to_cons() {
        let transformer = EulerPrimToCons::new(term(Dimension::Dim2));
        let cons = transformer.transform(&State::from_vec(vec![2.0, 3.0, -1.0, 4.0e4])).unwrap();

        assert_eq!(cons[1], 6.0);
        assert_eq!(cons[2], -2.0);
        assert_relative_eq!(cons[3], 4.0e4 / 0.4 + 10.0, max_relative = 1e-14);
    }

    #[test]
    fn test_inverse_pair() {
        let term = term(Dimension::Dim3);
        let to_cons = EulerPrimToCons::new(term.clone());
        let to_prim = EulerConsToPrim::new(term);

        let prim = State::from_vec(vec![1.3, 20.0, -7.0, 2.5, 9.5e4]);
        let back = to_prim.transform(&to_cons.transform(&prim).unwrap()).unwrap();
        assert_relative_eq!(back, prim, max_relative = 1e-12);
    }

    #[test]
    fn test_from_ref_matches_transform() {
        let term = term(Dimension::Dim2);
        let pdata = term.physical_data_from_primitive(0.8, &[15.0, 5.0], 7.0e4).unwrap();
        let to_cons = EulerPrimToCons::new(term);

        let from_ref = to_cons.transform_from_ref(&pdata).unwrap();
        let direct = to_cons.transform(&State::from_vec(vec![0.8, 15.0, 5.0, 7.0e4])).unwrap();
        assert_relative_eq!(from_ref, direct, max_relative = 1e-14);
    }

    #[test]
    fn test_non_physical_input() {
        let transformer = EulerPrimToCons::new(term(Dimension::Dim2));
        let err = transformer.transform(&State::from_vec(vec![-1.0, 0.0, 0.0, 1.0])).unwrap_err();
        assert!(err.is_numeric_domain());

        let err = transformer.transform(&State::from_vec(vec![1.0, 0.0, 0.0])).unwrap_err();
        assert!(err.is_invalid_state());
    }
}
