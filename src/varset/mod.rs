//! Variable sets
//!
//! A variable set is the numerical face of a physical model for one
//! representation of the state: it computes reference data, fluxes,
//! Jacobians, their eigen-decomposition and the flux-vector split.
//!
//! # Lifecycle
//!
//! Variable sets are created by the registry, then [`VarSet::setup`] builds
//! the equation-set metadata exactly once. Every computational call made
//! before `setup()` fails with [`PhysicsError::NotInitialized`]; a second
//! `setup()` fails with [`PhysicsError::AlreadyInitialized`] and leaves the
//! instance untouched.
//!
//! After setup a variable set is immutable: all operations take `&self` and
//! allocate their results, so one instance can be shared by any number of
//! threads.
//!
//! # Available variable sets
//!
//! | Key                       | Type                          |
//! |---------------------------|-------------------------------|
//! | `Euler{2,3}DCons`         | [`EulerConsVarSet`]           |
//! | `Maxwell{2,3}DProjectionCons` | [`MaxwellProjectionVarSet`] |
//! | `EulerMFMHD2DCons`        | [`EulerMfmhdConsVarSet`]      |
//! | `ICPNEQ{2,3}DCons`        | [`IcpneqConsVarSet`]          |
//! | `PassiveScalar{2,3}DCons` | [`ScalarAdvectionVarSet`]     |

// =================================================================================================
// Module Declarations
// =================================================================================================

pub mod eigen;
mod euler_cons;
mod icp_neq_cons;
mod maxwell_projection;
mod mfmhd_cons;
mod scalar_advection;

// =================================================================================================
// Public Re-exports
// =================================================================================================

pub use eigen::{EigenSystem, JacobianSplit};
pub use euler_cons::EulerConsVarSet;
pub use icp_neq_cons::IcpneqConsVarSet;
pub use maxwell_projection::MaxwellProjectionVarSet;
pub use mfmhd_cons::EulerMfmhdConsVarSet;
pub use scalar_advection::ScalarAdvectionVarSet;

use nalgebra::DMatrix;

use crate::physics::data::{axis_normal, check_normal, RealMatrix, RealVector, State};
use crate::physics::error::{check_size, PhysicsError, PhysicsResult};
use crate::physics::traits::{Dimension, Representation};
use crate::registry::RegistryBuilder;

// =================================================================================================
// Equation-set metadata
// =================================================================================================

/// One independent equation subsystem of a variable set
///
/// The multi-fluid model, for instance, exposes the Maxwell block
/// (`id 0`, equations `0..8`) and the fluid block (`id 1`, equations `8..`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EquationSetData {
    pub eq_set_id: usize,
    pub first_eq: usize,
    pub nb_eqs: usize,
}

impl EquationSetData {
    pub fn new(eq_set_id: usize, first_eq: usize, nb_eqs: usize) -> Self {
        Self { eq_set_id, first_eq, nb_eqs }
    }

    /// Equation indices covered by this subsystem
    pub fn equations(&self) -> std::ops::Range<usize> {
        self.first_eq..self.first_eq + self.nb_eqs
    }
}

// =================================================================================================
// Shared state of every variable set
// =================================================================================================

/// Identity, sizes and lifecycle flag shared by all variable sets
#[derive(Debug, Clone)]
pub struct VarSetCore {
    component: &'static str,
    name: String,
    dimension: Dimension,
    representation: Representation,
    nb_eqs: usize,
    block_separator: usize,
    eq_sets: Vec<EquationSetData>,
    is_setup: bool,
}

impl VarSetCore {
    pub fn new(
        component: &'static str,
        name: String,
        dimension: Dimension,
        representation: Representation,
        nb_eqs: usize,
        block_separator: usize,
    ) -> Self {
        Self {
            component,
            name,
            dimension,
            representation,
            nb_eqs,
            block_separator,
            eq_sets: Vec::new(),
            is_setup: false,
        }
    }

    fn setup(&mut self, eq_sets: Vec<EquationSetData>) -> PhysicsResult<()> {
        if self.is_setup {
            return Err(PhysicsError::AlreadyInitialized { component: self.component });
        }
        log::debug!(
            "setting up {} ({} equations, block separator {}, {} equation set(s))",
            self.name,
            self.nb_eqs,
            self.block_separator,
            eq_sets.len()
        );
        self.eq_sets = eq_sets;
        self.is_setup = true;
        Ok(())
    }

    /// Fail with `NotInitialized` unless `setup()` has run
    pub fn ensure_setup(&self, operation: &'static str) -> PhysicsResult<()> {
        if self.is_setup {
            Ok(())
        } else {
            Err(PhysicsError::NotInitialized { component: self.component, operation })
        }
    }

    /// Setup, reference-data size and normal checks of a flux-like call
    pub fn check_call(
        &self,
        operation: &'static str,
        pdata: &RealVector,
        pdata_size: usize,
        normal: &[f64],
    ) -> PhysicsResult<()> {
        self.ensure_setup(operation)?;
        check_size("physical data", pdata_size, pdata.len())?;
        check_normal(normal, self.dimension)
    }

    /// Setup and state-size checks of a state-based call
    pub fn check_state(&self, operation: &'static str, state: &State) -> PhysicsResult<()> {
        self.ensure_setup(operation)?;
        check_size("state", self.nb_eqs, state.len())
    }
}

// =================================================================================================
// Variable Set Trait
// =================================================================================================

/// Flux and eigenstructure of a physical model in one representation
///
/// `nEq` below is [`get_nb_eqs`](VarSet::get_nb_eqs). Normals are unit
/// vectors of the model's dimension; Jacobians are taken with respect to
/// the conservative variables.
pub trait VarSet: Send + Sync {
    /// Shared identity and lifecycle state
    fn core(&self) -> &VarSetCore;

    fn core_mut(&mut self) -> &mut VarSetCore;

    /// Equation subsystems created by [`setup`](VarSet::setup)
    fn equation_sets(&self) -> Vec<EquationSetData> {
        vec![EquationSetData::new(0, 0, self.get_nb_eqs())]
    }

    /// Build the equation-set metadata (exactly once)
    fn setup(&mut self) -> PhysicsResult<()> {
        let eq_sets = self.equation_sets();
        self.core_mut().setup(eq_sets)
    }

    fn is_setup(&self) -> bool {
        self.core().is_setup
    }

    /// Registry key of the variable set
    fn name(&self) -> &str {
        &self.core().name
    }

    fn dimension(&self) -> Dimension {
        self.core().dimension
    }

    fn representation(&self) -> Representation {
        self.core().representation
    }

    fn get_nb_eqs(&self) -> usize {
        self.core().nb_eqs
    }

    /// Index of the first equation after the leading fixed block
    fn get_block_separator(&self) -> usize {
        self.core().block_separator
    }

    /// Equation-set metadata (empty before setup)
    fn eq_set_data(&self) -> &[EquationSetData] {
        &self.core().eq_sets
    }

    /// Length of the reference data vector
    fn physical_data_size(&self) -> usize;

    /// Reference data from a state of this representation
    fn compute_physical_data(&self, state: &State) -> PhysicsResult<RealVector>;

    /// Flux along `normal` (length nEq)
    fn compute_flux(&self, pdata: &RealVector, normal: &[f64]) -> PhysicsResult<RealVector>;

    /// Physical flux, nEq × dim; column `d` is the flux along axis `d`
    fn compute_state_flux(&self, pdata: &RealVector) -> PhysicsResult<RealMatrix> {
        self.core().ensure_setup("compute_state_flux")?;
        let dim = self.dimension().size();
        let mut flux = DMatrix::zeros(self.get_nb_eqs(), dim);
        for d in 0..dim {
            let column = self.compute_flux(pdata, &axis_normal(d, self.dimension()))?;
            flux.set_column(d, &column);
        }
        Ok(flux)
    }

    /// Flux Jacobians along each coordinate axis (nEq × nEq each)
    fn compute_jacobians(&self, pdata: &RealVector) -> PhysicsResult<Vec<RealMatrix>>;

    /// `Σ n_d A_d`
    fn normal_jacobian(&self, pdata: &RealVector, normal: &[f64]) -> PhysicsResult<RealMatrix> {
        check_normal(normal, self.dimension())?;
        let jacobians = self.compute_jacobians(pdata)?;
        let n = self.get_nb_eqs();
        Ok(jacobians
            .iter()
            .zip(normal)
            .fold(DMatrix::zeros(n, n), |acc, (jac, n_d)| acc + jac * *n_d))
    }

    /// Eigenvalues and right/left eigenvectors of the normal Jacobian
    fn compute_eigen_values_vectors(&self, pdata: &RealVector, normal: &[f64]) -> PhysicsResult<EigenSystem>;

    /// Positive and negative parts of the normal Jacobian
    fn split_jacobian(&self, pdata: &RealVector, normal: &[f64]) -> PhysicsResult<JacobianSplit> {
        let system = self.compute_eigen_values_vectors(pdata, normal)?;
        Ok(eigen::split_from_eigen(&system))
    }

    /// Eigenvalues only, in the order of [`compute_eigen_values_vectors`](VarSet::compute_eigen_values_vectors)
    fn compute_eigen_values(&self, pdata: &RealVector, normal: &[f64]) -> PhysicsResult<RealVector>;

    fn get_max_eigen_value(&self, pdata: &RealVector, normal: &[f64]) -> PhysicsResult<f64> {
        let lambda = self.compute_eigen_values(pdata, normal)?;
        Ok(lambda.iter().copied().fold(f64::NEG_INFINITY, f64::max))
    }

    fn get_max_abs_eigen_value(&self, pdata: &RealVector, normal: &[f64]) -> PhysicsResult<f64> {
        let lambda = self.compute_eigen_values(pdata, normal)?;
        Ok(lambda.iter().fold(0.0, |acc: f64, l| acc.max(l.abs())))
    }
}

/// Jacobians along each axis from a normal-projected Jacobian
fn axis_jacobians(
    dimension: Dimension,
    normal_jacobian: impl Fn(&[f64]) -> RealMatrix,
) -> Vec<RealMatrix> {
    (0..dimension.size())
        .map(|d| normal_jacobian(&axis_normal(d, dimension)))
        .collect()
}

/// Register the variable sets of every physics
pub(crate) fn register_providers(builder: &mut RegistryBuilder) -> PhysicsResult<()> {
    euler_cons::register_providers(builder)?;
    maxwell_projection::register_providers(builder)?;
    mfmhd_cons::register_providers(builder)?;
    icp_neq_cons::register_providers(builder)?;
    scalar_advection::register_providers(builder)
}
