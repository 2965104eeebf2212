//! Variable-set transformers
//!
//! A transformer converts a state from one representation to another
//! (e.g. `RhoiViTi` → conservative). It can also build the target state
//! directly from reference data, which drivers use to initialise or
//! post-process solutions without going through the source representation.
//!
//! Transformers never mutate their input and hold no scratch, so a single
//! instance can be shared across threads. [`transform_states`] applies one
//! to a batch of states, in parallel when the `parallel` feature is enabled
//! and the batch is large enough.

// =================================================================================================
// Module Declarations
// =================================================================================================

mod euler_prim;
mod mfmhd_rhoiviti;

pub use euler_prim::{EulerConsToPrim, EulerPrimToCons};
pub use mfmhd_rhoiviti::{EulerMfmhdConsToRhoiViTi, EulerMfmhdRhoiViTiToCons};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use std::sync::atomic::{AtomicUsize, Ordering};

use crate::physics::data::{RealVector, State};
use crate::physics::error::PhysicsResult;
use crate::physics::traits::Representation;
use crate::registry::RegistryBuilder;

// =================================================================================================
// Transformer Trait
// =================================================================================================

/// Conversion between two representations of the same physics
pub trait VarSetTransformer: Send + Sync {
    /// Registry key (e.g. `"EulerMFMHD2DRhoiViTiToCons"`)
    fn name(&self) -> &str;

    fn source_representation(&self) -> Representation;

    fn target_representation(&self) -> Representation;

    /// Length of source and target states
    fn nb_eqs(&self) -> usize;

    /// Source state to target state
    fn transform(&self, state: &State) -> PhysicsResult<State>;

    /// Target state from reference data
    fn transform_from_ref(&self, pdata: &RealVector) -> PhysicsResult<State>;
}

// =================================================================================================
// Parallel Execution Threshold
// =================================================================================================

/// Default number of states above which [`transform_states`] switches to
/// parallel iteration.
const DEFAULT_PARALLEL_THRESHOLD: usize = 999;

static PARALLEL_THRESHOLD: AtomicUsize = AtomicUsize::new(DEFAULT_PARALLEL_THRESHOLD);

/// Return the current parallel-execution threshold.
///
/// Only used when the crate is compiled with the `parallel` feature.
///
/// ```rust
/// use varset_rs::transform::parallel_threshold;
///
/// assert!(parallel_threshold() > 0);
/// ```
pub fn parallel_threshold() -> usize {
    PARALLEL_THRESHOLD.load(Ordering::Relaxed)
}

/// Set the parallel-execution threshold to a new value.
///
/// # Panics
///
/// Panics when `threshold == 0`.
///
/// ```rust
/// use varset_rs::transform::{parallel_threshold, set_parallel_threshold};
///
/// let previous = parallel_threshold();
/// set_parallel_threshold(2048);
/// assert_eq!(parallel_threshold(), 2048);
///
/// // Restore so other tests are not affected.
/// set_parallel_threshold(previous);
/// ```
pub fn set_parallel_threshold(threshold: usize) {
    assert!(threshold > 0, "parallel threshold must be at least 1");
    PARALLEL_THRESHOLD.store(threshold, Ordering::Relaxed);
}

// =================================================================================================
// Batch transformation
// =================================================================================================

/// Transform every state of a batch
///
/// The first failure is returned wrapped with the index of the offending
/// state ([`PhysicsError::Entity`](crate::physics::PhysicsError::Entity)).
pub fn transform_states(transformer: &dyn VarSetTransformer, states: &[State]) -> PhysicsResult<Vec<State>> {
    let apply = |(index, state): (usize, &State)| {
        transformer.transform(state).map_err(|err| {
            log::trace!("{} failed on state {}: {}", transformer.name(), index, err);
            err.at_entity(index, transformer.name(), "transform")
        })
    };

    #[cfg(feature = "parallel")]
    {
        if states.len() > parallel_threshold() {
            return states.par_iter().enumerate().map(apply).collect();
        }
    }

    states.iter().enumerate().map(apply).collect()
}

/// Register the transformers of every physics
pub(crate) fn register_providers(builder: &mut RegistryBuilder) -> PhysicsResult<()> {
    euler_prim::register_providers(builder)?;
    mfmhd_rhoiviti::register_providers(builder)
}
