//! Common utilities for integration tests

pub mod sample_data;
pub mod test_helpers;

// Re-export commonly used items
pub use sample_data::{sample_config, sample_normal, sample_state, two_species_config};
pub use test_helpers::{assert_matrices_close, finite_difference_jacobian, relative_error};
