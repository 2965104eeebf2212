//! Integration tests: provider registry + physical models
//!
//! These tests walk every built-in provider through the registry and check
//! the contract drivers rely on: keys resolve, models expose a consistent
//! scalar-group layout, and their numerics are reachable by name.

use varset_rs::models::config::ModelConfig;
use varset_rs::physics::{Contract, ConvectiveTerm};
use varset_rs::prelude::*;
use varset_rs::registry::{Provider, RegistryBuilder};

mod common;
use common::sample_config;

// =================================================================================================
// Physical models
// =================================================================================================

#[test]
fn test_every_model_key_creates_its_model() {
    let registry = ProviderRegistry::global().unwrap();
    let config = sample_config();

    for (key, dimension) in registry.keys(Contract::PhysicalModel) {
        let model = registry.create_model(key, dimension, &config).unwrap();
        assert_eq!(model.name(), key);
        assert_eq!(model.dimension(), dimension);
        assert!(model.nb_eqs() > 0, "{} has no equations", key);
    }
}

#[test]
fn test_scalar_groups_partition_the_state() {
    let registry = ProviderRegistry::global().unwrap();
    let config = sample_config();

    for (key, dimension) in registry.keys(Contract::PhysicalModel) {
        let model = registry.create_model(key, dimension, &config).unwrap();
        let groups = model.get_convective_term().scalar_groups();

        let mut next = groups.fixed_block_size();
        for index in 0..groups.nb_groups() {
            assert_eq!(model.get_first_scalar_var(index).unwrap(), next, "{} group {}", key, index);
            next += model.get_nb_scalar_vars(index).unwrap();
        }
        assert_eq!(next, model.nb_eqs(), "{} groups do not end at nEq", key);

        let err = model.get_nb_scalar_vars(groups.nb_groups()).unwrap_err();
        assert!(err.is_invalid_state());
    }
}

#[test]
fn test_multi_fluid_layout() {
    let registry = ProviderRegistry::global().unwrap();
    let model = registry
        .create_model("EulerMFMHD2D", Dimension::Dim2, &sample_config())
        .unwrap();

    // 8 EM + 2 densities + 4 momenta + 2 energies
    assert_eq!(model.nb_eqs(), 16);
    assert_eq!(model.get_first_scalar_var(0).unwrap(), 8);
    assert_eq!(model.get_nb_scalar_vars(0).unwrap(), 2);
    assert_eq!(model.get_first_scalar_var(1).unwrap(), 10);
    assert_eq!(model.get_nb_scalar_vars(1).unwrap(), 4);
    assert_eq!(model.get_first_scalar_var(2).unwrap(), 14);
    assert_eq!(model.get_nb_scalar_vars(2).unwrap(), 2);
}

#[test]
fn test_three_species_use_default_masses() {
    let registry = ProviderRegistry::global().unwrap();
    let mut config = ModelConfig::default();
    config.multi_fluid_mhd.nb_species = 3;

    let model = registry.create_model("EulerMFMHD2D", Dimension::Dim2, &config).unwrap();
    assert_eq!(model.nb_eqs(), 8 + 3 * 4);
}

#[test]
fn test_invalid_configuration_is_fatal() {
    let registry = ProviderRegistry::global().unwrap();
    let mut config = ModelConfig::default();
    config.multi_fluid_mhd.nb_species = 5;

    let err = registry
        .create_model("EulerMFMHD2D", Dimension::Dim2, &config)
        .err()
        .unwrap();
    assert!(err.is_configuration_error());
}

// =================================================================================================
// Variable sets and transformers by name
// =================================================================================================

#[test]
fn test_every_model_has_a_conservative_var_set() {
    let registry = ProviderRegistry::global().unwrap();
    let config = sample_config();

    for (key, dimension) in registry.keys(Contract::PhysicalModel) {
        let model = registry.create_model(key, dimension, &config).unwrap();
        let mut var_set = model.var_set(registry, Representation::Conservative).unwrap();

        assert!(!var_set.is_setup());
        var_set.setup().unwrap();
        assert!(var_set.is_setup());
        assert_eq!(var_set.name(), format!("{}Cons", key));
        assert_eq!(var_set.get_nb_eqs(), model.nb_eqs());
        assert_eq!(var_set.dimension(), dimension);

        let covered: usize = var_set.eq_set_data().iter().map(|set| set.nb_eqs).sum();
        assert_eq!(covered, model.nb_eqs(), "{} equation sets", key);
    }
}

#[test]
fn test_var_set_requires_setup() {
    let registry = ProviderRegistry::global().unwrap();
    let model = registry
        .create_model("Euler2D", Dimension::Dim2, &ModelConfig::default())
        .unwrap();
    let mut var_set = model.var_set(registry, Representation::Conservative).unwrap();
    let state = State::from_vec(vec![1.0, 0.0, 0.0, 2.5e5]);

    let err = var_set.compute_physical_data(&state).unwrap_err();
    assert!(matches!(err, PhysicsError::NotInitialized { .. }));

    var_set.setup().unwrap();
    assert!(var_set.compute_physical_data(&state).is_ok());

    let err = var_set.setup().unwrap_err();
    assert!(matches!(err, PhysicsError::AlreadyInitialized { .. }));
    assert!(var_set.is_setup());
}

#[test]
fn test_transformer_keys_follow_representations() {
    let registry = ProviderRegistry::global().unwrap();
    let model = registry
        .create_model("EulerMFMHD2D", Dimension::Dim2, &sample_config())
        .unwrap();

    let to_cons = model
        .transformer(registry, Representation::RhoiViTi, Representation::Conservative)
        .unwrap();
    assert_eq!(to_cons.name(), "EulerMFMHD2DRhoiViTiToCons");
    assert_eq!(to_cons.source_representation(), Representation::RhoiViTi);
    assert_eq!(to_cons.target_representation(), Representation::Conservative);
    assert_eq!(to_cons.nb_eqs(), 16);

    let err = model
        .transformer(registry, Representation::Primitive, Representation::Conservative)
        .err()
        .unwrap();
    assert!(matches!(err, PhysicsError::ProviderNotFound { .. }));
}

// =================================================================================================
// Failure modes
// =================================================================================================

#[test]
fn test_unknown_key_and_wrong_dimension() {
    let registry = ProviderRegistry::global().unwrap();
    let config = ModelConfig::default();

    let err = registry
        .create_model("Euler4D", Dimension::Dim2, &config)
        .err()
        .unwrap();
    assert!(matches!(err, PhysicsError::ProviderNotFound { contract: Contract::PhysicalModel, .. }));

    let err = registry
        .create_model("EulerMFMHD2D", Dimension::Dim3, &config)
        .err()
        .unwrap();
    assert!(err.is_configuration_error());
}

#[test]
fn test_var_set_with_foreign_term_is_an_invalid_cast() {
    let registry = ProviderRegistry::global().unwrap();
    let maxwell = registry
        .create_model("Maxwell2DProjection", Dimension::Dim2, &ModelConfig::default())
        .unwrap();

    let err = registry
        .create_var_set("Euler2DCons", Dimension::Dim2, maxwell.get_convective_term())
        .err()
        .unwrap();
    assert!(err.is_invalid_cast());

    let err = registry
        .create_transformer("EulerMFMHD2DRhoiViTiToCons", Dimension::Dim2, maxwell.get_convective_term())
        .err()
        .unwrap();
    assert!(err.is_invalid_cast());
}

#[test]
fn test_custom_registry_rejects_duplicates() {
    fn passive(dimension: Dimension, config: &ModelConfig) -> PhysicsResult<Box<dyn PhysicalModel>> {
        ProviderRegistry::global()?.create_model(&format!("PassiveScalar{}", dimension), dimension, config)
    }

    let mut builder = RegistryBuilder::new();
    builder
        .register("Tracer", Dimension::Dim2, Provider::Model(passive))
        .unwrap()
        .register("Tracer", Dimension::Dim3, Provider::Model(passive))
        .unwrap();

    let err = builder
        .register("Tracer", Dimension::Dim2, Provider::Model(passive))
        .err()
        .unwrap();
    assert!(matches!(err, PhysicsError::DuplicateProvider { .. }));

    let registry = builder.build();
    assert_eq!(registry.len(), 2);

    let model = registry
        .create_model("Tracer", Dimension::Dim3, &ModelConfig::default())
        .unwrap();
    assert!(matches!(model.get_convective_term(), ConvectiveTerm::PassiveScalar(_)));
    assert_eq!(model.nb_eqs(), 1);
}

#[test]
fn test_global_registry_is_shared() {
    let first = ProviderRegistry::global().unwrap();
    let second = ProviderRegistry::global().unwrap();
    assert!(std::ptr::eq(first, second));
    assert!(!first.is_empty());
}
