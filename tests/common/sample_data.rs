//! Sample configurations and states for every built-in model

use varset_rs::models::config::{ModelConfig, MultiFluidMhdConfig};
use varset_rs::prelude::*;

/// Ion / neutral plasma with the masses of the reference scenario
///
/// ions `m = 1.67e-27 kg`, neutrals `m = 2.3e-26 kg`, `γ = 1.4`
pub fn two_species_config() -> MultiFluidMhdConfig {
    MultiFluidMhdConfig {
        nb_species: 2,
        gamma: 1.4,
        molecular_mass2: 2.3e-26,
        molecular_mass3: 1.67e-27,
        ..MultiFluidMhdConfig::default()
    }
}

/// Options exercising non-default constants in every physics
pub fn sample_config() -> ModelConfig {
    let mut config = ModelConfig::default();
    config.maxwell.light_speed = 2.0;
    config.maxwell.div_b_cleaning = 1.5;
    config.maxwell.div_e_cleaning = 0.8;
    config.multi_fluid_mhd = two_species_config();
    config.passive_scalar.velocity = vec![2.0, -1.0];
    config
}

/// A unit normal not aligned with any axis
pub fn sample_normal(dimension: Dimension) -> Vec<f64> {
    match dimension {
        Dimension::Dim2 => vec![0.6, 0.8],
        Dimension::Dim3 => vec![2.0 / 3.0, -1.0 / 3.0, 2.0 / 3.0],
    }
}

/// A physical conservative state for `model`
pub fn sample_state(registry: &ProviderRegistry, model: &dyn PhysicalModel) -> State {
    let name = model.name();

    if name.starts_with("Euler") && !name.starts_with("EulerMFMHD") {
        let primitive = match model.dimension() {
            Dimension::Dim2 => vec![1.2, 30.0, -10.0, 1.0e5],
            Dimension::Dim3 => vec![0.9, 10.0, 20.0, -5.0, 8.0e4],
        };
        let to_cons = model
            .transformer(registry, Representation::Primitive, Representation::Conservative)
            .unwrap();
        return to_cons.transform(&State::from_vec(primitive)).unwrap();
    }

    if name.starts_with("Maxwell") {
        return State::from_vec(vec![0.1, -0.2, 0.3, 1.0, 2.0, -1.0, 0.05, -0.02]);
    }

    if name == "EulerMFMHD2D" {
        let rhoiviti = State::from_vec(vec![
            1.0e-3, 2.0e-3, -1.0e-3, 0.5, 0.2, -0.1, 1.0e-4, 2.0e-4, // EM
            1.0e-3, 4.0e-3, // ρ_ion, ρ_neutral
            200.0, -50.0, 80.0, 30.0, // velocities
            5000.0, 1000.0, // temperatures
        ]);
        let to_cons = model
            .transformer(registry, Representation::RhoiViTi, Representation::Conservative)
            .unwrap();
        return to_cons.transform(&rhoiviti).unwrap();
    }

    if name.starts_with("ICPNEQ") {
        let mut state = vec![0.6, 0.25, 0.05, 0.06, 0.04];
        match model.dimension() {
            Dimension::Dim2 => state.extend([20.0, -5.0]),
            Dimension::Dim3 => state.extend([20.0, -5.0, 8.0]),
        }
        state.extend([2.5e5, 1.0, -2.0]);
        return State::from_vec(state);
    }

    if name.starts_with("PassiveScalar") {
        return State::from_vec(vec![300.0]);
    }

    panic!("no sample state for model {}", name);
}
