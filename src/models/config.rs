//! Model configuration options
//!
//! Each physics exposes a recognised-option set. The configuration loader
//! (outside this crate) parses files and hands over a [`ModelConfig`]; this
//! module only defines the option tree, its defaults and its validation.
//!
//! Option names follow the historical configuration keys (`Gamma`, `K`,
//! `molecularMass1`, `CoLam`, `Cp`, ...) so saved configurations keep working.
//!
//! ```rust
//! use varset_rs::models::config::ModelConfig;
//!
//! let config: ModelConfig = serde_json::from_str(r#"{
//!     "MultiFluidMHD": { "NbSpecies": 2, "Gamma": 1.4 },
//!     "PassiveScalar": { "CoLam": 0.6, "Cp": 4186.0 }
//! }"#).unwrap();
//!
//! assert_eq!(config.multi_fluid_mhd.gamma, 1.4);
//! assert!(config.validate().is_ok());
//! ```

use serde::{Deserialize, Serialize};

use crate::physics::constants::{
    AIR_GAS_CONSTANT, BOLTZMANN, ELECTRON_MASS, PROTON_MASS, UNIVERSAL_GAS_CONSTANT,
};
use crate::physics::error::{PhysicsError, PhysicsResult};

// =================================================================================================
// Per-physics sections
// =================================================================================================

/// Perfect-gas Euler options
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EulerConfig {
    /// Specific heat ratio γ
    #[serde(rename = "Gamma")]
    pub gamma: f64,

    /// Specific gas constant R \[J/(kg·K)\]
    #[serde(rename = "R")]
    pub gas_constant: f64,
}

impl Default for EulerConfig {
    fn default() -> Self {
        Self {
            gamma: 1.4,
            gas_constant: AIR_GAS_CONSTANT,
        }
    }
}

impl EulerConfig {
    pub fn validate(&self) -> PhysicsResult<()> {
        check_gamma("Euler.Gamma", self.gamma)?;
        check_strictly_positive("Euler.R", self.gas_constant)
    }
}

/// Maxwell projection (divergence cleaning) options
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MaxwellConfig {
    /// Light speed in solver units
    #[serde(rename = "LightSpeed")]
    pub light_speed: f64,

    /// Magnetic divergence cleaning factor γ (ψ waves travel at γc)
    #[serde(rename = "DivBCleaningConst")]
    pub div_b_cleaning: f64,

    /// Electric divergence cleaning factor χ (φ waves travel at χc)
    #[serde(rename = "DivECleaningConst")]
    pub div_e_cleaning: f64,
}

impl Default for MaxwellConfig {
    fn default() -> Self {
        Self {
            light_speed: 1.0,
            div_b_cleaning: 1.0,
            div_e_cleaning: 1.0,
        }
    }
}

impl MaxwellConfig {
    pub fn validate(&self) -> PhysicsResult<()> {
        check_strictly_positive("Maxwell.LightSpeed", self.light_speed)?;
        check_strictly_positive("Maxwell.DivBCleaningConst", self.div_b_cleaning)?;
        check_strictly_positive("Maxwell.DivECleaningConst", self.div_e_cleaning)
    }
}

/// Multi-fluid MHD options
///
/// Species are ordered ions, neutrals for two species and electrons,
/// neutrals, ions for three species. Any other count needs `SpeciesMasses`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MultiFluidMhdConfig {
    #[serde(rename = "NbSpecies")]
    pub nb_species: usize,

    /// Electron mass \[kg\]
    #[serde(rename = "molecularMass1")]
    pub molecular_mass1: f64,

    /// Neutral mass \[kg\]
    #[serde(rename = "molecularMass2")]
    pub molecular_mass2: f64,

    /// Ion mass \[kg\]
    #[serde(rename = "molecularMass3")]
    pub molecular_mass3: f64,

    #[serde(rename = "Gamma")]
    pub gamma: f64,

    /// Gas constant K used as `R_i = K / m_i` (Boltzmann constant by default)
    #[serde(rename = "K")]
    pub k: f64,

    /// Explicit per-species masses, overriding the defaults above
    #[serde(rename = "SpeciesMasses")]
    pub species_masses: Option<Vec<f64>>,
}

impl Default for MultiFluidMhdConfig {
    fn default() -> Self {
        Self {
            nb_species: 2,
            molecular_mass1: ELECTRON_MASS,
            molecular_mass2: PROTON_MASS,
            molecular_mass3: PROTON_MASS,
            gamma: 5.0 / 3.0,
            k: BOLTZMANN,
            species_masses: None,
        }
    }
}

impl MultiFluidMhdConfig {
    pub fn validate(&self) -> PhysicsResult<()> {
        if self.nb_species == 0 {
            return Err(PhysicsError::config("MultiFluidMHD.NbSpecies must be at least 1"));
        }
        check_gamma("MultiFluidMHD.Gamma", self.gamma)?;
        check_strictly_positive("MultiFluidMHD.K", self.k)?;
        check_strictly_positive("MultiFluidMHD.molecularMass1", self.molecular_mass1)?;
        check_strictly_positive("MultiFluidMHD.molecularMass2", self.molecular_mass2)?;
        check_strictly_positive("MultiFluidMHD.molecularMass3", self.molecular_mass3)?;

        if let Some(masses) = &self.species_masses {
            if masses.len() != self.nb_species {
                return Err(PhysicsError::config(format!(
                    "MultiFluidMHD.SpeciesMasses has {} entries for {} species",
                    masses.len(),
                    self.nb_species
                )));
            }
            for mass in masses {
                check_strictly_positive("MultiFluidMHD.SpeciesMasses", *mass)?;
            }
        } else if !(2..=3).contains(&self.nb_species) {
            return Err(PhysicsError::config(format!(
                "MultiFluidMHD with {} species requires SpeciesMasses",
                self.nb_species
            )));
        }
        Ok(())
    }
}

/// One chemical species of a mixture
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpeciesConfig {
    #[serde(rename = "Name")]
    pub name: String,

    /// Molar mass \[kg/mol\]
    #[serde(rename = "MolarMass")]
    pub molar_mass: f64,
}

impl SpeciesConfig {
    pub fn new(name: &str, molar_mass: f64) -> Self {
        Self {
            name: name.to_string(),
            molar_mass,
        }
    }
}

/// ICP non-equilibrium (frozen mixture) options
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IcpConfig {
    /// Frozen specific heat ratio of the mixture
    #[serde(rename = "Gamma")]
    pub gamma: f64,

    /// Universal gas constant \[J/(mol·K)\]
    #[serde(rename = "RU")]
    pub universal_gas_constant: f64,

    #[serde(rename = "Species")]
    pub species: Vec<SpeciesConfig>,
}

impl Default for IcpConfig {
    fn default() -> Self {
        Self {
            gamma: 1.4,
            universal_gas_constant: UNIVERSAL_GAS_CONSTANT,
            species: vec![
                SpeciesConfig::new("N2", 28.0134e-3),
                SpeciesConfig::new("O2", 31.9988e-3),
                SpeciesConfig::new("NO", 30.0061e-3),
                SpeciesConfig::new("N", 14.0067e-3),
                SpeciesConfig::new("O", 15.9994e-3),
            ],
        }
    }
}

impl IcpConfig {
    pub fn validate(&self) -> PhysicsResult<()> {
        check_gamma("ICP.Gamma", self.gamma)?;
        check_strictly_positive("ICP.RU", self.universal_gas_constant)?;
        if self.species.is_empty() {
            return Err(PhysicsError::config("ICP.Species must not be empty"));
        }
        for species in &self.species {
            check_strictly_positive("ICP.Species.MolarMass", species.molar_mass)?;
        }
        Ok(())
    }
}

/// Passive scalar (thermal) transport options
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PassiveScalarConfig {
    /// Laminar heat conductivity \[W/(m·K)\]
    #[serde(rename = "CoLam")]
    pub co_lam: f64,

    /// Specific heat \[J/(kg·K)\]
    #[serde(rename = "Cp")]
    pub cp: f64,

    /// Carrier density \[kg/m³\]
    #[serde(rename = "Density")]
    pub density: f64,

    /// Advection velocity, one entry per space dimension (padded with zeros)
    #[serde(rename = "Velocity")]
    pub velocity: Vec<f64>,
}

impl Default for PassiveScalarConfig {
    fn default() -> Self {
        Self {
            co_lam: 0.025,
            cp: 1005.0,
            density: 1.0,
            velocity: Vec::new(),
        }
    }
}

impl PassiveScalarConfig {
    pub fn validate(&self) -> PhysicsResult<()> {
        if !(self.co_lam >= 0.0 && self.co_lam.is_finite()) {
            return Err(PhysicsError::config(format!(
                "PassiveScalar.CoLam must be non-negative, got {}",
                self.co_lam
            )));
        }
        check_strictly_positive("PassiveScalar.Cp", self.cp)?;
        check_strictly_positive("PassiveScalar.Density", self.density)?;
        if self.velocity.len() > 3 {
            return Err(PhysicsError::config(format!(
                "PassiveScalar.Velocity has {} components",
                self.velocity.len()
            )));
        }
        if self.velocity.iter().any(|v| !v.is_finite()) {
            return Err(PhysicsError::config("PassiveScalar.Velocity must be finite"));
        }
        Ok(())
    }
}

// =================================================================================================
// Option tree
// =================================================================================================

/// Options of every physics, each section defaulted
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelConfig {
    #[serde(rename = "Euler")]
    pub euler: EulerConfig,

    #[serde(rename = "Maxwell")]
    pub maxwell: MaxwellConfig,

    #[serde(rename = "MultiFluidMHD")]
    pub multi_fluid_mhd: MultiFluidMhdConfig,

    #[serde(rename = "ICP")]
    pub icp: IcpConfig,

    #[serde(rename = "PassiveScalar")]
    pub passive_scalar: PassiveScalarConfig,
}

impl ModelConfig {
    /// Validate every section
    pub fn validate(&self) -> PhysicsResult<()> {
        self.euler.validate()?;
        self.maxwell.validate()?;
        self.multi_fluid_mhd.validate()?;
        self.icp.validate()?;
        self.passive_scalar.validate()
    }
}

fn check_strictly_positive(option: &str, value: f64) -> PhysicsResult<()> {
    if value > 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(PhysicsError::config(format!("{} must be positive, got {}", option, value)))
    }
}

fn check_gamma(option: &str, gamma: f64) -> PhysicsResult<()> {
    if gamma > 1.0 && gamma.is_finite() {
        Ok(())
    } else {
        Err(PhysicsError::config(format!("{} must be > 1, got {}", option, gamma)))
    }
}

// =================================================================================================
// Tests
// =================================================================================================
