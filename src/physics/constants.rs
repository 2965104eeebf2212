//! Physical constants (SI units)

/// Boltzmann constant \[J/K\]
pub const BOLTZMANN: f64 = 1.3806503e-23;

/// Universal gas constant \[J/(mol·K)\]
pub const UNIVERSAL_GAS_CONSTANT: f64 = 8.314472;

/// Electron mass \[kg\]
pub const ELECTRON_MASS: f64 = 9.10938188e-31;

/// Proton mass \[kg\]
pub const PROTON_MASS: f64 = 1.67262158e-27;

/// Specific gas constant of dry air \[J/(kg·K)\]
pub const AIR_GAS_CONSTANT: f64 = 287.046;
