//! Reusable flux and eigenstructure blocks
//!
//! Every variable set of the crate is assembled from three hyperbolic
//! building blocks, each written once in normal-projected form:
//!
//! - [`MixtureEulerBlock`]: `ns` partial densities advected by one velocity,
//!   one momentum and one total energy. `ns = 1` is the classic Euler system.
//! - [`MaxwellBlock`]: Maxwell equations with ψ/φ divergence cleaning.
//! - [`ScalarAdvectionBlock`]: one scalar advected at a constant speed.
//!
//! Blocks are placed in a full system through index maps
//! ([`EigenSystem::embed`]), which keeps the multi-fluid case (one Euler block
//! per species, interleaved in the state) a pure indexing problem.
//!
//! # Conventions
//!
//! - `right` holds the right eigenvectors as columns, `left = right⁻¹`
//! - `right · diag(eigen_values) · left` is the normal Jacobian
//! - flux-vector splitting uses `λ⁺ = max(λ, 0)`, `λ⁻ = min(λ, 0)`

use nalgebra::{DMatrix, DVector};

use crate::models::maxwell::{MaxwellConstants, NB_EM_EQS};
use crate::physics::data::{cross, dot, embed_normal, tangents, RealMatrix, RealVector};
use crate::physics::error::{PhysicsError, PhysicsResult};

// =================================================================================================
// Eigen-systems and splitting
// =================================================================================================

/// Eigen-decomposition of a normal Jacobian
#[derive(Debug, Clone, PartialEq)]
pub struct EigenSystem {
    /// Right eigenvectors (columns)
    pub right: RealMatrix,
    /// Left eigenvectors (rows), inverse of `right`
    pub left: RealMatrix,
    pub eigen_values: RealVector,
}

impl EigenSystem {
    /// Zero system of size `n`, to be filled with [`embed`](Self::embed)
    pub fn zeros(n: usize) -> Self {
        Self {
            right: DMatrix::zeros(n, n),
            left: DMatrix::zeros(n, n),
            eigen_values: DVector::zeros(n),
        }
    }

    /// Complete a system from its right eigenvectors by numerical inversion
    pub fn from_right(
        right: RealMatrix,
        eigen_values: RealVector,
        operation: &'static str,
    ) -> PhysicsResult<Self> {
        let left = invert_right(&right, operation)?;
        Ok(Self { right, left, eigen_values })
    }

    /// Place `block` at the rows/columns listed in `index`
    pub fn embed(&mut self, block: &EigenSystem, index: &[usize]) {
        embed_matrix(&mut self.right, &block.right, index);
        embed_matrix(&mut self.left, &block.left, index);
        for (a, &i) in index.iter().enumerate() {
            self.eigen_values[i] = block.eigen_values[a];
        }
    }

    /// Set an isolated unknown with a single eigenvalue and unit eigenvectors
    pub fn set_trivial(&mut self, index: usize, eigen_value: f64) {
        self.right[(index, index)] = 1.0;
        self.left[(index, index)] = 1.0;
        self.eigen_values[index] = eigen_value;
    }

    /// `right · diag(λ) · left`
    pub fn reconstruct(&self) -> RealMatrix {
        self.reconstruct_with(|lambda| lambda)
    }

    fn reconstruct_with(&self, f: impl Fn(f64) -> f64) -> RealMatrix {
        let diagonal = DMatrix::from_diagonal(&self.eigen_values.map(f));
        &self.right * diagonal * &self.left
    }
}

/// Positive and negative parts of a normal Jacobian
#[derive(Debug, Clone, PartialEq)]
pub struct JacobianSplit {
    pub plus: RealMatrix,
    pub minus: RealMatrix,
    pub eigen_values: RealVector,
}

/// Flux-vector split `A⁺ = R Λ⁺ L`, `A⁻ = R Λ⁻ L`
pub fn split_from_eigen(system: &EigenSystem) -> JacobianSplit {
    JacobianSplit {
        plus: system.reconstruct_with(|lambda| lambda.max(0.0)),
        minus: system.reconstruct_with(|lambda| lambda.min(0.0)),
        eigen_values: system.eigen_values.clone(),
    }
}

/// Left eigenvectors from right ones
pub fn invert_right(right: &RealMatrix, operation: &'static str) -> PhysicsResult<RealMatrix> {
    right
        .clone()
        .try_inverse()
        .ok_or(PhysicsError::SingularEigenSystem { operation })
}

/// `target[index[a], index[b]] = block[a, b]`
pub fn embed_matrix(target: &mut RealMatrix, block: &RealMatrix, index: &[usize]) {
    for (a, &i) in index.iter().enumerate() {
        for (b, &j) in index.iter().enumerate() {
            target[(i, j)] = block[(a, b)];
        }
    }
}

// =================================================================================================
// Mixture Euler block
// =================================================================================================

/// Euler system of a frozen mixture
///
/// Local unknowns `[ρ_1..ρ_ns, m_1..m_dim, ρE]` with
/// `p = (γ-1)(ρE - ½|m|²/ρ)` and `ρ = Σ ρ_i`.
#[derive(Debug, Clone, PartialEq)]
pub struct MixtureEulerBlock {
    pub densities: Vec<f64>,
    pub velocity: Vec<f64>,
    pub pressure: f64,
    /// Specific total enthalpy
    pub enthalpy: f64,
    pub sound_speed: f64,
    pub gamma: f64,
}

impl MixtureEulerBlock {
    pub fn nb_species(&self) -> usize {
        self.densities.len()
    }

    pub fn dim(&self) -> usize {
        self.velocity.len()
    }

    /// Number of local unknowns
    pub fn size(&self) -> usize {
        self.nb_species() + self.dim() + 1
    }

    pub fn density(&self) -> f64 {
        self.densities.iter().sum()
    }

    /// `ρ_k / ρ`, split evenly over the species of an empty mixture
    pub fn mass_fraction(&self, species: usize) -> f64 {
        let rho = self.density();
        if rho > 0.0 {
            self.densities[species] / rho
        } else {
            1.0 / self.nb_species() as f64
        }
    }

    /// Flux along `normal`: `[ρ_k u_n, m u_n + p n, ρ H u_n]`
    pub fn flux(&self, normal: &[f64]) -> RealVector {
        let (ns, dim) = (self.nb_species(), self.dim());
        let rho = self.density();
        let un = dot(&self.velocity, normal);

        let mut flux = DVector::zeros(self.size());
        for (k, rho_k) in self.densities.iter().enumerate() {
            flux[k] = rho_k * un;
        }
        for j in 0..dim {
            flux[ns + j] = rho * self.velocity[j] * un + self.pressure * normal[j];
        }
        flux[ns + dim] = rho * self.enthalpy * un;
        flux
    }

    /// Jacobian of [`flux`](Self::flux) with respect to the local unknowns
    pub fn jacobian(&self, normal: &[f64]) -> RealMatrix {
        let (ns, dim) = (self.nb_species(), self.dim());
        let gm1 = self.gamma - 1.0;
        let u = &self.velocity;
        let un = dot(u, normal);
        let phi = 0.5 * gm1 * dot(u, u);
        let e = ns + dim;

        let mut jac = DMatrix::zeros(self.size(), self.size());

        for k in 0..ns {
            let y_k = self.mass_fraction(k);
            for i in 0..ns {
                let delta = if i == k { 1.0 } else { 0.0 };
                jac[(k, i)] = (delta - y_k) * un;
            }
            for j in 0..dim {
                jac[(k, ns + j)] = y_k * normal[j];
            }
        }

        for j in 0..dim {
            let row = ns + j;
            for i in 0..ns {
                jac[(row, i)] = -u[j] * un + phi * normal[j];
            }
            for l in 0..dim {
                let delta = if j == l { un } else { 0.0 };
                jac[(row, ns + l)] = u[j] * normal[l] + delta - gm1 * u[l] * normal[j];
            }
            jac[(row, e)] = gm1 * normal[j];
        }

        for i in 0..ns {
            jac[(e, i)] = un * (phi - self.enthalpy);
        }
        for l in 0..dim {
            jac[(e, ns + l)] = self.enthalpy * normal[l] - gm1 * u[l] * un;
        }
        jac[(e, e)] = self.gamma * un;

        jac
    }

    /// `[u_n × ns, u_n × (dim-1), u_n + a, u_n - a]`
    pub fn eigen_values(&self, normal: &[f64]) -> RealVector {
        let un = dot(&self.velocity, normal);
        let n = self.size();
        let mut lambda = DVector::from_element(n, un);
        lambda[n - 2] = un + self.sound_speed;
        lambda[n - 1] = un - self.sound_speed;
        lambda
    }

    pub fn eigen_system(&self, normal: &[f64]) -> PhysicsResult<EigenSystem> {
        let (ns, dim) = (self.nb_species(), self.dim());
        let u = &self.velocity;
        let a = self.sound_speed;
        let un = dot(u, normal);
        let q2 = dot(u, u);
        let e = ns + dim;
        let n = self.size();

        let mut right = DMatrix::zeros(n, n);

        // entropy / species waves
        for k in 0..ns {
            right[(k, k)] = 1.0;
            for j in 0..dim {
                right[(ns + j, k)] = u[j];
            }
            right[(e, k)] = 0.5 * q2;
        }

        // shear waves
        let shear: Vec<Vec<f64>> = if dim == 2 {
            vec![vec![-normal[1], normal[0]]]
        } else {
            let (t1, t2) = tangents(embed_normal(normal));
            vec![t1.to_vec(), t2.to_vec()]
        };
        for (s, t) in shear.iter().enumerate() {
            let col = ns + s;
            for j in 0..dim {
                right[(ns + j, col)] = t[j];
            }
            right[(e, col)] = dot(u, t);
        }

        // acoustic waves
        for (col, sign) in [(n - 2, 1.0), (n - 1, -1.0)] {
            for k in 0..ns {
                right[(k, col)] = self.mass_fraction(k);
            }
            for j in 0..dim {
                right[(ns + j, col)] = u[j] + sign * a * normal[j];
            }
            right[(e, col)] = self.enthalpy + sign * a * un;
        }

        EigenSystem::from_right(right, self.eigen_values(normal), "MixtureEulerBlock::eigen_system")
    }
}

// =================================================================================================
// Maxwell block
// =================================================================================================

/// Maxwell equations with hyperbolic divergence cleaning
///
/// Unknowns `[B, E, ψ, φ]`, linear in the state. Eigenvalues are ordered
/// `[-c, -c, c, c, -γc, γc, -χc, χc]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MaxwellBlock {
    pub constants: MaxwellConstants,
}

impl MaxwellBlock {
    pub fn new(constants: MaxwellConstants) -> Self {
        Self { constants }
    }

    /// Flux along `normal` (2D normals are embedded with a zero z component)
    pub fn flux(&self, state: &[f64], normal: &[f64]) -> RealVector {
        let n = embed_normal(normal);
        let c = self.constants.light_speed;
        let c2 = c * c;
        let gamma = self.constants.div_b_cleaning;
        let chi = self.constants.div_e_cleaning;

        let b = [state[0], state[1], state[2]];
        let e = [state[3], state[4], state[5]];
        let (psi, phi) = (state[6], state[7]);

        let n_cross_e = cross(n, e);
        let n_cross_b = cross(n, b);

        let mut flux = DVector::zeros(NB_EM_EQS);
        for d in 0..3 {
            flux[d] = n_cross_e[d] + psi * n[d];
            flux[3 + d] = -c2 * n_cross_b[d] + chi * c2 * phi * n[d];
        }
        flux[6] = gamma * gamma * c2 * dot(&b, &n);
        flux[7] = chi * dot(&e, &n);
        flux
    }

    /// The flux is linear: column `k` is the flux of the unit vector `e_k`
    pub fn jacobian(&self, normal: &[f64]) -> RealMatrix {
        let mut jac = DMatrix::zeros(NB_EM_EQS, NB_EM_EQS);
        let mut unit = [0.0; NB_EM_EQS];
        for k in 0..NB_EM_EQS {
            unit[k] = 1.0;
            jac.set_column(k, &self.flux(&unit, normal));
            unit[k] = 0.0;
        }
        jac
    }

    pub fn eigen_values(&self) -> RealVector {
        let c = self.constants.light_speed;
        let gc = self.constants.div_b_cleaning * c;
        let xc = self.constants.div_e_cleaning * c;
        DVector::from_vec(vec![-c, -c, c, c, -gc, gc, -xc, xc])
    }

    /// `c · max(1, γ, χ)`
    pub fn max_abs_eigen_value(&self) -> f64 {
        self.constants.max_wave_speed()
    }

    pub fn eigen_system(&self, normal: &[f64]) -> PhysicsResult<EigenSystem> {
        let n = embed_normal(normal);
        let (t1, t2) = tangents(n);
        let c = self.constants.light_speed;
        let gc = self.constants.div_b_cleaning * c;

        let mut right = DMatrix::zeros(NB_EM_EQS, NB_EM_EQS);
        let mut set = |col: usize, b: [f64; 3], e: [f64; 3]| {
            for d in 0..3 {
                right[(d, col)] = b[d];
                right[(3 + d, col)] = e[d];
            }
        };

        set(0, t1, scale(t2, c));
        set(1, t2, scale(t1, -c));
        set(2, t1, scale(t2, -c));
        set(3, t2, scale(t1, c));
        set(4, n, [0.0; 3]);
        set(5, n, [0.0; 3]);
        set(6, [0.0; 3], scale(n, c));
        set(7, [0.0; 3], scale(n, c));

        right[(6, 4)] = -gc;
        right[(6, 5)] = gc;
        right[(7, 6)] = -1.0;
        right[(7, 7)] = 1.0;

        EigenSystem::from_right(right, self.eigen_values(), "MaxwellBlock::eigen_system")
    }
}

fn scale(v: [f64; 3], s: f64) -> [f64; 3] {
    [s * v[0], s * v[1], s * v[2]]
}

// =================================================================================================
// Scalar advection block
// =================================================================================================

/// One scalar advected at normal speed `a·n`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScalarAdvectionBlock {
    pub normal_speed: f64,
}

impl ScalarAdvectionBlock {
    pub fn flux(&self, value: f64) -> RealVector {
        DVector::from_element(1, self.normal_speed * value)
    }

    pub fn jacobian(&self) -> RealMatrix {
        DMatrix::from_element(1, 1, self.normal_speed)
    }

    pub fn eigen_system(&self) -> EigenSystem {
        EigenSystem {
            right: DMatrix::identity(1, 1),
            left: DMatrix::identity(1, 1),
            eigen_values: DVector::from_element(1, self.normal_speed),
        }
    }
}

// =================================================================================================
// Tests
// =================================================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn mixture_block(dim: usize) -> MixtureEulerBlock {
        let gamma: f64 = 1.4;
        let densities = vec![0.8, 0.4];
        let rho: f64 = densities.iter().sum();
        let velocity = if dim == 2 { vec![30.0, -12.0] } else { vec![30.0, -12.0, 7.0] };
        let pressure = 1.0e5;
        let q2 = dot(&velocity, &velocity);
        let enthalpy = gamma / (gamma - 1.0) * pressure / rho + 0.5 * q2;
        MixtureEulerBlock {
            densities,
            velocity,
            pressure,
            enthalpy,
            sound_speed: (gamma * pressure / rho).sqrt(),
            gamma,
        }
    }

    fn unit(v: &[f64]) -> Vec<f64> {
        let norm = dot(v, v).sqrt();
        v.iter().map(|x| x / norm).collect()
    }

    #[test]
    fn test_mixture_reconstruction_2d() {
        let block = mixture_block(2);
        let normal = unit(&[0.6, 0.3]);

        let system = block.eigen_system(&normal).unwrap();
        let jac = block.jacobian(&normal);
        assert_relative_eq!(system.reconstruct(), jac, epsilon = 1e-7 * jac.amax());
    }

    #[test]
    fn test_absent_species_keeps_eigen_system_finite() {
        let mut block = mixture_block(2);
        block.densities[1] = 0.0;
        let normal = unit(&[0.6, 0.3]);

        let system = block.eigen_system(&normal).unwrap();
        assert!(system.right.iter().chain(system.left.iter()).all(|x| x.is_finite()));

        let mut empty = mixture_block(2);
        empty.densities = vec![0.0];
        assert_eq!(empty.mass_fraction(0), 1.0);
        let system = empty.eigen_system(&normal).unwrap();
        let jac = empty.jacobian(&normal);
        assert!(jac.iter().all(|x| x.is_finite()));
        assert_relative_eq!(system.reconstruct(), jac, epsilon = 1e-7 * jac.amax());
    }

    #[test]
    fn test_mixture_reconstruction_3d() {
        let block = mixture_block(3);
        let normal = unit(&[0.2, -0.5, 0.9]);

        let system = block.eigen_system(&normal).unwrap();
        let jac = block.jacobian(&normal);
        assert_relative_eq!(system.reconstruct(), jac, epsilon = 1e-7 * jac.amax());
    }

    #[test]
    fn test_mixture_jacobian_is_flux_derivative() {
        // Euler flux is homogeneous of degree one: F(U) = A(U) U
        let block = mixture_block(2);
        let normal = unit(&[1.0, 2.0]);
        let rho = block.density();

        let mut state: Vec<f64> = block.densities.clone();
        state.extend(block.velocity.iter().map(|u| rho * u));
        state.push(rho * block.enthalpy - block.pressure);

        let product = block.jacobian(&normal) * DVector::from_vec(state);
        let flux = block.flux(&normal);
        assert_relative_eq!(product, flux, epsilon = 1e-9 * flux.amax());
    }

    #[test]
    fn test_split_sums_to_jacobian() {
        let block = mixture_block(3);
        let normal = unit(&[-1.0, 0.4, 0.1]);
        let system = block.eigen_system(&normal).unwrap();
        let split = split_from_eigen(&system);

        let sum = &split.plus + &split.minus;
        assert_relative_eq!(sum, system.reconstruct(), epsilon = 1e-9 * sum.amax());
    }

    #[test]
    fn test_maxwell_reconstruction() {
        let block = MaxwellBlock::new(MaxwellConstants {
            light_speed: 3.0,
            div_b_cleaning: 1.2,
            div_e_cleaning: 0.7,
        });
        for normal in [unit(&[0.3, 0.8]), unit(&[0.5, -0.1, 0.4]), vec![0.0, 0.0, 1.0]] {
            let system = block.eigen_system(&normal).unwrap();
            assert_relative_eq!(system.reconstruct(), block.jacobian(&normal), epsilon = 1e-10);
        }
        assert_relative_eq!(block.max_abs_eigen_value(), 3.6);
    }

    #[test]
    fn test_maxwell_flux_of_cleaning_potentials() {
        let block = MaxwellBlock::new(MaxwellConstants::default());
        let state = [0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 2.0, 3.0];
        let flux = block.flux(&state, &[1.0, 0.0]);

        assert_eq!(flux[0], 2.0);
        assert_eq!(flux[3], 3.0);
        assert_eq!(flux[6], 0.0);
    }

    #[test]
    fn test_embedding() {
        let block = ScalarAdvectionBlock { normal_speed: -2.0 }.eigen_system();
        let mut system = EigenSystem::zeros(3);
        system.embed(&block, &[1]);
        system.set_trivial(0, 0.0);
        system.set_trivial(2, 5.0);

        assert_eq!(system.eigen_values.as_slice(), &[0.0, -2.0, 5.0]);
        assert_eq!(system.right, DMatrix::identity(3, 3));
        let split = split_from_eigen(&system);
        assert_eq!(split.minus[(1, 1)], -2.0);
        assert_eq!(split.plus[(2, 2)], 5.0);
    }

    #[test]
    fn test_singular_right_matrix() {
        let err = invert_right(&DMatrix::zeros(2, 2), "test").unwrap_err();
        assert!(err.is_numeric_domain());
    }
}
