//! Physical data types
//!
//! State vectors, reference ("physical") data vectors and matrices are plain
//! nalgebra dense containers. This module gives them names and collects the
//! small geometric helpers used on face normals.
//!
//! # Memory Layout
//!
//! - **State**: `nb_eqs` entries, layout given by the term's scalar groups
//! - **Reference data**: term-specific layout addressed by named offsets
//!   (`EulerTerm::RHO`, `EulerMfmhdTerm::reference_layout()`, ...)
//! - **Matrices**: `nb_eqs × nb_eqs` (Jacobians, eigenvectors) or
//!   `nb_eqs × dim` (per-axis fluxes)

use nalgebra::{DMatrix, DVector};

use crate::physics::error::{PhysicsError, PhysicsResult};
use crate::physics::traits::Dimension;

/// Unknowns of one mesh entity in some variable convention
pub type State = DVector<f64>;

/// Dense real vector (reference data, fluxes, eigenvalues)
pub type RealVector = DVector<f64>;

/// Dense real matrix (Jacobians, eigenvector matrices)
pub type RealMatrix = DMatrix<f64>;

/// Tolerance on the norm of a unit normal
pub const UNIT_NORMAL_TOLERANCE: f64 = 1e-8;

/// Check that `normal` is a unit vector of the model's dimension
pub fn check_normal(normal: &[f64], dimension: Dimension) -> PhysicsResult<()> {
    if normal.len() != dimension.size() {
        return Err(PhysicsError::invalid_argument(format!(
            "normal has {} components, model is {}",
            normal.len(),
            dimension
        )));
    }

    let norm = normal.iter().map(|n| n * n).sum::<f64>().sqrt();
    if !norm.is_finite() || (norm - 1.0).abs() > UNIT_NORMAL_TOLERANCE {
        return Err(PhysicsError::invalid_argument(format!(
            "normal must be a unit vector, |n| = {}",
            norm
        )));
    }
    Ok(())
}

/// Pad a 2D or 3D normal to three components
pub fn embed_normal(normal: &[f64]) -> [f64; 3] {
    let mut n3 = [0.0; 3];
    for (slot, value) in n3.iter_mut().zip(normal) {
        *slot = *value;
    }
    n3
}

/// Unit vector along coordinate axis `axis` in `dimension`
pub fn axis_normal(axis: usize, dimension: Dimension) -> Vec<f64> {
    let mut normal = vec![0.0; dimension.size()];
    normal[axis] = 1.0;
    normal
}

/// Right-handed orthonormal tangents `(t1, t2)` of a unit normal `n`
///
/// `n × t1 = t2` and `n × t2 = -t1`.
pub fn tangents(n: [f64; 3]) -> ([f64; 3], [f64; 3]) {
    // cross with the axis least aligned with n
    let abs = [n[0].abs(), n[1].abs(), n[2].abs()];
    let axis = if abs[0] <= abs[1] && abs[0] <= abs[2] {
        [1.0, 0.0, 0.0]
    } else if abs[1] <= abs[2] {
        [0.0, 1.0, 0.0]
    } else {
        [0.0, 0.0, 1.0]
    };

    let t1 = normalize(cross(n, axis));
    let t2 = cross(n, t1);
    (t1, t2)
}

/// Cross product of two 3-vectors
pub fn cross(a: [f64; 3], b: [f64; 3]) -> [f64; 3] {
    [
        a[1] * b[2] - a[2] * b[1],
        a[2] * b[0] - a[0] * b[2],
        a[0] * b[1] - a[1] * b[0],
    ]
}

/// Dot product of two slices of equal length
pub fn dot(a: &[f64], b: &[f64]) -> f64 {
    a.iter().zip(b).map(|(x, y)| x * y).sum()
}

fn normalize(v: [f64; 3]) -> [f64; 3] {
    let norm = (v[0] * v[0] + v[1] * v[1] + v[2] * v[2]).sqrt();
    [v[0] / norm, v[1] / norm, v[2] / norm]
}

// ==================== Tests ====================
