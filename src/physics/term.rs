//! Convective terms and scalar-group layout
//!
//! A term is the immutable container of a physics' constants and of the
//! layout of its state vector. Terms are built once with the physical model
//! and shared (`Arc`) with every variable set and transformer created from it.
//!
//! Access through the [`ConvectiveTerm`] handle is checked: casting to the
//! wrong physics kind returns [`PhysicsError::InvalidCast`] instead of
//! handing out a term whose constants would silently corrupt the numerics.
//!
//! ```rust
//! use varset_rs::models::{EulerModel, EulerMfmhdTerm, EulerTerm};
//! use varset_rs::models::config::EulerConfig;
//! use varset_rs::physics::{Dimension, PhysicalModel};
//!
//! let model = EulerModel::new(Dimension::Dim2, &EulerConfig::default()).unwrap();
//! let term = model.get_convective_term();
//!
//! assert!(term.cast::<EulerTerm>().is_ok());
//! assert!(term.cast::<EulerMfmhdTerm>().unwrap_err().is_invalid_cast());
//! ```

use std::sync::Arc;

use crate::models::{EulerMfmhdTerm, EulerTerm, IcpneqTerm, MaxwellProjectionTerm, PassiveScalarTerm};
use crate::physics::error::{PhysicsError, PhysicsResult};

// =================================================================================================
// Scalar groups
// =================================================================================================

/// Kind of a contiguous block of a state vector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScalarGroupKind {
    /// Mixture density
    Density,
    /// Species (partial) densities
    Species,
    /// Momentum components (all species)
    Momentum,
    /// Total energies (all species)
    Energy,
    /// Induction equations (ICP electric field)
    Induction,
    /// Passive scalar
    Scalar,
}

/// One scalar group: `count` entries starting at `offset`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScalarGroup {
    pub kind: ScalarGroupKind,
    pub count: usize,
    pub offset: usize,
}

/// Partition of a state vector into a fixed leading block and scalar groups
///
/// Invariant: groups are non-empty, contiguous and ordered, the first one
/// starts right after the fixed block and the last one ends at `nb_eqs`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScalarGroupTable {
    fixed_block: usize,
    groups: Vec<ScalarGroup>,
    nb_eqs: usize,
}

impl ScalarGroupTable {
    /// Build a table whose groups follow each other after `fixed_block`
    pub fn contiguous(fixed_block: usize, sizes: &[(ScalarGroupKind, usize)]) -> PhysicsResult<Self> {
        let mut offset = fixed_block;
        let groups = sizes
            .iter()
            .map(|&(kind, count)| {
                let group = ScalarGroup { kind, count, offset };
                offset += count;
                group
            })
            .collect();

        Self::with_offsets(fixed_block, groups, offset)
    }

    /// Build a table from explicit offsets, checking the partition invariant
    pub fn with_offsets(fixed_block: usize, groups: Vec<ScalarGroup>, nb_eqs: usize) -> PhysicsResult<Self> {
        let mut expected = fixed_block;
        for (index, group) in groups.iter().enumerate() {
            if group.count == 0 {
                return Err(PhysicsError::InconsistentScalarGroups {
                    message: format!("group {} ({:?}) is empty", index, group.kind),
                });
            }
            if group.offset != expected {
                return Err(PhysicsError::InconsistentScalarGroups {
                    message: format!(
                        "group {} ({:?}) starts at {}, expected {}",
                        index, group.kind, group.offset, expected
                    ),
                });
            }
            expected += group.count;
        }

        if expected != nb_eqs {
            return Err(PhysicsError::InconsistentScalarGroups {
                message: format!(
                    "fixed block {} + groups cover {} entries, model has {} equations",
                    fixed_block, expected, nb_eqs
                ),
            });
        }

        Ok(Self { fixed_block, groups, nb_eqs })
    }

    /// Size of the fixed leading block (not split into groups)
    pub fn fixed_block_size(&self) -> usize {
        self.fixed_block
    }

    /// Total number of equations
    pub fn nb_eqs(&self) -> usize {
        self.nb_eqs
    }

    /// All groups in state order
    pub fn groups(&self) -> &[ScalarGroup] {
        &self.groups
    }

    /// Number of groups
    pub fn nb_groups(&self) -> usize {
        self.groups.len()
    }

    /// First group of a given kind
    pub fn group(&self, kind: ScalarGroupKind) -> Option<&ScalarGroup> {
        self.groups.iter().find(|g| g.kind == kind)
    }

    /// Size of group `index`
    pub fn nb_scalar_vars(&self, index: usize) -> PhysicsResult<usize> {
        self.get(index).map(|g| g.count)
    }

    /// State offset of group `index`
    pub fn first_scalar_var(&self, index: usize) -> PhysicsResult<usize> {
        self.get(index).map(|g| g.offset)
    }

    fn get(&self, index: usize) -> PhysicsResult<&ScalarGroup> {
        self.groups.get(index).ok_or_else(|| {
            PhysicsError::invalid_argument(format!(
                "scalar group {} out of range (model has {})",
                index,
                self.groups.len()
            ))
        })
    }
}

// =================================================================================================
// Convective term handle
// =================================================================================================

/// Checked handle on the concrete term of a physical model
#[derive(Debug, Clone)]
pub enum ConvectiveTerm {
    Euler(Arc<EulerTerm>),
    MaxwellProjection(Arc<MaxwellProjectionTerm>),
    EulerMfmhd(Arc<EulerMfmhdTerm>),
    Icpneq(Arc<IcpneqTerm>),
    PassiveScalar(Arc<PassiveScalarTerm>),
}

/// Concrete term types reachable from a [`ConvectiveTerm`]
pub trait TermKind: Sized {
    /// Name reported in cast errors
    const KIND: &'static str;

    /// Borrow the concrete term if the handle holds this kind
    fn from_term(term: &ConvectiveTerm) -> Option<&Arc<Self>>;
}

macro_rules! impl_term_kind {
    ($ty:ty, $variant:ident, $name:literal) => {
        impl TermKind for $ty {
            const KIND: &'static str = $name;

            fn from_term(term: &ConvectiveTerm) -> Option<&Arc<Self>> {
                match term {
                    ConvectiveTerm::$variant(inner) => Some(inner),
                    _ => None,
                }
            }
        }

        impl From<$ty> for ConvectiveTerm {
            fn from(term: $ty) -> Self {
                ConvectiveTerm::$variant(Arc::new(term))
            }
        }
    };
}

impl_term_kind!(EulerTerm, Euler, "EulerTerm");
impl_term_kind!(MaxwellProjectionTerm, MaxwellProjection, "MaxwellProjectionTerm");
impl_term_kind!(EulerMfmhdTerm, EulerMfmhd, "EulerMFMHDTerm");
impl_term_kind!(IcpneqTerm, Icpneq, "ICPNEQTerm");
impl_term_kind!(PassiveScalarTerm, PassiveScalar, "PassiveScalarTerm");

impl ConvectiveTerm {
    /// Name of the concrete kind held by this handle
    pub fn kind_name(&self) -> &'static str {
        match self {
            ConvectiveTerm::Euler(_) => EulerTerm::KIND,
            ConvectiveTerm::MaxwellProjection(_) => MaxwellProjectionTerm::KIND,
            ConvectiveTerm::EulerMfmhd(_) => EulerMfmhdTerm::KIND,
            ConvectiveTerm::Icpneq(_) => IcpneqTerm::KIND,
            ConvectiveTerm::PassiveScalar(_) => PassiveScalarTerm::KIND,
        }
    }

    /// Checked downcast to a concrete term
    pub fn cast<T: TermKind>(&self) -> PhysicsResult<Arc<T>> {
        T::from_term(self).cloned().ok_or(PhysicsError::InvalidCast {
            expected: T::KIND,
            found: self.kind_name(),
        })
    }

    /// State layout of the term
    pub fn scalar_groups(&self) -> &ScalarGroupTable {
        match self {
            ConvectiveTerm::Euler(t) => t.scalar_groups(),
            ConvectiveTerm::MaxwellProjection(t) => t.scalar_groups(),
            ConvectiveTerm::EulerMfmhd(t) => t.scalar_groups(),
            ConvectiveTerm::Icpneq(t) => t.scalar_groups(),
            ConvectiveTerm::PassiveScalar(t) => t.scalar_groups(),
        }
    }
}

// =================================================================================================
// Tests
// =================================================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contiguous_table() {
        let table = ScalarGroupTable::contiguous(
            8,
            &[
                (ScalarGroupKind::Species, 2),
                (ScalarGroupKind::Momentum, 4),
                (ScalarGroupKind::Energy, 2),
            ],
        )
        .unwrap();

        assert_eq!(table.nb_eqs(), 16);
        assert_eq!(table.fixed_block_size(), 8);
        assert_eq!(table.first_scalar_var(0).unwrap(), 8);
        assert_eq!(table.first_scalar_var(1).unwrap(), 10);
        assert_eq!(table.first_scalar_var(2).unwrap(), 14);
        assert_eq!(table.nb_scalar_vars(1).unwrap(), 4);
        assert_eq!(table.group(ScalarGroupKind::Energy).unwrap().offset, 14);
    }

    #[test]
    fn test_out_of_range_group() {
        let table = ScalarGroupTable::contiguous(0, &[(ScalarGroupKind::Scalar, 1)]).unwrap();
        let err = table.nb_scalar_vars(3).unwrap_err();
        assert!(err.is_invalid_state());
    }

    #[test]
    fn test_overlapping_groups_rejected() {
        let groups = vec![
            ScalarGroup { kind: ScalarGroupKind::Species, count: 2, offset: 0 },
            ScalarGroup { kind: ScalarGroupKind::Momentum, count: 2, offset: 1 },
        ];
        let err = ScalarGroupTable::with_offsets(0, groups, 4).unwrap_err();
        assert!(err.is_configuration_error());
    }

    #[test]
    fn test_incomplete_partition_rejected() {
        let groups = vec![ScalarGroup { kind: ScalarGroupKind::Species, count: 2, offset: 8 }];
        let err = ScalarGroupTable::with_offsets(8, groups, 12).unwrap_err();
        assert!(matches!(err, PhysicsError::InconsistentScalarGroups { .. }));
    }

    #[test]
    fn test_empty_group_rejected() {
        let err = ScalarGroupTable::contiguous(0, &[(ScalarGroupKind::Species, 0)]).unwrap_err();
        assert!(err.is_configuration_error());
    }
}
