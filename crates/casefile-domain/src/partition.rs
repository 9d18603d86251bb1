//! Static parity split of units between the two workers

use crate::unit::Unit;
use std::fmt;

/// Identifier of one of the two workers
///
/// Worker 1 owns even unit indices and the primary credential, worker 2 owns
/// odd indices and the secondary credential.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct WorkerId(u8);

impl WorkerId {
    /// Worker for even indices
    pub const PRIMARY: WorkerId = WorkerId(1);

    /// Worker for odd indices
    pub const SECONDARY: WorkerId = WorkerId(2);

    /// Both workers in spawn order
    pub const ALL: [WorkerId; 2] = [WorkerId::PRIMARY, WorkerId::SECONDARY];

    /// The worker responsible for a unit index
    pub fn for_index(index: usize) -> Self {
        if index % 2 == 0 {
            WorkerId::PRIMARY
        } else {
            WorkerId::SECONDARY
        }
    }

    /// Numeric id as written to result records
    pub fn value(&self) -> u8 {
        self.0
    }

    /// Rebuild from a numeric id, if it names one of the two workers
    pub fn from_value(value: u8) -> Option<Self> {
        match value {
            1 => Some(WorkerId::PRIMARY),
            2 => Some(WorkerId::SECONDARY),
            _ => None,
        }
    }
}

impl fmt::Display for WorkerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Units split by index parity, order preserved within each half
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Partition {
    /// Even indices, handled by [`WorkerId::PRIMARY`]
    pub primary: Vec<Unit>,

    /// Odd indices, handled by [`WorkerId::SECONDARY`]
    pub secondary: Vec<Unit>,
}

impl Partition {
    /// Split units by index parity
    ///
    /// # Examples
    ///
    /// ```
    /// use casefile_domain::{Partition, Unit};
    ///
    /// let units = (0..5).map(|i| Unit::chunk(i, "text")).collect();
    /// let partition = Partition::by_parity(units);
    /// assert_eq!(partition.primary.len(), 3);
    /// assert_eq!(partition.secondary.len(), 2);
    /// ```
    pub fn by_parity(units: Vec<Unit>) -> Self {
        let (primary, secondary) = units
            .into_iter()
            .partition(|unit| WorkerId::for_index(unit.index) == WorkerId::PRIMARY);
        Self { primary, secondary }
    }

    /// Take the half owned by a worker
    pub fn take(&mut self, worker: WorkerId) -> Vec<Unit> {
        if worker == WorkerId::PRIMARY {
            std::mem::take(&mut self.primary)
        } else {
            std::mem::take(&mut self.secondary)
        }
    }

    /// Total number of units across both halves
    pub fn len(&self) -> usize {
        self.primary.len() + self.secondary.len()
    }

    /// True when neither worker has anything to do
    pub fn is_empty(&self) -> bool {
        self.primary.is_empty() && self.secondary.is_empty()
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;
    use std::collections::BTreeSet;

    proptest! {
        /// Property: the two halves are disjoint and together cover every unit
        #[test]
        fn test_parity_split_is_disjoint_and_exhaustive(indices in prop::collection::vec(0usize..10_000, 0..64)) {
            let units: Vec<Unit> = indices.iter().map(|&i| Unit::chunk(i, "")).collect();
            let partition = Partition::by_parity(units);

            prop_assert_eq!(partition.len(), indices.len());
            prop_assert!(partition.primary.iter().all(|u| u.index % 2 == 0));
            prop_assert!(partition.secondary.iter().all(|u| u.index % 2 == 1));

            let mut all: Vec<usize> = partition.primary.iter().chain(&partition.secondary).map(|u| u.index).collect();
            let mut expected = indices.clone();
            all.sort_unstable();
            expected.sort_unstable();
            prop_assert_eq!(all, expected);

            let primary: BTreeSet<usize> = partition.primary.iter().map(|u| u.index).collect();
            let secondary: BTreeSet<usize> = partition.secondary.iter().map(|u| u.index).collect();
            prop_assert!(primary.is_disjoint(&secondary));
        }

        /// Property: relative order inside each half follows the input order
        #[test]
        fn test_parity_split_preserves_order(len in 0usize..200) {
            let units: Vec<Unit> = (0..len).map(|i| Unit::chunk(i, "")).collect();
            let partition = Partition::by_parity(units);

            prop_assert!(partition.primary.windows(2).all(|w| w[0].index < w[1].index));
            prop_assert!(partition.secondary.windows(2).all(|w| w[0].index < w[1].index));
        }
    }
}
