use crate::io::configuration::MAX_BOXES;
use bitvec::prelude::*;
use std::fmt;
use std::ops::RangeInclusive;

/// Set of box indices, one bit per box
///
/// Used as the eligibility set of a single integer. Capacity is
/// [`MAX_BOXES`]; indices at or beyond it are never members.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct BoxSet(u64);

impl BoxSet {
    /// Create a set with no boxes
    pub const fn empty() -> Self {
        Self(0)
    }

    /// Create a set holding boxes `0..box_count`
    pub const fn all(box_count: usize) -> Self {
        if box_count >= MAX_BOXES {
            Self(u64::MAX)
        } else {
            Self((1_u64 << box_count) - 1)
        }
    }

    /// Test box membership
    pub const fn contains(self, index: usize) -> bool {
        index < MAX_BOXES && (self.0 >> index) & 1 == 1
    }

    /// Add a box
    pub const fn insert(&mut self, index: usize) {
        if index < MAX_BOXES {
            self.0 |= 1_u64 << index;
        }
    }

    /// Remove a box
    pub const fn remove(&mut self, index: usize) {
        if index < MAX_BOXES {
            self.0 &= !(1_u64 << index);
        }
    }

    /// Boxes in `self` but not in `other`
    #[must_use]
    pub const fn difference(self, other: Self) -> Self {
        Self(self.0 & !other.0)
    }

    /// Test if no boxes are present
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Count boxes in the set
    pub const fn count(self) -> usize {
        self.0.count_ones() as usize
    }

    /// Lowest box index in the set
    pub const fn first(self) -> Option<usize> {
        if self.0 == 0 {
            None
        } else {
            Some(self.0.trailing_zeros() as usize)
        }
    }

    /// Lowest index below `box_count` that is not in the set
    pub const fn first_absent(self, box_count: usize) -> Option<usize> {
        let absent = Self::all(box_count).difference(self);
        absent.first()
    }

    /// Iterate box indices in increasing order
    pub fn iter(self) -> impl Iterator<Item = usize> {
        let mut remaining = self.0;
        std::iter::from_fn(move || {
            if remaining == 0 {
                return None;
            }
            let index = remaining.trailing_zeros() as usize;
            remaining &= remaining - 1;
            Some(index)
        })
    }

    /// Extract all box indices as a vector
    pub fn to_vec(self) -> Vec<usize> {
        self.iter().collect()
    }
}

impl FromIterator<usize> for BoxSet {
    fn from_iter<I: IntoIterator<Item = usize>>(iter: I) -> Self {
        let mut set = Self::empty();
        for index in iter {
            set.insert(index);
        }
        set
    }
}

impl fmt::Display for BoxSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BoxSet({:?})", self.to_vec())
    }
}

/// Fixed-capacity set of integer values `0..=bound`
///
/// Holds the subset-sum closure of one box. The capacity is chosen once from
/// configuration; values above the bound are silently outside the set.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ValueBitset {
    bits: BitVec,
    bound: usize,
}

impl ValueBitset {
    /// Create an empty set able to hold `0..=bound`
    pub fn new(bound: usize) -> Self {
        Self {
            bits: bitvec![0; bound + 1],
            bound,
        }
    }

    /// Largest representable value
    pub const fn bound(&self) -> usize {
        self.bound
    }

    /// Insert a value, ignoring values above the bound
    pub fn insert(&mut self, value: usize) {
        if value <= self.bound {
            self.bits.set(value, true);
        }
    }

    /// Remove a value
    pub fn remove(&mut self, value: usize) {
        if value <= self.bound {
            self.bits.set(value, false);
        }
    }

    /// Insert every value of a range, clipped to the bound
    pub fn insert_range(&mut self, range: RangeInclusive<usize>) {
        let (start, end) = range.into_inner();
        let end = end.min(self.bound);
        if start > end {
            return;
        }
        if let Some(slice) = self.bits.get_mut(start..=end) {
            slice.fill(true);
        }
    }

    /// Test value membership
    pub fn contains(&self, value: usize) -> bool {
        self.bits.get(value).as_deref() == Some(&true)
    }

    /// Test if no values are present
    pub fn is_empty(&self) -> bool {
        self.bits.not_any()
    }

    /// Count values in the set
    pub fn count(&self) -> usize {
        self.bits.count_ones()
    }

    /// Iterate values in increasing order
    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.bits.iter_ones()
    }

    /// Extract all values as a vector
    pub fn to_vec(&self) -> Vec<usize> {
        self.iter().collect()
    }

    /// Add every value of `other` to this set in-place
    pub fn union_with(&mut self, other: &Self) {
        self.bits |= &other.bits;
    }

    /// Values reachable by adding `shift` to a member that are not already members
    ///
    /// Computes `(self + shift) \ self` over `0..=bound`. Members whose shifted
    /// value passes the bound are dropped rather than wrapped.
    #[must_use]
    pub fn shifted_difference(&self, shift: usize) -> Self {
        if shift > self.bound {
            return Self::new(self.bound);
        }

        let mut fresh = self.bits.clone();
        fresh.shift_end(shift);
        let complement = !self.bits.clone();
        fresh &= &complement;

        Self {
            bits: fresh,
            bound: self.bound,
        }
    }
}

impl fmt::Display for ValueBitset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ValueBitset({} values: {:?})", self.count(), self.to_vec())
    }
}
