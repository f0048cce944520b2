use crate::algorithm::bitset::{BoxSet, ValueBitset};

/// Eligibility sets and subset-sum closures for one branch of the search
///
/// `possibilities[n]` lists the boxes that may still receive `n`; index 0 is
/// never used. `sums[b]` is the set of every sum of one or more distinct
/// elements of box `b`. Each branch works on its own clone of this state.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SearchState {
    possibilities: Vec<BoxSet>,
    sums: Vec<ValueBitset>,
    occupied: BoxSet,
    run_starts: Vec<Option<usize>>,
    box_count: usize,
    domain_bound: usize,
}

impl SearchState {
    /// Create the initial state: every box empty, every integer eligible everywhere
    pub fn new(box_count: usize, domain_bound: usize) -> Self {
        let mut possibilities = vec![BoxSet::all(box_count); domain_bound + 1];
        if let Some(unused) = possibilities.first_mut() {
            *unused = BoxSet::empty();
        }

        Self {
            possibilities,
            sums: vec![ValueBitset::new(domain_bound); box_count],
            occupied: BoxSet::empty(),
            run_starts: vec![None; box_count],
            box_count,
            domain_bound,
        }
    }

    /// Number of boxes
    pub const fn box_count(&self) -> usize {
        self.box_count
    }

    /// Largest integer the state can represent
    pub const fn domain_bound(&self) -> usize {
        self.domain_bound
    }

    /// Boxes that may still receive `n`
    ///
    /// Integers outside `1..=domain_bound` have no eligible boxes.
    pub fn eligible(&self, n: usize) -> BoxSet {
        if n == 0 {
            return BoxSet::empty();
        }
        self.possibilities.get(n).copied().unwrap_or_default()
    }

    /// Subset-sum closure of a box
    pub fn sums(&self, box_index: usize) -> Option<&ValueBitset> {
        self.sums.get(box_index)
    }

    /// Boxes that have received at least one element
    pub const fn occupied(&self) -> BoxSet {
        self.occupied
    }

    /// Test whether a box has received at least one element
    pub const fn is_occupied(&self, box_index: usize) -> bool {
        self.occupied.contains(box_index)
    }

    /// Start value of the counting run committed to a box, if any
    pub fn run_start(&self, box_index: usize) -> Option<usize> {
        self.run_starts.get(box_index).copied().flatten()
    }

    /// Remove a box from the eligibility set of `n`
    pub fn exclude(&mut self, n: usize, box_index: usize) {
        if let Some(eligible) = self.possibilities.get_mut(n) {
            eligible.remove(box_index);
        }
    }

    /// Remove several boxes from the eligibility set of `n`
    pub fn exclude_all(&mut self, n: usize, boxes: BoxSet) {
        if let Some(eligible) = self.possibilities.get_mut(n) {
            *eligible = eligible.difference(boxes);
        }
    }

    pub(crate) fn sums_mut(&mut self, box_index: usize) -> Option<&mut ValueBitset> {
        self.sums.get_mut(box_index)
    }

    pub(crate) const fn mark_occupied(&mut self, box_index: usize) {
        self.occupied.insert(box_index);
    }

    pub(crate) fn set_run_start(&mut self, box_index: usize, start: usize) {
        if let Some(slot) = self.run_starts.get_mut(box_index) {
            *slot = Some(start);
        }
    }
}
