//! Counting boxes: boxes assumed to be filled by whole runs `[c, 2c - 1]`
//!
//! A counting box started at `c` receives every integer of `[c, 2c - 1]` at
//! once. The run is free of subset-sum and doubling collisions, and its
//! complete subset-sum closure has a closed form, so it can be committed
//! without branching. Results that rely on counting boxes are assumption-based:
//! they only cover assignments where those boxes take this shape.

use crate::algorithm::{bitset::BoxSet, state::SearchState};
use crate::io::configuration::COUNTING_MIN_START;
use serde::Serialize;

/// A box designated in advance as a counting box
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct CountingBox {
    /// Box index
    pub index: usize,
    /// Smallest start value for this box's run; inherits the previous
    /// counting box's threshold when absent
    pub min_start: Option<usize>,
    /// Largest start value for this box's run; unbounded when absent
    pub max_start: Option<usize>,
}

impl CountingBox {
    /// Counting box with no threshold of its own
    pub const fn new(index: usize) -> Self {
        Self {
            index,
            min_start: None,
            max_start: None,
        }
    }

    /// Counting box whose run may not start below `min_start`
    pub const fn with_min_start(index: usize, min_start: usize) -> Self {
        Self {
            index,
            min_start: Some(min_start),
            max_start: None,
        }
    }

    /// Same box with its run barred from starting above `max_start`
    ///
    /// Lets an interrupted search continue below the start it had reached.
    #[must_use]
    pub const fn with_max_start(self, max_start: usize) -> Self {
        Self {
            max_start: Some(max_start),
            ..self
        }
    }

    /// Whether a run may start at `start`
    pub const fn allows_start(&self, start: usize) -> bool {
        match self.max_start {
            Some(max_start) => start <= max_start,
            None => true,
        }
    }
}

/// First value a counting box started at `c` may receive again
///
/// Equals `⌊(3c − 5)·c / 2⌋`, the run's total minus `2c`. Valid for `c > 4`.
pub const fn first_allowed(start: usize) -> usize {
    (3 * start).saturating_sub(5).saturating_mul(start) / 2
}

/// Set of all counting box indices
pub fn counting_mask(boxes: &[CountingBox]) -> BoxSet {
    boxes.iter().map(|counting| counting.index).collect()
}

/// Apply the start thresholds of counting boxes to a fresh state
///
/// No counting box may start below [`COUNTING_MIN_START`]. Each counting box,
/// taken in index order, also bars itself and every later counting box from
/// values below its threshold.
pub fn restrict_initial(state: &mut SearchState, boxes: &[CountingBox]) {
    let mut ordered = boxes.to_vec();
    ordered.sort_by_key(|counting| counting.index);

    let bound = state.domain_bound();
    let mut remaining = counting_mask(&ordered);

    for n in 1..COUNTING_MIN_START.min(bound + 1) {
        state.exclude_all(n, remaining);
    }

    let mut threshold = 0;
    for counting in &ordered {
        threshold = threshold.max(counting.min_start.unwrap_or(0));
        for n in COUNTING_MIN_START..threshold.min(bound + 1) {
            state.exclude_all(n, remaining);
        }
        remaining.remove(counting.index);
    }
}

/// Successor state after committing the run `[start, 2·start − 1]` to a box
///
/// The search resumes at `2·start`. When the box can be used again inside
/// the domain, its closure becomes the run's full subset-sum set; otherwise
/// the box is closed for every remaining value.
#[must_use]
pub fn start_run(state: &SearchState, start: usize, box_index: usize) -> SearchState {
    let mut next = state.clone();
    let bound = next.domain_bound();
    let doubled = 2 * start;
    let reopen = first_allowed(start);

    if reopen <= bound {
        let last_sum = reopen + start;
        let total = reopen + doubled;

        for n in doubled..=last_sum.min(bound) {
            if n != reopen {
                next.exclude(n, box_index);
            }
        }
        if total <= bound {
            next.exclude(total, box_index);
        }

        if let Some(sums) = next.sums_mut(box_index) {
            sums.insert_range(start..=last_sum);
            sums.remove(doubled);
            sums.remove(reopen);
            sums.insert(total);
        }
    } else {
        for n in doubled..=bound {
            next.exclude(n, box_index);
        }
    }

    next.mark_occupied(box_index);
    next.set_run_start(box_index, start);
    next
}

/// Whether a block `start..start + len` can go into a started counting box
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RunClearance {
    /// Every value of the block is eligible for the box
    Clear,
    /// Some value of the block is no longer eligible
    Blocked,
    /// The block reaches past the domain bound
    Overrun,
}

/// Check a block for a subsequent fill of a counting box
///
/// `start` itself is assumed eligible; the remaining values are inspected in
/// order and the first problem decides the answer.
pub fn run_clearance(
    state: &SearchState,
    start: usize,
    len: usize,
    box_index: usize,
) -> RunClearance {
    for n in start + 1..start + len {
        if n > state.domain_bound() {
            return RunClearance::Overrun;
        }
        if !state.eligible(n).contains(box_index) {
            return RunClearance::Blocked;
        }
    }
    RunClearance::Clear
}
