use crate::algorithm::{bitset::BoxSet, state::SearchState};

/// What placing the current integer into a particular box means
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Candidate {
    /// Ordinary box that already holds elements
    Extend,
    /// Ordinary box that is still empty
    Open,
    /// Counting box whose run has not started yet
    StartRun,
    /// Counting box with a committed run, filled again in blocks of `len`
    FillRun {
        /// Block length, equal to the start value of the box's first run
        len: usize,
    },
}

/// Classify a box for placement of the next integer
///
/// Counting boxes keep their counting behaviour after the first run only when
/// `subsequent_fill` is enabled; otherwise they continue as ordinary boxes.
pub fn classify(
    state: &SearchState,
    box_index: usize,
    counting: BoxSet,
    subsequent_fill: bool,
) -> Candidate {
    if counting.contains(box_index) {
        return match state.run_start(box_index) {
            None => Candidate::StartRun,
            Some(len) if subsequent_fill => Candidate::FillRun { len },
            Some(_) => Candidate::Extend,
        };
    }

    if state.is_occupied(box_index) {
        Candidate::Extend
    } else {
        Candidate::Open
    }
}

/// Relabeling symmetry breaking for one decision point
///
/// Empty ordinary boxes are interchangeable, as are counting boxes that have
/// not started their run. Only the first candidate of each class is admitted.
/// Ordinary boxes are opened in increasing index order, so every eligible box
/// after the first empty one is empty too and the enumeration ends there.
#[derive(Clone, Copy, Debug, Default)]
pub struct EmptyBoxGuard {
    enabled: bool,
    opened: bool,
    started_run: bool,
}

impl EmptyBoxGuard {
    /// Create a guard; a disabled guard admits every candidate
    pub const fn new(enabled: bool) -> Self {
        Self {
            enabled,
            opened: false,
            started_run: false,
        }
    }

    /// Decide whether a candidate is tried at this decision point
    pub const fn admit(&mut self, candidate: Candidate) -> bool {
        match candidate {
            Candidate::Open => {
                let first = !self.opened;
                self.opened = true;
                first || !self.enabled
            }
            Candidate::StartRun => {
                let first = !self.started_run;
                self.started_run = true;
                first || !self.enabled
            }
            Candidate::Extend | Candidate::FillRun { .. } => true,
        }
    }
}
