use crate::algorithm::state::SearchState;
use serde::Serialize;
use std::fmt;

/// How the incumbent reacts to solutions as long as the current best
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordMode {
    /// Record only strictly longer prefixes
    #[default]
    FirstImprovement,
    /// Record every prefix at least as long as the current best
    AllTies,
}

impl RecordMode {
    /// Last integer the lookahead must find placeable for a branch to survive
    ///
    /// Reaching `best + 1` is required to improve; reaching `best` suffices
    /// when ties are wanted.
    pub const fn lookahead_horizon(self, best: usize) -> usize {
        match self {
            Self::FirstImprovement => best + 1,
            Self::AllTies => best,
        }
    }

    /// Whether a dead end after `length` placed integers is a record
    pub const fn accepts(self, length: usize, best: usize) -> bool {
        match self {
            Self::FirstImprovement => length > best,
            Self::AllTies => length >= best,
        }
    }
}

/// Cheap necessary condition for a branch at depth `n` to reach `horizon`
///
/// Fails as soon as some integer in `(n, horizon]` has no eligible box left.
/// Integers beyond the domain bound are not inspected.
pub fn lookahead_feasible(state: &SearchState, n: usize, horizon: usize) -> bool {
    let last = horizon.min(state.domain_bound());
    ((n + 1)..=last).all(|i| !state.eligible(i).is_empty())
}

/// A certified feasible prefix with its witnessing assignment
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Record {
    /// Number of integers placed, `1..=length`
    pub length: usize,
    /// Box of each integer; entry `i` holds the box of `i + 1`
    pub assignment: Vec<usize>,
    /// Number of boxes the assignment ranges over
    pub box_count: usize,
}

impl Record {
    /// Members of each box in increasing order
    pub fn groups(&self) -> Vec<Vec<usize>> {
        let mut groups = vec![Vec::new(); self.box_count];
        for (offset, &box_index) in self.assignment.iter().take(self.length).enumerate() {
            if let Some(group) = groups.get_mut(box_index) {
                group.push(offset + 1);
            }
        }
        groups
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rendered: Vec<String> = self
            .groups()
            .iter()
            .map(|group| {
                let members: Vec<String> = group.iter().map(ToString::to_string).collect();
                format!("[{}]", members.join(","))
            })
            .collect();
        write!(f, "[{}]", rendered.join(", "))
    }
}

/// Longest prefix found so far, owned by the search controller
#[derive(Debug)]
pub struct Incumbent {
    best: usize,
    mode: RecordMode,
    box_count: usize,
    records: Vec<Record>,
}

impl Incumbent {
    /// Start from a known lower bound (0 when nothing is known)
    pub const fn new(mode: RecordMode, box_count: usize, initial_best: usize) -> Self {
        Self {
            best: initial_best,
            mode,
            box_count,
            records: Vec::new(),
        }
    }

    /// Current best prefix length
    pub const fn best(&self) -> usize {
        self.best
    }

    /// Lookahead horizon for the current best
    pub const fn horizon(&self) -> usize {
        self.mode.lookahead_horizon(self.best)
    }

    /// Offer a dead end after `length` integers; returns the record if accepted
    pub fn offer(&mut self, length: usize, assignment: &[usize]) -> Option<&Record> {
        if !self.mode.accepts(length, self.best) {
            return None;
        }

        self.best = length;
        self.records.push(Record {
            length,
            assignment: assignment.iter().take(length).copied().collect(),
            box_count: self.box_count,
        });
        self.records.last()
    }

    /// Consume the incumbent, keeping its records
    pub fn into_records(self) -> Vec<Record> {
        self.records
    }
}
