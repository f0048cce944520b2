use crate::{
    algorithm::bitset::BoxSet,
    algorithm::counting::{
        CountingBox, RunClearance, counting_mask, restrict_initial, run_clearance, start_run,
    },
    algorithm::feasibility::{Incumbent, Record, RecordMode, lookahead_feasible},
    algorithm::propagation::{apply_placement, fill_run},
    algorithm::selection::{Candidate, EmptyBoxGuard, classify},
    algorithm::state::SearchState,
    io::configuration::{MAX_BOXES, MAX_DOMAIN_BOUND, PROGRESS_TICK_INTERVAL},
    io::error::{Result, invalid_parameter},
    io::progress::SearchProgress,
    io::resume::ResumePrefix,
};
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

/// Search parameters for one run
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SearchConfig {
    /// Number of boxes
    pub box_count: usize,
    /// Largest integer considered; `3 << box_count` when absent
    pub domain_bound: Option<usize>,
    /// Whether ties with the current best are recorded
    pub record_mode: RecordMode,
    /// Whether interchangeable empty boxes are tried only once
    pub symmetry_breaking: bool,
    /// Boxes filled by counting runs
    pub counting_boxes: Vec<CountingBox>,
    /// Whether started counting boxes keep taking whole blocks
    pub subsequent_fill: bool,
    /// Known lower bound on the best prefix length
    pub initial_best: usize,
}

impl SearchConfig {
    /// Plain search over `box_count` boxes with every default
    pub const fn new(box_count: usize) -> Self {
        Self {
            box_count,
            domain_bound: None,
            record_mode: RecordMode::FirstImprovement,
            symmetry_breaking: true,
            counting_boxes: Vec::new(),
            subsequent_fill: true,
            initial_best: 0,
        }
    }

    /// Domain bound in effect, explicit or derived from the box count
    ///
    /// # Errors
    ///
    /// Returns an error if the default bound overflows or the bound is out of range
    pub fn resolved_domain_bound(&self) -> Result<usize> {
        let bound = match self.domain_bound {
            Some(bound) => bound,
            None => default_domain_bound(self.box_count).ok_or_else(|| {
                invalid_parameter(
                    "domain_bound",
                    &format!("3 << {}", self.box_count),
                    &"default bound overflows",
                )
            })?,
        };

        if bound == 0 {
            return Err(invalid_parameter(
                "domain_bound",
                &bound,
                &"must be positive",
            ));
        }
        if bound > MAX_DOMAIN_BOUND {
            return Err(invalid_parameter(
                "domain_bound",
                &bound,
                &format!("exceeds maximum {MAX_DOMAIN_BOUND}"),
            ));
        }
        Ok(bound)
    }

    /// Check every parameter; returns the resolved domain bound
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The box count is zero or above [`MAX_BOXES`]
    /// - The domain bound is zero, overflows, or exceeds [`MAX_DOMAIN_BOUND`]
    /// - The initial best is not below the domain bound
    /// - A counting box is out of range or listed twice
    /// - Explicit counting thresholds decrease in index order
    /// - A counting box's largest start is below its smallest start
    /// - No ordinary box remains
    pub fn validate(&self) -> Result<usize> {
        if self.box_count == 0 || self.box_count > MAX_BOXES {
            return Err(invalid_parameter(
                "box_count",
                &self.box_count,
                &format!("must be between 1 and {MAX_BOXES}"),
            ));
        }

        let bound = self.resolved_domain_bound()?;

        if self.initial_best >= bound {
            return Err(invalid_parameter(
                "initial_best",
                &self.initial_best,
                &format!("must be below the domain bound {bound}"),
            ));
        }

        self.validate_counting()?;
        Ok(bound)
    }

    fn validate_counting(&self) -> Result<()> {
        let mut seen = BoxSet::empty();
        for counting in &self.counting_boxes {
            if counting.index >= self.box_count {
                return Err(invalid_parameter(
                    "counting_boxes",
                    &counting.index,
                    &format!("box index must be below {}", self.box_count),
                ));
            }
            if seen.contains(counting.index) {
                return Err(invalid_parameter(
                    "counting_boxes",
                    &counting.index,
                    &"box listed twice",
                ));
            }
            if let (Some(min_start), Some(max_start)) = (counting.min_start, counting.max_start)
                && max_start < min_start
            {
                return Err(invalid_parameter(
                    "counting_boxes",
                    &format!("{}:{min_start}:{max_start}", counting.index),
                    &"largest start is below the smallest start",
                ));
            }
            seen.insert(counting.index);
        }

        if seen.count() >= self.box_count {
            return Err(invalid_parameter(
                "counting_boxes",
                &seen,
                &"at least one ordinary box is required",
            ));
        }

        let mut ordered = self.counting_boxes.clone();
        ordered.sort_by_key(|counting| counting.index);
        let mut threshold = 0;
        for counting in &ordered {
            if let Some(min_start) = counting.min_start {
                if min_start < threshold {
                    return Err(invalid_parameter(
                        "counting_boxes",
                        &format!("{}:{min_start}", counting.index),
                        &format!("threshold below the previous counting box's {threshold}"),
                    ));
                }
                threshold = min_start;
            }
        }

        Ok(())
    }
}

/// Default domain bound `3 << box_count`, `None` on overflow
pub fn default_domain_bound(box_count: usize) -> Option<usize> {
    let shift = u32::try_from(box_count).ok()?;
    1_usize.checked_shl(shift)?.checked_mul(3)
}

/// Counters gathered while searching
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Calls of the recursive step
    pub nodes: u64,
    /// Branches cut by the lookahead bound
    pub pruned: u64,
    /// Depths where the next integer had no eligible box
    pub dead_ends: u64,
    /// Counting runs started, per box
    pub run_starts: Vec<u64>,
    /// Subsequent counting blocks placed
    pub run_fills: u64,
}

/// Result of a completed search
#[derive(Clone, Debug)]
pub struct SearchOutcome {
    /// Longest certified prefix length
    pub best: usize,
    /// Every record in discovery order
    pub records: Vec<Record>,
    /// Whether some branch reached past the domain bound
    pub domain_exceeded: bool,
    /// Whether the result relies on counting-run assumptions
    pub assumption_based: bool,
    /// Wall time of the search
    pub elapsed: Duration,
    /// Search counters
    pub stats: SearchStats,
    /// Number of boxes
    pub box_count: usize,
    /// Domain bound used
    pub domain_bound: usize,
}

impl SearchOutcome {
    /// Latest record reaching the best length
    ///
    /// `None` when the search found nothing beyond an initial best hint.
    pub fn witness(&self) -> Option<&Record> {
        self.records
            .iter()
            .rev()
            .find(|record| record.length == self.best)
    }

    /// Whether `best` is exact: no branch was cut short by the domain bound
    pub const fn is_certified(&self) -> bool {
        !self.domain_exceeded
    }
}

/// A partial assignment reached by the search at a fixed depth
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Branch {
    /// Boxes of `1..=depth`, resumable with [`BoxSearch::run_from`]
    pub prefix: ResumePrefix,
    /// Search state at that point, as the search holds it
    pub state: SearchState,
}

/// Depth-first branch-and-bound search over box assignments
///
/// Each integer `n` is tried in every eligible box in increasing index order.
/// Branches that cannot reach past the incumbent are cut by the lookahead,
/// and integers with no eligible box end a branch as a candidate record.
pub struct BoxSearch {
    config: SearchConfig,
    domain_bound: usize,
    counting: BoxSet,
    incumbent: Incumbent,
    assignment: Vec<usize>,
    stats: SearchStats,
    domain_exceeded: bool,
    progress: Option<SearchProgress>,
    frontier: Option<Frontier>,
}

struct Frontier {
    depth: usize,
    branches: Vec<Branch>,
}

impl BoxSearch {
    /// Create a search from a validated configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration fails [`SearchConfig::validate`]
    pub fn new(config: SearchConfig) -> Result<Self> {
        let domain_bound = config.validate()?;
        let counting = counting_mask(&config.counting_boxes);
        let incumbent = Incumbent::new(config.record_mode, config.box_count, config.initial_best);
        let stats = SearchStats {
            run_starts: vec![0; config.box_count],
            ..SearchStats::default()
        };

        Ok(Self {
            domain_bound,
            counting,
            incumbent,
            assignment: Vec::with_capacity(domain_bound + 1),
            stats,
            domain_exceeded: false,
            progress: None,
            frontier: None,
            config,
        })
    }

    /// Report progress while searching
    #[must_use]
    pub fn with_progress(mut self, progress: SearchProgress) -> Self {
        self.progress = Some(progress);
        self
    }

    /// Resolved domain bound
    pub const fn domain_bound(&self) -> usize {
        self.domain_bound
    }

    /// State before any integer is placed, with counting thresholds applied
    pub fn initial_state(&self) -> SearchState {
        let mut state = SearchState::new(self.config.box_count, self.domain_bound);
        restrict_initial(&mut state, &self.config.counting_boxes);
        state
    }

    /// State after replaying a resume prefix
    ///
    /// # Errors
    ///
    /// Returns an error if counting boxes are configured or the prefix fails
    /// to replay
    pub fn resume(&self, prefix: &ResumePrefix) -> Result<SearchState> {
        if !self.config.counting_boxes.is_empty() && !prefix.is_empty() {
            return Err(invalid_parameter(
                "prefix",
                prefix,
                &"resuming is not supported together with counting boxes",
            ));
        }
        prefix.replay(&self.initial_state())
    }

    /// Search from the empty assignment
    pub fn run(self) -> SearchOutcome {
        let state = self.initial_state();
        self.search(state, &[])
    }

    /// Enumerate the branches the search reaches at `depth`, in search order
    ///
    /// Each branch is an independent subproblem: running every prefix with
    /// [`BoxSearch::run_from`] covers the whole search. A branch that dead-ends
    /// before `depth` is listed with its shorter prefix. Nothing is recorded
    /// while splitting, so only an initial best hint cuts branches.
    ///
    /// # Errors
    ///
    /// Returns an error if counting boxes are configured or `depth` exceeds
    /// the domain bound
    pub fn split(mut self, depth: usize) -> Result<Vec<Branch>> {
        if !self.config.counting_boxes.is_empty() {
            return Err(invalid_parameter(
                "split",
                &depth,
                &"splitting is not supported together with counting boxes",
            ));
        }
        if depth > self.domain_bound {
            return Err(invalid_parameter(
                "split",
                &depth,
                &format!("exceeds the domain bound {}", self.domain_bound),
            ));
        }

        self.frontier = Some(Frontier {
            depth,
            branches: Vec::new(),
        });
        let state = self.initial_state();
        self.step(state, 1);

        let branches = self
            .frontier
            .map(|frontier| frontier.branches)
            .unwrap_or_default();
        info!(depth, branches = branches.len(), "Split search");
        Ok(branches)
    }

    /// Search every completion of a resume prefix
    ///
    /// # Errors
    ///
    /// Returns an error if the prefix cannot be resumed
    pub fn run_from(self, prefix: &ResumePrefix) -> Result<SearchOutcome> {
        let state = self.resume(prefix)?;
        Ok(self.search(state, prefix.boxes()))
    }

    fn search(mut self, state: SearchState, prefix: &[usize]) -> SearchOutcome {
        let start = Instant::now();
        info!(
            boxes = self.config.box_count,
            domain_bound = self.domain_bound,
            counting = %self.counting,
            prefix = prefix.len(),
            "Starting search"
        );

        self.assignment.extend_from_slice(prefix);
        self.step(state, prefix.len() + 1);

        if let Some(ref progress) = self.progress {
            progress.finish();
        }

        let elapsed = start.elapsed();
        info!(
            best = self.incumbent.best(),
            nodes = self.stats.nodes,
            elapsed_ms = elapsed.as_millis(),
            "Search finished"
        );

        SearchOutcome {
            best: self.incumbent.best(),
            records: self.incumbent.into_records(),
            domain_exceeded: self.domain_exceeded,
            assumption_based: !self.config.counting_boxes.is_empty(),
            elapsed,
            stats: self.stats,
            box_count: self.config.box_count,
            domain_bound: self.domain_bound,
        }
    }

    /// Explore every completion of the current assignment, which places `1..n`
    fn step(&mut self, mut state: SearchState, n: usize) {
        self.stats.nodes += 1;
        self.tick();

        if !lookahead_feasible(&state, n, self.incumbent.horizon()) {
            self.stats.pruned += 1;
            return;
        }

        if let Some(ref mut frontier) = self.frontier
            && (n > frontier.depth || state.eligible(n).is_empty())
        {
            frontier.branches.push(Branch {
                prefix: ResumePrefix::new(self.assignment.clone()),
                state,
            });
            return;
        }

        if n > self.domain_bound {
            self.flag_overrun(n);
            return;
        }

        if state.eligible(n).is_empty() {
            self.stats.dead_ends += 1;
            if let Some(record) = self.incumbent.offer(n - 1, &self.assignment) {
                info!(length = record.length, witness = %record, "New record");
                if let Some(ref progress) = self.progress {
                    progress.record(record);
                }
            }
            return;
        }

        let mut guard = EmptyBoxGuard::new(self.config.symmetry_breaking);
        while let Some(box_index) = state.eligible(n).first() {
            let candidate = classify(
                &state,
                box_index,
                self.counting,
                self.config.subsequent_fill,
            );
            if guard.admit(candidate) {
                self.descend(&state, n, box_index, candidate);
            }
            state.exclude(n, box_index);
        }
    }

    fn descend(&mut self, state: &SearchState, n: usize, box_index: usize, candidate: Candidate) {
        match candidate {
            Candidate::Extend | Candidate::Open => {
                let next = apply_placement(state, n, box_index);
                self.assignment.push(box_index);
                self.step(next, n + 1);
                self.assignment.pop();
            }
            Candidate::StartRun => {
                // A ceiling is checked only after symmetry admission
                if !self.allows_start(box_index, n) {
                    return;
                }
                let next = start_run(state, n, box_index);
                debug!(start = n, box_index, "Committed counting run");
                if let Some(count) = self.stats.run_starts.get_mut(box_index) {
                    *count += 1;
                }
                self.assignment.resize(2 * n - 1, box_index);
                self.step(next, 2 * n);
                self.assignment.truncate(n - 1);
            }
            Candidate::FillRun { len } => match run_clearance(state, n, len, box_index) {
                RunClearance::Clear => {
                    let next = fill_run(state, n, len, box_index);
                    self.stats.run_fills += 1;
                    self.assignment.resize(n + len - 1, box_index);
                    self.step(next, n + len);
                    self.assignment.truncate(n - 1);
                }
                RunClearance::Overrun => self.flag_overrun(n + len - 1),
                RunClearance::Blocked => {}
            },
        }
    }

    fn allows_start(&self, box_index: usize, start: usize) -> bool {
        self.config
            .counting_boxes
            .iter()
            .filter(|counting| counting.index == box_index)
            .all(|counting| counting.allows_start(start))
    }

    fn flag_overrun(&mut self, n: usize) {
        if !self.domain_exceeded {
            warn!(
                value = n,
                domain_bound = self.domain_bound,
                "Search reached past the domain bound; the result is a lower bound"
            );
        }
        self.domain_exceeded = true;
    }

    fn tick(&self) {
        if let Some(ref progress) = self.progress
            && self.stats.nodes.is_multiple_of(PROGRESS_TICK_INTERVAL)
        {
            progress.tick(self.stats.nodes, self.incumbent.best());
        }
    }
}
