//! Command-line interface for running a box search with progress and reports

use crate::algorithm::counting::CountingBox;
use crate::algorithm::executor::{BoxSearch, SearchConfig, SearchOutcome};
use crate::algorithm::feasibility::RecordMode;
use crate::io::configuration::{DEFAULT_BOX_COUNT, DEFAULT_STACK_MIB};
use crate::io::error::{Result, SearchError, invalid_parameter};
use crate::io::progress::SearchProgress;
use crate::io::report::SearchReport;
use crate::io::resume::ResumePrefix;
use clap::Parser;
use std::any::Any;
use std::path::PathBuf;
use tracing::Level;

#[derive(Parser, Debug)]
#[command(name = "sumfree-boxes")]
#[command(
    author,
    version,
    about = "Find the longest prefix 1..N that splits into sum-free, double-free boxes"
)]
/// Command-line arguments for the box search
// CLI tools commonly need multiple boolean flags for various features and user preferences
#[allow(clippy::struct_excessive_bools)]
pub struct Cli {
    /// Number of boxes
    #[arg(short, long, default_value_t = DEFAULT_BOX_COUNT)]
    pub boxes: usize,

    /// Largest integer considered (defaults to 3 << boxes)
    #[arg(short, long)]
    pub domain_bound: Option<usize>,

    /// Resume from a known prefix, e.g. "0,1,1,0"
    #[arg(short, long, value_name = "BOXES")]
    pub prefix: Option<String>,

    /// Record every solution as long as the current best
    #[arg(short, long)]
    pub all_ties: bool,

    /// Try every empty box instead of the first only
    #[arg(long)]
    pub no_symmetry: bool,

    /// Treat a box as a counting box, optionally bounding its run start
    #[arg(short, long, value_name = "BOX[:MIN[:MAX]]", value_parser = parse_counting_box)]
    pub counting: Vec<CountingBox>,

    /// Let started counting boxes continue as ordinary boxes
    #[arg(long)]
    pub no_subsequent_fill: bool,

    /// Known lower bound on the best prefix length
    #[arg(long, value_name = "LENGTH")]
    pub best_hint: Option<usize>,

    /// List the prefixes the search reaches at this depth instead of searching
    #[arg(long, value_name = "DEPTH", conflicts_with = "prefix")]
    pub split: Option<usize>,

    /// Write a JSON report to this path
    #[arg(short, long, value_name = "PATH")]
    pub json: Option<PathBuf>,

    /// Stack size of the search thread in MiB
    #[arg(long, default_value_t = DEFAULT_STACK_MIB)]
    pub stack_mib: usize,

    /// Suppress progress output and informational logging
    #[arg(short, long)]
    pub quiet: bool,

    /// Increase logging detail (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    /// Check if progress should be displayed
    pub const fn should_show_progress(&self) -> bool {
        !self.quiet
    }

    /// Maximum log level requested on the command line
    pub const fn log_level(&self) -> Level {
        if self.quiet {
            return Level::WARN;
        }
        match self.verbose {
            0 => Level::INFO,
            1 => Level::DEBUG,
            _ => Level::TRACE,
        }
    }

    /// Search configuration described by the arguments
    pub fn search_config(&self) -> SearchConfig {
        SearchConfig {
            domain_bound: self.domain_bound,
            record_mode: if self.all_ties {
                RecordMode::AllTies
            } else {
                RecordMode::FirstImprovement
            },
            symmetry_breaking: !self.no_symmetry,
            counting_boxes: self.counting.clone(),
            subsequent_fill: !self.no_subsequent_fill,
            initial_best: self.best_hint.unwrap_or(0),
            ..SearchConfig::new(self.boxes)
        }
    }

    /// Resume prefix given on the command line, empty when absent
    ///
    /// # Errors
    ///
    /// Returns an error if the prefix text is malformed
    pub fn resume_prefix(&self) -> Result<ResumePrefix> {
        self.prefix
            .as_deref()
            .map_or_else(|| Ok(ResumePrefix::default()), ResumePrefix::parse)
    }
}

/// Parse a `BOX`, `BOX:MIN` or `BOX:MIN:MAX` counting box argument
///
/// `MIN` may be left empty (`3::40`) to bound only the largest start.
///
/// # Errors
///
/// Returns a message if a part is not a non-negative integer or there are
/// more than three parts
pub fn parse_counting_box(text: &str) -> std::result::Result<CountingBox, String> {
    let parse = |part: &str| {
        part.trim()
            .parse::<usize>()
            .map_err(|err| format!("'{part}' is not a box index or start: {err}"))
    };

    let mut parts = text.split(':');
    let index = parse(parts.next().unwrap_or_default())?;
    let min_start = parts.next();
    let max_start = parts.next();
    if parts.next().is_some() {
        return Err(format!("'{text}' has more than BOX:MIN:MAX parts"));
    }

    let mut counting = match min_start {
        Some(min) if max_start.is_none() || !min.trim().is_empty() => {
            CountingBox::with_min_start(index, parse(min)?)
        }
        _ => CountingBox::new(index),
    };
    if let Some(max) = max_start {
        counting = counting.with_max_start(parse(max)?);
    }
    Ok(counting)
}

/// Runs a search described by the command line and reports the result
pub struct SearchRunner {
    cli: Cli,
}

impl SearchRunner {
    /// Create a runner for the given CLI arguments
    pub const fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Split when `--split` is given, otherwise search and report
    ///
    /// # Errors
    ///
    /// Returns any error of [`SearchRunner::split`] or [`SearchRunner::process`]
    pub fn execute(&self) -> Result<()> {
        match self.cli.split {
            Some(depth) => self.split(depth).map(|_| ()),
            None => self.process().map(|_| ()),
        }
    }

    /// Run the search on a dedicated thread, print the report and write JSON if requested
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration or prefix is invalid, the search
    /// thread fails, or the JSON report cannot be written
    // Allow print for the final report
    #[allow(clippy::print_stdout)]
    pub fn process(&self) -> Result<SearchReport> {
        let outcome = self.run_search()?;
        let report = SearchReport::from(&outcome);
        println!("{report}");

        if let Some(ref path) = self.cli.json {
            report.write_json(path)?;
        }

        Ok(report)
    }

    /// Print one resumable prefix per line for every branch at `depth`
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid, counting boxes are
    /// configured, or the search thread fails
    // Allow print for the prefix listing
    #[allow(clippy::print_stdout)]
    pub fn split(&self, depth: usize) -> Result<Vec<ResumePrefix>> {
        let config = self.cli.search_config();
        let branches = self.on_search_thread(move || BoxSearch::new(config)?.split(depth))?;

        let prefixes: Vec<ResumePrefix> =
            branches.into_iter().map(|branch| branch.prefix).collect();
        for prefix in &prefixes {
            println!("{prefix}");
        }
        Ok(prefixes)
    }

    fn run_search(&self) -> Result<SearchOutcome> {
        let config = self.cli.search_config();
        let prefix = self.cli.resume_prefix()?;
        let show_progress = self.cli.should_show_progress();

        self.on_search_thread(move || {
            let mut search = BoxSearch::new(config)?;
            if show_progress {
                search = search.with_progress(SearchProgress::new());
            }
            search.run_from(&prefix)
        })
    }

    fn on_search_thread<T, F>(&self, job: F) -> Result<T>
    where
        T: Send + 'static,
        F: FnOnce() -> Result<T> + Send + 'static,
    {
        let stack_size = self
            .cli
            .stack_mib
            .checked_mul(1 << 20)
            .filter(|&bytes| bytes > 0)
            .ok_or_else(|| {
                invalid_parameter(
                    "stack_mib",
                    &self.cli.stack_mib,
                    &"must be positive and fit in memory",
                )
            })?;

        // Recursion depth grows with the domain bound
        let handle = std::thread::Builder::new()
            .name("search".to_string())
            .stack_size(stack_size)
            .spawn(job)
            .map_err(|err| SearchError::SearchThread {
                reason: err.to_string(),
            })?;

        handle.join().map_err(|payload| SearchError::SearchThread {
            reason: panic_message(&*payload),
        })?
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    payload
        .downcast_ref::<&str>()
        .map(ToString::to_string)
        .or_else(|| payload.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "search thread panicked".to_string())
}
