//! Spinner showing the incumbent and node count of a running search

use crate::algorithm::feasibility::Record;
use indicatif::{ProgressBar, ProgressStyle};
use std::sync::LazyLock;
use std::time::Duration;

static SPINNER_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::default_spinner()
        .template("{spinner:.cyan} [{elapsed_precise}] {prefix} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_spinner())
});

/// Live progress display for one search
pub struct SearchProgress {
    bar: ProgressBar,
}

impl Default for SearchProgress {
    fn default() -> Self {
        Self::new()
    }
}

impl SearchProgress {
    /// Create a visible spinner on stderr
    pub fn new() -> Self {
        let bar = ProgressBar::new_spinner();
        bar.set_style(SPINNER_STYLE.clone());
        bar.enable_steady_tick(Duration::from_millis(120));
        bar.set_prefix("best 0");
        Self { bar }
    }

    /// Create a progress tracker that draws nothing
    pub fn hidden() -> Self {
        Self {
            bar: ProgressBar::hidden(),
        }
    }

    /// Refresh the node count and current best
    pub fn tick(&self, nodes: u64, best: usize) {
        self.bar.set_prefix(format!("best {best}"));
        self.bar.set_message(format!("{nodes} nodes"));
    }

    /// Show a freshly emitted record
    pub fn record(&self, record: &Record) {
        self.bar.set_prefix(format!("best {}", record.length));
        self.bar.println(format!("{}: {record}", record.length));
    }

    /// Remove the spinner from the terminal
    pub fn finish(&self) {
        self.bar.finish_and_clear();
    }
}
