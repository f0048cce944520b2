//! Console and JSON summaries of a finished search

use crate::algorithm::executor::SearchOutcome;
use crate::algorithm::feasibility::Record;
use crate::io::error::{Result, file_system_error};
use serde::Serialize;
use std::fmt;
use std::path::Path;

/// Serializable summary of a search outcome
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SearchReport {
    /// Number of boxes
    pub box_count: usize,
    /// Domain bound used
    pub domain_bound: usize,
    /// Longest prefix length found
    pub best: usize,
    /// Members of each box in the witness, if the search produced one
    pub witness: Option<Vec<Vec<usize>>>,
    /// Number of records emitted
    pub records: usize,
    /// Wall time in milliseconds
    pub elapsed_ms: u128,
    /// Recursive steps taken
    pub nodes: u64,
    /// Counting runs started, per box
    pub run_starts: Vec<u64>,
    /// Whether some branch reached past the domain bound
    pub domain_exceeded: bool,
    /// Whether the result relies on counting-run assumptions
    pub assumption_based: bool,
}

impl From<&SearchOutcome> for SearchReport {
    fn from(outcome: &SearchOutcome) -> Self {
        Self {
            box_count: outcome.box_count,
            domain_bound: outcome.domain_bound,
            best: outcome.best,
            witness: outcome.witness().map(Record::groups),
            records: outcome.records.len(),
            elapsed_ms: outcome.elapsed.as_millis(),
            nodes: outcome.stats.nodes,
            run_starts: outcome.stats.run_starts.clone(),
            domain_exceeded: outcome.domain_exceeded,
            assumption_based: outcome.assumption_based,
        }
    }
}

impl SearchReport {
    /// Pretty-printed JSON form
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Write the JSON form to a file
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the file write fails
    pub fn write_json(&self, path: &Path) -> Result<()> {
        let json = self.to_json()?;
        std::fs::write(path, json).map_err(|source| file_system_error(path, "write report", source))
    }
}

impl fmt::Display for SearchReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "boxes: {}, domain bound: {}",
            self.box_count, self.domain_bound
        )?;
        writeln!(f, "best: {}", self.best)?;
        if let Some(ref witness) = self.witness {
            for (index, members) in witness.iter().enumerate() {
                let rendered: Vec<String> = members.iter().map(ToString::to_string).collect();
                writeln!(f, "  box {index}: {}", rendered.join(" "))?;
            }
        }
        writeln!(
            f,
            "records: {}, nodes: {}, elapsed: {} ms",
            self.records, self.nodes, self.elapsed_ms
        )?;
        if self.run_starts.iter().any(|&count| count > 0) {
            let rendered: Vec<String> = self.run_starts.iter().map(ToString::to_string).collect();
            writeln!(f, "run starts: {}", rendered.join(" "))?;
        }
        if self.domain_exceeded {
            writeln!(f, "warning: domain bound exceeded, best is only a lower bound")?;
        }
        if self.assumption_based {
            writeln!(f, "note: result assumes counting boxes are filled by runs")?;
        }
        Ok(())
    }
}
