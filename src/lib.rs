//! Exhaustive branch-and-bound search for sum-free, double-free box partitions
//!
//! The integers 1, 2, 3, ... are placed one at a time into a fixed number of
//! boxes. An integer may not enter a box if it equals the sum of a nonempty
//! subset of that box's current contents, or if its half is already there.
//! The search finds the longest prefix 1..N that can be placed and a witness
//! assignment for it.

#![forbid(unsafe_code)]

/// Search engine: domain bitsets, propagation, bounding, symmetry and the driver
pub mod algorithm;
/// Command line, configuration constants, resume input, reports and errors
pub mod io;

pub use io::error::{Result, SearchError};
