/// Command-line parsing and the search runner
pub mod cli;
/// Search constants and defaults
pub mod configuration;
/// Error types shared across the crate
pub mod error;
/// Progress display for long searches
pub mod progress;
/// Console and JSON result reports
pub mod report;
/// Resume prefixes and their replay
pub mod resume;
