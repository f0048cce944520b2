//! Search constants and runtime configuration defaults

// Box sets are a single machine word
/// Largest supported number of boxes
pub const MAX_BOXES: usize = 64;

// Safety limit to prevent excessive memory allocation
/// Largest accepted domain bound
pub const MAX_DOMAIN_BOUND: usize = 1 << 24;

/// Smallest value a counting run may start at
///
/// The closed form for the first value a counting box may reuse only holds
/// for starts above 4.
pub const COUNTING_MIN_START: usize = 5;

// Default values for configurable parameters
/// Number of boxes searched when none is given
pub const DEFAULT_BOX_COUNT: usize = 4;

/// Stack size of the search thread in MiB
pub const DEFAULT_STACK_MIB: usize = 256;

// Progress display settings
/// Search nodes between two progress refreshes
pub const PROGRESS_TICK_INTERVAL: u64 = 1 << 16;
