/// Box sets and value bitsets backing the search state
pub mod bitset;
/// Counting-run accelerator for boxes filled by known-safe runs
pub mod counting;
/// Recursive search driver and its configuration
pub mod executor;
/// Lookahead bounding and incumbent bookkeeping
pub mod feasibility;
/// Placement propagation over eligibility sets and subset-sum closures
pub mod propagation;
/// Candidate classification and symmetry breaking
pub mod selection;
/// Per-branch search state
pub mod state;
