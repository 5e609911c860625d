//! CLI command implementations.

pub mod harvest;
pub mod probe;

pub use harvest::HarvestCommand;
pub use probe::ProbeCommand;
