//! Command orchestration.
pub mod update;

pub use update::Outcome;
