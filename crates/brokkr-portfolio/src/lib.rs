//! # brokkr-portfolio
//!
//! Locally persisted showcase records, each linked to exactly one remote
//! repository. At most one entry exists per `source_link`; the structured
//! `(repo_owner, repo_name)` pair is stored alongside the link so lookups
//! never pattern-match URL substrings.

pub mod entry;
pub mod store;

pub use entry::{EntryPatch, LocalizedText, NewPortfolioEntry, PortfolioEntry};
pub use store::{JsonPortfolioStore, PortfolioStore, UpsertOutcome};
