//! # brokkr-core
//!
//! Core library for the brokkr provisioning stack providing:
//! - Error taxonomy shared by every workspace crate
//! - Repository identifiers
//! - Key/value settings store (token persistence)
//! - Platform directory resolution

pub mod error;
pub mod paths;
pub mod settings;
pub mod types;

pub use error::{ApiError, Error, ErrorKind, Result};
pub use settings::{FileSettingsStore, SettingsStore};
pub use types::RepoRef;
