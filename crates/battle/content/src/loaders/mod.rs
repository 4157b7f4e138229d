//! Content loaders for reading battle data from files.
//!
//! This module provides loaders that convert RON/TOML files into battle-core
//! types. [`ContentFactory`] ties them to a data directory.

pub mod config;
pub mod factory;
pub mod master;
pub mod party;

pub use config::ConfigLoader;
pub use factory::ContentFactory;
pub use master::MasterDataLoader;
pub use party::{PartyLoader, PartyMemberSpec};

use std::path::Path;

use serde::de::DeserializeOwned;

/// Common result type for loaders.
pub type LoadResult<T> = anyhow::Result<T>;

/// Helper function to read file contents.
pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read file {}: {}", path.display(), e))
}

/// Reads and parses a RON file; `what` names the content in errors.
pub(crate) fn read_ron<T: DeserializeOwned>(path: &Path, what: &str) -> LoadResult<T> {
    let content = read_file(path)?;
    ron::from_str(&content)
        .map_err(|e| anyhow::anyhow!("Failed to parse {} RON at {}: {}", what, path.display(), e))
}
