//! Platform directory resolution

use crate::error::{Error, Result};
use camino::Utf8PathBuf;
use directories::ProjectDirs;

/// Resolve the brokkr data directory (created on first use).
///
/// Settings, the portfolio store, and the default projects root all live
/// under this directory.
pub fn data_dir() -> Result<Utf8PathBuf> {
    let dirs = ProjectDirs::from("es", "thisisrober", "brokkr")
        .ok_or_else(|| Error::unexpected("Failed to resolve platform data directory"))?;

    let dir = Utf8PathBuf::from_path_buf(dirs.data_dir().to_path_buf())
        .map_err(|p| Error::unexpected(format!("Data directory is not UTF-8: {}", p.display())))?;

    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}

/// Default root for local preview deployments
pub fn default_projects_dir() -> Result<Utf8PathBuf> {
    Ok(data_dir()?.join("projects"))
}
