use std::path::PathBuf;
use anyhow::{anyhow, Result};
use directories::{BaseDirs, ProjectDirs};

/// The current user's home directory, looked up fresh on every call.
pub fn get_home_dir() -> Option<PathBuf> {
    BaseDirs::new().map(|dirs| dirs.home_dir().to_path_buf())
}

pub fn get_global_config_dir() -> Result<PathBuf> {
    let proj_dirs = ProjectDirs::from("org", "upm-login", "upm-login")
        .ok_or_else(|| anyhow!("Could not get project directories"))?;
    Ok(proj_dirs.config_dir().to_path_buf())
}

/// Path of the per-user `settings.toml`.
pub fn get_settings_file() -> Result<PathBuf> {
    Ok(get_global_config_dir()?.join("settings.toml"))
}
