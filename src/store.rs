use std::path::{Path, PathBuf};
use crate::error::{ProvisionError, Result};
use crate::global::utils::get_home_dir;

/// Staging request read by the external login tool.
pub const STAGING_FILE: &str = "npm-login.json";
/// Credentials written by the external login tool.
pub const NPMRC_FILE: &str = ".npmrc";
/// Auth config read by the Unity Package Manager.
pub const UPM_CONFIG_FILE: &str = ".upmconfig.toml";

/// File access rooted at the user's home directory.
///
/// Unless a root is pinned, the home directory is resolved again on every
/// call.
#[derive(Debug, Clone, Default)]
pub struct ConfigFileStore {
    root: Option<PathBuf>,
}

impl ConfigFileStore {
    pub fn new() -> Self {
        Self { root: None }
    }

    /// A store that resolves every name against `root` instead of `$HOME`.
    pub fn with_root<P: AsRef<Path>>(root: P) -> Self {
        Self {
            root: Some(root.as_ref().to_path_buf()),
        }
    }

    pub fn path(&self, name: &str) -> Result<PathBuf> {
        let root = match &self.root {
            Some(root) => root.clone(),
            None => get_home_dir().ok_or(ProvisionError::NoHomeDir)?,
        };
        Ok(root.join(name))
    }

    pub fn exists(&self, name: &str) -> bool {
        self.path(name).map(|p| p.is_file()).unwrap_or(false)
    }

    pub fn read_all_lines(&self, name: &str) -> Result<Vec<String>> {
        let path = self.path(name)?;
        let content = std::fs::read_to_string(&path)
            .map_err(|e| ProvisionError::io("read", &path, e))?;
        Ok(content.lines().map(str::to_string).collect())
    }

    /// Replaces the whole file.
    pub fn write_all(&self, name: &str, content: &str) -> Result<()> {
        let path = self.path(name)?;
        std::fs::write(&path, content).map_err(|e| ProvisionError::io("write", &path, e))
    }

    /// Like [`write_all`](Self::write_all), but readable by the owner only on Unix.
    pub fn write_private(&self, name: &str, content: &str) -> Result<()> {
        let path = self.path(name)?;
        write_owner_only(&path, content).map_err(|e| ProvisionError::io("write", &path, e))
    }

    /// Returns whether a file was actually removed.
    pub fn delete(&self, name: &str) -> Result<bool> {
        let path = self.path(name)?;
        match std::fs::remove_file(&path) {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(ProvisionError::io("delete", &path, e)),
        }
    }
}

#[cfg(unix)]
fn write_owner_only(path: &Path, content: &str) -> std::io::Result<()> {
    use std::io::Write;
    use std::os::unix::fs::{OpenOptionsExt, PermissionsExt};
    let mut file = std::fs::OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .mode(0o600)
        .open(path)?;
    // mode only applies on create
    file.set_permissions(std::fs::Permissions::from_mode(0o600))?;
    file.write_all(content.as_bytes())
}

#[cfg(not(unix))]
fn write_owner_only(path: &Path, content: &str) -> std::io::Result<()> {
    std::fs::write(path, content)
}

/// Deletes `.npmrc` and `.upmconfig.toml`, returning the files that existed.
pub fn delete_credential_files(store: &ConfigFileStore) -> Result<Vec<&'static str>> {
    let mut deleted = Vec::new();
    for name in [NPMRC_FILE, UPM_CONFIG_FILE] {
        if store.delete(name)? {
            tracing::info!("deleted {}", name);
            deleted.push(name);
        }
    }
    Ok(deleted)
}
