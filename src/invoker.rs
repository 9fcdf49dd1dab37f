use std::path::{Path, PathBuf};
use std::process::Command;
use walkdir::WalkDir;
use crate::error::{ProvisionError, Result};

/// How the external login tool exited.
///
/// The workflow does not act on the code; it only gets logged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExitOutcome {
    pub code: Option<i32>,
}

impl ExitOutcome {
    pub fn success(&self) -> bool {
        self.code == Some(0)
    }
}

/// Finds and runs the external login executable.
pub trait LoginLauncher {
    fn locate(&self, name: &str, search_root: &Path) -> Result<PathBuf>;
    fn run(&self, path: &Path) -> Result<ExitOutcome>;
}

/// Launches the real login tool as a child process sharing our terminal.
#[derive(Debug, Default, Clone, Copy)]
pub struct ExternalLoginInvoker;

impl LoginLauncher for ExternalLoginInvoker {
    fn locate(&self, name: &str, search_root: &Path) -> Result<PathBuf> {
        find_login_executable(name, search_root)?.ok_or_else(|| ProvisionError::ToolNotFound {
            name: name.to_string(),
            root: search_root.to_path_buf(),
        })
    }

    /// Blocks until the tool exits. There is no timeout: the tool may be
    /// waiting on the user.
    fn run(&self, path: &Path) -> Result<ExitOutcome> {
        let status = Command::new(path)
            .status()
            .map_err(|e| ProvisionError::Launch {
                path: path.to_path_buf(),
                source: e,
            })?;
        Ok(ExitOutcome {
            code: status.code(),
        })
    }
}

/// Walks `root` and returns the first executable whose file name contains
/// `name`.
///
/// Walk order is whatever the platform's directory listing yields, so with
/// several candidates the pick is not stable between machines.
pub fn find_login_executable(name: &str, root: &Path) -> Result<Option<PathBuf>> {
    for entry in WalkDir::new(root).follow_links(true) {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                tracing::warn!("skipping {}: {}", e.path().unwrap_or(root).display(), e);
                continue;
            }
        };
        let path = entry.path();
        if !entry.file_type().is_file() {
            continue;
        }
        let matches_name = path
            .file_name()
            .map(|f| f.to_string_lossy().contains(name))
            .unwrap_or(false);
        if matches_name && is_executable(path) {
            tracing::info!("using login executable {}", path.display());
            return Ok(Some(path.to_path_buf()));
        }
    }
    Ok(None)
}

/// Checks if a given path is an executable file on Unix.
#[cfg(unix)]
fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;
    std::fs::metadata(path)
        .map(|meta| meta.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}
/// Checks if a given path has a Windows executable extension (.exe, .bat, .cmd).
#[cfg(windows)]
fn is_executable(path: &Path) -> bool {
    if let Some(ext) = path.extension().and_then(|ext| ext.to_str()) {
        let ext = ext.to_ascii_lowercase();
        matches!(ext.as_str(), "exe" | "bat" | "cmd")
    } else {
        false
    }
}
