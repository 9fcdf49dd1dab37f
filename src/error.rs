use std::path::PathBuf;
use thiserror::Error;

/// Everything that can end a provisioning run early.
///
/// A login that simply produced no token is not an error, see
/// [`ProvisionOutcome::NoToken`](crate::workflow::ProvisionOutcome::NoToken).
#[derive(Debug, Error)]
pub enum ProvisionError {
    /// A required request field was left empty.
    #[error("{field} is empty")]
    Validation { field: &'static str },

    #[error("could not {action} '{}'", path.display())]
    Io {
        action: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{name} executable not found under '{}'", root.display())]
    ToolNotFound { name: String, root: PathBuf },

    #[error("failed to launch '{}'", path.display())]
    Launch {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The rc line for our host had no `key=value` shape.
    #[error("malformed line in '{}': {line}", path.display())]
    MalformedRcLine { path: PathBuf, line: String },

    #[error("manifest file not found at '{}'", path.display())]
    ManifestNotFound { path: PathBuf },

    #[error("could not register scoped registry '{name}': {message}")]
    Host { name: String, message: String },

    #[error("could not serialize login request")]
    Serialize(#[from] serde_json::Error),

    #[error("could not determine the user's home directory")]
    NoHomeDir,
}

impl ProvisionError {
    pub(crate) fn io(action: &'static str, path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ProvisionError::Io {
            action,
            path: path.into(),
            source,
        }
    }
}

pub type Result<T, E = ProvisionError> = std::result::Result<T, E>;
