use crate::error::{ProvisionError, Result};
use crate::store::{ConfigFileStore, NPMRC_FILE};

/// Pulls the auth token for `host` out of the user's `.npmrc`.
///
/// A missing rc file means the login never completed and yields an empty
/// string, as does an rc file with no line mentioning `host`.
pub fn extract_token(store: &ConfigFileStore, host: &str) -> Result<String> {
    if !store.exists(NPMRC_FILE) {
        tracing::debug!("no {} present", NPMRC_FILE);
        return Ok(String::new());
    }
    let lines = store.read_all_lines(NPMRC_FILE)?;
    token_from_lines(&lines, host).map_err(|line| ProvisionError::MalformedRcLine {
        path: store.path(NPMRC_FILE).unwrap_or_default(),
        line,
    })
}

/// Only the first line containing `host` is considered. Quote characters are
/// removed from its value; nothing else is trimmed.
///
/// Returns the offending line if it has no `=`.
pub fn token_from_lines<S: AsRef<str>>(lines: &[S], host: &str) -> std::result::Result<String, String> {
    let Some(line) = lines.iter().map(|l| l.as_ref()).find(|l| l.contains(host)) else {
        return Ok(String::new());
    };
    match line.split_once('=') {
        Some((_, value)) => Ok(value.replace('"', "")),
        None => Err(line.to_string()),
    }
}
