use std::path::PathBuf;
use clap::{Parser, Subcommand};

#[derive(Debug, Parser, Clone)]
#[clap(author, version, about, long_about = None)]
pub struct CLI {
    /// Print debug diagnostics to stderr
    #[clap(short, long, global = true)]
    pub(crate) verbose: bool,
    /// Use this directory in place of the user's home directory
    #[clap(long, global = true)]
    pub(crate) home: Option<PathBuf>,
    /// Unity project root holding `Packages/manifest.json`. Defaults to the current directory
    #[clap(long, global = true)]
    pub(crate) project: Option<PathBuf>,
    /// Settings file. Defaults to `settings.toml` in the user config directory
    #[clap(long, global = true)]
    pub(crate) settings: Option<PathBuf>,
    #[command(subcommand)]
    pub(crate) command: UpmLoginCommand,
}

#[derive(Debug, Subcommand, Clone, PartialEq)]
pub enum UpmLoginCommand {
    /// Runs the external login tool, then writes `.upmconfig.toml` and registers the
    /// scoped registry in the project manifest
    Login {
        #[clap(long)]
        username: String,
        #[clap(long, env = "UPM_LOGIN_PASSWORD", hide_env_values = true)]
        password: String,
        #[clap(long)]
        email: String,
        /// Directory searched for the login executable. Defaults to the project root
        #[clap(long)]
        search_root: Option<PathBuf>,
    },
    /// Deletes the cached credentials (`.npmrc` and `.upmconfig.toml`)
    Logout,
    /// Output the login executable that `login` would run
    Which {
        #[clap(long)]
        search_root: Option<PathBuf>,
    },
    /// Show which credential files and which project manifest exist
    Status,
    /// Writes a default `settings.toml`
    Init {
        /// Overwrite an existing settings file
        #[clap(long)]
        force: bool,
    },
}
