//! # upm-login Core Library
//!
//! This crate provisions Unity Package Manager credentials for a private npm registry.
//! It drives an external, interactive `npm-login` tool, picks the issued token out of
//! `~/.npmrc`, writes `~/.upmconfig.toml` and adds the registry as a scoped registry to
//! the project's `Packages/manifest.json`.
//!
//! This library is built for the `upm-login` CLI, but the workflow is generic over the
//! login launcher and the manifest host so it can be embedded elsewhere.
//!
//! ## Modules Overview
//! - [`request`] – The credentials of one login run and the staging JSON
//! - [`store`] – Home-directory file access and credential cleanup
//! - [`invoker`] – Locating and running the external login executable
//! - [`token`] – Extracting the registry token from `.npmrc`
//! - [`upm_config`] – Rendering `.upmconfig.toml`
//! - [`manifest`] – Scoped-registry registration with the project manifest
//! - [`workflow`] – The provisioning state machine tying it all together
//! - [`settings`] – Registry constants and their `settings.toml` overrides
//! - [`global`] – Per-user directories (home, config)


pub mod error;
pub mod request;
pub mod store;
pub mod invoker;
pub mod token;
pub mod upm_config;
pub mod manifest;
pub mod workflow;
pub mod settings;
pub mod global;

pub use error::*;
pub use request::*;
pub use store::*;
pub use invoker::*;
pub use token::*;
pub use upm_config::*;
pub use manifest::*;
pub use workflow::*;
pub use settings::*;
