use std::fmt;
use std::path::{Path, PathBuf};
use crate::error::Result;
use crate::invoker::LoginLauncher;
use crate::manifest::{ManifestRegistrar, ScopedRegistry, ScopedRegistryHost};
use crate::request::CredentialRequest;
use crate::settings::Settings;
use crate::store::{ConfigFileStore, STAGING_FILE, UPM_CONFIG_FILE};
use crate::token::extract_token;
use crate::upm_config::render_upm_config;

/// Where a provisioning run currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkflowState {
    Idle,
    ValidatingInput,
    StagingWritten,
    ToolRunning,
    TokenExtracted,
    ConfigWritten,
    Registered,
    Done,
    Aborted,
}

impl fmt::Display for WorkflowState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// How a run that did not fail ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProvisionOutcome {
    /// Token stored and registry added to the project manifest.
    Registered,
    /// The login tool left no token behind, usually because the user
    /// cancelled it or the login was refused.
    NoToken,
}

/// The staging request file, removed again when dropped unless already
/// removed explicitly.
struct StagingFile<'a> {
    store: &'a ConfigFileStore,
    armed: bool,
}

impl<'a> StagingFile<'a> {
    fn write(store: &'a ConfigFileStore, request: &CredentialRequest) -> Result<Self> {
        store.write_private(STAGING_FILE, &request.to_staging_json()?)?;
        Ok(Self { store, armed: true })
    }

    fn remove(mut self) -> Result<()> {
        self.armed = false;
        self.store.delete(STAGING_FILE)?;
        Ok(())
    }
}

impl Drop for StagingFile<'_> {
    fn drop(&mut self) {
        if self.armed {
            if let Err(e) = self.store.delete(STAGING_FILE) {
                tracing::warn!("could not remove staging file: {}", e);
            }
        }
    }
}

/// Runs the external login tool and turns its output into a UPM auth config
/// and a scoped registry in the project manifest.
///
/// One run at a time per user: every run uses the same files in the home
/// directory.
pub struct ProvisioningWorkflow<L, H> {
    store: ConfigFileStore,
    launcher: L,
    registrar: ManifestRegistrar<H>,
    settings: Settings,
    search_root: PathBuf,
    state: WorkflowState,
}

impl<L: LoginLauncher, H: ScopedRegistryHost> ProvisioningWorkflow<L, H> {
    pub fn new<P: AsRef<Path>>(
        store: ConfigFileStore,
        launcher: L,
        registrar: ManifestRegistrar<H>,
        settings: Settings,
        search_root: P,
    ) -> Self {
        Self {
            store,
            launcher,
            registrar,
            settings,
            search_root: search_root.as_ref().to_path_buf(),
            state: WorkflowState::Idle,
        }
    }

    pub fn state(&self) -> WorkflowState {
        self.state
    }

    pub fn registrar(&self) -> &ManifestRegistrar<H> {
        &self.registrar
    }

    pub fn launcher(&self) -> &L {
        &self.launcher
    }

    /// Runs the whole login once. Nothing is retried; on error the workflow
    /// is left in [`WorkflowState::Aborted`].
    pub fn run(&mut self, request: CredentialRequest) -> Result<ProvisionOutcome> {
        let result = self.drive(&request);
        if let Err(e) = &result {
            tracing::debug!("aborted in state {}: {}", self.state, e);
            self.state = WorkflowState::Aborted;
        }
        result
    }

    fn drive(&mut self, request: &CredentialRequest) -> Result<ProvisionOutcome> {
        enter(&mut self.state, WorkflowState::ValidatingInput);
        request.validate()?;

        let staging = StagingFile::write(&self.store, request)?;
        enter(&mut self.state, WorkflowState::StagingWritten);

        let tool = self.launcher.locate(&self.settings.tool_name, &self.search_root)?;
        enter(&mut self.state, WorkflowState::ToolRunning);
        let exit = self.launcher.run(&tool)?;
        tracing::info!(code = ?exit.code, success = exit.success(), "login tool exited");

        staging.remove()?;
        let token = extract_token(&self.store, &self.settings.host_fragment)?;
        enter(&mut self.state, WorkflowState::TokenExtracted);
        if token.is_empty() {
            tracing::info!("no token for {} in .npmrc", self.settings.host_fragment);
            enter(&mut self.state, WorkflowState::Done);
            return Ok(ProvisionOutcome::NoToken);
        }

        let config = render_upm_config(request.registry_url(), &token, request.email());
        self.store.write_all(UPM_CONFIG_FILE, &config)?;
        enter(&mut self.state, WorkflowState::ConfigWritten);

        let registry = ScopedRegistry {
            url: request.registry_url().to_string(),
            ..self.settings.scoped_registry()
        };
        self.registrar.register(&registry)?;
        enter(&mut self.state, WorkflowState::Registered);
        Ok(ProvisionOutcome::Registered)
    }
}

fn enter(state: &mut WorkflowState, next: WorkflowState) {
    tracing::debug!("{} -> {}", state, next);
    *state = next;
}
