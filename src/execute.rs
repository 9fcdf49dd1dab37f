use std::path::Path;
use anyhow::{bail, Context, Result};
use colored::Colorize;
use upm_login::global::utils::get_settings_file;
use upm_login::invoker::{find_login_executable, ExternalLoginInvoker};
use upm_login::manifest::{ManifestRegistrar, UnityManifestHost, MANIFEST_FILE};
use upm_login::request::CredentialRequest;
use upm_login::settings::Settings;
use upm_login::store::{delete_credential_files, ConfigFileStore, NPMRC_FILE, STAGING_FILE, UPM_CONFIG_FILE};
use upm_login::token::extract_token;
use upm_login::workflow::{ProvisionOutcome, ProvisioningWorkflow};
use crate::cli::{UpmLoginCommand, CLI};

pub fn execute(cli: CLI) -> Result<()> {
    let store = match &cli.home {
        Some(home) => ConfigFileStore::with_root(home),
        None => ConfigFileStore::new(),
    };
    let project_root = match &cli.project {
        Some(project) => project.clone(),
        None => std::env::current_dir()?,
    };
    let settings_path = match &cli.settings {
        Some(path) => path.clone(),
        None => get_settings_file()?,
    };
    match cli.command {
        UpmLoginCommand::Init { force } => {
            execute_init(&settings_path, force)
        }
        UpmLoginCommand::Login { username, password, email, search_root } => {
            let settings = Settings::load_or_default(&settings_path)?;
            let request = CredentialRequest::new(username, password, email, &settings.registry_url);
            let search_root = search_root.unwrap_or_else(|| project_root.clone());
            execute_login(request, store, settings, &project_root, &search_root)
        }
        UpmLoginCommand::Logout => {
            execute_logout(&store)
        }
        UpmLoginCommand::Which { search_root } => {
            let settings = Settings::load_or_default(&settings_path)?;
            let search_root = search_root.unwrap_or_else(|| project_root.clone());
            execute_which(&settings, &search_root)
        }
        UpmLoginCommand::Status => {
            let settings = Settings::load_or_default(&settings_path)?;
            execute_status(&store, &settings, &project_root)
        }
    }
}

pub fn execute_login(
    request: CredentialRequest,
    store: ConfigFileStore,
    settings: Settings,
    project_root: &Path,
    search_root: &Path,
) -> Result<()> {
    let registry_url = request.registry_url().to_string();
    let username = request.username().to_string();
    let registrar = ManifestRegistrar::new(project_root, UnityManifestHost);
    let mut workflow = ProvisioningWorkflow::new(
        store,
        ExternalLoginInvoker,
        registrar,
        settings,
        search_root,
    );
    match workflow.run(request)? {
        ProvisionOutcome::Registered => {
            println!("{} as {} to {}", "Logged in".green(), username, registry_url);
            println!("Registry added to {}", project_root.join(MANIFEST_FILE).display());
        }
        ProvisionOutcome::NoToken => {
            println!("{}", "Login was not completed, no token found in .npmrc".yellow());
        }
    }
    Ok(())
}

pub fn execute_logout(store: &ConfigFileStore) -> Result<()> {
    let deleted = delete_credential_files(store)?;
    if deleted.is_empty() {
        println!("No cached credentials found");
        return Ok(());
    }
    for name in deleted {
        println!("Successfully deleted {} file", name);
    }
    Ok(())
}

pub fn execute_which(settings: &Settings, search_root: &Path) -> Result<()> {
    match find_login_executable(&settings.tool_name, search_root)? {
        Some(path) => {
            println!("Found login executable at: {}", path.display());
        }
        None => {
            println!("No {} executable found under {}", settings.tool_name, search_root.display());
        }
    }
    Ok(())
}

pub fn execute_status(store: &ConfigFileStore, settings: &Settings, project_root: &Path) -> Result<()> {
    for name in [NPMRC_FILE, UPM_CONFIG_FILE, STAGING_FILE] {
        let path = store.path(name)?;
        println!("{}: {}", path.display(), presence(path.is_file()));
    }
    let manifest = project_root.join(MANIFEST_FILE);
    println!("{}: {}", manifest.display(), presence(manifest.is_file()));

    match extract_token(store, &settings.host_fragment) {
        Ok(token) if !token.is_empty() => {
            println!("   token for {}: {}", settings.host_fragment, "present".green());
        }
        Ok(_) => {
            println!("   token for {}: {}", settings.host_fragment, "missing".yellow());
        }
        Err(e) => {
            println!("   token for {}: {} ({})", settings.host_fragment, "unreadable".red(), e);
        }
    }
    Ok(())
}

pub fn execute_init(settings_path: &Path, force: bool) -> Result<()> {
    if settings_path.exists() && !force {
        bail!("{} already exists. Use `--force` to overwrite it.", settings_path.display());
    }
    Settings::default()
        .save(settings_path)
        .with_context(|| format!("Could not write {}", settings_path.display()))?;
    println!("Wrote default settings to {}", settings_path.display());
    Ok(())
}

fn presence(found: bool) -> colored::ColoredString {
    match found {
        true => "found".green(),
        false => "not found".dimmed(),
    }
}
