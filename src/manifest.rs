use std::path::{Path, PathBuf};
use serde_json::{json, Map, Value};
use crate::error::{ProvisionError, Result};

/// Project manifest location, relative to the project root.
pub const MANIFEST_FILE: &str = "Packages/manifest.json";

/// A registry entry handed to the host package manager.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScopedRegistry {
    pub name: String,
    pub url: String,
    pub scopes: Vec<String>,
}

/// The host package manager's scoped-registry registration operation.
pub trait ScopedRegistryHost {
    fn add_scoped_registry(&mut self, manifest: &Path, registry: &ScopedRegistry) -> Result<()>;
}

/// Registers a scoped registry with the project at `project_root`.
///
/// The manifest is only checked for existence here; editing it is up to
/// the host.
pub struct ManifestRegistrar<H> {
    project_root: PathBuf,
    host: H,
}

impl<H: ScopedRegistryHost> ManifestRegistrar<H> {
    pub fn new<P: AsRef<Path>>(project_root: P, host: H) -> Self {
        Self {
            project_root: project_root.as_ref().to_path_buf(),
            host,
        }
    }

    pub fn manifest_path(&self) -> PathBuf {
        self.project_root.join(MANIFEST_FILE)
    }

    pub fn register(&mut self, registry: &ScopedRegistry) -> Result<()> {
        let manifest = self.manifest_path();
        if !manifest.is_file() {
            return Err(ProvisionError::ManifestNotFound { path: manifest });
        }
        tracing::debug!(name = %registry.name, url = %registry.url, "registering scoped registry");
        self.host.add_scoped_registry(&manifest, registry)
    }

    pub fn host(&self) -> &H {
        &self.host
    }
}

/// Edits the `scopedRegistries` array of a Unity `manifest.json`.
///
/// An existing entry with the same name or URL is replaced.
#[derive(Debug, Default, Clone, Copy)]
pub struct UnityManifestHost;

impl ScopedRegistryHost for UnityManifestHost {
    fn add_scoped_registry(&mut self, manifest: &Path, registry: &ScopedRegistry) -> Result<()> {
        let host_err = |message: String| ProvisionError::Host {
            name: registry.name.clone(),
            message,
        };
        let content = std::fs::read_to_string(manifest)
            .map_err(|e| ProvisionError::io("read", manifest, e))?;
        let mut root: Map<String, Value> = serde_json::from_str(&content)
            .map_err(|e| host_err(format!("invalid manifest: {e}")))?;

        let entries = root
            .entry("scopedRegistries")
            .or_insert_with(|| Value::Array(Vec::new()))
            .as_array_mut()
            .ok_or_else(|| host_err("`scopedRegistries` is not an array".to_string()))?;
        entries.retain(|entry| {
            entry["name"].as_str() != Some(registry.name.as_str())
                && entry["url"].as_str() != Some(registry.url.as_str())
        });
        entries.push(json!({
            "name": registry.name,
            "url": registry.url,
            "scopes": registry.scopes,
        }));

        let mut out = serde_json::to_string_pretty(&root)
            .map_err(|e| host_err(format!("could not serialize manifest: {e}")))?;
        out.push('\n');
        std::fs::write(manifest, out).map_err(|e| ProvisionError::io("write", manifest, e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn registry() -> ScopedRegistry {
        ScopedRegistry {
            name: "Example".to_string(),
            url: "https://reg.example/".to_string(),
            scopes: vec!["com.example".to_string()],
        }
    }

    fn write_manifest(root: &Path, content: &str) -> PathBuf {
        let path = root.join(MANIFEST_FILE);
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, content).unwrap();
        path
    }

    #[derive(Default)]
    struct RecordingHost {
        calls: Vec<ScopedRegistry>,
    }

    impl ScopedRegistryHost for RecordingHost {
        fn add_scoped_registry(&mut self, _: &Path, registry: &ScopedRegistry) -> Result<()> {
            self.calls.push(registry.clone());
            Ok(())
        }
    }

    #[test]
    fn test_register_without_manifest_fails() {
        let dir = tempdir().unwrap();
        let mut registrar = ManifestRegistrar::new(dir.path(), RecordingHost::default());
        let err = registrar.register(&registry()).unwrap_err();
        assert!(matches!(err, ProvisionError::ManifestNotFound { .. }));
        assert!(registrar.host().calls.is_empty());
    }

    #[test]
    fn test_register_delegates_to_host() {
        let dir = tempdir().unwrap();
        write_manifest(dir.path(), "{}");
        let mut registrar = ManifestRegistrar::new(dir.path(), RecordingHost::default());
        registrar.register(&registry()).unwrap();
        assert_eq!(registrar.host().calls, vec![registry()]);
    }

    #[test]
    fn test_unity_host_adds_entry_and_keeps_dependencies() {
        let dir = tempdir().unwrap();
        let path = write_manifest(
            dir.path(),
            r#"{"dependencies": {"com.unity.ugui": "1.0.0"}}"#,
        );
        let mut registrar = ManifestRegistrar::new(dir.path(), UnityManifestHost);
        registrar.register(&registry()).unwrap();

        let value: Value = serde_json::from_str(&std::fs::read_to_string(path).unwrap()).unwrap();
        assert_eq!(value["dependencies"]["com.unity.ugui"], "1.0.0");
        let entries = value["scopedRegistries"].as_array().unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0]["name"], "Example");
        assert_eq!(entries[0]["url"], "https://reg.example/");
        assert_eq!(entries[0]["scopes"], json!(["com.example"]));
    }

    #[test]
    fn test_unity_host_replaces_existing_entry() {
        let dir = tempdir().unwrap();
        let path = write_manifest(
            dir.path(),
            r#"{"scopedRegistries": [
                {"name": "Example", "url": "https://old.example/", "scopes": ["com.old"]},
                {"name": "Other", "url": "https://other.example/", "scopes": ["com.other"]}
            ]}"#,
        );
        let mut host = UnityManifestHost;
        host.add_scoped_registry(&path, &registry()).unwrap();
        host.add_scoped_registry(&path, &registry()).unwrap();

        let value: Value = serde_json::from_str(&std::fs::read_to_string(path).unwrap()).unwrap();
        let entries = value["scopedRegistries"].as_array().unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0]["name"], "Other");
        assert_eq!(entries[1]["url"], "https://reg.example/");
    }

    #[test]
    fn test_unity_host_rejects_invalid_manifest() {
        let dir = tempdir().unwrap();
        let path = write_manifest(dir.path(), "not json");
        let err = UnityManifestHost.add_scoped_registry(&path, &registry()).unwrap_err();
        assert!(matches!(err, ProvisionError::Host { .. }));
    }
}
