use serde::Serialize;
use crate::error::{ProvisionError, Result};

/// The credentials a single login run works with.
///
/// Serialized as-is into the staging file read by the external login tool,
/// which expects PascalCase keys.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct CredentialRequest {
    #[serde(rename = "Username")]
    username: String,
    #[serde(rename = "Password")]
    password: String,
    #[serde(rename = "Email")]
    email: String,
    #[serde(rename = "RegistryURL")]
    registry_url: String,
}

impl CredentialRequest {
    pub fn new(
        username: impl Into<String>,
        password: impl Into<String>,
        email: impl Into<String>,
        registry_url: impl Into<String>,
    ) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
            email: email.into(),
            registry_url: registry_url.into(),
        }
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn registry_url(&self) -> &str {
        &self.registry_url
    }

    /// Fails on the first empty field.
    pub fn validate(&self) -> Result<()> {
        let fields = [
            ("username", &self.username),
            ("password", &self.password),
            ("email", &self.email),
            ("registry URL", &self.registry_url),
        ];
        for (field, value) in fields {
            if value.is_empty() {
                return Err(ProvisionError::Validation { field });
            }
        }
        Ok(())
    }

    /// Pretty JSON for the staging file.
    pub fn to_staging_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
