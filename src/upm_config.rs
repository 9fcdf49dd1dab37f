/// Renders the whole of `.upmconfig.toml` for one registry.
///
/// Any other registry already configured in that file is dropped when this
/// is written.
pub fn render_upm_config(registry_url: &str, token: &str, email: &str) -> String {
    format!(
        "[npmAuth.\"{registry_url}\"]\n\
         token = \"{token}\"\n\
         email = \"{email}\"\n\
         alwaysAuth = true"
    )
}
