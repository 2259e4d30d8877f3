//! Client runtime configuration.
//!
//! Configuration is resolved once at process startup and then passed into the client. Nothing
//! below the binary reads environment variables while requests are in flight.
//!
//! Precedence, lowest first: built-in defaults, the optional YAML file, environment variables.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::{ClientError, ClientResult};

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8000/api";
pub const DEFAULT_ZIP_LOOKUP_URL: &str = "https://api.zippopotam.us/us";

pub const CONFIG_PATH_ENV: &str = "CTOMOP_CONFIG";
pub const API_URL_ENV: &str = "CTOMOP_API_URL";
pub const ZIP_LOOKUP_URL_ENV: &str = "CTOMOP_ZIP_LOOKUP_URL";
pub const USERNAME_ENV: &str = "CTOMOP_USERNAME";
pub const PASSWORD_ENV: &str = "CTOMOP_PASSWORD";

/// Client configuration resolved at startup.
#[derive(Clone, Debug)]
pub struct ClientConfig {
    api_base_url: String,
    zip_lookup_url: String,
    username: Option<String>,
    password: Option<String>,
}

impl ClientConfig {
    /// Create a new `ClientConfig`.
    ///
    /// Trailing slashes are stripped from both URLs.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::Config` if either URL is empty or not `http(s)`.
    pub fn new(
        api_base_url: &str,
        zip_lookup_url: &str,
        username: Option<String>,
        password: Option<String>,
    ) -> ClientResult<Self> {
        Ok(Self {
            api_base_url: validate_url("api_base_url", api_base_url)?,
            zip_lookup_url: validate_url("zip_lookup_url", zip_lookup_url)?,
            username: username.filter(|u| !u.trim().is_empty()),
            password: password.filter(|p| !p.is_empty()),
        })
    }

    pub fn api_base_url(&self) -> &str {
        &self.api_base_url
    }

    pub fn zip_lookup_url(&self) -> &str {
        &self.zip_lookup_url
    }

    /// Username and password, when both are configured.
    pub fn credentials(&self) -> Option<(&str, &str)> {
        match (&self.username, &self.password) {
            (Some(user), Some(pass)) => Some((user.as_str(), pass.as_str())),
            _ => None,
        }
    }

    /// Resolves configuration from an optional YAML file and an environment lookup.
    ///
    /// `env` is a lookup function rather than direct `std::env` access so resolution can be
    /// exercised without touching process state.
    pub fn resolve(
        config_path: Option<&Path>,
        env: impl Fn(&str) -> Option<String>,
    ) -> ClientResult<Self> {
        let file = match config_path {
            Some(path) => load_config_file(path)?,
            None => ConfigFile::default(),
        };

        let api_base_url = env(API_URL_ENV)
            .or(file.api_base_url)
            .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string());
        let zip_lookup_url = env(ZIP_LOOKUP_URL_ENV)
            .or(file.zip_lookup_url)
            .unwrap_or_else(|| DEFAULT_ZIP_LOOKUP_URL.to_string());
        let username = env(USERNAME_ENV).or(file.username);
        let password = env(PASSWORD_ENV).or(file.password);

        Self::new(&api_base_url, &zip_lookup_url, username, password)
    }

    /// Resolves configuration from the process environment.
    ///
    /// `config_override` wins over `CTOMOP_CONFIG` when both name a file.
    pub fn from_env(config_override: Option<PathBuf>) -> ClientResult<Self> {
        let lookup = |key: &str| std::env::var(key).ok().filter(|v| !v.trim().is_empty());
        let config_path = config_override.or_else(|| lookup(CONFIG_PATH_ENV).map(PathBuf::from));
        Self::resolve(config_path.as_deref(), lookup)
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            zip_lookup_url: DEFAULT_ZIP_LOOKUP_URL.to_string(),
            username: None,
            password: None,
        }
    }
}

/// On-disk configuration. Every key is optional.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConfigFile {
    pub api_base_url: Option<String>,
    pub zip_lookup_url: Option<String>,
    pub username: Option<String>,
    pub password: Option<String>,
}

/// Reads and parses a YAML configuration file.
pub fn load_config_file(path: &Path) -> ClientResult<ConfigFile> {
    let raw = std::fs::read_to_string(path).map_err(ClientError::FileRead)?;
    if raw.trim().is_empty() {
        return Ok(ConfigFile::default());
    }
    serde_yaml::from_str(&raw).map_err(ClientError::YamlDeserialization)
}

fn validate_url(name: &str, url: &str) -> ClientResult<String> {
    let url = url.trim().trim_end_matches('/');
    if url.is_empty() {
        return Err(ClientError::Config(format!("{name} cannot be empty")));
    }
    if !(url.starts_with("http://") || url.starts_with("https://")) {
        return Err(ClientError::Config(format!(
            "{name} must be an http(s) URL, got {url:?}"
        )));
    }
    Ok(url.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    fn env_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    fn yaml_file(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        file.write_all(contents.as_bytes()).expect("write yaml");
        file
    }

    #[test]
    fn test_defaults_without_file_or_env() {
        let cfg = ClientConfig::resolve(None, env_from(&[])).expect("defaults are valid");
        assert_eq!(cfg.api_base_url(), DEFAULT_API_BASE_URL);
        assert_eq!(cfg.zip_lookup_url(), DEFAULT_ZIP_LOOKUP_URL);
        assert_eq!(cfg.credentials(), None);
    }

    #[test]
    fn test_file_values_are_overridden_by_env() {
        let file = yaml_file(
            "api_base_url: https://records.example.org/api/\nusername: clinician\npassword: secret\n",
        );
        let cfg = ClientConfig::resolve(
            Some(file.path()),
            env_from(&[(API_URL_ENV, "http://127.0.0.1:9000/api")]),
        )
        .expect("valid config");

        assert_eq!(cfg.api_base_url(), "http://127.0.0.1:9000/api");
        assert_eq!(cfg.credentials(), Some(("clinician", "secret")));

        let cfg = ClientConfig::resolve(Some(file.path()), env_from(&[])).expect("valid config");
        assert_eq!(cfg.api_base_url(), "https://records.example.org/api");
    }

    #[test]
    fn test_rejects_non_http_urls() {
        let err = ClientConfig::new("ftp://example.org", DEFAULT_ZIP_LOOKUP_URL, None, None)
            .expect_err("ftp should be rejected");
        assert!(matches!(err, ClientError::Config(_)));

        let err = ClientConfig::resolve(None, env_from(&[(ZIP_LOOKUP_URL_ENV, "  ")]))
            .expect_err("blank url should be rejected");
        assert!(matches!(err, ClientError::Config(_)));
    }

    #[test]
    fn test_unknown_yaml_keys_are_rejected() {
        let file = yaml_file("api_url: http://localhost\n");
        let err = ClientConfig::resolve(Some(file.path()), env_from(&[])).expect_err("unknown key");
        assert!(matches!(err, ClientError::YamlDeserialization(_)));
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let err = load_config_file(Path::new("/nonexistent/ctomop.yaml")).expect_err("missing");
        assert!(matches!(err, ClientError::FileRead(_)));
    }

    #[test]
    fn test_empty_file_uses_defaults() {
        let file = yaml_file("");
        let cfg = ClientConfig::resolve(Some(file.path()), env_from(&[])).expect("empty file");
        assert_eq!(cfg.api_base_url(), DEFAULT_API_BASE_URL);
    }
}
