//! Configuration loading, validation, and management for the OpenSentinel client.
//!
//! Values are layered, lowest priority first:
//! 1. built-in defaults
//! 2. `~/.opensentinel/config.toml` (optional)
//! 3. `OPENSENTINEL_*` environment variables
//! 4. explicit `with_*` overrides from the caller

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Environment variable holding the platform URL.
pub const ENV_URL: &str = "OPENSENTINEL_URL";
/// Environment variable holding the application name.
pub const ENV_APP_NAME: &str = "OPENSENTINEL_APP_NAME";
/// Environment variable holding the application type.
pub const ENV_APP_TYPE: &str = "OPENSENTINEL_APP_TYPE";
/// Environment variable holding a pre-issued API key.
pub const ENV_API_KEY: &str = "OPENSENTINEL_API_KEY";

/// Client configuration.
///
/// Maps directly to `~/.opensentinel/config.toml`.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Platform base URL, without the `/api/sdk` suffix
    #[serde(default = "default_url")]
    pub url: String,

    /// Name this application registers under
    #[serde(default = "default_app_name")]
    pub app_name: String,

    /// Free-form application category (e.g. "legal-documents")
    #[serde(default = "default_app_type")]
    pub app_type: String,

    /// Credential issued by `register()`; may be supplied up front
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    /// Where the platform should deliver callbacks for this application
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub callback_url: Option<String>,

    /// Per-request timeout for platform operations
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Turn remote and transport failures into empty results
    #[serde(default)]
    pub fallback: bool,

    /// Verify TLS certificates and hostnames. Off by default, the platform
    /// is commonly deployed behind self-signed certificates.
    #[serde(default)]
    pub verify_tls: bool,
}

fn default_url() -> String {
    "http://localhost:8030".into()
}
fn default_app_name() -> String {
    "Unknown App".into()
}
fn default_app_type() -> String {
    "generic".into()
}
fn default_timeout_secs() -> u64 {
    30
}

impl std::fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientConfig")
            .field("url", &self.url)
            .field("app_name", &self.app_name)
            .field("app_type", &self.app_type)
            .field(
                "api_key",
                &match self.api_key {
                    Some(_) => "[REDACTED]",
                    None => "None",
                },
            )
            .field("callback_url", &self.callback_url)
            .field("timeout_secs", &self.timeout_secs)
            .field("fallback", &self.fallback)
            .field("verify_tls", &self.verify_tls)
            .finish()
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            url: default_url(),
            app_name: default_app_name(),
            app_type: default_app_type(),
            api_key: None,
            callback_url: None,
            timeout_secs: default_timeout_secs(),
            fallback: false,
            verify_tls: false,
        }
    }
}

impl ClientConfig {
    /// Load configuration from the default path (~/.opensentinel/config.toml),
    /// then apply environment overrides.
    pub fn load() -> Result<Self, ConfigError> {
        let config_path = Self::config_dir().join("config.toml");
        let config = Self::load_from(&config_path)?.with_env();
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a specific file path.
    ///
    /// A missing file is not an error; defaults are returned instead.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            tracing::debug!("No config file found at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        let mut config: Self = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        config.url = normalize_url(&config.url);

        config.validate()?;
        Ok(config)
    }

    /// Defaults overlaid with the `OPENSENTINEL_*` environment variables.
    pub fn from_env() -> Self {
        Self::default().with_env()
    }

    /// Overlay the `OPENSENTINEL_*` environment variables.
    pub fn with_env(self) -> Self {
        self.with_lookup(|key| std::env::var(key).ok())
    }

    /// Overlay values from an arbitrary key lookup.
    ///
    /// Same keys as the environment layer; empty values count as unset.
    pub fn with_lookup<F>(self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = self;
        if let Some(url) = lookup(ENV_URL) {
            config = config.with_url(url);
        }
        if let Some(name) = lookup(ENV_APP_NAME) {
            config = config.with_app_name(name);
        }
        if let Some(kind) = lookup(ENV_APP_TYPE) {
            config = config.with_app_type(kind);
        }
        if let Some(key) = lookup(ENV_API_KEY) {
            config = config.with_api_key(key);
        }
        config
    }

    /// Override the platform URL. Trailing slashes are stripped.
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        let url = url.into();
        if !url.is_empty() {
            self.url = normalize_url(&url);
        }
        self
    }

    pub fn with_app_name(mut self, name: impl Into<String>) -> Self {
        let name = name.into();
        if !name.is_empty() {
            self.app_name = name;
        }
        self
    }

    pub fn with_app_type(mut self, app_type: impl Into<String>) -> Self {
        let app_type = app_type.into();
        if !app_type.is_empty() {
            self.app_type = app_type;
        }
        self
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        let api_key = api_key.into();
        if !api_key.is_empty() {
            self.api_key = Some(api_key);
        }
        self
    }

    pub fn with_callback_url(mut self, callback_url: impl Into<String>) -> Self {
        let callback_url = callback_url.into();
        if !callback_url.is_empty() {
            self.callback_url = Some(callback_url);
        }
        self
    }

    pub fn with_timeout(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }

    pub fn with_fallback(mut self, fallback: bool) -> Self {
        self.fallback = fallback;
        self
    }

    /// Turn TLS certificate and hostname verification on or off.
    pub fn with_tls_verification(mut self, verify: bool) -> Self {
        self.verify_tls = verify;
        self
    }

    /// The platform URL with any trailing slash removed.
    pub fn base_url(&self) -> &str {
        self.url.trim_end_matches('/')
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.url.starts_with("http://") && !self.url.starts_with("https://") {
            return Err(ConfigError::ValidationError(format!(
                "url must start with http:// or https:// (got '{}')",
                self.url
            )));
        }

        if self.timeout_secs == 0 {
            return Err(ConfigError::ValidationError(
                "timeout_secs must be greater than 0".into(),
            ));
        }

        Ok(())
    }

    /// Get the configuration directory path.
    pub fn config_dir() -> PathBuf {
        dirs_home().join(".opensentinel")
    }

    /// Generate a default config TOML string (for the `init` command).
    pub fn default_toml() -> String {
        toml::to_string_pretty(&Self::default()).unwrap_or_default()
    }
}

fn normalize_url(url: &str) -> String {
    url.trim_end_matches('/').to_string()
}

/// Get the user's home directory.
fn dirs_home() -> PathBuf {
    #[cfg(target_os = "windows")]
    {
        std::env::var("USERPROFILE")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("C:\\Users\\Default"))
    }
    #[cfg(not(target_os = "windows"))]
    {
        std::env::var("HOME")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("/tmp"))
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {path}: {reason}")]
    ReadError { path: PathBuf, reason: String },

    #[error("Failed to parse config file at {path}: {reason}")]
    ParseError { path: PathBuf, reason: String },

    #[error("Configuration validation failed: {0}")]
    ValidationError(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn default_config_is_valid() {
        let config = ClientConfig::default();
        assert_eq!(config.url, "http://localhost:8030");
        assert_eq!(config.app_name, "Unknown App");
        assert_eq!(config.app_type, "generic");
        assert_eq!(config.timeout_secs, 30);
        assert!(config.api_key.is_none());
        assert!(!config.fallback);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn environment_overrides_defaults() {
        let config = ClientConfig::default().with_lookup(lookup_from(&[
            (ENV_URL, "https://app.opensentinel.ai/"),
            (ENV_APP_NAME, "DocGen-AI"),
            (ENV_APP_TYPE, "legal-documents"),
            (ENV_API_KEY, "osk_live_123"),
        ]));
        assert_eq!(config.url, "https://app.opensentinel.ai");
        assert_eq!(config.app_name, "DocGen-AI");
        assert_eq!(config.app_type, "legal-documents");
        assert_eq!(config.api_key.as_deref(), Some("osk_live_123"));
    }

    #[test]
    fn explicit_arguments_override_environment() {
        let config = ClientConfig::default()
            .with_lookup(lookup_from(&[(ENV_URL, "http://env:1"), (ENV_APP_NAME, "EnvApp")]))
            .with_url("http://explicit:2")
            .with_app_name("");
        assert_eq!(config.url, "http://explicit:2");
        // An empty explicit value falls through to the environment value
        assert_eq!(config.app_name, "EnvApp");
    }

    #[test]
    fn empty_environment_values_are_ignored() {
        let config = ClientConfig::default()
            .with_lookup(lookup_from(&[(ENV_URL, ""), (ENV_API_KEY, "")]));
        assert_eq!(config.url, "http://localhost:8030");
        assert!(config.api_key.is_none());
    }

    #[test]
    fn trailing_slashes_are_stripped() {
        let config = ClientConfig::default().with_url("http://x//");
        assert_eq!(config.url, "http://x");

        let raw = ClientConfig {
            url: "http://y/".into(),
            ..ClientConfig::default()
        };
        assert_eq!(raw.base_url(), "http://y");
    }

    #[test]
    fn constructor_only_settings() {
        let config = ClientConfig::default()
            .with_callback_url("https://docgen.example/hooks")
            .with_timeout(5)
            .with_fallback(true)
            .with_tls_verification(true);
        assert_eq!(
            config.callback_url.as_deref(),
            Some("https://docgen.example/hooks")
        );
        assert_eq!(config.timeout_secs, 5);
        assert!(config.fallback);
        assert!(config.verify_tls);
    }

    #[test]
    fn invalid_url_rejected() {
        let config = ClientConfig::default().with_url("localhost:8030");
        assert!(matches!(
            config.validate(),
            Err(ConfigError::ValidationError(_))
        ));
    }

    #[test]
    fn zero_timeout_rejected() {
        let config = ClientConfig::default().with_timeout(0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn debug_redacts_api_key() {
        let config = ClientConfig::default().with_api_key("osk_secret_value");
        let debug = format!("{config:?}");
        assert!(!debug.contains("osk_secret_value"));
        assert!(debug.contains("[REDACTED]"));
    }

    #[test]
    fn missing_config_file_returns_defaults() {
        let config = ClientConfig::load_from(Path::new("/nonexistent/config.toml")).unwrap();
        assert_eq!(config, ClientConfig::default());
    }

    #[test]
    fn config_file_is_parsed_and_normalized() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            r#"
url = "https://sentinel.internal/"
app_name = "Ledger"
timeout_secs = 10
fallback = true
"#,
        )
        .unwrap();

        let config = ClientConfig::load_from(&path).unwrap();
        assert_eq!(config.url, "https://sentinel.internal");
        assert_eq!(config.app_name, "Ledger");
        assert_eq!(config.app_type, "generic");
        assert_eq!(config.timeout_secs, 10);
        assert!(config.fallback);
    }

    #[test]
    fn malformed_config_file_is_a_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "timeout_secs = \"soon\"").unwrap();

        let err = ClientConfig::load_from(&path).unwrap_err();
        assert!(matches!(err, ConfigError::ParseError { .. }));
    }

    #[test]
    fn config_file_failing_validation_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "timeout_secs = 0").unwrap();

        assert!(matches!(
            ClientConfig::load_from(&path),
            Err(ConfigError::ValidationError(_))
        ));
    }

    #[test]
    fn default_toml_roundtrips() {
        let toml_str = ClientConfig::default_toml();
        assert!(toml_str.contains("localhost:8030"));
        assert!(!toml_str.contains("api_key"));
        let parsed: ClientConfig = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed, ClientConfig::default());
    }
}
