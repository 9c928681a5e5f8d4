//! Subcommand implementations and the connection flags they share.

pub mod agent;
pub mod chat;
pub mod health;
pub mod init;
pub mod memory;
pub mod notify;
pub mod register;
pub mod status;
pub mod tools;

use clap::Args;
use opensentinel_client::PlatformClient;
use opensentinel_config::{ClientConfig, ConfigError};
use serde_json::Value;
use std::path::PathBuf;

/// Connection flags accepted by every subcommand.
///
/// Flags win over `OPENSENTINEL_*` environment variables, which win over
/// the config file.
#[derive(Args, Debug, Clone, Default)]
pub struct ConnectionArgs {
    /// Platform URL [default: http://localhost:8030]
    #[arg(long, global = true)]
    pub url: Option<String>,

    /// Application name used at registration
    #[arg(long, global = true)]
    pub app_name: Option<String>,

    /// Application type used at registration
    #[arg(long, global = true)]
    pub app_type: Option<String>,

    /// API key issued by `register`
    #[arg(long, global = true)]
    pub api_key: Option<String>,

    /// Callback URL sent at registration
    #[arg(long, global = true)]
    pub callback_url: Option<String>,

    /// Request timeout in seconds
    #[arg(long, global = true)]
    pub timeout: Option<u64>,

    /// Print empty results instead of failing on platform errors
    #[arg(long, global = true)]
    pub fallback: bool,

    /// Verify TLS certificates
    #[arg(long, global = true)]
    pub verify_tls: bool,

    /// Config file [default: ~/.opensentinel/config.toml]
    #[arg(long, global = true, env = "OPENSENTINEL_CONFIG")]
    pub config: Option<PathBuf>,
}

impl ConnectionArgs {
    pub fn config_path(&self) -> PathBuf {
        self.config
            .clone()
            .unwrap_or_else(|| ClientConfig::config_dir().join("config.toml"))
    }

    /// Layer file, environment and flags into one configuration.
    pub fn resolve(&self) -> Result<ClientConfig, ConfigError> {
        self.apply(ClientConfig::load_from(&self.config_path())?.with_env())
    }

    /// Apply the explicit flags on top of `base` and validate the result.
    fn apply(&self, base: ClientConfig) -> Result<ClientConfig, ConfigError> {
        let mut config = base;
        if let Some(url) = &self.url {
            config = config.with_url(url);
        }
        if let Some(name) = &self.app_name {
            config = config.with_app_name(name);
        }
        if let Some(app_type) = &self.app_type {
            config = config.with_app_type(app_type);
        }
        if let Some(key) = &self.api_key {
            config = config.with_api_key(key);
        }
        if let Some(callback) = &self.callback_url {
            config = config.with_callback_url(callback);
        }
        if let Some(timeout) = self.timeout {
            config = config.with_timeout(timeout);
        }
        if self.fallback {
            config = config.with_fallback(true);
        }
        if self.verify_tls {
            config = config.with_tls_verification(true);
        }

        config.validate()?;
        Ok(config)
    }

    /// Build a client from the resolved configuration.
    pub fn connect(&self) -> Result<PlatformClient, Box<dyn std::error::Error>> {
        let config = self
            .resolve()
            .map_err(|e| format!("Failed to load config: {e}"))?;
        tracing::debug!(?config, "Resolved client configuration");
        Ok(PlatformClient::new(config)?)
    }
}

/// Parse a command-line argument as JSON.
pub fn parse_json(raw: &str) -> Result<Value, String> {
    serde_json::from_str(raw).map_err(|e| format!("invalid JSON: {e}"))
}

/// Print a platform response, or a placeholder when there was none.
pub fn print_response(value: Option<&Value>) -> Result<(), Box<dyn std::error::Error>> {
    match value {
        Some(value) => println!("{}", serde_json::to_string_pretty(value)?),
        None => println!("(no response)"),
    }
    Ok(())
}
