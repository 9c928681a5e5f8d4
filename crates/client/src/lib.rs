//! Async client for the OpenSentinel AI platform.
//!
//! ```rust,ignore
//! use opensentinel_client::{ChatRequest, PlatformClient};
//! use opensentinel_config::ClientConfig;
//!
//! let config = ClientConfig::from_env()
//!     .with_url("https://app.opensentinel.ai")
//!     .with_app_name("DocGen-AI")
//!     .with_app_type("legal-documents");
//! let client = PlatformClient::new(config)?;
//! client.register().await?;
//! let reply = client.chat(&ChatRequest::new("Summarize this contract")).await?;
//! ```
//!
//! Every operation except [`PlatformClient::register`] and
//! [`PlatformClient::is_available`] needs a credential, either issued by
//! `register()` or supplied through the configuration.

pub mod client;
pub mod requests;

pub use client::PlatformClient;
pub use opensentinel_config::ClientConfig;
pub use opensentinel_core::{
    AgentType, ChatResult, Error, MemoryType, NotifyChannel, Priority, Result,
};
pub use requests::{AgentTask, ChatRequest, MemoryQuery, MemoryRecord, Notification};

/// Build a client that degrades to empty results instead of failing.
///
/// Fallback mode is forced on whatever the configuration says; misuse such
/// as a missing credential is still reported as an error.
pub fn create_client(config: ClientConfig) -> Result<PlatformClient> {
    PlatformClient::new(config.with_fallback(true))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_client_forces_fallback() {
        let client = create_client(ClientConfig::default()).unwrap();
        assert!(client.config().fallback);
    }
}
