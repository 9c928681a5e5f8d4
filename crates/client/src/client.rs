//! OpenSentinel platform client.
//!
//! Talks to the platform's SDK API under `{url}/api/sdk`:
//! - `register()` is unauthenticated and stores the issued credential
//! - every other operation sends `Authorization: Bearer <key>`
//! - `is_available()` checks `{url}/health` and never fails
//!
//! Failures come back as [`Error`]. With `fallback` enabled, remote and
//! transport failures become the operation's empty result instead.

use opensentinel_config::ClientConfig;
use opensentinel_core::{ChatResult, Error, Result};
use reqwest::header::CONTENT_TYPE;
use reqwest::{Method, StatusCode};
use serde::Serialize;
use serde_json::{Value, json};
use std::time::Duration;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

use crate::requests::{AgentTask, ChatRequest, MemoryQuery, MemoryRecord, Notification};

const API_PREFIX: &str = "/api/sdk";
const HEALTH_TIMEOUT: Duration = Duration::from_secs(5);
const USER_AGENT: &str = concat!("opensentinel-rs/", env!("CARGO_PKG_VERSION"));

/// Credential state, written by `register()`.
#[derive(Debug, Default)]
struct Registration {
    api_key: Option<String>,
    app_id: Option<String>,
}

/// Client for one application talking to one OpenSentinel platform.
pub struct PlatformClient {
    config: ClientConfig,
    /// `{url}/api/sdk`
    api_base: String,
    client: reqwest::Client,
    registration: RwLock<Registration>,
}

impl std::fmt::Debug for PlatformClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PlatformClient")
            .field("config", &self.config)
            .field("api_base", &self.api_base)
            .finish_non_exhaustive()
    }
}

impl PlatformClient {
    /// Create a client from a configuration.
    ///
    /// An `api_key` in the configuration counts as already registered.
    pub fn new(config: ClientConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(USER_AGENT)
            .danger_accept_invalid_certs(!config.verify_tls)
            .build()
            .map_err(|e| Error::Configuration {
                message: format!("Failed to create HTTP client: {e}"),
            })?;

        let api_base = format!("{}{API_PREFIX}", config.base_url());
        let registration = Registration {
            api_key: config.api_key.clone(),
            app_id: None,
        };

        Ok(Self {
            config,
            api_base,
            client,
            registration: RwLock::new(registration),
        })
    }

    /// Create a client from defaults and `OPENSENTINEL_*` environment variables.
    pub fn from_env() -> Result<Self> {
        Self::new(ClientConfig::from_env())
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Full URL of an SDK endpoint.
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}{path}", self.api_base)
    }

    /// URL checked by [`is_available`](Self::is_available).
    pub fn health_url(&self) -> String {
        format!("{}/health", self.config.base_url())
    }

    /// The credential currently in use, if any.
    pub async fn api_key(&self) -> Option<String> {
        self.registration.read().await.api_key.clone()
    }

    /// The application id assigned by the last successful `register()`.
    pub async fn app_id(&self) -> Option<String> {
        self.registration.read().await.app_id.clone()
    }

    pub async fn is_registered(&self) -> bool {
        self.registration.read().await.api_key.is_some()
    }

    /// Register this application and store the credential it is issued.
    ///
    /// Returns the raw registration response, or `{}` when the platform
    /// returned nothing (including failures swallowed by fallback mode),
    /// in which case the stored credential is left untouched.
    pub async fn register(&self) -> Result<Value> {
        let body = json!({
            "name": self.config.app_name,
            "type": self.config.app_type,
            "callbackUrl": self.config.callback_url,
        });

        let result = self
            .request(Method::POST, "/register", Some(&body), true)
            .await?;
        let Some(result) = non_empty(result) else {
            return Ok(json!({}));
        };

        let mut registration = self.registration.write().await;
        registration.api_key = result["apiKey"].as_str().map(str::to_string);
        registration.app_id = match &result["id"] {
            Value::Null => None,
            Value::String(id) => Some(id.clone()),
            other => Some(other.to_string()),
        };

        info!(
            app = %self.config.app_name,
            app_id = registration.app_id.as_deref().unwrap_or("-"),
            "Registered with OpenSentinel"
        );

        Ok(result)
    }

    /// Send a message to the platform's assistant.
    ///
    /// `None` means the platform returned nothing usable: anything other
    /// than a non-empty JSON object.
    pub async fn chat(&self, request: &ChatRequest) -> Result<Option<ChatResult>> {
        match self.request(Method::POST, "/chat", Some(request), false).await? {
            Some(Value::Object(reply)) if !reply.is_empty() => {
                Ok(Some(ChatResult::from_response(&Value::Object(reply))))
            }
            Some(other) => {
                debug!(kind = json_kind(&other), "Chat returned a non-object response");
                Ok(None)
            }
            None => Ok(None),
        }
    }

    /// Send a notification through one of the platform's channels.
    pub async fn notify(&self, notification: &Notification) -> Result<Option<Value>> {
        self.request(Method::POST, "/notify", Some(notification), false)
            .await
    }

    /// Store a memory.
    pub async fn store_memory(&self, record: &MemoryRecord) -> Result<Option<Value>> {
        self.request(Method::POST, "/memory", Some(record), false)
            .await
    }

    /// Search stored memories.
    ///
    /// Anything other than a JSON array in response yields an empty list.
    pub async fn search_memory(&self, query: &MemoryQuery) -> Result<Vec<Value>> {
        match self
            .request(Method::POST, "/memory/search", Some(query), false)
            .await?
        {
            Some(Value::Array(memories)) => Ok(memories),
            Some(other) => {
                debug!(kind = json_kind(&other), "Memory search returned a non-array response");
                Ok(Vec::new())
            }
            None => Ok(Vec::new()),
        }
    }

    /// List the tools the platform can execute.
    ///
    /// Falls back to `{"tools": [], "count": 0}` when the platform returns nothing.
    pub async fn list_tools(&self) -> Result<Value> {
        let result = self
            .request::<Value>(Method::GET, "/tools", None, false)
            .await?;
        Ok(non_empty(result).unwrap_or_else(|| json!({"tools": [], "count": 0})))
    }

    /// Execute a platform tool with the given input.
    pub async fn execute_tool(&self, tool: &str, input: Value) -> Result<Option<Value>> {
        let body = json!({
            "tool": tool,
            "input": input,
        });
        self.request(Method::POST, "/tools/execute", Some(&body), false)
            .await
    }

    /// Spawn a sub-agent on the platform.
    pub async fn spawn_agent(&self, task: &AgentTask) -> Result<Option<Value>> {
        self.request(Method::POST, "/agent/spawn", Some(task), false)
            .await
    }

    /// Platform status as seen by this application.
    pub async fn status(&self) -> Result<Option<Value>> {
        self.request::<Value>(Method::GET, "/status", None, false)
            .await
    }

    /// Whether the platform answers its health check with `200 OK`.
    ///
    /// Uses a fixed 5 second timeout and no credential. Any failure is `false`.
    pub async fn is_available(&self) -> bool {
        match self
            .client
            .get(self.health_url())
            .timeout(HEALTH_TIMEOUT)
            .send()
            .await
        {
            Ok(response) => {
                let status = response.status();
                debug!(status = status.as_u16(), "OpenSentinel health check");
                status == StatusCode::OK
            }
            Err(e) => {
                debug!(error = %e, "OpenSentinel health check failed");
                false
            }
        }
    }

    /// Issue one request, applying fallback mode to the outcome.
    ///
    /// `Ok(None)` means either a `null` body or a failure swallowed by
    /// fallback mode.
    async fn request<B: Serialize + ?Sized>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
        skip_auth: bool,
    ) -> Result<Option<Value>> {
        match self.send(method, path, body, skip_auth).await {
            Ok(Value::Null) => Ok(None),
            Ok(value) => Ok(Some(value)),
            Err(e) if self.config.fallback && e.is_recoverable() => {
                warn!(path, error = %e, "OpenSentinel request failed, using fallback");
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }

    async fn send<B: Serialize + ?Sized>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
        skip_auth: bool,
    ) -> Result<Value> {
        let url = self.endpoint(path);

        let mut request = self
            .client
            .request(method.clone(), &url)
            .header(CONTENT_TYPE, "application/json");

        if !skip_auth {
            let api_key = self
                .registration
                .read()
                .await
                .api_key
                .clone()
                .ok_or_else(Error::not_registered)?;
            request = request.bearer_auth(api_key);
        }

        if let Some(body) = body {
            request = request.json(body);
        }

        debug!(%method, path, authenticated = !skip_auth, "Sending OpenSentinel request");

        let response = request.send().await.map_err(transport_error)?;
        let status = response.status();

        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            warn!(status = status.as_u16(), body = %error_body, path, "OpenSentinel API error");
            return Err(Error::Remote {
                status: status.as_u16(),
                body: error_body,
            });
        }

        let bytes = response.bytes().await.map_err(transport_error)?;
        serde_json::from_slice(&bytes).map_err(|e| Error::Decode(e.to_string()))
    }
}

/// Drop values the platform uses to mean "nothing": `null`, `false`, zero,
/// `{}`, `[]`, `""`.
fn non_empty(value: Option<Value>) -> Option<Value> {
    value.filter(|v| match v {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|n| n != 0.0),
        Value::Object(map) => !map.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::String(s) => !s.is_empty(),
    })
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Flatten a reqwest error and its causes into one message.
fn transport_error(e: reqwest::Error) -> Error {
    let mut message = if e.is_timeout() {
        format!("request timed out: {e}")
    } else {
        e.to_string()
    };

    let mut source = std::error::Error::source(&e);
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = std::error::Error::source(cause);
    }

    Error::Transport(message)
}
