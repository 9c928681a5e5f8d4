//! Chat result type.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// The answer to a single `chat` call.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatResult {
    /// Assistant reply text
    pub content: String,

    /// Names of the platform tools the reply used, in call order
    #[serde(default)]
    pub tools_used: Vec<String>,

    #[serde(default)]
    pub input_tokens: u64,

    #[serde(default)]
    pub output_tokens: u64,

    /// Label of the application the platform attributed the call to
    #[serde(default)]
    pub app: String,
}

impl ChatResult {
    /// Map a raw `/chat` response into a result.
    ///
    /// Every field is optional on the wire: missing or mistyped values fall
    /// back to their empty defaults. Token counts are nested under `usage`.
    pub fn from_response(response: &Value) -> Self {
        let usage = &response["usage"];

        Self {
            content: response["content"].as_str().unwrap_or("").to_string(),
            tools_used: response["toolsUsed"]
                .as_array()
                .map(|tools| {
                    tools
                        .iter()
                        .filter_map(|t| t.as_str().map(str::to_string))
                        .collect()
                })
                .unwrap_or_default(),
            input_tokens: token_count(&usage["inputTokens"]),
            output_tokens: token_count(&usage["outputTokens"]),
            app: response["app"].as_str().unwrap_or("").to_string(),
        }
    }

    /// Total tokens billed for the call.
    pub fn total_tokens(&self) -> u64 {
        self.input_tokens + self.output_tokens
    }
}

/// Whole, non-negative counts only. `12.0` counts, `12.5` and `-1` do not.
fn token_count(value: &Value) -> u64 {
    value
        .as_u64()
        .or_else(|| {
            value
                .as_f64()
                .filter(|n| n.is_finite() && *n >= 0.0 && n.fract() == 0.0)
                .map(|n| n as u64)
        })
        .unwrap_or(0)
}
