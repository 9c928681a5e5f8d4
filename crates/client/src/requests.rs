//! Request bodies for the platform's SDK endpoints.
//!
//! Field names follow the platform's camelCase wire format. Optional fields
//! are always sent, as `null` when unset.

use opensentinel_core::{AgentType, MemoryType, NotifyChannel, Priority};
use serde::Serialize;
use serde_json::Value;

/// Body of `POST /chat`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatRequest {
    pub message: String,
    /// Extra material the platform should consider alongside the message
    pub context: Option<String>,
    /// Allow the platform to call its tools while answering
    pub use_tools: bool,
    pub system_prompt: Option<String>,
}

impl ChatRequest {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            context: None,
            use_tools: true,
            system_prompt: None,
        }
    }

    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }

    pub fn with_tools(mut self, use_tools: bool) -> Self {
        self.use_tools = use_tools;
        self
    }

    pub fn with_system_prompt(mut self, system_prompt: impl Into<String>) -> Self {
        self.system_prompt = Some(system_prompt.into());
        self
    }
}

/// Body of `POST /notify`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Notification {
    pub channel: NotifyChannel,
    pub message: String,
    /// Channel-specific address; the platform default is used when unset
    pub recipient: Option<String>,
    pub priority: Priority,
}

impl Notification {
    pub fn new(channel: NotifyChannel, message: impl Into<String>) -> Self {
        Self {
            channel,
            message: message.into(),
            recipient: None,
            priority: Priority::default(),
        }
    }

    pub fn with_recipient(mut self, recipient: impl Into<String>) -> Self {
        self.recipient = Some(recipient.into());
        self
    }

    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }
}

/// Body of `POST /memory`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MemoryRecord {
    pub content: String,
    #[serde(rename = "type")]
    pub memory_type: MemoryType,
    /// Not range-checked here; the platform enforces its own bounds.
    pub importance: i64,
    pub metadata: Option<Value>,
}

impl MemoryRecord {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            memory_type: MemoryType::default(),
            importance: 5,
            metadata: None,
        }
    }

    pub fn with_type(mut self, memory_type: MemoryType) -> Self {
        self.memory_type = memory_type;
        self
    }

    pub fn with_importance(mut self, importance: i64) -> Self {
        self.importance = importance;
        self
    }

    pub fn with_metadata(mut self, metadata: Value) -> Self {
        self.metadata = Some(metadata);
        self
    }
}

/// Body of `POST /memory/search`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MemoryQuery {
    pub query: String,
    pub limit: u32,
    /// Also search memories stored by other applications
    pub cross_app: bool,
}

impl MemoryQuery {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            limit: 5,
            cross_app: false,
        }
    }

    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = limit;
        self
    }

    pub fn with_cross_app(mut self, cross_app: bool) -> Self {
        self.cross_app = cross_app;
        self
    }
}

/// Body of `POST /agent/spawn`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AgentTask {
    #[serde(rename = "type")]
    pub agent_type: AgentType,
    pub task: String,
    pub context: Option<String>,
}

impl AgentTask {
    pub fn new(agent_type: AgentType, task: impl Into<String>) -> Self {
        Self {
            agent_type,
            task: task.into(),
            context: None,
        }
    }

    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn chat_request_sends_nulls_for_unset_options() {
        let body = serde_json::to_value(ChatRequest::new("Summarize this contract")).unwrap();
        assert_eq!(
            body,
            json!({
                "message": "Summarize this contract",
                "context": null,
                "useTools": true,
                "systemPrompt": null
            })
        );
    }

    #[test]
    fn chat_request_builder() {
        let req = ChatRequest::new("hi")
            .with_context("clause 4")
            .with_tools(false)
            .with_system_prompt("Be terse");
        let body = serde_json::to_value(req).unwrap();
        assert_eq!(body["context"], "clause 4");
        assert_eq!(body["useTools"], false);
        assert_eq!(body["systemPrompt"], "Be terse");
    }

    #[test]
    fn notification_defaults_to_normal_priority() {
        let body = serde_json::to_value(Notification::new(NotifyChannel::Telegram, "done")).unwrap();
        assert_eq!(
            body,
            json!({"channel": "telegram", "message": "done", "recipient": null, "priority": "normal"})
        );
    }

    #[test]
    fn memory_record_uses_type_key() {
        let body = serde_json::to_value(
            MemoryRecord::new("Client prefers PDF")
                .with_type(MemoryType::Episodic)
                .with_importance(-3)
                .with_metadata(json!({"source": "email"})),
        )
        .unwrap();
        assert_eq!(body["type"], "episodic");
        assert_eq!(body["importance"], -3);
        assert_eq!(body["metadata"]["source"], "email");
        assert!(body.get("memory_type").is_none());
    }

    #[test]
    fn memory_record_defaults() {
        let record = MemoryRecord::new("x");
        assert_eq!(record.memory_type, MemoryType::Semantic);
        assert_eq!(record.importance, 5);
        assert!(record.metadata.is_none());
    }

    #[test]
    fn memory_query_wire_format() {
        let body = serde_json::to_value(MemoryQuery::new("invoices").with_cross_app(true)).unwrap();
        assert_eq!(body, json!({"query": "invoices", "limit": 5, "crossApp": true}));
    }

    #[test]
    fn agent_task_wire_format() {
        let body = serde_json::to_value(
            AgentTask::new(AgentType::Research, "Find precedents").with_context("EU law"),
        )
        .unwrap();
        assert_eq!(
            body,
            json!({"type": "research", "task": "Find precedents", "context": "EU law"})
        );
    }
}
