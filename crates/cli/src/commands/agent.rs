//! `opensentinel agent` — Spawn platform sub-agents.

use super::{ConnectionArgs, print_response};
use opensentinel_client::AgentTask;
use opensentinel_core::AgentType;

pub async fn spawn(
    conn: &ConnectionArgs,
    agent_type: AgentType,
    task: String,
    context: Option<String>,
) -> Result<(), Box<dyn std::error::Error>> {
    let client = conn.connect()?;

    let mut agent_task = AgentTask::new(agent_type, task);
    if let Some(context) = context {
        agent_task = agent_task.with_context(context);
    }

    let response = client.spawn_agent(&agent_task).await?;
    print_response(response.as_ref())
}
