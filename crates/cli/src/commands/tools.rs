//! `opensentinel tools` — List and execute platform tools.

use super::{ConnectionArgs, print_response};
use serde_json::Value;

pub async fn list(conn: &ConnectionArgs) -> Result<(), Box<dyn std::error::Error>> {
    let client = conn.connect()?;
    let tools = client.list_tools().await?;
    print_response(Some(&tools))
}

pub async fn exec(
    conn: &ConnectionArgs,
    tool: &str,
    input: Value,
) -> Result<(), Box<dyn std::error::Error>> {
    let client = conn.connect()?;
    let response = client.execute_tool(tool, input).await?;
    print_response(response.as_ref())
}
