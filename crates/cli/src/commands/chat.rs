//! `opensentinel chat` — Send a message to the platform assistant.

use super::ConnectionArgs;
use opensentinel_client::ChatRequest;

pub async fn run(
    conn: &ConnectionArgs,
    message: String,
    context: Option<String>,
    use_tools: bool,
    system_prompt: Option<String>,
) -> Result<(), Box<dyn std::error::Error>> {
    let client = conn.connect()?;

    let mut request = ChatRequest::new(message).with_tools(use_tools);
    if let Some(context) = context {
        request = request.with_context(context);
    }
    if let Some(prompt) = system_prompt {
        request = request.with_system_prompt(prompt);
    }

    match client.chat(&request).await? {
        Some(reply) => {
            println!("{}", reply.content);
            if !reply.tools_used.is_empty() {
                eprintln!("\n🔧 Tools: {}", reply.tools_used.join(", "));
            }
            eprintln!(
                "📊 Tokens: {} in / {} out{}",
                reply.input_tokens,
                reply.output_tokens,
                if reply.app.is_empty() {
                    String::new()
                } else {
                    format!(" ({})", reply.app)
                }
            );
        }
        None => println!("(no response)"),
    }

    Ok(())
}
