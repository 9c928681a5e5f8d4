//! `opensentinel register` — Register this application with the platform.

use super::{ConnectionArgs, print_response};

pub async fn run(conn: &ConnectionArgs) -> Result<(), Box<dyn std::error::Error>> {
    let client = conn.connect()?;
    let response = client.register().await?;

    print_response(Some(&response))?;

    match client.api_key().await {
        Some(key) => eprintln!("\n✅ Registered. Use it with:\n   export OPENSENTINEL_API_KEY={key}"),
        None => eprintln!("\n⚠️  The platform did not issue an API key"),
    }

    Ok(())
}
