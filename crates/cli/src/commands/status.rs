//! `opensentinel status` — Show platform status.

use super::{ConnectionArgs, print_response};

pub async fn run(conn: &ConnectionArgs) -> Result<(), Box<dyn std::error::Error>> {
    let client = conn.connect()?;

    eprintln!("🛰️  OpenSentinel Status");
    eprintln!("=====================");
    eprintln!("  Platform:  {}", client.config().base_url());
    eprintln!("  App:       {} ({})", client.config().app_name, client.config().app_type);
    eprintln!("  Fallback:  {}", if client.config().fallback { "enabled" } else { "disabled" });
    eprintln!();

    let status = client.status().await?;
    print_response(status.as_ref())
}
