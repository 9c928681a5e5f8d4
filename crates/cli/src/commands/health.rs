//! `opensentinel health` — Check whether the platform is reachable.

use super::ConnectionArgs;

pub async fn run(conn: &ConnectionArgs) -> Result<(), Box<dyn std::error::Error>> {
    let client = conn.connect()?;

    if client.is_available().await {
        println!("✅ {} is reachable", client.config().base_url());
        Ok(())
    } else {
        Err(format!("{} is unreachable", client.health_url()).into())
    }
}
