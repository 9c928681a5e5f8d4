//! `opensentinel notify` — Send a notification through a platform channel.

use super::{ConnectionArgs, print_response};
use opensentinel_client::Notification;
use opensentinel_core::{NotifyChannel, Priority};

pub async fn run(
    conn: &ConnectionArgs,
    channel: NotifyChannel,
    message: String,
    recipient: Option<String>,
    priority: Priority,
) -> Result<(), Box<dyn std::error::Error>> {
    let client = conn.connect()?;

    let mut notification = Notification::new(channel, message).with_priority(priority);
    if let Some(recipient) = recipient {
        notification = notification.with_recipient(recipient);
    }

    let response = client.notify(&notification).await?;
    print_response(response.as_ref())
}
