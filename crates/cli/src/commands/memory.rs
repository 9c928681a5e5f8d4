//! `opensentinel memory` — Store and search platform memories.

use super::{ConnectionArgs, print_response};
use opensentinel_client::{MemoryQuery, MemoryRecord};
use opensentinel_core::MemoryType;
use serde_json::Value;

pub async fn store(
    conn: &ConnectionArgs,
    content: String,
    memory_type: MemoryType,
    importance: i64,
    metadata: Option<Value>,
) -> Result<(), Box<dyn std::error::Error>> {
    let client = conn.connect()?;

    let mut record = MemoryRecord::new(content)
        .with_type(memory_type)
        .with_importance(importance);
    if let Some(metadata) = metadata {
        record = record.with_metadata(metadata);
    }

    let response = client.store_memory(&record).await?;
    print_response(response.as_ref())
}

pub async fn search(
    conn: &ConnectionArgs,
    query: String,
    limit: u32,
    cross_app: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let client = conn.connect()?;

    eprintln!("🔍 Searching memories for: \"{query}\"");
    let memories = client
        .search_memory(
            &MemoryQuery::new(query)
                .with_limit(limit)
                .with_cross_app(cross_app),
        )
        .await?;

    if memories.is_empty() {
        println!("No memories found.");
        return Ok(());
    }

    eprintln!("Found {} result(s):", memories.len());
    println!("{}", serde_json::to_string_pretty(&memories)?);
    Ok(())
}
