//! `opensentinel init` — Write a default config file.

use super::ConnectionArgs;
use opensentinel_config::ClientConfig;

pub async fn run(conn: &ConnectionArgs, force: bool) -> Result<(), Box<dyn std::error::Error>> {
    let config_path = conn.config_path();

    if config_path.exists() && !force {
        println!("⚠️  Config already exists at: {}", config_path.display());
        println!("   Edit it manually or re-run with --force.");
        return Ok(());
    }

    if let Some(dir) = config_path.parent() {
        std::fs::create_dir_all(dir)?;
    }
    std::fs::write(&config_path, ClientConfig::default_toml())?;

    println!("✅ Created config at: {}", config_path.display());
    println!("\n📝 Next steps:");
    println!("   1. Set url, app_name and app_type in {}", config_path.display());
    println!("   2. Run: opensentinel register");
    println!("   3. Export the printed key as OPENSENTINEL_API_KEY");

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn writes_default_config_once() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        let conn = ConnectionArgs {
            config: Some(path.clone()),
            ..ConnectionArgs::default()
        };

        run(&conn, false).await.unwrap();
        let written = std::fs::read_to_string(&path).unwrap();
        assert!(written.contains("localhost:8030"));

        std::fs::write(&path, "app_name = \"Edited\"\n").unwrap();
        run(&conn, false).await.unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "app_name = \"Edited\"\n");

        run(&conn, true).await.unwrap();
        assert!(std::fs::read_to_string(&path).unwrap().contains("localhost:8030"));
    }
}
