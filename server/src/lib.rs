pub mod app;
pub mod config;
pub mod server;
pub mod services;

use std::path::PathBuf;

use tag_db::Database;

use config::AppConfig;

/// Determine the data directory for the application.
/// Priority: PAWTAG_DATA_DIR env var > ~/.pawtag
fn data_dir() -> PathBuf {
    if let Ok(dir) = std::env::var("PAWTAG_DATA_DIR") {
        return PathBuf::from(dir);
    }
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".pawtag")
}

/// Load .env from multiple candidate paths.
fn load_dotenv() {
    let candidates = [".env", "../.env", "../../.env"];
    for path in &candidates {
        if dotenvy::from_filename(path).is_ok() {
            tracing::info!("Loaded .env from: {path}");
            return;
        }
    }
    tracing::info!("No .env file found, using system environment variables");
}

/// Initialize data dir, open the database, load and validate config.
pub fn init_foundation() -> Result<(Database, AppConfig, PathBuf), anyhow::Error> {
    load_dotenv();

    let dir = data_dir();
    std::fs::create_dir_all(&dir)?;
    let db_path = dir.join("pawtag.db");

    tracing::info!("Opening database at {}", db_path.display());
    let db = Database::open(&db_path)?;

    let config = AppConfig::load();
    config::validation::validate_config(&config)?;

    tracing::info!(
        port = config.server_port,
        base_url = %config.public_base_url,
        "Settings loaded"
    );
    Ok((db, config, dir))
}
