//! Server command implementation

use std::path::Path;

use anyhow::Result;
use feelspace_server::ServerConfig;

use super::open_db;

pub async fn cmd_serve(
    db_path: &Path,
    host: &str,
    port: u16,
    no_encrypt: bool,
) -> Result<()> {
    println!("🚀 Starting Feel Space web server...");
    println!("   Database: {}", db_path.display());
    println!("   Listening: http://{}:{}", host, port);

    let config = ServerConfig::from_env();
    if !config.allowed_origins.is_empty() {
        println!("   CORS origins: {}", config.allowed_origins.join(", "));
    }

    let db = open_db(db_path, no_encrypt)?;

    feelspace_server::serve(db, host, port, config).await
}
