//! Server command implementation

use std::path::Path;
use std::sync::Arc;

use anyhow::Result;

use super::{load_settings, open_store};

pub async fn cmd_serve(
    data_path: &Path,
    config_path: Option<&Path>,
    host: &str,
    port: u16,
    allowed_origins: Vec<String>,
) -> Result<()> {
    let settings = load_settings(config_path)?;

    println!("🚀 Starting FinSync API server...");
    println!("   Transactions: {}", data_path.display());
    println!("   Listening: http://{}:{}/api", host, port);
    if !allowed_origins.is_empty() {
        println!("   CORS origins: {}", allowed_origins.join(", "));
    }
    println!();
    println!("   ⚠️  No authentication - bind to localhost or use a proxy");
    println!("   Press Ctrl+C to stop");

    let store = Arc::new(open_store(data_path));
    let state = finsync_server::AppState::new(
        store,
        settings,
        finsync_server::ServerConfig { allowed_origins },
    );

    finsync_server::serve(state, host, port).await?;

    Ok(())
}
