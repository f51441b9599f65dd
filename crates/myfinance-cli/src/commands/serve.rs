//! Server command implementation

use anyhow::Result;
use myfinance_core::Config;

pub async fn cmd_serve(config: &Config, host: Option<&str>, port: Option<u16>) -> Result<()> {
    let settings = &config.server;
    let host = host.unwrap_or(&settings.host);
    let port = port.unwrap_or(settings.port);

    println!("🚀 Starting MyFinance API server...");
    println!("   Listening: http://{}:{}", host, port);

    let server_config = myfinance_server::ServerConfig::from_settings(settings);
    if server_config.require_auth() {
        println!(
            "   🔑 API keys: {} configured (MYFINANCE_API_KEYS)",
            server_config.api_keys.len()
        );
    } else {
        println!();
        println!("   ⚠️  Authentication DISABLED - set MYFINANCE_API_KEYS before exposing to a network");
    }
    if !server_config.allowed_origins.is_empty() {
        println!(
            "   🌐 Allowed origins: {}",
            server_config.allowed_origins.join(", ")
        );
    }
    println!();
    println!("   Press Ctrl+C to stop");

    myfinance_server::serve_with_config(host, port, server_config).await?;

    Ok(())
}
