//! SEO endpoint server command.

use std::path::Path;

use anyhow::Result;
use vitrine_server::{SeoServer, ServerConfig};

use crate::config::load_config;

/// Run the endpoint server.
pub async fn run(config_path: &Path, port: Option<u16>, open: bool) -> Result<()> {
    let config = load_config(config_path)?;
    let port = port.unwrap_or(config.server.port);

    tracing::info!("Starting SEO server on port {}", port);

    let server_config = ServerConfig {
        content_dir: config.content_dir(),
        public_dir: config.public_dir(),
        port,
        open,
        ..Default::default()
    };

    SeoServer::new(server_config, config.site).start().await?;

    Ok(())
}
