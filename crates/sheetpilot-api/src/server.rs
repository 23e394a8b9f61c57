//! HTTP server.

use std::net::SocketAddr;
use std::sync::Arc;

use tokio::net::TcpListener;
use tracing::info;

use sheetpilot_config::ServerConfig as ServerSection;

use crate::http::routes::create_router;
use crate::state::AppState;

/// Listen address.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
        }
    }
}

impl From<&ServerSection> for ServerConfig {
    fn from(section: &ServerSection) -> Self {
        Self::new(section.host.clone(), section.port)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self::from(&ServerSection::default())
    }
}

pub struct ApiServer {
    config: ServerConfig,
    state: Arc<AppState>,
}

impl ApiServer {
    pub fn new(config: ServerConfig, state: Arc<AppState>) -> Self {
        Self { config, state }
    }

    pub fn addr(&self) -> String {
        format!("{}:{}", self.config.host, self.config.port)
    }

    /// Serve until the listener fails.
    pub async fn run(&self) -> Result<(), Box<dyn std::error::Error>> {
        let app = create_router(self.state.clone());

        let addr: SocketAddr = self.addr().parse()?;
        let listener = TcpListener::bind(addr).await?;

        info!("SheetPilot listening on http://{}", addr);
        axum::serve(listener, app).await?;

        Ok(())
    }
}
