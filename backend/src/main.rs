//! Gateway entry-point: loads settings, wires adapters and serves HTTP.

mod server;

use actix_web::web;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use admin_gateway::inbound::http::health::HealthState;
use admin_gateway::settings::GatewaySettings;

use server::{ServerConfig, build_http_state, create_server};

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = GatewaySettings::load().map_err(std::io::Error::other)?;
    let http_state = build_http_state(&settings).map_err(std::io::Error::other)?;
    let config = ServerConfig::new(settings.bind_addr(), http_state);
    let (host, port) = config.bind_addr();
    info!(host, port, "starting admin gateway");

    let health_state = web::Data::new(HealthState::new());
    create_server(health_state, config)?.await
}
