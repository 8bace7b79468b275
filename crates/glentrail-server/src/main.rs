#![forbid(unsafe_code)]

use glentrail_core::env_bool;
use glentrail_server::ServerConfig;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn init_tracing() {
    let filter =
        EnvFilter::try_from_env("GLENTRAIL_LOG").unwrap_or_else(|_| EnvFilter::new("info"));
    if env_bool("GLENTRAIL_LOG_JSON", true) {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }
}

#[tokio::main]
async fn main() -> Result<(), String> {
    init_tracing();
    glentrail_server::run(ServerConfig::from_env()).await
}
