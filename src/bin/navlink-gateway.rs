//! Backend gateway binary.
//!
//! Serves the static navigation catalog over HTTP. A startup failure
//! (port in use, bad arguments) is fatal and exits non-zero; once the
//! gateway is serving, request faults stay inside their request and
//! termination signals drain cleanly.

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;

use navlink::server::{serve, GatewayConfig, SERVICE_NAME};

#[derive(Parser, Debug)]
#[command(name = "navlink-gateway", version, about = "Static indoor-navigation metadata gateway")]
struct Args {
    /// TCP port to listen on
    #[arg(long, default_value_t = 5000)]
    port: u16,

    /// Deployment environment name reported by /health
    #[arg(long, default_value = "development")]
    environment: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    let args = Args::parse();
    info!(service = SERVICE_NAME, port = args.port, "Starting gateway");

    serve(GatewayConfig {
        port: args.port,
        environment: args.environment,
    })
    .await
    .context("gateway terminated abnormally")?;

    info!("Gateway stopped");
    Ok(())
}
