use anyhow::Result;
use clap::Parser;
use rustdp::{start_server, ApiConfig};

#[derive(Parser)]
#[command(name = "rustdp-api")]
#[command(about = "rustdp dependency parse API server")]
struct Args {
    /// Host to bind the server to
    #[arg(long, default_value = "127.0.0.1")]
    host: String,

    /// Port to bind the server to
    #[arg(long, default_value = "8080")]
    port: u16,

    /// Path to the engine configuration file
    #[arg(long, default_value = "configs/parser.yaml")]
    config: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    env_logger::init();

    // Parse command line arguments
    let args = Args::parse();

    log::info!("Starting rustdp API server...");
    log::info!(
        "Configuration: host={}, port={}, config={}",
        args.host,
        args.port,
        args.config
    );

    let config = ApiConfig {
        host: args.host,
        port: args.port,
        config_path: args.config,
    };

    start_server(config).await?;

    Ok(())
}
