use clap::Parser;
use doh_relay_domain::CliOverrides;
use std::net::SocketAddr;
use tracing::info;

mod bootstrap;
mod di;
mod server;

#[derive(Parser)]
#[command(name = "doh-relay")]
#[command(version)]
#[command(about = "DNS-over-HTTPS relay with upstream selection by path")]
struct Cli {
    /// Configuration file path
    #[arg(short = 'c', long, value_name = "FILE")]
    config: Option<String>,

    /// HTTP port
    #[arg(short = 'p', long)]
    port: Option<u16>,

    /// Bind address
    #[arg(short = 'b', long)]
    bind: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    log_level: Option<String>,

    /// Do not pass the caller's x-forwarded-for header to DoH upstreams
    #[arg(long)]
    no_forward_client_ip: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let cli_overrides = CliOverrides {
        port: cli.port,
        bind_address: cli.bind.clone(),
        log_level: cli.log_level.clone(),
        no_forward_client_ip: cli.no_forward_client_ip,
    };

    let config = bootstrap::load_config(cli.config.as_deref(), cli_overrides)?;

    bootstrap::init_logging(&config);

    info!("Starting DoH relay v{}", env!("CARGO_PKG_VERSION"));

    let services = di::RelayServices::new(&config)?;

    let bind_addr: SocketAddr = format!("{}:{}", config.server.bind_address, config.server.port)
        .parse()
        .map_err(|e| anyhow::anyhow!("Invalid bind address: {}", e))?;

    server::start_web_server(bind_addr, &config, services.app_state(&config)).await?;

    info!("Server shutdown complete");
    Ok(())
}
