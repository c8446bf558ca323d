use anyhow::Context;
use clap::Parser;
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::info;
use txtdirect_api::AppState;
use txtdirect_domain::CliOverrides;

mod bootstrap;
mod di;
mod server;

#[derive(Parser)]
#[command(name = "txtdirect")]
#[command(version)]
#[command(about = "TXTDirect - DNS TXT record driven redirects and proxying")]
struct Cli {
    /// Configuration file path
    #[arg(short = 'c', long, value_name = "FILE")]
    config: Option<String>,

    /// HTTP listen port
    #[arg(short = 'p', long)]
    port: Option<u16>,

    /// Bind address
    #[arg(short = 'b', long)]
    bind: Option<String>,

    /// DNS resolver as ip:port
    #[arg(short = 'r', long)]
    resolver: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    log_level: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let cli_overrides = CliOverrides {
        port: cli.port,
        bind_address: cli.bind.clone(),
        resolver: cli.resolver.clone(),
        log_level: cli.log_level.clone(),
    };

    let config = bootstrap::load_config(cli.config.as_deref(), cli_overrides)?;

    bootstrap::init_logging(&config);

    info!("Starting TXTDirect v{}", env!("CARGO_PKG_VERSION"));

    let listen = config.server.listen_address();
    let web_addr: SocketAddr = listen
        .parse()
        .with_context(|| format!("Invalid listen address {}", listen))?;

    let config = Arc::new(config);
    let use_case = di::build_redirect_use_case(Arc::clone(&config))?;
    let app_state = AppState::new(Arc::new(use_case));

    server::start_web_server(web_addr, app_state).await?;

    info!("Server shutdown complete");
    Ok(())
}
