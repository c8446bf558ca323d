use std::net::SocketAddr;
use tracing::{info, warn};
use txtdirect_api::{create_redirect_routes, AppState};

pub async fn start_web_server(bind_addr: SocketAddr, state: AppState) -> anyhow::Result<()> {
    info!(
        bind_address = %bind_addr,
        url = format!("http://{}", bind_addr),
        "Starting redirect server"
    );

    let app = create_redirect_routes(state);
    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;

    info!("Redirect server started successfully");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "Cannot listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
