use axum::Router;
use doh_relay_api::{mount_relay_routes, AppState};
use doh_relay_domain::Config;
use std::net::SocketAddr;
use tower_http::trace::TraceLayer;
use tracing::info;

pub async fn start_web_server(
    bind_addr: SocketAddr,
    config: &Config,
    state: AppState,
) -> anyhow::Result<()> {
    let mount_path = config.server.mount_path.as_str();

    info!(
        bind_address = %bind_addr,
        relay_url = format!("http://{}{}", bind_addr, mount_path),
        "Starting web server"
    );

    let app = create_app(mount_path, state);
    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;

    info!("Web server started successfully");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

fn create_app(mount_path: &str, state: AppState) -> Router {
    mount_relay_routes(mount_path, state).layer(TraceLayer::new_for_http())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        let _ = tokio::signal::ctrl_c().await;
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(_) => std::future::pending::<()>().await,
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received");
}
