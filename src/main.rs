use anyhow::Context;
use coursebook::coursebook_config::ServerConfig;
use coursebook::logging::init_tracing;
use coursebook::middleware::auth::prime_dummy_hash;
use coursebook::router::init_router;
use coursebook::state::init_app_state;
use dotenvy::dotenv;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    let _log_guard = init_tracing();

    let server_config = ServerConfig::from_env();
    let port = server_config.port;

    let state = init_app_state(server_config).await?;
    prime_dummy_hash()
        .await
        .context("Failed to compute the dummy password hash")?;
    let app = init_router(state);

    let listener = tokio::net::TcpListener::bind(("0.0.0.0", port))
        .await
        .with_context(|| format!("Failed to bind port {}", port))?;

    info!(port, "Server is listening");
    info!("Swagger UI available at http://localhost:{}/swagger-ui", port);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "Failed to listen for shutdown signal");
        return;
    }
    info!("Shutdown signal received");
}
