//! Blog API server.
//!
//! Run from repo root: `cargo run -p blog-server`
//! Configuration comes from the environment (and a `.env` file if present); see
//! `blog_api::ServerConfig::from_lookup` for the keys.

use blog_api::{app_with_body_limit, connect, AppState, ServerConfig};
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                tracing_subscriber::EnvFilter::new("blog_api=info,blog_server=info,tower_http=info")
            }),
        )
        .init();

    let config = ServerConfig::from_env()?;
    let store = match connect(&config.datasource).await {
        Ok(store) => store,
        Err(e) => {
            tracing::error!(error = %e, "error during datasource initialization");
            return Err(e.into());
        }
    };
    let app = app_with_body_limit(AppState::new(store), config.body_limit);

    let listener = TcpListener::bind(config.listen_addr).await?;
    tracing::info!("server running on http://{}", listener.local_addr()?);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    tracing::info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "failed to listen for ctrl-c");
        std::future::pending::<()>().await;
    }
}
