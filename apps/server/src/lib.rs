//! Pagetalk HTTP server.
//!
//! Thin boundary over the chat engine: request/response mapping, SSE
//! streaming, and error-to-status translation. All orchestration lives
//! in the `engine` crate.

pub use {config::Config, routes::router, state::AppState};

mod config;
mod routes;
mod state;

/// Build the application state, bind the listener, and serve until
/// ctrl-c.
pub async fn serve(config: Config) -> anyhow::Result<()> {
    let state = AppState::new(&config)?;
    let router = routes::router(state);

    let listener = tokio::net::TcpListener::bind(&config.bind).await?;
    tracing::info!("listening on {}", config.bind);
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
    tracing::info!("shutting down");
}
