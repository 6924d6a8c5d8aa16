//! Axum application setup.

use std::net::SocketAddr;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tracing::{info, warn};

use super::handlers;
use super::state::AppState;

/// Largest accepted upload.
const MAX_UPLOAD_BYTES: usize = 64 * 1024 * 1024;

/// Create the Axum router with all routes.
pub fn create_router(state: AppState) -> Router {
    // CORS configuration for local development
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api_routes = Router::new()
        // Upload and the untouched original
        .route("/upload", post(handlers::upload))
        .route("/original", get(handlers::get_original))
        // Cleaning
        .route("/clean", post(handlers::clean))
        .route("/cleaned", get(handlers::get_cleaned))
        .route("/download", get(handlers::download))
        // Charts
        .route("/charts", post(handlers::build_chart))
        .route("/charts/:kind/columns", get(handlers::chart_columns));

    Router::new()
        .nest("/api", api_routes)
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
        .layer(cors)
        .with_state(state)
}

/// Start the web server and run until Ctrl+C.
pub async fn run_server(
    state: AppState,
    addr: SocketAddr,
) -> Result<(), Box<dyn std::error::Error>> {
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Server listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

/// Resolve on Ctrl+C. If the handler cannot be installed the server keeps
/// running until it is killed.
async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => {
            println!();
            info!("Shutting down");
        }
        Err(e) => {
            warn!("Failed to listen for Ctrl+C, graceful shutdown disabled: {}", e);
            std::future::pending::<()>().await;
        }
    }
}
