use std::sync::Arc;

use axum::routing::get;
use axum::Router;
use tower_http::cors::CorsLayer;
use tracing::info;

use fa_core::Result;

pub mod error;
pub mod handlers;
pub mod state;

pub use state::AppState;

pub mod prelude {
    pub use crate::{create_app, AppState};
    pub use fa_core::{Error, Result};
}

pub fn create_app(state: AppState) -> Router {
    let cors = CorsLayer::permissive();

    Router::new()
        .route("/", get(handlers::root))
        .route("/analyze/:ticker", get(handlers::analyze))
        .layer(cors)
        .with_state(Arc::new(state))
}

/// Bind and serve the facade until the process is stopped.
pub async fn serve(state: AppState, addr: &str) -> Result<()> {
    let app = create_app(state);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("🌐 Listening on {addr}");
    axum::serve(listener, app).await?;
    Ok(())
}
