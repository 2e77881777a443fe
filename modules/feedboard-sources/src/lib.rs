//! Mock content providers: news, recommendations, social posts, search.
//!
//! Each endpoint synthesizes a page on request; nothing is stored.

pub mod error;
pub mod generate;
pub mod routes;

use anyhow::Result;
use axum::{http::Request, Router};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::info;

pub use error::SourceError;
pub use routes::router;

/// The mock router wrapped in request tracing (method and path only).
pub fn app() -> Router {
    let trace = TraceLayer::new_for_http().make_span_with(|request: &Request<_>| {
        tracing::info_span!(
            "http_request",
            method = %request.method(),
            path = %request.uri().path(),
        )
    });
    router().layer(trace)
}

/// Serve [`app`] on an already-bound listener until the process stops.
pub async fn serve(listener: TcpListener) -> Result<()> {
    let addr = listener.local_addr()?;
    info!(%addr, "Mock sources listening");
    axum::serve(listener, app()).await?;
    Ok(())
}
