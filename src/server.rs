//! HTTP endpoints for crawlers and feed readers.

use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use std::{net::SocketAddr, sync::Arc};
use tower_http::trace::TraceLayer;
use tracing::{error, info};

use crate::error::{Error, Result};
use crate::site::Site;

const CACHE_ONE_DAY: &str = "public, max-age=86400";
const CACHE_ONE_HOUR: &str = "public, max-age=3600";

pub fn router(site: Arc<Site>) -> Router {
    Router::new()
        .route("/robots.txt", get(robots))
        .route("/rss.xml", get(rss))
        .route("/sitemap.xml", get(sitemap))
        .layer(TraceLayer::new_for_http())
        .with_state(site)
}

pub async fn serve(site: Arc<Site>, bind: SocketAddr) -> Result<()> {
    let listener = tokio::net::TcpListener::bind(bind).await?;
    info!(addr = %listener.local_addr()?, "listening");

    axum::serve(listener, router(site))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        error!(error = %err, "could not listen for ctrl-c");
        std::future::pending::<()>().await;
    }
    info!("shutting down");
}

async fn robots(State(site): State<Arc<Site>>) -> impl IntoResponse {
    (
        [
            (header::CONTENT_TYPE, "text/plain"),
            (header::CACHE_CONTROL, CACHE_ONE_DAY),
        ],
        site.robots_txt(),
    )
}

async fn rss(State(site): State<Arc<Site>>) -> Result<impl IntoResponse> {
    let body = site.rss().await?;
    Ok(xml(body))
}

async fn sitemap(State(site): State<Arc<Site>>) -> Result<impl IntoResponse> {
    let body = site.sitemap().await?;
    Ok(xml(body))
}

fn xml(body: String) -> impl IntoResponse {
    (
        [
            (header::CONTENT_TYPE, "application/xml"),
            (header::CACHE_CONTROL, CACHE_ONE_HOUR),
        ],
        body,
    )
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = if self.is_upstream() {
            StatusCode::BAD_GATEWAY
        } else {
            StatusCode::INTERNAL_SERVER_ERROR
        };
        error!(error = %self, %status, "request failed");

        (
            status,
            axum::Json(serde_json::json!({"err": self.to_string()})),
        )
            .into_response()
    }
}
