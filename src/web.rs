use anyhow::{Context, Result};
use axum::Router;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

use crate::api::{self, ApiState};
use crate::config::WeatherDeskConfig;
use crate::weather::OpenMeteoClient;

pub fn app(config: &WeatherDeskConfig) -> Result<Router> {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let state = ApiState {
        lookup: Arc::new(OpenMeteoClient::new(config)?),
        min_query_length: config.search.min_query_length,
    };

    Ok(Router::new().nest("/api", api::router(state)).layer(cors))
}

pub async fn run(config: &WeatherDeskConfig, port: u16) -> Result<()> {
    let app = app(config)?;

    let addr = format!("0.0.0.0:{port}");
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    tracing::info!("Web server running at http://localhost:{}", port);
    axum::serve(listener, app).await?;
    Ok(())
}
