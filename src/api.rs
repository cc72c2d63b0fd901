//! JSON endpoints over the lookup client

use std::sync::Arc;

use axum::{
    Router,
    extract::{Query, State},
    http::StatusCode,
    response::Json,
    routing::get,
};
use serde::Deserialize;
use tracing::warn;

use crate::WeatherDeskError;
use crate::models::{PlaceSuggestion, ResultCard};
use crate::weather::{OpenMeteoClient, WeatherLookup, resolve_and_fetch};

#[derive(Clone)]
pub struct ApiState {
    pub lookup: Arc<OpenMeteoClient>,
    /// Names must be longer than this to be looked up
    pub min_query_length: usize,
}

#[derive(Debug, Deserialize)]
pub struct NameQuery {
    #[serde(default)]
    pub name: String,
}

pub fn router(state: ApiState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/suggestions", get(get_suggestions))
        .route("/weather", get(get_weather))
        .with_state(state)
}

async fn health() -> &'static str {
    "ok"
}

async fn get_suggestions(
    State(state): State<ApiState>,
    Query(query): Query<NameQuery>,
) -> Json<Vec<PlaceSuggestion>> {
    if query.name.chars().count() <= state.min_query_length {
        return Json(Vec::new());
    }

    match state.lookup.suggest(&query.name).await {
        Ok(suggestions) => Json(suggestions),
        Err(e) => {
            warn!("Error fetching suggestions: {}", e);
            Json(Vec::new())
        }
    }
}

async fn get_weather(
    State(state): State<ApiState>,
    Query(query): Query<NameQuery>,
) -> Result<Json<ResultCard>, (StatusCode, String)> {
    resolve_and_fetch(state.lookup.as_ref(), &query.name)
        .await
        .map(Json)
        .map_err(|e| {
            let status = match &e {
                WeatherDeskError::Validation { .. } => StatusCode::BAD_REQUEST,
                WeatherDeskError::NotFound { .. } => StatusCode::NOT_FOUND,
                e if e.is_remote() => StatusCode::BAD_GATEWAY,
                _ => StatusCode::INTERNAL_SERVER_ERROR,
            };
            warn!("Weather lookup for '{}' failed: {}", query.name, e);
            (status, e.user_message())
        })
}
