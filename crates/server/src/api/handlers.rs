//! Request handlers for the three resolution operations.

use axum::{
    extract::{Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use pahescope_core::{Config, LinkBundle, RankedEntry, ResolveError, TitleDetail};

use super::error::ApiError;
use crate::state::AppState;

// ============================================================================
// Request/Response types
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    /// Free-text query; the configured default applies when absent.
    pub q: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct DetailParams {
    pub url: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct EpisodeParams {
    pub id: Option<String>,
    pub episode: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct EpisodeResponse {
    pub catalog_id: String,
    pub episode: serde_json::Value,
    pub snapshot: String,
    pub play_url: String,
    pub links: LinkBundle,
}

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
}

// ============================================================================
// Handlers
// ============================================================================

pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
    })
}

/// GET /api/v1/config
///
/// The running configuration (nothing secret in it).
pub async fn get_config(State(state): State<Arc<AppState>>) -> Json<Config> {
    Json(state.config().clone())
}

/// GET /api/v1/search?q=
pub async fn search(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SearchParams>,
) -> Result<Json<Vec<RankedEntry>>, ApiError> {
    let results = state.orchestrator().search(params.q.as_deref()).await?;
    Ok(Json(results))
}

/// GET /api/v1/detail?url=
pub async fn detail(
    State(state): State<Arc<AppState>>,
    Query(params): Query<DetailParams>,
) -> Result<Json<TitleDetail>, ApiError> {
    let url = params
        .url
        .ok_or_else(|| ResolveError::validation("url query parameter is required"))?;
    let detail = state.orchestrator().detail(&url).await?;
    Ok(Json(detail))
}

/// GET /api/v1/episode?id=&episode=
pub async fn episode(
    State(state): State<Arc<AppState>>,
    Query(params): Query<EpisodeParams>,
) -> Result<Json<EpisodeResponse>, ApiError> {
    let id = params
        .id
        .filter(|id| !id.trim().is_empty())
        .ok_or_else(|| ResolveError::validation("id and episode query parameters are required"))?;
    let episode: f64 = params
        .episode
        .as_deref()
        .and_then(|e| e.trim().parse().ok())
        .ok_or_else(|| ResolveError::validation("episode must be a number"))?;

    let resolved = state.orchestrator().resolve_episode(&id, episode).await?;

    Ok(Json(EpisodeResponse {
        catalog_id: id,
        episode: resolved.record.episode_number,
        snapshot: resolved.record.snapshot_url,
        play_url: resolved.play_url,
        links: resolved.links,
    }))
}
