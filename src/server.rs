use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use std::{net::SocketAddr, sync::Arc};
use tracing::info;

use crate::api::{
    self, ApiCompareResponse, ApiError, ApiLeaderboardResponse, ApiRankResponse, CompareQuery,
    RankQuery,
};
use influence_rank::config::RankConfig;
use influence_rank::insight::ChatClient;
use influence_rank::provider::SeededProvider;
use influence_rank::{Profile, RankResult};

#[derive(Clone)]
struct AppState {
    provider: Arc<SeededProvider>,
    insight: Option<ChatClient>,
    config: Arc<RankConfig>,
}

pub async fn serve(args: crate::ServeArgs, config: RankConfig) -> Result<(), String> {
    let insight = ChatClient::from_env(&config.insight);
    if insight.is_none() {
        info!("INSIGHT_API_KEY not set; AI insights will use fallback text");
    }
    let state = AppState {
        provider: Arc::new(SeededProvider::new(config.provider.clone())),
        insight,
        config: Arc::new(config),
    };

    let app = Router::new()
        .route("/api/health", get(health))
        .route("/api/rank/:id", get(rank_handler))
        .route("/api/score", post(score_handler))
        .route("/api/compare", get(compare_handler))
        .route("/api/leaderboard", get(leaderboard_handler))
        .with_state(state);

    let addr: SocketAddr = format!("{}:{}", args.host, args.port)
        .parse()
        .map_err(|err| format!("invalid bind address: {}", err))?;

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|err| format!("failed to bind server: {}", err))?;
    info!(%addr, "influence-rank listening");

    axum::serve(listener, app)
        .await
        .map_err(|err| format!("server error: {}", err))?;

    Ok(())
}

async fn health() -> impl IntoResponse {
    StatusCode::OK
}

async fn rank_handler(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    Query(query): Query<RankQuery>,
) -> Result<Json<ApiRankResponse>, ApiError> {
    let response = api::rank_profile(
        &state.provider,
        state.insight.as_ref(),
        &state.config,
        &raw_id,
        query.ai.unwrap_or(false),
        None,
    )
    .await?;
    Ok(Json(response))
}

/// Scores a caller-supplied profile without touching the provider.
async fn score_handler(
    State(state): State<AppState>,
    Json(profile): Json<Profile>,
) -> Result<Json<RankResult>, ApiError> {
    let rank = api::score_profile(&state.config, profile)?;
    Ok(Json(rank))
}

async fn compare_handler(
    State(state): State<AppState>,
    Query(query): Query<CompareQuery>,
) -> Result<Json<ApiCompareResponse>, ApiError> {
    let response = api::compare(
        &state.provider,
        state.insight.as_ref(),
        &state.config,
        &query.left,
        &query.right,
        query.ai.unwrap_or(false),
    )
    .await?;
    Ok(Json(response))
}

async fn leaderboard_handler(State(state): State<AppState>) -> Json<ApiLeaderboardResponse> {
    Json(api::leaderboard(&state.provider, &state.config))
}
