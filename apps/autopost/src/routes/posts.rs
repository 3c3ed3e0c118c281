use axum::{
    extract::{Query, State},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::models::post::PostRow;
use crate::pipeline::PublishedPost;
use crate::publish::PageInfo;
use crate::state::AppState;

const DEFAULT_RECENT_LIMIT: i64 = 20;
const MAX_RECENT_LIMIT: i64 = 100;

#[derive(Debug, Deserialize)]
pub struct RecentQuery {
    pub limit: Option<i64>,
}

#[derive(Debug, Serialize)]
pub struct RecentPostsResponse {
    pub posts: Vec<PostRow>,
}

/// POST /api/v1/posts/run
/// Runs the pipeline once, waiting for any scheduled run in flight.
pub async fn handle_run_now(State(state): State<AppState>) -> Result<Json<PublishedPost>, AppError> {
    let published = state.scheduler.run_now().await?;
    Ok(Json(published))
}

/// GET /api/v1/posts/recent?limit=
pub async fn handle_recent_posts(
    State(state): State<AppState>,
    Query(params): Query<RecentQuery>,
) -> Result<Json<RecentPostsResponse>, AppError> {
    let limit = params.limit.unwrap_or(DEFAULT_RECENT_LIMIT);
    if !(1..=MAX_RECENT_LIMIT).contains(&limit) {
        return Err(AppError::Validation(format!(
            "limit must be between 1 and {MAX_RECENT_LIMIT}"
        )));
    }
    let posts = state.store.find_recent_posts(limit).await?;
    Ok(Json(RecentPostsResponse { posts }))
}

/// GET /api/v1/publisher/status
pub async fn handle_publisher_status(
    State(state): State<AppState>,
) -> Result<Json<PageInfo>, AppError> {
    let page = state.publisher.test_connection().await?;
    Ok(Json(page))
}
