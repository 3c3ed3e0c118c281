pub mod health;
pub mod posts;

use axum::{
    routing::{get, post},
    Router,
};

use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route("/api/v1/posts/run", post(posts::handle_run_now))
        .route("/api/v1/posts/recent", get(posts::handle_recent_posts))
        .route(
            "/api/v1/publisher/status",
            get(posts::handle_publisher_status),
        )
        .with_state(state)
}
