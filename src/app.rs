use crate::handlers;
use crate::state::AppState;
use axum::{routing::get, Router};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::plan))
        .route(
            "/introspection",
            get(handlers::introspection_form).post(handlers::introspection_submit),
        )
        .route("/review", get(handlers::review))
        .route("/api/prompts", get(handlers::get_prompts))
        .route(
            "/api/entries",
            get(handlers::list_entries).post(handlers::post_entry),
        )
        .route("/api/entries/:date", get(handlers::get_entry))
        .with_state(state)
}
