use axum::{
    routing::{get, patch, post, put},
    Router,
};

use crate::state::AppState;

pub mod dto;
pub mod handlers;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/portfolio", get(handlers::get_portfolio))
        .route("/portfolio/reload", post(handlers::reload))
        .route("/content/:field", put(handlers::update_content))
        .route("/collections/:collection", post(handlers::add_entity))
        .route(
            "/collections/:collection/:id",
            patch(handlers::update_entity).delete(handlers::remove_entity),
        )
        .route("/comments", post(handlers::submit_comment))
}
