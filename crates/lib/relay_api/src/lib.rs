//! # relay_api
//!
//! HTTP API library for the chat relay.

pub mod config;
pub mod error;
pub mod extract;
pub mod handlers;
pub mod models;
pub mod routes;

use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::routing::post;
use relay_core::relay::ChatRelay;
use tower_http::cors::{Any, CorsLayer};

use crate::handlers::{chat, clear};

/// Maximum accepted request body size (10 MB).
pub const MAX_BODY_BYTES: usize = 10 * 1024 * 1024;

/// Shared application state passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Relay wired to the history store and completion client.
    pub relay: ChatRelay,
}

/// Builds the Axum router with all routes and shared state.
pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route(routes::POST_CHAT, post(chat::chat_handler))
        .route(routes::POST_CLEAR, post(clear::clear_handler))
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(cors)
        .with_state(state)
}
