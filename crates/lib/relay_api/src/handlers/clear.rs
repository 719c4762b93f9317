//! History reset handler.

use axum::Json;
use axum::extract::State;

use crate::AppState;
use crate::error::AppResult;
use crate::extract::JsonBody;
use crate::models::{ClearRequest, ClearResponse};

/// `POST /clear` — empty the player's chat history.
pub async fn clear_handler(
    State(state): State<AppState>,
    JsonBody(body): JsonBody<ClearRequest>,
) -> AppResult<Json<ClearResponse>> {
    let status = state.relay.clear(&body.player_id());
    Ok(Json(ClearResponse { status }))
}
