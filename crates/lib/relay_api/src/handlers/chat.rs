//! Chat request handler.

use axum::Json;
use axum::extract::State;
use relay_core::relay::{ChatTurn, RelayError};
use tracing::error;

use crate::AppState;
use crate::error::AppResult;
use crate::extract::JsonBody;
use crate::models::{ChatRequest, ChatResponse};

/// `POST /chat` — record the player's message and return the model's reply.
pub async fn chat_handler(
    State(state): State<AppState>,
    JsonBody(body): JsonBody<ChatRequest>,
) -> AppResult<Json<ChatResponse>> {
    let turn = ChatTurn::from(body);
    let player_id = turn.player_id.clone();

    let reply = state.relay.submit(turn).await.inspect_err(|e| {
        if let RelayError::Upstream(inner) = e {
            error!(%player_id, "completion failed: {inner}");
        }
    })?;

    Ok(Json(ChatResponse { reply }))
}
