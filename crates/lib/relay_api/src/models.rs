//! Request and response bodies.
//!
//! Optional request fields are resolved to their defaults here, at the
//! parsing boundary, before anything reaches the relay.

use std::borrow::Cow;

use relay_core::relay::{ChatTurn, DEFAULT_EMOTION_TYPE, DEFAULT_INTENSITY, DEFAULT_PLAYER_ID};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// `POST /chat` request body.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatRequest {
    pub player_id: Option<String>,
    pub message: Option<String>,
    pub emotion_type: Option<String>,
    pub intensity: Option<f64>,
}

impl From<ChatRequest> for ChatTurn {
    fn from(req: ChatRequest) -> Self {
        Self {
            player_id: req.player_id.unwrap_or_else(|| DEFAULT_PLAYER_ID.to_string()),
            message: req.message.unwrap_or_default(),
            emotion_type: req
                .emotion_type
                .unwrap_or_else(|| DEFAULT_EMOTION_TYPE.to_string()),
            intensity: req.intensity.unwrap_or(DEFAULT_INTENSITY),
        }
    }
}

/// `POST /chat` success body.
#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub reply: String,
}

/// `POST /clear` request body.
///
/// Any JSON value is accepted as `playerId` so clearing never fails on a
/// mistyped identifier; non-strings are keyed by their JSON text.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClearRequest {
    pub player_id: Option<Value>,
}

impl ClearRequest {
    pub fn player_id(&self) -> Cow<'_, str> {
        match &self.player_id {
            None | Some(Value::Null) => Cow::Borrowed(DEFAULT_PLAYER_ID),
            Some(Value::String(s)) => Cow::Borrowed(s.as_str()),
            Some(other) => Cow::Owned(other.to_string()),
        }
    }
}

/// `POST /clear` success body.
#[derive(Debug, Serialize)]
pub struct ClearResponse {
    pub status: String,
}

/// Error body returned for every failed request.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}
