//! Chat relay — validates a turn, records it, asks the completion API for a
//! reply and records that too.

use std::sync::Arc;

use thiserror::Error;
use tracing::{debug, info, warn};

use crate::completion::{CompletionError, CompletionProvider};
use crate::history::{HistoryStore, Message};

/// Player identifier used when the client does not send one.
pub const DEFAULT_PLAYER_ID: &str = "default";

/// Emotion used when the client does not send one.
pub const DEFAULT_EMOTION_TYPE: &str = "general";

/// Emotion intensity used when the client does not send one.
pub const DEFAULT_INTENSITY: f64 = 5.0;

/// Reply substituted when the completion API returns no usable content.
pub const FALLBACK_REPLY: &str = "I couldn't generate a reply.";

/// Errors surfaced by [`ChatRelay::submit`].
#[derive(Debug, Error)]
pub enum RelayError {
    #[error("Message is required")]
    BadRequest,

    #[error(transparent)]
    Upstream(#[from] CompletionError),
}

/// One chat turn as submitted by a game client, defaults already applied.
#[derive(Debug, Clone, PartialEq)]
pub struct ChatTurn {
    pub player_id: String,
    /// Empty when the client sent no message.
    pub message: String,
    pub emotion_type: String,
    pub intensity: f64,
}

impl Default for ChatTurn {
    fn default() -> Self {
        Self {
            player_id: DEFAULT_PLAYER_ID.to_string(),
            message: String::new(),
            emotion_type: DEFAULT_EMOTION_TYPE.to_string(),
            intensity: DEFAULT_INTENSITY,
        }
    }
}

impl ChatTurn {
    /// The synthesized system message describing the player's mood.
    ///
    /// Never stored in history.
    pub fn framing_message(&self) -> Message {
        Message::system(format!(
            "The user feels {} with intensity {}.",
            self.emotion_type, self.intensity
        ))
    }
}

/// Relays chat turns between players and the completion API.
#[derive(Clone)]
pub struct ChatRelay {
    store: Arc<dyn HistoryStore>,
    completion: Arc<dyn CompletionProvider>,
}

impl ChatRelay {
    pub fn new(store: Arc<dyn HistoryStore>, completion: Arc<dyn CompletionProvider>) -> Self {
        Self { store, completion }
    }

    /// Submit a turn and return the assistant's reply.
    ///
    /// The user message is recorded before the outbound call and is kept if
    /// that call fails.
    pub async fn submit(&self, turn: ChatTurn) -> Result<String, RelayError> {
        if turn.message.is_empty() {
            return Err(RelayError::BadRequest);
        }

        let history = self
            .store
            .append(&turn.player_id, Message::user(turn.message.as_str()));
        debug!(player_id = %turn.player_id, history_len = history.len(), "recorded user message");

        let mut messages = Vec::with_capacity(history.len() + 1);
        messages.push(turn.framing_message());
        messages.extend(history);

        let reply = match self.completion.complete(&messages).await? {
            Some(reply) => reply,
            None => {
                warn!(player_id = %turn.player_id, "completion returned no content, using fallback");
                FALLBACK_REPLY.to_string()
            }
        };

        self.store
            .append(&turn.player_id, Message::assistant(reply.as_str()));
        info!(player_id = %turn.player_id, "chat turn completed");

        Ok(reply)
    }

    /// Reset the player's history and return a confirmation.
    pub fn clear(&self, player_id: &str) -> String {
        self.store.clear(player_id);
        info!(%player_id, "chat history cleared");
        format!("Chat history cleared for {player_id}.")
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;

    use super::*;
    use crate::history::{MemoryHistoryStore, Role};

    /// Completion stub that replays a fixed outcome and records every request.
    struct StubCompletion {
        outcome: fn() -> Result<Option<String>, CompletionError>,
        requests: Mutex<Vec<Vec<Message>>>,
    }

    impl StubCompletion {
        fn new(outcome: fn() -> Result<Option<String>, CompletionError>) -> Arc<Self> {
            Arc::new(Self {
                outcome,
                requests: Mutex::new(Vec::new()),
            })
        }

        fn requests(&self) -> Vec<Vec<Message>> {
            self.requests.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl CompletionProvider for StubCompletion {
        async fn complete(
            &self,
            messages: &[Message],
        ) -> Result<Option<String>, CompletionError> {
            self.requests.lock().unwrap().push(messages.to_vec());
            (self.outcome)()
        }
    }

    fn hello() -> Result<Option<String>, CompletionError> {
        Ok(Some("Hello!".into()))
    }

    fn empty() -> Result<Option<String>, CompletionError> {
        Ok(None)
    }

    fn failing() -> Result<Option<String>, CompletionError> {
        Err(CompletionError::Request("connection refused".into()))
    }

    fn relay_with(
        outcome: fn() -> Result<Option<String>, CompletionError>,
    ) -> (ChatRelay, Arc<MemoryHistoryStore>, Arc<StubCompletion>) {
        let store = Arc::new(MemoryHistoryStore::new());
        let stub = StubCompletion::new(outcome);
        let relay = ChatRelay::new(store.clone(), stub.clone());
        (relay, store, stub)
    }

    fn turn(player_id: &str, message: &str) -> ChatTurn {
        ChatTurn {
            player_id: player_id.into(),
            message: message.into(),
            ..ChatTurn::default()
        }
    }

    #[test]
    fn framing_message_renders_integral_intensity() {
        let msg = ChatTurn::default().framing_message();
        assert_eq!(msg.role, Role::System);
        assert_eq!(msg.content, "The user feels general with intensity 5.");
    }

    #[test]
    fn framing_message_renders_fractional_intensity() {
        let turn = ChatTurn {
            emotion_type: "angry".into(),
            intensity: 7.5,
            ..ChatTurn::default()
        };
        assert_eq!(
            turn.framing_message().content,
            "The user feels angry with intensity 7.5."
        );
    }

    #[tokio::test]
    async fn empty_message_is_rejected_without_side_effects() {
        let (relay, store, stub) = relay_with(hello);
        let err = relay.submit(turn("p1", "")).await.unwrap_err();
        assert!(matches!(err, RelayError::BadRequest));
        assert!(!store.contains("p1"));
        assert!(stub.requests().is_empty());
    }

    #[tokio::test]
    async fn successful_turn_appends_user_and_assistant() {
        let (relay, store, _stub) = relay_with(hello);
        let reply = relay.submit(turn("p1", "hi")).await.unwrap();
        assert_eq!(reply, "Hello!");
        assert_eq!(
            store.history("p1"),
            vec![Message::user("hi"), Message::assistant("Hello!")]
        );
    }

    #[tokio::test]
    async fn follow_up_sends_full_history_in_order() {
        let (relay, _store, stub) = relay_with(hello);
        relay.submit(turn("p1", "hi")).await.unwrap();
        relay.submit(turn("p1", "again")).await.unwrap();

        let requests = stub.requests();
        assert_eq!(requests.len(), 2);
        assert_eq!(
            requests[1],
            vec![
                Message::system("The user feels general with intensity 5."),
                Message::user("hi"),
                Message::assistant("Hello!"),
                Message::user("again"),
            ]
        );
    }

    #[tokio::test]
    async fn framing_message_is_never_stored() {
        let (relay, store, _stub) = relay_with(hello);
        relay.submit(turn("p1", "hi")).await.unwrap();
        relay.submit(turn("p1", "again")).await.unwrap();
        assert!(store.history("p1").iter().all(|m| m.role != Role::System));
        assert_eq!(store.history("p1").len(), 4);
    }

    #[tokio::test]
    async fn missing_content_falls_back() {
        let (relay, store, _stub) = relay_with(empty);
        let reply = relay.submit(turn("p1", "hi")).await.unwrap();
        assert_eq!(reply, FALLBACK_REPLY);
        assert_eq!(
            store.history("p1").last(),
            Some(&Message::assistant(FALLBACK_REPLY))
        );
    }

    #[tokio::test]
    async fn upstream_failure_keeps_user_message() {
        let (relay, store, _stub) = relay_with(failing);
        let err = relay.submit(turn("p1", "hi")).await.unwrap_err();
        assert!(matches!(err, RelayError::Upstream(_)));
        assert!(err.to_string().contains("connection refused"));
        assert_eq!(store.history("p1"), vec![Message::user("hi")]);
    }

    #[tokio::test]
    async fn players_do_not_see_each_other() {
        let (relay, _store, stub) = relay_with(hello);
        relay.submit(turn("p1", "secret")).await.unwrap();
        relay.submit(turn("p2", "hello")).await.unwrap();

        let second = &stub.requests()[1];
        assert!(second.iter().all(|m| m.content != "secret"));
        assert_eq!(second.len(), 2);
    }

    #[tokio::test]
    async fn clear_empties_history_and_confirms() {
        let (relay, store, _stub) = relay_with(hello);
        relay.submit(turn("p1", "hi")).await.unwrap();
        let status = relay.clear("p1");
        assert_eq!(status, "Chat history cleared for p1.");
        assert!(store.history("p1").is_empty());

        relay.submit(turn("p1", "fresh")).await.unwrap();
        assert_eq!(store.history("p1").len(), 2);
    }
}
