//! Conversation log: ordered messages, turn pairing, and the auto-reply timer.

use std::sync::Arc;

use pairline_common::{ConversationError, MessageId};
use serde::Serialize;
use serde_json::Value;
use tokio::sync::Mutex;
use tracing::{debug, info};

use super::timer::ReplyTimer;
use super::REPLY_WINDOW;
use crate::message::Message;

/// Whether an auto-reply is currently pending.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Status {
    pub waiting: bool,
}

struct LogState {
    messages: Vec<Message>,
    /// The trailing message, while it still waits for a reply.
    awaiting: Option<MessageId>,
    /// Armed while `awaiting` is set. `shutdown` is the one exception: it
    /// disarms the timer but keeps `awaiting`, so `status` reports not
    /// waiting while an unpaired trailing turn remains.
    timer: Option<ReplyTimer>,
}

impl LogState {
    fn new() -> Self {
        Self {
            messages: Vec::new(),
            awaiting: None,
            timer: None,
        }
    }

    fn cancel_timer(&mut self) {
        if let Some(timer) = self.timer.take() {
            debug!(turn = %timer.turn(), "Reply timer cancelled");
            timer.cancel();
        }
    }

    /// Link the unpaired trailing `turn` and `reply` to each other.
    fn pair_trailing(&mut self, turn: &MessageId, reply: &mut Message) {
        let trailing = match self.messages.last_mut() {
            Some(message) if message.id() == turn => message,
            _ => panic!("awaiting turn {turn} is not the trailing message"),
        };
        trailing.pair_with(reply.id().clone());
        reply.pair_with(turn.clone());
    }
}

impl Drop for LogState {
    fn drop(&mut self) {
        self.cancel_timer();
    }
}

/// The single shared conversation.
///
/// Cloning yields another handle to the same log. The message sequence and
/// the pending timer live behind one lock, so each pairing step reads and
/// writes them atomically.
#[derive(Clone)]
pub struct ConversationLog {
    state: Arc<Mutex<LogState>>,
}

impl ConversationLog {
    pub fn new() -> Self {
        Self {
            state: Arc::new(Mutex::new(LogState::new())),
        }
    }

    /// Append a message built from `payload`.
    ///
    /// If a turn is awaiting its reply, the new message answers it and the
    /// pending timer is cancelled. Otherwise the message opens a new turn and
    /// arms the auto-reply timer. Returns the stored message, already paired
    /// when it was a reply.
    pub async fn submit(&self, payload: Value) -> Result<Message, ConversationError> {
        let id = MessageId::new();
        let mut message = Message::from_payload(id.clone(), payload)?;

        let mut state = self.state.lock().await;
        match state.awaiting.take() {
            Some(turn) => {
                state.cancel_timer();
                state.pair_trailing(&turn, &mut message);
                info!(id = %id, reply_to = %turn, "Reply paired");
            }
            None => {
                debug_assert!(state.timer.is_none());
                state.timer = Some(self.arm_timer(id.clone()));
                state.awaiting = Some(id.clone());
                info!(id = %id, "Turn opened, awaiting reply");
            }
        }
        state.messages.push(message.clone());

        Ok(message)
    }

    /// Answer `turn` with the placeholder, if it is still unanswered.
    ///
    /// Run by the reply timer only. A timer that was cancelled after it had
    /// already woken up no longer matches the armed timer and does nothing.
    pub(crate) async fn auto_reply(&self, turn: &MessageId) {
        let mut state = self.state.lock().await;
        let still_armed = state.timer.as_ref().is_some_and(|timer| timer.turn() == turn);
        if !still_armed {
            debug!(turn = %turn, "Stale reply timer fired, ignoring");
            return;
        }
        debug_assert_eq!(state.awaiting.as_ref(), Some(turn));
        debug_assert!(state.messages.len() % 2 == 1);

        state.awaiting = None;
        // The running task is this timer; dropping the handle detaches it.
        state.timer = None;

        let mut reply = Message::placeholder(MessageId::new());
        state.pair_trailing(turn, &mut reply);
        info!(id = %reply.id(), reply_to = %turn, "No reply in time, placeholder sent");
        state.messages.push(reply);
    }

    pub async fn status(&self) -> Status {
        let state = self.state.lock().await;
        Status {
            waiting: state.timer.is_some(),
        }
    }

    /// Look up a message by id.
    pub async fn get_message(&self, id: &str) -> Result<Message, ConversationError> {
        let state = self.state.lock().await;
        state
            .messages
            .iter()
            .find(|message| message.id().as_str() == id)
            .cloned()
            .ok_or_else(|| ConversationError::NotFound(id.to_string()))
    }

    /// Snapshot of every message, oldest first.
    pub async fn messages(&self) -> Vec<Message> {
        self.state.lock().await.messages.clone()
    }

    /// Drop every message and cancel any pending auto-reply.
    pub async fn reset(&self) {
        let mut state = self.state.lock().await;
        state.cancel_timer();
        state.awaiting = None;
        let cleared = state.messages.len();
        state.messages.clear();
        info!(cleared, "Conversation reset");
    }

    /// Cancel any pending auto-reply ahead of process exit.
    ///
    /// Messages are kept and the log stays usable: an unanswered trailing
    /// turn can still be paired by a later submit, it just no longer gets a
    /// placeholder.
    pub async fn shutdown(&self) {
        let mut state = self.state.lock().await;
        state.cancel_timer();
        info!(messages = state.messages.len(), "Conversation log shut down");
    }

    fn arm_timer(&self, turn: MessageId) -> ReplyTimer {
        let log = Arc::downgrade(&self.state);
        debug!(turn = %turn, window_secs = REPLY_WINDOW.as_secs(), "Reply timer armed");
        ReplyTimer::arm(REPLY_WINDOW, turn, move |turn| async move {
            if let Some(state) = log.upgrade() {
                ConversationLog { state }.auto_reply(&turn).await;
            }
        })
    }
}

impl Default for ConversationLog {
    fn default() -> Self {
        Self::new()
    }
}
