//! Conversation pairing engine.
//!
//! A [`ConversationLog`] keeps one ordered sequence of messages. Submitted
//! messages alternate between opening a turn and answering it; a turn left
//! unanswered for [`REPLY_WINDOW`] receives a placeholder reply.
//!
//! ```rust,no_run
//! use pairline_core::ConversationLog;
//! use serde_json::json;
//!
//! # async fn demo() -> Result<(), pairline_core::ConversationError> {
//! let log = ConversationLog::new();
//! let hello = log.submit(json!({ "message": "hi" })).await?;
//! assert!(log.status().await.waiting);
//!
//! let answer = log.submit(json!({ "message": "yo" })).await?;
//! assert_eq!(answer.reply_id(), Some(hello.id()));
//! # Ok(())
//! # }
//! ```

pub mod conversation;
pub mod message;

pub use conversation::{ConversationLog, Status, REPLY_WINDOW};
pub use message::{Message, PLACEHOLDER_TEXT};
pub use pairline_common::{ConversationError, MessageId};
