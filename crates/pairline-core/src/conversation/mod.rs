//! The shared conversation log and its pending-reply timer.

mod store;
mod timer;

#[cfg(test)]
mod tests;

use std::time::Duration;

pub use store::{ConversationLog, Status};

/// How long an opened turn waits for a real reply before a placeholder is
/// appended on its behalf.
pub const REPLY_WINDOW: Duration = Duration::from_secs(60);
