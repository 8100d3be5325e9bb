//! Cancellable deferred auto-reply.

use std::future::Future;
use std::time::Duration;

use pairline_common::MessageId;
use tokio::task::JoinHandle;

/// A scheduled auto-reply for one specific unpaired turn.
///
/// The task is told which turn it was armed for so it can re-check, at fire
/// time, that the turn is still unanswered.
pub(crate) struct ReplyTimer {
    turn: MessageId,
    handle: JoinHandle<()>,
}

impl ReplyTimer {
    /// Spawn a task that sleeps for `window` and then runs `on_fire(turn)`.
    pub(crate) fn arm<F, Fut>(window: Duration, turn: MessageId, on_fire: F) -> Self
    where
        F: FnOnce(MessageId) -> Fut + Send + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        let target = turn.clone();
        let handle = tokio::spawn(async move {
            tokio::time::sleep(window).await;
            on_fire(target).await;
        });
        Self { turn, handle }
    }

    pub(crate) fn turn(&self) -> &MessageId {
        &self.turn
    }

    /// Abort the task. If it already woke up, its guard check turns the
    /// late firing into a no-op.
    pub(crate) fn cancel(self) {
        self.handle.abort();
    }
}
