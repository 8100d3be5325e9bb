//! Pairing and auto-reply behavior of the conversation log.

use std::time::Duration;

use pairline_common::ConversationError;
use serde_json::{json, Value};

use super::{ConversationLog, Status, REPLY_WINDOW};
use crate::message::{Message, PLACEHOLDER_TEXT};

fn text(message: &str) -> Value {
    json!({ "message": message })
}

async fn past_window() {
    tokio::time::sleep(REPLY_WINDOW + Duration::from_secs(1)).await;
}

/// Every message but an odd trailing one is paired, and pairs (2k, 2k+1)
/// point at each other.
fn assert_pairing(messages: &[Message]) {
    for pair in messages.chunks(2) {
        match pair {
            [turn, reply] => {
                assert_eq!(turn.reply_id(), Some(reply.id()));
                assert_eq!(reply.reply_id(), Some(turn.id()));
            }
            [trailing] => assert!(!trailing.is_paired()),
            _ => unreachable!(),
        }
    }
}

#[tokio::test(start_paused = true)]
async fn first_submit_opens_a_turn() {
    let log = ConversationLog::new();

    let first = log.submit(text("hi")).await.unwrap();

    assert!(first.reply_id().is_none());
    assert_eq!(first.text(), "hi");
    assert_eq!(log.status().await, Status { waiting: true });
}

#[tokio::test(start_paused = true)]
async fn second_submit_answers_the_first() {
    let log = ConversationLog::new();
    let hi = log.submit(text("hi")).await.unwrap();

    let yo = log.submit(text("yo")).await.unwrap();

    assert_eq!(yo.reply_id(), Some(hi.id()));
    let hi = log.get_message(hi.id().as_str()).await.unwrap();
    assert_eq!(hi.reply_id(), Some(yo.id()));
    assert!(!log.status().await.waiting);
}

#[tokio::test(start_paused = true)]
async fn turns_alternate_across_many_submissions() {
    let log = ConversationLog::new();

    for n in 1..=7 {
        let message = log.submit(text(&format!("message {n}"))).await.unwrap();
        assert_eq!(message.is_paired(), n % 2 == 0);
        assert_eq!(log.status().await.waiting, n % 2 == 1);

        let messages = log.messages().await;
        assert_eq!(messages.len(), n);
        assert_pairing(&messages);
    }
}

#[tokio::test(start_paused = true)]
async fn unanswered_turn_gets_placeholder_after_window() {
    let log = ConversationLog::new();
    let hi = log.submit(text("hi")).await.unwrap();

    past_window().await;

    let hi = log.get_message(hi.id().as_str()).await.unwrap();
    let placeholder_id = hi.reply_id().expect("turn should be answered");
    let placeholder = log.get_message(placeholder_id.as_str()).await.unwrap();
    assert_eq!(placeholder.reply_id(), Some(hi.id()));
    assert_eq!(placeholder.text(), PLACEHOLDER_TEXT);
    assert_eq!(log.messages().await.len(), 2);
    assert!(!log.status().await.waiting);
}

#[tokio::test(start_paused = true)]
async fn no_placeholder_before_window_elapses() {
    let log = ConversationLog::new();
    log.submit(text("hi")).await.unwrap();

    tokio::time::sleep(REPLY_WINDOW - Duration::from_secs(1)).await;

    assert_eq!(log.messages().await.len(), 1);
    assert!(log.status().await.waiting);
}

#[tokio::test(start_paused = true)]
async fn reply_in_time_cancels_the_timer() {
    let log = ConversationLog::new();
    log.submit(text("hi")).await.unwrap();
    tokio::time::sleep(Duration::from_secs(30)).await;
    log.submit(text("yo")).await.unwrap();

    tokio::time::sleep(REPLY_WINDOW * 2).await;

    let messages = log.messages().await;
    assert_eq!(messages.len(), 2);
    assert!(messages.iter().all(|m| m.text() != PLACEHOLDER_TEXT));
    assert_pairing(&messages);
}

#[tokio::test(start_paused = true)]
async fn late_firing_after_reply_is_a_no_op() {
    let log = ConversationLog::new();
    let hi = log.submit(text("hi")).await.unwrap();
    log.submit(text("yo")).await.unwrap();

    log.auto_reply(hi.id()).await;

    assert_eq!(log.messages().await.len(), 2);
}

#[tokio::test(start_paused = true)]
async fn late_firing_does_not_answer_a_newer_turn() {
    let log = ConversationLog::new();
    let first = log.submit(text("one")).await.unwrap();
    log.submit(text("two")).await.unwrap();
    let third = log.submit(text("three")).await.unwrap();

    log.auto_reply(first.id()).await;

    let messages = log.messages().await;
    assert_eq!(messages.len(), 3);
    assert!(!messages[2].is_paired());
    assert!(log.status().await.waiting);

    past_window().await;
    let third = log.get_message(third.id().as_str()).await.unwrap();
    assert!(third.is_paired());
    assert_eq!(log.messages().await.len(), 4);
}

#[tokio::test(start_paused = true)]
async fn auto_reply_on_empty_log_is_a_no_op() {
    let log = ConversationLog::new();

    log.auto_reply(&pairline_common::MessageId::new()).await;

    assert!(log.messages().await.is_empty());
    assert!(!log.status().await.waiting);
}

#[tokio::test(start_paused = true)]
async fn submit_after_placeholder_opens_a_new_turn() {
    let log = ConversationLog::new();
    log.submit(text("hi")).await.unwrap();
    past_window().await;

    let next = log.submit(text("anyone?")).await.unwrap();

    assert!(next.reply_id().is_none());
    assert!(log.status().await.waiting);
    let messages = log.messages().await;
    assert_eq!(messages.len(), 3);
    assert_pairing(&messages);
}

#[tokio::test(start_paused = true)]
async fn get_message_returns_what_submit_returned() {
    let log = ConversationLog::new();
    let submitted = log
        .submit(json!({ "message": "hi", "author": "ana" }))
        .await
        .unwrap();

    let fetched = log.get_message(submitted.id().as_str()).await.unwrap();

    assert_eq!(fetched, submitted);
    assert_eq!(fetched.payload()["author"], "ana");
}

#[tokio::test(start_paused = true)]
async fn unknown_id_is_not_found() {
    let log = ConversationLog::new();
    log.submit(text("hi")).await.unwrap();

    let err = log.get_message("no-such-id").await.unwrap_err();

    assert_eq!(err, ConversationError::NotFound("no-such-id".into()));
}

#[tokio::test(start_paused = true)]
async fn invalid_payload_leaves_log_untouched() {
    let log = ConversationLog::new();

    for payload in [json!({}), json!({ "message": "" }), json!([1, 2])] {
        let err = log.submit(payload).await.unwrap_err();
        assert!(matches!(err, ConversationError::InvalidPayload(_)));
    }

    assert!(log.messages().await.is_empty());
    assert!(!log.status().await.waiting);
}

#[tokio::test(start_paused = true)]
async fn invalid_payload_does_not_count_as_a_reply() {
    let log = ConversationLog::new();
    log.submit(text("hi")).await.unwrap();

    assert!(log.submit(json!({ "author": "ana" })).await.is_err());

    assert!(log.status().await.waiting);
    assert_eq!(log.messages().await.len(), 1);
}

#[tokio::test(start_paused = true)]
async fn reset_restores_a_fresh_log() {
    let log = ConversationLog::new();
    log.submit(text("hi")).await.unwrap();
    log.submit(text("yo")).await.unwrap();
    log.submit(text("again")).await.unwrap();

    log.reset().await;
    past_window().await;

    let fresh = ConversationLog::new();
    assert_eq!(log.messages().await, fresh.messages().await);
    assert_eq!(log.status().await, fresh.status().await);
}

#[tokio::test(start_paused = true)]
async fn submit_after_reset_starts_over() {
    let log = ConversationLog::new();
    log.submit(text("hi")).await.unwrap();
    log.reset().await;

    let first = log.submit(text("hello again")).await.unwrap();

    assert!(first.reply_id().is_none());
    assert!(log.status().await.waiting);
    past_window().await;
    assert_eq!(log.messages().await.len(), 2);
}

#[tokio::test(start_paused = true)]
async fn shutdown_cancels_pending_auto_reply() {
    let log = ConversationLog::new();
    let hi = log.submit(text("hi")).await.unwrap();

    log.shutdown().await;
    past_window().await;

    assert!(!log.status().await.waiting);
    assert_eq!(log.messages().await.len(), 1);

    // The unanswered turn can still be answered by hand.
    let yo = log.submit(text("yo")).await.unwrap();
    assert_eq!(yo.reply_id(), Some(hi.id()));
}

#[tokio::test(start_paused = true)]
async fn shutdown_without_pending_timer_is_harmless() {
    let log = ConversationLog::new();

    log.shutdown().await;
    log.shutdown().await;

    assert!(!log.status().await.waiting);
}

#[tokio::test(start_paused = true)]
async fn dropping_last_handle_cancels_timer() {
    let runtime = tokio::runtime::Handle::current();
    let log = ConversationLog::new();
    log.submit(text("hi")).await.unwrap();
    let other = log.clone();
    assert_eq!(runtime.metrics().num_alive_tasks(), 1);

    drop(log);
    tokio::time::sleep(Duration::from_millis(1)).await;
    assert_eq!(runtime.metrics().num_alive_tasks(), 1);

    drop(other);
    tokio::time::sleep(Duration::from_millis(1)).await;
    assert_eq!(runtime.metrics().num_alive_tasks(), 0);
}

#[tokio::test(start_paused = true)]
async fn clones_share_one_conversation() {
    let log = ConversationLog::new();
    let other = log.clone();

    let hi = log.submit(text("hi")).await.unwrap();
    let yo = other.submit(text("yo")).await.unwrap();

    assert_eq!(yo.reply_id(), Some(hi.id()));
    assert_eq!(log.messages().await, other.messages().await);
}
