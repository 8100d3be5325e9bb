//! Router construction and the serve loop.

use std::future::Future;

use axum::routing::{get, post};
use axum::Router;
use pairline_common::PairlineError;
use pairline_core::ConversationLog;
use tokio::net::TcpListener;

use crate::api;

/// Build the router with every route bound to `log`.
pub fn router(log: ConversationLog) -> Router {
    Router::new()
        .route("/", get(api::hello))
        .route("/waiting", get(api::waiting))
        .route("/messages", get(api::list_messages))
        .route("/messages/{id}", get(api::get_message))
        .route("/message", post(api::create_message))
        .with_state(log)
}

/// Serve until `shutdown` resolves, then cancel any pending auto-reply.
pub async fn serve<F>(
    listener: TcpListener,
    log: ConversationLog,
    shutdown: F,
) -> Result<(), PairlineError>
where
    F: Future<Output = ()> + Send + 'static,
{
    let app = router(log.clone());

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await?;

    log.shutdown().await;
    Ok(())
}

/// Resolves on Ctrl-C.
pub async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "Failed to listen for Ctrl-C");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown requested");
}
