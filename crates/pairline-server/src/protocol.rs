//! JSON bodies the HTTP layer sends besides messages themselves.

use serde::Serialize;

/// A one-line status or error notice.
#[derive(Debug, Serialize)]
pub struct Notice {
    pub message: String,
}

impl Notice {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// A notice with extra context, used for lookups that miss.
#[derive(Debug, Serialize)]
pub struct DetailedNotice {
    pub message: String,
    pub details: String,
}
