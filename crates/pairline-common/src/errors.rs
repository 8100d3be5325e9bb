use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("config file not found: {0}")]
    FileNotFound(PathBuf),

    #[error("config parse error: {0}")]
    ParseError(String),

    #[error("config validation error: {0}")]
    ValidationError(String),
}

/// Failures surfaced by the conversation log to its callers.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConversationError {
    #[error("invalid payload: {0}")]
    InvalidPayload(String),

    #[error("message not found: {0}")]
    NotFound(String),
}

#[derive(Debug, thiserror::Error)]
pub enum PairlineError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Conversation(#[from] ConversationError),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
