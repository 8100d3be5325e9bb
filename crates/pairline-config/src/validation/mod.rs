//! Configuration validation.
//!
//! Each check pushes a message onto a shared error list; the orchestrator
//! folds them into a single `ConfigError`.

mod helpers;

#[cfg(test)]
mod tests;

use crate::schema::PairlineConfig;
use pairline_common::ConfigError;

use helpers::validate_range;

/// Run all validations on a config, collecting all errors.
pub fn validate(config: &PairlineConfig) -> Result<(), ConfigError> {
    let mut errors: Vec<String> = Vec::new();

    validate_server(&mut errors, config);

    if errors.is_empty() {
        Ok(())
    } else {
        Err(ConfigError::ValidationError(errors.join("; ")))
    }
}

fn validate_server(errors: &mut Vec<String>, config: &PairlineConfig) {
    if config.server.host.trim().is_empty() {
        errors.push("server.host must not be empty".into());
    }
    validate_range(
        errors,
        "server.port",
        u32::from(config.server.port),
        1024,
        65535,
    );
}
