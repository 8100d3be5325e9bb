//! Pairline configuration.
//!
//! TOML-based configuration for the HTTP service. Every section uses serde
//! defaults so a partial file (or no file at all) works out of the box.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use pairline_config::{load_default, validation};
//!
//! let config = load_default().expect("failed to load config");
//! validation::validate(&config).expect("invalid config");
//! println!("listening on {}", config.server.bind_addr());
//! ```

pub mod schema;
pub mod toml_loader;
pub mod validation;

pub use schema::{LogLevel, LoggingConfig, PairlineConfig, ServerConfig};
pub use toml_loader::{load_default, load_from_path};
