//! Configuration schema types for Pairline.
//!
//! All structs use `serde(default)` so partial configs work correctly.

mod server;
mod system;

pub use server::*;
pub use system::*;

use serde::{Deserialize, Serialize};

/// Root configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PairlineConfig {
    pub server: ServerConfig,
    pub logging: LoggingConfig,
}
