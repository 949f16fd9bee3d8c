//! Error types for the mend configuration reconciler.
//!
//! Reconciliation itself never fails; the only fallible surface is parsing
//! configuration text at the conversion boundary.

use thiserror::Error;

/// Errors produced when parsing configuration documents into `ConfigValue`.
#[derive(Debug, Error)]
pub enum ValueError {
    #[error("invalid JSON configuration: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid TOML configuration: {0}")]
    Toml(#[from] toml::de::Error),
}
