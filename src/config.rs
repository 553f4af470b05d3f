//! Configuration Module
//!
//! Handles loading the item factory configuration from environment variables.

use std::env;

/// How diagnostics are delivered when no logger is supplied explicitly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiagnosticsMode {
    /// Forward message and context to the tracing-backed structured logger
    Structured,
    /// Interpolate the context into the message and emit plain text
    PlainText,
}

impl DiagnosticsMode {
    fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "structured" => Some(DiagnosticsMode::Structured),
            "plain" | "plaintext" | "plain_text" => Some(DiagnosticsMode::PlainText),
            _ => None,
        }
    }
}

/// Cache item configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// Lifetime in seconds applied when an expiration is reset to default
    pub default_lifetime: i64,
    /// Diagnostics delivery strategy
    pub diagnostics: DiagnosticsMode,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `CACHE_DEFAULT_LIFETIME` - Default lifetime in seconds (default: 0, no expiration)
    /// - `CACHE_DIAGNOSTICS` - `structured` or `plain` (default: structured)
    pub fn from_env() -> Self {
        Self {
            default_lifetime: env::var("CACHE_DEFAULT_LIFETIME")
                .ok()
                .and_then(|v| v.trim().parse().ok())
                .unwrap_or(0),
            diagnostics: env::var("CACHE_DIAGNOSTICS")
                .ok()
                .and_then(|v| DiagnosticsMode::parse(&v))
                .unwrap_or(DiagnosticsMode::Structured),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_lifetime: 0,
            diagnostics: DiagnosticsMode::Structured,
        }
    }
}
