//! Item Factory Module
//!
//! Construction path pools use to mint cache items with a shared default
//! lifetime, clock and diagnostics strategy.

use std::fmt::Display;
use std::sync::Arc;

use serde_json::{json, Value};
use tracing::debug;

use crate::cache::{CacheItem, Clock, Context, Diagnostics, SystemClock};
use crate::config::{Config, DiagnosticsMode};

// == Item Factory ==
/// Mints cache items for a pool.
#[derive(Debug, Clone)]
pub struct ItemFactory {
    /// Lifetime applied when an item's expiration is reset to default
    default_lifetime: i64,
    clock: Arc<dyn Clock>,
    diagnostics: Diagnostics,
}

impl ItemFactory {
    // == Constructor ==
    /// Creates a factory using the system clock and tracing diagnostics.
    ///
    /// # Arguments
    /// * `default_lifetime` - Seconds applied when an expiration is reset to default
    pub fn new(default_lifetime: i64) -> Self {
        Self {
            default_lifetime,
            clock: Arc::new(SystemClock),
            diagnostics: Diagnostics::tracing(),
        }
    }

    /// Creates a factory from loaded configuration.
    pub fn from_config(config: &Config) -> Self {
        let diagnostics = match config.diagnostics {
            DiagnosticsMode::Structured => Diagnostics::tracing(),
            DiagnosticsMode::PlainText => Diagnostics::PlainText,
        };

        Self::new(config.default_lifetime).with_diagnostics(diagnostics)
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn with_diagnostics(mut self, diagnostics: Diagnostics) -> Self {
        self.diagnostics = diagnostics;
        self
    }

    pub fn default_lifetime(&self) -> i64 {
        self.default_lifetime
    }

    pub fn diagnostics(&self) -> &Diagnostics {
        &self.diagnostics
    }

    // == Miss ==
    /// Creates an item for a key that was not found.
    pub fn miss<V>(&self, key: impl Into<String>) -> CacheItem<V> {
        CacheItem::miss(key.into(), self.default_lifetime, self.clock.clone())
    }

    // == Hit ==
    /// Creates an item holding a value found by a lookup.
    pub fn hit<V>(&self, key: impl Into<String>, value: V) -> CacheItem<V> {
        CacheItem::hit(key.into(), value, self.default_lifetime, self.clock.clone())
    }

    // == Hydrate ==
    /// Creates an item from a decoded backend record.
    ///
    /// A record that failed to decode is reported as a warning and yields a miss.
    pub fn hydrate<V, E: Display>(
        &self,
        key: impl Into<String>,
        decoded: Result<V, E>,
    ) -> CacheItem<V> {
        let key = key.into();

        match decoded {
            Ok(value) => self.hit(key, value),
            Err(error) => {
                self.report_unhydratable(&key, &error);
                self.miss(key)
            }
        }
    }

    /// Reports a backend record that could not be turned into a value.
    pub fn report_unhydratable(&self, key: &str, error: &dyn Display) {
        debug!("Treating {} as a miss after decode failure", key);

        let context: Context = match json!({ "key": key, "error": error.to_string() }) {
            Value::Object(map) => map,
            _ => Context::new(),
        };
        self.diagnostics
            .warn("Failed to unserialize key \"{key}\": {error}", &context);
    }
}

impl Default for ItemFactory {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}
