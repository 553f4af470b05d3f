//! Cache Item Module
//!
//! A single key's cached state for one read-modify-save cycle: the key, an
//! optional value, the hit flag and the lifetime the pool persists it with.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::cache::{Clock, Expiration};
use crate::error::{CacheError, Result};

/// Lifetime stored for an expiration that resolves to exactly now.
pub const EXPIRED_LIFETIME: i64 = -1;

// == Cache Item ==
/// One cache entry as handed out by a pool.
///
/// Items are minted by [`ItemFactory`](crate::cache::ItemFactory); the key and
/// hit flag cannot change afterwards.
pub struct CacheItem<V> {
    key: String,
    value: Option<V>,
    is_hit: bool,
    /// Seconds to live, `None` until an expiration is set
    lifetime: Option<i64>,
    default_lifetime: i64,
    clock: Arc<dyn Clock>,
}

/// What the persistence layer stores once an item is saved.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemRecord<V> {
    pub key: String,
    pub value: Option<V>,
    pub is_hit: bool,
    /// `None` means apply the pool's default; otherwise never `0`.
    pub lifetime: Option<i64>,
}

impl<V> CacheItem<V> {
    // == Constructors ==
    pub(crate) fn miss(key: String, default_lifetime: i64, clock: Arc<dyn Clock>) -> Self {
        Self {
            key,
            value: None,
            is_hit: false,
            lifetime: None,
            default_lifetime,
            clock,
        }
    }

    pub(crate) fn hit(key: String, value: V, default_lifetime: i64, clock: Arc<dyn Clock>) -> Self {
        Self {
            value: Some(value),
            is_hit: true,
            ..Self::miss(key, default_lifetime, clock)
        }
    }

    // == Accessors ==
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Returns the held value, or `None` if nothing was set.
    pub fn get(&self) -> Option<&V> {
        self.value.as_ref()
    }

    /// Whether the item was populated by a successful lookup.
    pub fn is_hit(&self) -> bool {
        self.is_hit
    }

    /// Lifetime the pool persists this item with.
    ///
    /// `None` until an expiration is set; never `Some(0)`.
    pub fn lifetime(&self) -> Option<i64> {
        self.lifetime
    }

    pub fn default_lifetime(&self) -> i64 {
        self.default_lifetime
    }

    // == Set ==
    /// Replaces the held value.
    pub fn set(&mut self, value: V) -> &mut Self {
        self.value = Some(value);
        self
    }

    // == Expires At ==
    /// Sets the lifetime from an absolute instant, or resets it to the default.
    ///
    /// An instant in the past keeps its negative delta; an instant equal to
    /// now is stored as [`EXPIRED_LIFETIME`].
    ///
    /// # Errors
    /// `InvalidArgument` for relative expirations or input that does not
    /// convert; the lifetime is left untouched.
    pub fn expires_at<E>(&mut self, expiration: E) -> Result<&mut Self>
    where
        E: TryInto<Expiration>,
        CacheError: From<E::Error>,
    {
        let lifetime = match expiration.try_into()? {
            Expiration::Default => self.default_lifetime,
            Expiration::At(instant) => non_zero(instant.timestamp() - self.clock.now()),
            other @ (Expiration::After(_) | Expiration::Seconds(_)) => {
                return Err(CacheError::invalid_expiration(
                    "a point in time or default",
                    other.kind(),
                ));
            }
        };

        self.lifetime = Some(lifetime);
        Ok(self)
    }

    // == Expires After ==
    /// Sets the lifetime relative to now, or resets it to the default.
    ///
    /// A zero interval or zero seconds is stored as [`EXPIRED_LIFETIME`].
    ///
    /// # Errors
    /// `InvalidArgument` for absolute instants, out of range intervals or
    /// input that does not convert; the lifetime is left untouched.
    pub fn expires_after<E>(&mut self, expiration: E) -> Result<&mut Self>
    where
        E: TryInto<Expiration>,
        CacheError: From<E::Error>,
    {
        let lifetime = match expiration.try_into()? {
            Expiration::Default => self.default_lifetime,
            Expiration::After(interval) => non_zero(interval.seconds_from(self.clock.now())?),
            Expiration::Seconds(seconds) => non_zero(seconds),
            other @ Expiration::At(_) => {
                return Err(CacheError::invalid_expiration(
                    "an integer, an interval or default",
                    other.kind(),
                ));
            }
        };

        self.lifetime = Some(lifetime);
        Ok(self)
    }

    /// Consumes the item into the record the persistence layer stores.
    pub fn into_record(self) -> ItemRecord<V> {
        ItemRecord {
            key: self.key,
            value: self.value,
            is_hit: self.is_hit,
            lifetime: self.lifetime,
        }
    }
}

fn non_zero(lifetime: i64) -> i64 {
    if lifetime == 0 {
        EXPIRED_LIFETIME
    } else {
        lifetime
    }
}

impl<V: fmt::Debug> fmt::Debug for CacheItem<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CacheItem")
            .field("key", &self.key)
            .field("value", &self.value)
            .field("is_hit", &self.is_hit)
            .field("lifetime", &self.lifetime)
            .field("default_lifetime", &self.default_lifetime)
            .finish_non_exhaustive()
    }
}
