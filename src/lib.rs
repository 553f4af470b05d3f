//! Cache Item - the entry value object handed out by cache pools
//!
//! Pairs a key with an optional value, a hit flag and a lifetime that can be
//! set from an absolute instant or a relative duration.

pub mod cache;
pub mod config;
pub mod error;

pub use cache::{CacheItem, Expiration, Interval, ItemFactory};
pub use config::Config;
pub use error::{CacheError, Result};
