//! Cache Module
//!
//! Provides the cache item value object and the ports it depends on:
//! a clock, expiration arguments and diagnostics.

mod clock;
mod diagnostics;
mod expiration;
mod factory;
mod item;

#[cfg(test)]
mod property_tests;

// Re-export public types
pub use clock::{Clock, FixedClock, SystemClock};
pub use diagnostics::{interpolate, Context, Diagnostics, Logger, TracingLogger};
pub use expiration::{Expiration, Interval};
pub use factory::ItemFactory;
pub use item::{CacheItem, ItemRecord, EXPIRED_LIFETIME};
