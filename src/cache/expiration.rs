//! Expiration Module
//!
//! The argument accepted by the item expiration setters: reset to default,
//! an absolute instant, a relative interval or a raw number of seconds.

use chrono::{DateTime, Datelike, Days, Months, NaiveDate, TimeDelta, TimeZone, Utc};
use serde_json::Value;

use crate::error::{CacheError, Result};

// == Interval ==
/// Relative duration resolved against the current instant.
///
/// Calendar months are applied first, then the exact delta, so a one month
/// interval spans 28 to 31 days depending on when it is resolved. A day that
/// does not exist in the target month rolls over into the next one
/// (Jan 31 + 1 month is Mar 2 or Mar 3).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Interval {
    months: i32,
    delta: TimeDelta,
}

impl Interval {
    /// Creates an interval of calendar months plus an exact delta.
    pub fn new(months: i32, delta: TimeDelta) -> Self {
        Self { months, delta }
    }

    /// Creates an interval of calendar months only.
    pub fn months(months: i32) -> Self {
        Self::new(months, TimeDelta::zero())
    }

    /// Returns a copy with `delta` added to the exact part.
    pub fn with_delta(self, delta: TimeDelta) -> Self {
        Self {
            months: self.months,
            delta: self.delta + delta,
        }
    }

    // == Resolve ==
    /// Number of seconds between `now` and `now + self`.
    ///
    /// # Errors
    /// `InvalidArgument` if the target instant falls outside the representable range.
    pub fn seconds_from(&self, now: i64) -> Result<i64> {
        let out_of_range =
            || CacheError::InvalidArgument("Expiration interval is out of range".to_string());

        let start = DateTime::<Utc>::from_timestamp(now, 0).ok_or_else(out_of_range)?;
        let target = shift_months(start, self.months)
            .and_then(|instant| instant.checked_add_signed(self.delta))
            .ok_or_else(out_of_range)?;

        Ok(target.timestamp() - now)
    }
}

/// Moves `start` by whole months, keeping the day of month and carrying any
/// overflow past the end of the target month into the following days.
fn shift_months(start: DateTime<Utc>, months: i32) -> Option<DateTime<Utc>> {
    let total = i64::from(start.year()) * 12 + i64::from(start.month0()) + i64::from(months);
    let year = i32::try_from(total.div_euclid(12)).ok()?;
    let month = u32::try_from(total.rem_euclid(12)).ok()? + 1;

    let date = NaiveDate::from_ymd_opt(year, month, 1)?
        .checked_add_days(Days::new(u64::from(start.day0())))?;

    Some(date.and_time(start.time()).and_utc())
}

impl From<TimeDelta> for Interval {
    fn from(delta: TimeDelta) -> Self {
        Self::new(0, delta)
    }
}

impl From<Months> for Interval {
    fn from(months: Months) -> Self {
        // Months above i32::MAX overflow any DateTime anyway
        Self::months(i32::try_from(months.as_u32()).unwrap_or(i32::MAX))
    }
}

// == Expiration ==
/// Expiration argument for `CacheItem::expires_at` and `CacheItem::expires_after`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Expiration {
    /// Reset to the item's default lifetime
    Default,
    /// Expire at an absolute instant
    At(DateTime<Utc>),
    /// Expire once the interval has elapsed from now
    After(Interval),
    /// Expire after a raw number of seconds
    Seconds(i64),
}

impl Expiration {
    /// Short name of the variant, used in error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Expiration::Default => "default",
            Expiration::At(_) => "instant",
            Expiration::After(_) => "interval",
            Expiration::Seconds(_) => "seconds",
        }
    }
}

impl<Tz: TimeZone> From<DateTime<Tz>> for Expiration {
    fn from(instant: DateTime<Tz>) -> Self {
        Expiration::At(instant.with_timezone(&Utc))
    }
}

impl From<Interval> for Expiration {
    fn from(interval: Interval) -> Self {
        Expiration::After(interval)
    }
}

impl From<TimeDelta> for Expiration {
    fn from(delta: TimeDelta) -> Self {
        Expiration::After(delta.into())
    }
}

impl From<Months> for Expiration {
    fn from(months: Months) -> Self {
        Expiration::After(months.into())
    }
}

impl From<i64> for Expiration {
    fn from(seconds: i64) -> Self {
        Expiration::Seconds(seconds)
    }
}

impl From<i32> for Expiration {
    fn from(seconds: i32) -> Self {
        Expiration::Seconds(seconds.into())
    }
}

impl<T: Into<Expiration>> From<Option<T>> for Expiration {
    fn from(expiration: Option<T>) -> Self {
        expiration.map_or(Expiration::Default, Into::into)
    }
}

// == Dynamic Input ==
/// Converts loosely typed input: `null` resets to default, integers are
/// seconds and RFC 3339 strings are instants.
///
/// Whether the converted kind is accepted is up to the setter it is passed to.
impl TryFrom<&Value> for Expiration {
    type Error = CacheError;

    fn try_from(value: &Value) -> Result<Self> {
        let rejected = CacheError::unsupported_expiration;

        match value {
            Value::Null => Ok(Expiration::Default),
            Value::Number(number) => number
                .as_i64()
                .map(Expiration::Seconds)
                .ok_or_else(|| {
                    rejected(if number.is_f64() {
                        "float"
                    } else {
                        "integer out of range"
                    })
                }),
            Value::String(raw) => DateTime::parse_from_rfc3339(raw)
                .map(Expiration::from)
                .map_err(|_| rejected("string")),
            Value::Bool(_) => Err(rejected("boolean")),
            Value::Array(_) => Err(rejected("array")),
            Value::Object(_) => Err(rejected("object")),
        }
    }
}

impl TryFrom<Value> for Expiration {
    type Error = CacheError;

    fn try_from(value: Value) -> Result<Self> {
        Expiration::try_from(&value)
    }
}
