//! Serde helpers for request payloads.
//!
//! A patch field for a nullable column has three states: key missing (keep
//! the stored value), `null` (clear it) and a concrete value (overwrite).
//! Plain `Option<T>` collapses the first two, so nullable patch fields are
//! declared as `Option<Option<T>>` with:
//!
//! ```ignore
//! #[serde(default, deserialize_with = "common::serde_helpers::double_option")]
//! pub email: Option<Option<String>>,
//! ```

use chrono::{NaiveTime, Timelike};
use serde::{de, Deserialize, Deserializer};

/// Deserialize a present key into `Some(..)`, keeping `null` as `Some(None)`.
/// Combined with `#[serde(default)]` a missing key stays `None`.
pub fn double_option<'de, T, D>(de: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(de).map(Some)
}

/// Parse `HH:MM` or `HH:MM:SS`. Fractional seconds are accepted but dropped,
/// so `10:00` and `10:00:00.5` name the same slot.
pub fn parse_time(s: &str) -> Option<NaiveTime> {
    let s = s.trim();
    NaiveTime::parse_from_str(s, "%H:%M:%S%.f")
        .or_else(|_| NaiveTime::parse_from_str(s, "%H:%M"))
        .ok()
        .and_then(|t| t.with_nanosecond(0))
}

/// Optional time field accepting both `HH:MM` and `HH:MM:SS`.
/// Use with `#[serde(default, deserialize_with = "...")]`.
pub fn opt_time<'de, D>(de: D) -> Result<Option<NaiveTime>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<String>::deserialize(de)? {
        None => Ok(None),
        Some(raw) => parse_time(&raw)
            .map(Some)
            .ok_or_else(|| de::Error::custom(format!("invalid time `{raw}`, expected HH:MM or HH:MM:SS"))),
    }
}
