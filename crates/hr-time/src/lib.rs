//! Simple wrappers to make many time related errors hard to make

#![warn(unused_crate_dependencies)]

use anyhow::{bail, Context};
use chrono::{DateTime, SecondsFormat, Utc};
use std::{fmt::Display, time::Duration};

/// Intended to be similar to Duration but always clear that it is in Seconds
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize, PartialOrd, Ord,
)]
pub struct Seconds(u64);

/// Seconds since the unix epoch. Keeps on ticking if the computer is sleeping
/// and only works with date/time after the epoch
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize, PartialOrd, Ord,
)]
pub struct Timestamp(u64);

impl Timestamp {
    pub fn now() -> Self {
        Self(
            web_time::SystemTime::UNIX_EPOCH
                .elapsed()
                .map(|x| x.as_secs())
                // Clock set before the epoch, treat as the epoch so nothing is considered valid
                .unwrap_or_default(),
        )
    }

    pub const fn from_unix_secs(secs: u64) -> Self {
        Self(secs)
    }

    /// Sub-second precision is dropped
    pub const fn from_unix_millis(millis: u64) -> Self {
        Self(millis / 1000)
    }

    pub fn as_utc_datetime(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.0.try_into().ok()?, 0)
    }

    pub fn as_local_datetime(&self) -> Option<DateTime<chrono::Local>> {
        self.as_utc_datetime().map(Into::into)
    }

    pub fn display_as_locale_datetime(&self) -> String {
        match self.as_local_datetime() {
            Some(dt) => dt.format("%c").to_string(),
            None => format!("{} seconds after the epoch", self.0),
        }
    }

    /// Format used when persisting the timestamp as text
    pub fn to_rfc3339(&self) -> String {
        match self.as_utc_datetime() {
            Some(dt) => dt.to_rfc3339_opts(SecondsFormat::Secs, true),
            None => self.0.to_string(),
        }
    }

    /// Accepts the formats the backends have been seen to produce for expiry
    /// dates:
    /// - RFC 3339 (`2025-01-31T10:00:00Z`, `2025-01-31T10:00:00.000+07:00`)
    /// - ISO 8601 with a compact offset (`2025-01-31T10:00:00.000+0000`)
    /// - milliseconds since the epoch as a string of digits
    pub fn parse(value: &str) -> anyhow::Result<Self> {
        let value = value.trim();
        if value.is_empty() {
            bail!("empty string is not a timestamp");
        }
        if value.bytes().all(|b| b.is_ascii_digit()) {
            let millis: u64 = value
                .parse()
                .with_context(|| format!("timestamp out of range: {value:?}"))?;
            return Ok(Self::from_unix_millis(millis));
        }
        let parsed = DateTime::parse_from_rfc3339(value)
            .or_else(|_| DateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f%z"))
            .with_context(|| format!("unrecognized timestamp format: {value:?}"))?;
        Self::try_from(parsed.with_timezone(&Utc))
    }

    /// Returns the number of seconds since `past_time` or None if `past_time`
    /// is in the future
    pub fn seconds_since(self, past_time: Self) -> Option<Seconds> {
        if self.0 < past_time.0 {
            None
        } else {
            Some(self - past_time)
        }
    }

    /// Returns the number of seconds until this timestamp or None if it has
    /// already passed
    pub fn remaining(self) -> Option<Seconds> {
        self.seconds_since(Self::now())
    }
}

impl TryFrom<DateTime<Utc>> for Timestamp {
    type Error = anyhow::Error;

    fn try_from(value: DateTime<Utc>) -> Result<Self, Self::Error> {
        let secs = value.timestamp();
        match u64::try_from(secs) {
            Ok(secs) => Ok(Self(secs)),
            Err(_) => bail!("dates before the unix epoch are not supported. Found: {value}"),
        }
    }
}

impl std::ops::Add<Seconds> for Timestamp {
    type Output = Self;

    fn add(self, rhs: Seconds) -> Self::Output {
        Self(self.0.saturating_add(rhs.0))
    }
}

impl std::ops::Sub<Seconds> for Timestamp {
    type Output = Self;

    fn sub(self, rhs: Seconds) -> Self::Output {
        Self(self.0.saturating_sub(rhs.0))
    }
}

impl std::ops::Sub for Timestamp {
    type Output = Seconds;

    fn sub(self, rhs: Self) -> Self::Output {
        Seconds::new(self.0.saturating_sub(rhs.0))
    }
}

impl Display for Timestamp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_rfc3339())
    }
}

impl Seconds {
    pub const fn new(value: u64) -> Self {
        Self(value)
    }
}

impl From<u64> for Seconds {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

impl From<Seconds> for Duration {
    fn from(value: Seconds) -> Self {
        Duration::from_secs(value.0)
    }
}

impl From<Duration> for Seconds {
    fn from(value: Duration) -> Self {
        value.as_secs().into()
    }
}

impl std::ops::Add for Seconds {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0 + rhs.0)
    }
}

impl Display for Seconds {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}
