//! Clock and relative-time formatting ports
//!
//! Both are injected so notification timestamps can be computed
//! deterministically in tests.

use chrono::{DateTime, Utc};

/// Source of the current time
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Unit of a relative time phrase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelativeUnit {
    Second,
    Minute,
    Hour,
    Day,
    Week,
    Month,
    Year,
}

impl RelativeUnit {
    /// Length of one unit in seconds. Months are 30 days and years 365.
    pub fn seconds(self) -> i64 {
        match self {
            RelativeUnit::Second => 1,
            RelativeUnit::Minute => 60,
            RelativeUnit::Hour => 3_600,
            RelativeUnit::Day => 86_400,
            RelativeUnit::Week => 7 * 86_400,
            RelativeUnit::Month => 30 * 86_400,
            RelativeUnit::Year => 365 * 86_400,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            RelativeUnit::Second => "second",
            RelativeUnit::Minute => "minute",
            RelativeUnit::Hour => "hour",
            RelativeUnit::Day => "day",
            RelativeUnit::Week => "week",
            RelativeUnit::Month => "month",
            RelativeUnit::Year => "year",
        }
    }
}

/// Locale-aware relative time phrasing.
///
/// `amount` is negative for the past (`-5, Minute` is "5 minutes ago").
/// Returning `None` tells the caller to fall back to an absolute date.
pub trait RelativeTimeFormatter: Send + Sync {
    fn format(&self, amount: i64, unit: RelativeUnit) -> Option<String>;
}
