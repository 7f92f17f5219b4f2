//! Default clock and relative-time formatter

use chrono::{DateTime, Utc};

use crate::domain::ports::{Clock, RelativeTimeFormatter, RelativeUnit};

/// Wall clock
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// English phrasing: "5 minutes ago", "in 1 day", "just now"
pub struct EnglishRelativeTime;

impl RelativeTimeFormatter for EnglishRelativeTime {
    fn format(&self, amount: i64, unit: RelativeUnit) -> Option<String> {
        if amount == 0 {
            return Some("just now".to_string());
        }

        let count = amount.unsigned_abs();
        let plural = if count == 1 { "" } else { "s" };
        let phrase = format!("{} {}{}", count, unit.name(), plural);

        if amount < 0 {
            Some(format!("{} ago", phrase))
        } else {
            Some(format!("in {}", phrase))
        }
    }
}
