//! Business date resolution.
//!
//! The upstream feed finalizes a day's numbers some hours after midnight, so a
//! run before the cutoff hour is attributed to the previous calendar day.

use chrono::{DateTime, Duration, NaiveDate, Timelike, Utc};
use chrono_tz::Tz;
use serde::Serialize;

/// File-name key format for business dates
pub const DATE_KEY_FORMAT: &str = "%Y-%m-%d";

/// The pair of business dates a run works with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BusinessDates {
    pub today: NaiveDate,
    pub yesterday: NaiveDate,
}

impl BusinessDates {
    /// Resolve today's and yesterday's business dates for `now`
    pub fn resolve(now: DateTime<Utc>, tz: Tz, cutoff_hour: u32) -> Self {
        let local = now.with_timezone(&tz);

        // Calendar arithmetic on the local date, not 24h on the instant, so DST
        // transitions cannot skip or repeat a day.
        let today = if local.hour() < cutoff_hour {
            local.date_naive() - Duration::days(1)
        } else {
            local.date_naive()
        };

        Self { today, yesterday: today - Duration::days(1) }
    }

    pub fn today_key(&self) -> String {
        date_key(self.today)
    }

    pub fn yesterday_key(&self) -> String {
        date_key(self.yesterday)
    }
}

/// Format a date as `YYYY-MM-DD`
pub fn date_key(date: NaiveDate) -> String {
    date.format(DATE_KEY_FORMAT).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use chrono_tz::America::New_York;

    fn eastern(y: i32, m: u32, d: u32, h: u32, min: u32) -> DateTime<Utc> {
        New_York.with_ymd_and_hms(y, m, d, h, min, 0).unwrap().with_timezone(&Utc)
    }

    #[test]
    fn test_before_cutoff_uses_previous_day() {
        let dates = BusinessDates::resolve(eastern(2025, 1, 15, 8, 59), New_York, 9);
        assert_eq!(dates.today_key(), "2025-01-14");
        assert_eq!(dates.yesterday_key(), "2025-01-13");
    }

    #[test]
    fn test_at_cutoff_uses_current_day() {
        let dates = BusinessDates::resolve(eastern(2025, 1, 15, 9, 0), New_York, 9);
        assert_eq!(dates.today_key(), "2025-01-15");
        assert_eq!(dates.yesterday_key(), "2025-01-14");
    }

    #[test]
    fn test_utc_instant_is_read_in_local_time() {
        // 13:30 UTC is 08:30 EST
        let now = Utc.with_ymd_and_hms(2025, 2, 3, 13, 30, 0).unwrap();
        let dates = BusinessDates::resolve(now, New_York, 9);
        assert_eq!(dates.today_key(), "2025-02-02");
    }

    #[test]
    fn test_month_and_year_boundaries() {
        let dates = BusinessDates::resolve(eastern(2025, 1, 1, 3, 0), New_York, 9);
        assert_eq!(dates.today_key(), "2024-12-31");
        assert_eq!(dates.yesterday_key(), "2024-12-30");

        let dates = BusinessDates::resolve(eastern(2025, 3, 1, 10, 0), New_York, 9);
        assert_eq!(dates.yesterday_key(), "2025-02-28");
    }

    #[test]
    fn test_day_after_spring_forward() {
        // 2025-03-09 02:00 EST jumps to 03:00 EDT; 00:30 on the 10th is less than
        // 24 hours after midnight of the 9th.
        let dates = BusinessDates::resolve(eastern(2025, 3, 10, 0, 30), New_York, 9);
        assert_eq!(dates.today_key(), "2025-03-09");
        assert_eq!(dates.yesterday_key(), "2025-03-08");
    }

    #[test]
    fn test_zero_cutoff_never_shifts() {
        let dates = BusinessDates::resolve(eastern(2025, 1, 15, 0, 0), New_York, 0);
        assert_eq!(dates.today_key(), "2025-01-15");
    }
}
