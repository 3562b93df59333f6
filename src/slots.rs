//! Bookable date and time slot generation.
//!
//! Pure policy: the generator never consults existing bookings, it only
//! computes which slots the court offers by rule. Occupancy checks are out of
//! scope here.

use chrono::{Datelike, Duration, NaiveDate, Weekday};

/// Slot generation policy.
#[derive(Debug, Clone)]
pub struct SlotPolicy {
    /// Calendar days scanned forward from today, inclusive of today.
    pub window_days: i64,
    /// First bookable hour.
    pub open_hour: u32,
    /// Last bookable hour, inclusive.
    pub close_hour: u32,
    /// Hour excluded for the lunch break.
    pub lunch_hour: u32,
}

impl Default for SlotPolicy {
    fn default() -> Self {
        Self {
            window_days: 14,
            open_hour: 9,
            close_hour: 16,
            lunch_hour: 13,
        }
    }
}

impl SlotPolicy {
    /// Bookable dates: weekdays within the window, ascending `YYYY-MM-DD`.
    pub fn available_dates(&self, today: NaiveDate) -> Vec<String> {
        (0..self.window_days)
            .map(|offset| today + Duration::days(offset))
            .filter(|date| !matches!(date.weekday(), Weekday::Sat | Weekday::Sun))
            .map(|date| date.format("%Y-%m-%d").to_string())
            .collect()
    }

    /// Hourly slots for a date, `"{date} HH:00"`, skipping the lunch hour.
    pub fn available_times(&self, date: &str) -> Vec<String> {
        (self.open_hour..=self.close_hour)
            .filter(|hour| *hour != self.lunch_hour)
            .map(|hour| format!("{date} {hour:02}:00"))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn policy() -> SlotPolicy {
        SlotPolicy::default()
    }

    #[test]
    fn test_dates_are_weekdays_only_and_ascending() {
        // 2026-08-24 is a Monday.
        let monday = NaiveDate::from_ymd_opt(2026, 8, 24).unwrap();
        let dates = policy().available_dates(monday);

        assert_eq!(dates.len(), 10); // two full work weeks in a 14-day window
        for pair in dates.windows(2) {
            assert!(pair[0] < pair[1]);
        }
        for date in &dates {
            let parsed = NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap();
            assert!(!matches!(parsed.weekday(), Weekday::Sat | Weekday::Sun));
        }
    }

    #[test]
    fn test_dates_have_no_duplicates_and_stay_in_window() {
        let saturday = NaiveDate::from_ymd_opt(2026, 8, 29).unwrap();
        let dates = policy().available_dates(saturday);

        let mut deduped = dates.clone();
        deduped.dedup();
        assert_eq!(dates, deduped);

        let last = NaiveDate::parse_from_str(dates.last().unwrap(), "%Y-%m-%d").unwrap();
        assert!(last - saturday < Duration::days(14));
        // A Saturday start is itself excluded.
        assert_ne!(dates[0], "2026-08-29");
    }

    #[test]
    fn test_zero_window_yields_no_dates() {
        let mut p = policy();
        p.window_days = 0;
        let today = NaiveDate::from_ymd_opt(2026, 8, 26).unwrap();
        assert!(p.available_dates(today).is_empty());
    }

    #[test]
    fn test_times_schema() {
        let times = policy().available_times("2026-09-01");

        assert_eq!(times.len(), 7);
        assert_eq!(times[0], "2026-09-01 09:00");
        assert_eq!(times.last().unwrap(), "2026-09-01 16:00");
        for pair in times.windows(2) {
            assert!(pair[0] < pair[1]);
        }
        for slot in &times {
            assert!(slot.starts_with("2026-09-01 "));
            assert!(!slot.ends_with("13:00"));
        }
    }

    #[test]
    fn test_times_ignore_occupancy() {
        // Same answer for any date, regardless of what is already booked.
        let p = policy();
        assert_eq!(
            p.available_times("2026-09-01").len(),
            p.available_times("2026-09-02").len()
        );
    }
}
