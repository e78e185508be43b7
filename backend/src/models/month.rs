use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A target scheduling month (month 1..=12, calendar year).
///
/// Selection always runs against a whole month; days are addressed by their
/// 1-based day-of-month number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SchedulingMonth {
    pub month: u32,
    pub year: i32,
}

impl SchedulingMonth {
    /// Create a new scheduling month, validating the month number.
    pub fn new(month: u32, year: i32) -> Option<Self> {
        if (1..=12).contains(&month) {
            Some(SchedulingMonth { month, year })
        } else {
            None
        }
    }

    /// Number of days in this month (leap-aware).
    pub fn days_in_month(&self) -> u8 {
        let first = self.first_date();
        let next_first = if self.month == 12 {
            NaiveDate::from_ymd_opt(self.year + 1, 1, 1)
        } else {
            NaiveDate::from_ymd_opt(self.year, self.month + 1, 1)
        };
        match next_first {
            Some(next) => next.signed_duration_since(first).num_days() as u8,
            None => 31,
        }
    }

    /// Whether `day` is a valid day-of-month number for this month.
    pub fn contains_day(&self, day: u8) -> bool {
        day >= 1 && day <= self.days_in_month()
    }

    /// First calendar date of the month.
    pub fn first_date(&self) -> NaiveDate {
        // month is validated at construction; day 1 always exists
        NaiveDate::from_ymd_opt(self.year, self.month, 1)
            .unwrap_or(NaiveDate::MIN)
    }

    /// Calendar date for a day-of-month number, if valid.
    pub fn date_of(&self, day: u8) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month, day as u32)
    }

    /// The month a given calendar date belongs to.
    pub fn of_date(date: NaiveDate) -> Self {
        SchedulingMonth {
            month: date.month(),
            year: date.year(),
        }
    }
}

impl fmt::Display for SchedulingMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

#[cfg(test)]
mod tests {
    use super::SchedulingMonth;
    use chrono::NaiveDate;

    #[test]
    fn test_new_validates_month() {
        assert!(SchedulingMonth::new(1, 2026).is_some());
        assert!(SchedulingMonth::new(12, 2026).is_some());
        assert!(SchedulingMonth::new(0, 2026).is_none());
        assert!(SchedulingMonth::new(13, 2026).is_none());
    }

    #[test]
    fn test_days_in_month() {
        assert_eq!(SchedulingMonth::new(1, 2026).unwrap().days_in_month(), 31);
        assert_eq!(SchedulingMonth::new(4, 2026).unwrap().days_in_month(), 30);
        assert_eq!(SchedulingMonth::new(2, 2026).unwrap().days_in_month(), 28);
    }

    #[test]
    fn test_days_in_leap_february() {
        assert_eq!(SchedulingMonth::new(2, 2024).unwrap().days_in_month(), 29);
    }

    #[test]
    fn test_days_in_december_crosses_year() {
        assert_eq!(SchedulingMonth::new(12, 2026).unwrap().days_in_month(), 31);
    }

    #[test]
    fn test_contains_day() {
        let month = SchedulingMonth::new(2, 2026).unwrap();
        assert!(month.contains_day(1));
        assert!(month.contains_day(28));
        assert!(!month.contains_day(0));
        assert!(!month.contains_day(29));
    }

    #[test]
    fn test_date_of() {
        let month = SchedulingMonth::new(3, 2026).unwrap();
        assert_eq!(
            month.date_of(5),
            NaiveDate::from_ymd_opt(2026, 3, 5)
        );
        assert_eq!(month.date_of(32), None);
    }

    #[test]
    fn test_of_date_round_trip() {
        let date = NaiveDate::from_ymd_opt(2026, 7, 14).unwrap();
        let month = SchedulingMonth::of_date(date);
        assert_eq!(month, SchedulingMonth::new(7, 2026).unwrap());
        assert_eq!(month.date_of(14), Some(date));
    }

    #[test]
    fn test_display() {
        let month = SchedulingMonth::new(3, 2026).unwrap();
        assert_eq!(month.to_string(), "2026-03");
    }
}
