use chrono::{Datelike, NaiveDateTime, Timelike};

/// Clock window on whole hours. Half-open: a timestamp exactly on a
/// boundary belongs to the later window.
#[derive(Copy, Clone, Eq, PartialEq)]
pub struct HourWindow {
    /// Inclusive.
    pub start: u32,

    /// Exclusive.
    pub end: u32,
}

impl HourWindow {
    pub const fn new(start: u32, end: u32) -> Self {
        Self { start, end }
    }

    #[must_use]
    pub fn contains(self, at: NaiveDateTime) -> bool {
        self.contains_hour(at.hour())
    }

    #[must_use]
    pub const fn contains_hour(self, hour: u32) -> bool {
        (self.start <= hour) && (hour < self.end)
    }
}

pub const MORNING_PEAK: HourWindow = HourWindow::new(7, 9);
pub const EVENING_PEAK: HourWindow = HourWindow::new(17, 21);

#[must_use]
pub fn is_weekend(at: NaiveDateTime) -> bool {
    at.weekday().number_from_monday() >= 6
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    fn at(hour: u32, minute: u32, second: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 7, 3)
            .unwrap()
            .and_hms_opt(hour, minute, second)
            .unwrap()
    }

    #[test]
    fn test_boundary_belongs_to_later_window() {
        let daytime = HourWindow::new(7, 21);
        assert!(!daytime.contains(at(6, 59, 59)));
        assert!(daytime.contains(at(7, 0, 0)));
        assert!(daytime.contains(at(20, 59, 59)));
        assert!(!daytime.contains(at(21, 0, 0)));
    }

    #[test]
    fn test_is_weekend() {
        // 2024-07-06 is a Saturday.
        let saturday = NaiveDate::from_ymd_opt(2024, 7, 6).unwrap().and_hms_opt(12, 0, 0).unwrap();
        assert!(is_weekend(saturday));
        assert!(!is_weekend(at(12, 0, 0)));
    }
}
