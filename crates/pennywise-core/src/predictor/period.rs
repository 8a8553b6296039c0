//! Calendar-month helpers

use chrono::{Datelike, Months, NaiveDate};

/// Year + month, ordered chronologically
pub type MonthKey = (i32, u32);

pub fn month_key(date: NaiveDate) -> MonthKey {
    (date.year(), date.month())
}

/// First day of the month containing `date`
pub fn month_start(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

/// Number of days in the month containing `date`
pub fn days_in_month(date: NaiveDate) -> u32 {
    let start = month_start(date);
    match start.checked_add_months(Months::new(1)) {
        Some(next) => (next - start).num_days() as u32,
        // Only reachable at the very end of chrono's date range
        None => 31,
    }
}

/// First days of the `n` full months preceding the month of `date`,
/// oldest first
pub fn preceding_months(date: NaiveDate, n: u32) -> Vec<MonthKey> {
    let start = month_start(date);
    (1..=n)
        .rev()
        .filter_map(|back| start.checked_sub_months(Months::new(back)))
        .map(month_key)
        .collect()
}

/// Human label like "2024-03"
pub fn month_label(date: NaiveDate) -> String {
    date.format("%Y-%m").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn test_days_in_month() {
        assert_eq!(days_in_month(d(2024, 2, 10)), 29);
        assert_eq!(days_in_month(d(2023, 2, 1)), 28);
        assert_eq!(days_in_month(d(2024, 4, 30)), 30);
        assert_eq!(days_in_month(d(2024, 12, 31)), 31);
    }

    #[test]
    fn test_preceding_months_crosses_year() {
        assert_eq!(
            preceding_months(d(2024, 2, 15), 3),
            vec![(2023, 11), (2023, 12), (2024, 1)]
        );
    }

    #[test]
    fn test_month_key_ordering() {
        assert!(month_key(d(2023, 12, 31)) < month_key(d(2024, 1, 1)));
        assert_eq!(month_label(d(2024, 3, 9)), "2024-03");
    }
}
