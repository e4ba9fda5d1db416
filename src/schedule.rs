use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, NaiveTime, Weekday};

/// Orders placed after Tuesday 14:30 roll over to the following week's
/// delivery.
pub const CUTOFF_WEEKDAY: Weekday = Weekday::Tue;
pub const CUTOFF_HOUR: u32 = 14;
pub const CUTOFF_MINUTE: u32 = 30;

/// Whether `now` falls past this week's order cutoff.
pub fn is_after_cutoff(now: NaiveDateTime) -> bool {
    let weekday = now.weekday().num_days_from_monday();
    let cutoff_weekday = CUTOFF_WEEKDAY.num_days_from_monday();
    if weekday != cutoff_weekday {
        return weekday > cutoff_weekday;
    }
    let cutoff = NaiveTime::from_hms_opt(CUTOFF_HOUR, CUTOFF_MINUTE, 0)
        .unwrap_or(NaiveTime::MIN);
    now.time() >= cutoff
}

/// The earliest Saturday an order placed at `now` can be delivered.
///
/// Always a future Saturday: ordering on a Saturday, or past the cutoff,
/// pushes delivery to the next week.
pub fn default_delivery_saturday(now: NaiveDateTime) -> NaiveDate {
    let today = now.date();
    let days_from_sunday = today.weekday().num_days_from_sunday();
    let mut days_until_saturday = (6 + 7 - days_from_sunday) % 7;
    if days_until_saturday == 0 || is_after_cutoff(now) {
        days_until_saturday += 7;
    }
    today + Duration::days(days_until_saturday as i64)
}

/// The next `weeks` delivery Saturdays starting from `first`.
pub fn delivery_options(first: NaiveDate, weeks: usize) -> Vec<NaiveDate> {
    (0..weeks)
        .map(|w| first + Duration::weeks(w as i64))
        .collect()
}

/// English ordinal suffix: 1st, 2nd, 3rd, 4th, ... 11th, 12th, 13th.
pub fn ordinal(n: u32) -> &'static str {
    if (11..=13).contains(&(n % 100)) {
        return "th";
    }
    match n % 10 {
        1 => "st",
        2 => "nd",
        3 => "rd",
        _ => "th",
    }
}

/// Long-form date label, e.g. "Saturday, 9th November".
pub fn format_long(date: NaiveDate) -> String {
    format!(
        "{}, {}{} {}",
        date.format("%A"),
        date.day(),
        ordinal(date.day()),
        date.format("%B"),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(date: (i32, u32, u32), time: (u32, u32)) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(date.0, date.1, date.2)
            .unwrap()
            .and_hms_opt(time.0, time.1, 0)
            .unwrap()
    }

    #[test]
    fn test_cutoff_boundary() {
        // 2024-11-05 is a Tuesday.
        assert!(!is_after_cutoff(at((2024, 11, 5), (14, 29))));
        assert!(is_after_cutoff(at((2024, 11, 5), (14, 30))));
        assert!(!is_after_cutoff(at((2024, 11, 4), (23, 59))));
        assert!(is_after_cutoff(at((2024, 11, 6), (0, 0))));
    }

    #[test]
    fn test_default_saturday_before_and_after_cutoff() {
        // Monday before cutoff: this week's Saturday.
        let before = default_delivery_saturday(at((2024, 11, 4), (9, 0)));
        assert_eq!(before, NaiveDate::from_ymd_opt(2024, 11, 9).unwrap());

        // Wednesday, past cutoff: next week's Saturday.
        let after = default_delivery_saturday(at((2024, 11, 6), (9, 0)));
        assert_eq!(after, NaiveDate::from_ymd_opt(2024, 11, 16).unwrap());

        // A Saturday itself is never offered for same-day delivery.
        let saturday = default_delivery_saturday(at((2024, 11, 9), (8, 0)));
        assert_eq!(saturday, NaiveDate::from_ymd_opt(2024, 11, 16).unwrap());
    }

    #[test]
    fn test_delivery_options_weekly() {
        let first = NaiveDate::from_ymd_opt(2024, 11, 9).unwrap();
        let options = delivery_options(first, 3);
        assert_eq!(options.len(), 3);
        assert_eq!(options[1], NaiveDate::from_ymd_opt(2024, 11, 16).unwrap());
        assert_eq!(options[2], NaiveDate::from_ymd_opt(2024, 11, 23).unwrap());
    }

    #[test]
    fn test_format_long_with_ordinals() {
        let date = NaiveDate::from_ymd_opt(2024, 11, 9).unwrap();
        assert_eq!(format_long(date), "Saturday, 9th November");

        assert_eq!(ordinal(1), "st");
        assert_eq!(ordinal(22), "nd");
        assert_eq!(ordinal(3), "rd");
        assert_eq!(ordinal(11), "th");
        assert_eq!(ordinal(13), "th");
        assert_eq!(ordinal(21), "st");
    }
}
