use chrono::{Datelike, NaiveDate, NaiveTime, Timelike, Weekday};

/// Format a NaiveTime to "HH:MM"
pub fn format_time(t: NaiveTime) -> String {
    t.format("%H:%M").to_string()
}

/// Live clock, "HH:MM:SS"
pub fn format_clock(t: NaiveTime) -> String {
    format!("{:02}:{:02}:{:02}", t.hour(), t.minute(), t.second())
}

/// Turkish short date, "19.10.2026"
pub fn format_date(d: NaiveDate) -> String {
    d.format("%d.%m.%Y").to_string()
}

/// Countdown as "H:MM:SS"; hours are not padded.
pub fn format_countdown(hours: i64, minutes: i64, seconds: i64) -> String {
    format!("{}:{:02}:{:02}", hours, minutes, seconds)
}

pub fn weekday_name(d: NaiveDate) -> &'static str {
    match d.weekday() {
        Weekday::Mon => "Pazartesi",
        Weekday::Tue => "Salı",
        Weekday::Wed => "Çarşamba",
        Weekday::Thu => "Perşembe",
        Weekday::Fri => "Cuma",
        Weekday::Sat => "Cumartesi",
        Weekday::Sun => "Pazar",
    }
}

pub fn is_friday(d: NaiveDate) -> bool {
    d.weekday() == Weekday::Fri
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn countdown_pads_minutes_and_seconds_only() {
        assert_eq!(format_countdown(1, 5, 9), "1:05:09");
        assert_eq!(format_countdown(12, 0, 0), "12:00:00");
        assert_eq!(format_countdown(0, 0, 7), "0:00:07");
    }

    #[test]
    fn turkish_dates() {
        let d = NaiveDate::from_ymd_opt(2026, 10, 23).unwrap();
        assert_eq!(format_date(d), "23.10.2026");
        assert_eq!(weekday_name(d), "Cuma");
        assert!(is_friday(d));
        assert!(!is_friday(d.succ_opt().unwrap()));
    }

    #[test]
    fn clock_and_time() {
        let t = NaiveTime::from_hms_opt(7, 4, 3).unwrap();
        assert_eq!(format_time(t), "07:04");
        assert_eq!(format_clock(t), "07:04:03");
    }
}
