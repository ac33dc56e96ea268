use chrono::{NaiveDateTime, Timelike};

use crate::models::{PrayerSchedule, PrayerType};
use crate::utils::format::{format_countdown, format_time};

/// Time left until a prayer, truncated to whole seconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Countdown {
    pub hours: i64,
    pub minutes: i64,
    pub seconds: i64,
}

impl Countdown {
    fn from_millis(millis: i64) -> Self {
        let millis = millis.max(0);
        Self {
            hours: millis / 3_600_000,
            minutes: (millis % 3_600_000) / 60_000,
            seconds: (millis % 60_000) / 1_000,
        }
    }

    pub fn total_seconds(&self) -> i64 {
        self.hours * 3600 + self.minutes * 60 + self.seconds
    }
}

impl std::fmt::Display for Countdown {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&format_countdown(self.hours, self.minutes, self.seconds))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NextPrayer {
    pub prayer: PrayerType,
    pub target: NaiveDateTime,
    pub remaining: Countdown,
}

impl NextPrayer {
    pub fn label(&self) -> &'static str {
        self.prayer.display_name()
    }

    /// True when the target is tomorrow's dawn.
    pub fn is_tomorrow(&self, now: NaiveDateTime) -> bool {
        self.target.date() > now.date()
    }
}

/// Palette the dashboard paints behind the card.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Background {
    Day,
    Sunset,
    Night,
}

/// First prayer strictly after `now`; tomorrow's Imsak once Isha has passed.
pub fn compute_next_prayer(schedule: &PrayerSchedule, now: NaiveDateTime) -> NextPrayer {
    let today = now.date();

    let upcoming = schedule
        .entries()
        .map(|(prayer, time)| (prayer, today.and_time(time)))
        .find(|(_, target)| *target > now);

    let (prayer, target) = upcoming.unwrap_or_else(|| {
        let dawn = schedule.time(PrayerType::Imsak);
        let tomorrow = today.succ_opt().unwrap_or(today);
        (PrayerType::Imsak, tomorrow.and_time(dawn))
    });

    let remaining = Countdown::from_millis((target - now).num_milliseconds());
    NextPrayer {
        prayer,
        target,
        remaining,
    }
}

pub fn derive_background(now: NaiveDateTime) -> Background {
    match now.hour() {
        6..=16 => Background::Day,
        17..=19 => Background::Sunset,
        _ => Background::Night,
    }
}

/// Fires once, on second zero of a minute that matches a prayer time.
pub fn should_alert(schedule: Option<&PrayerSchedule>, now: NaiveDateTime, muted: bool) -> bool {
    let Some(schedule) = schedule else {
        return false;
    };
    if muted || now.second() != 0 {
        return false;
    }
    let stamp = format_time(now.time());
    schedule.entries().any(|(_, time)| format_time(time) == stamp)
}
