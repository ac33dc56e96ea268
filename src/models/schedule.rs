use anyhow::{anyhow, Result};
use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::models::PrayerType;
use crate::utils::hijri::hijri_month_name;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HijriDate {
    pub day: u32,
    pub month: u32,
    pub year: i32,
}

impl HijriDate {
    /// "14 Rebiülahir 1448"
    pub fn formatted(&self) -> String {
        match hijri_month_name(self.month) {
            Some(name) => format!("{} {} {}", self.day, name, self.year),
            None => format!("{} {} {}", self.day, self.month, self.year),
        }
    }
}

/// One city's times for one calendar day.
///
/// Built once from a successful fetch and swapped in as a whole; there are
/// no setters.
#[derive(Debug, Clone, PartialEq)]
pub struct PrayerSchedule {
    city: String,
    times: [NaiveTime; 6],
    hijri: HijriDate,
    timezone: Option<String>,
    gregorian: Option<NaiveDate>,
}

impl PrayerSchedule {
    /// `times` must hold every prayer exactly once, in any order.
    pub fn new(
        city: impl Into<String>,
        times: &[(PrayerType, NaiveTime)],
        hijri: HijriDate,
    ) -> Result<Self> {
        let mut slots: [Option<NaiveTime>; 6] = [None; 6];
        for (prayer, time) in times {
            let slot = &mut slots[index_of(*prayer)];
            if slot.is_some() {
                return Err(anyhow!("Duplicate time for {}", prayer.api_key()));
            }
            *slot = Some(*time);
        }

        let mut resolved = [NaiveTime::MIN; 6];
        for (prayer, slot) in PrayerType::all().zip(slots) {
            resolved[index_of(prayer)] =
                slot.ok_or_else(|| anyhow!("Missing time for {}", prayer.api_key()))?;
        }

        Ok(Self {
            city: city.into(),
            times: resolved,
            hijri,
            timezone: None,
            gregorian: None,
        })
    }

    pub fn with_timezone(mut self, timezone: Option<String>) -> Self {
        self.timezone = timezone;
        self
    }

    pub fn with_gregorian(mut self, date: Option<NaiveDate>) -> Self {
        self.gregorian = date;
        self
    }

    pub fn city(&self) -> &str {
        &self.city
    }

    pub fn time(&self, prayer: PrayerType) -> NaiveTime {
        self.times[index_of(prayer)]
    }

    /// All six entries in chronological order.
    pub fn entries(&self) -> impl Iterator<Item = (PrayerType, NaiveTime)> + '_ {
        PrayerType::all().map(|p| (p, self.time(p)))
    }

    pub fn hijri(&self) -> &HijriDate {
        &self.hijri
    }

    /// IANA zone name the API computed the times in, if it said.
    pub fn timezone(&self) -> Option<&str> {
        self.timezone.as_deref()
    }

    pub fn gregorian(&self) -> Option<NaiveDate> {
        self.gregorian
    }
}

fn index_of(prayer: PrayerType) -> usize {
    match prayer {
        PrayerType::Imsak => 0,
        PrayerType::Sunrise => 1,
        PrayerType::Dhuhr => 2,
        PrayerType::Asr => 3,
        PrayerType::Maghrib => 4,
        PrayerType::Isha => 5,
    }
}


#[cfg(test)]
mod tests {
    use super::fixtures::*;
    use super::*;

    #[test]
    fn entries_follow_prayer_order() {
        let schedule = sample_schedule();
        let order: Vec<_> = schedule.entries().map(|(p, _)| p).collect();
        assert_eq!(order, PrayerType::ALL.to_vec());
        assert_eq!(schedule.time(PrayerType::Asr), hm(15, 45));
    }

    #[test]
    fn rejects_incomplete_schedule() {
        let err = PrayerSchedule::new(
            "Sakarya",
            &[(PrayerType::Imsak, hm(5, 0))],
            HijriDate { day: 1, month: 1, year: 1448 },
        )
        .unwrap_err();
        assert!(err.to_string().contains("Sunrise"));
    }

    #[test]
    fn rejects_duplicate_entry() {
        let mut times: Vec<_> = sample_schedule().entries().collect();
        times.push((PrayerType::Isha, hm(20, 0)));
        let hijri = HijriDate { day: 1, month: 1, year: 1448 };
        assert!(PrayerSchedule::new("Sakarya", &times, hijri).is_err());
    }

    #[test]
    fn hijri_uses_turkish_month_names() {
        let date = HijriDate { day: 1, month: 9, year: 1447 };
        assert_eq!(date.formatted(), "1 Ramazan 1447");
        let odd = HijriDate { day: 1, month: 13, year: 1447 };
        assert_eq!(odd.formatted(), "1 13 1447");
    }
}
