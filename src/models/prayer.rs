use serde::{Deserialize, Serialize};

/// The six daily times, in the order they occur.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PrayerType {
    Imsak,
    Sunrise,
    Dhuhr,
    Asr,
    Maghrib,
    Isha,
}

impl PrayerType {
    pub const ALL: [PrayerType; 6] = [
        PrayerType::Imsak,
        PrayerType::Sunrise,
        PrayerType::Dhuhr,
        PrayerType::Asr,
        PrayerType::Maghrib,
        PrayerType::Isha,
    ];

    pub fn all() -> impl Iterator<Item = PrayerType> {
        Self::ALL.into_iter()
    }

    /// Key used by the Aladhan `timings` object.
    pub fn api_key(&self) -> &'static str {
        match self {
            PrayerType::Imsak => "Imsak",
            PrayerType::Sunrise => "Sunrise",
            PrayerType::Dhuhr => "Dhuhr",
            PrayerType::Asr => "Asr",
            PrayerType::Maghrib => "Maghrib",
            PrayerType::Isha => "Isha",
        }
    }

    /// Turkish label shown in the dashboard.
    pub fn display_name(&self) -> &'static str {
        match self {
            PrayerType::Imsak => "İmsak",
            PrayerType::Sunrise => "Güneş",
            PrayerType::Dhuhr => "Öğle",
            PrayerType::Asr => "İkindi",
            PrayerType::Maghrib => "Akşam",
            PrayerType::Isha => "Yatsı",
        }
    }
}

impl std::fmt::Display for PrayerType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}
