use std::time::Duration;

use chrono::{NaiveDate, NaiveTime};
use log::debug;
use serde::Deserialize;
use thiserror::Error;

use crate::config::ApiConfig;
use crate::models::{HijriDate, PrayerSchedule, PrayerType};

const SUCCESS_CODE: i64 = 200;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("API returned code {code}: {message}")]
    Status { code: i64, message: String },

    #[error("unexpected response: {0}")]
    Malformed(String),
}

/// Anything that can produce a day's schedule for a city.
pub trait ScheduleSource: Send + Sync {
    fn fetch(&self, city: &str) -> Result<PrayerSchedule, FetchError>;
}

/// Blocking client for `api.aladhan.com/v1/timingsByCity`.
pub struct AladhanClient {
    client: reqwest::blocking::Client,
    base_url: String,
    country: String,
    method: u8,
}

impl AladhanClient {
    pub fn new(api: &ApiConfig, country: &str) -> Result<Self, FetchError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(api.timeout_secs))
            .user_agent(concat!("vakit/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            base_url: api.base_url.trim_end_matches('/').to_string(),
            country: country.to_string(),
            method: api.method,
        })
    }
}

impl ScheduleSource for AladhanClient {
    fn fetch(&self, city: &str) -> Result<PrayerSchedule, FetchError> {
        let url = format!("{}/timingsByCity", self.base_url);
        let method = self.method.to_string();
        debug!("GET {} city={} country={} method={}", url, city, self.country, method);

        let response = self
            .client
            .get(&url)
            .query(&[
                ("city", city),
                ("country", self.country.as_str()),
                ("method", method.as_str()),
            ])
            .send()?;

        let http_status = response.status();
        let body = response.text()?;

        match parse_timings_response(city, &body) {
            Err(FetchError::Malformed(_)) if !http_status.is_success() => Err(FetchError::Status {
                code: i64::from(http_status.as_u16()),
                message: http_status.to_string(),
            }),
            other => other,
        }
    }
}

// ─── Wire format ─────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
struct Envelope {
    code: i64,
    #[serde(default)]
    status: Option<String>,
    #[serde(default)]
    data: serde_json::Value,
}

#[derive(Debug, Deserialize)]
struct TimingsData {
    timings: serde_json::Map<String, serde_json::Value>,
    date: DateBlock,
    #[serde(default)]
    meta: Option<Meta>,
}

#[derive(Debug, Deserialize)]
struct DateBlock {
    hijri: HijriBlock,
    #[serde(default)]
    gregorian: Option<GregorianBlock>,
}

#[derive(Debug, Deserialize)]
struct HijriBlock {
    day: NumberOrString,
    month: HijriMonth,
    year: NumberOrString,
}

#[derive(Debug, Deserialize)]
struct HijriMonth {
    number: u32,
}

#[derive(Debug, Deserialize)]
struct GregorianBlock {
    date: String,
}

#[derive(Debug, Deserialize)]
struct Meta {
    #[serde(default)]
    timezone: Option<String>,
}

/// Aladhan sends most numbers inside strings.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum NumberOrString {
    Number(i64),
    Text(String),
}

impl NumberOrString {
    fn as_i64(&self, field: &str) -> Result<i64, FetchError> {
        match self {
            NumberOrString::Number(n) => Ok(*n),
            NumberOrString::Text(s) => s
                .trim()
                .parse()
                .map_err(|_| FetchError::Malformed(format!("{} is not a number: {:?}", field, s))),
        }
    }
}

/// Turn a `timingsByCity` body into a schedule for `city`.
pub fn parse_timings_response(city: &str, body: &str) -> Result<PrayerSchedule, FetchError> {
    let envelope: Envelope =
        serde_json::from_str(body).map_err(|e| FetchError::Malformed(e.to_string()))?;

    if envelope.code != SUCCESS_CODE {
        let message = match envelope.data {
            serde_json::Value::String(s) => s,
            _ => envelope.status.unwrap_or_default(),
        };
        return Err(FetchError::Status {
            code: envelope.code,
            message,
        });
    }

    let data: TimingsData = serde_json::from_value(envelope.data)
        .map_err(|e| FetchError::Malformed(e.to_string()))?;

    let mut times = Vec::with_capacity(PrayerType::ALL.len());
    for prayer in PrayerType::all() {
        let raw = data
            .timings
            .get(prayer.api_key())
            .and_then(|v| v.as_str())
            .ok_or_else(|| FetchError::Malformed(format!("missing timing {}", prayer.api_key())))?;
        times.push((prayer, parse_clock(raw)?));
    }

    let hijri = HijriDate {
        day: to_u32(data.date.hijri.day.as_i64("hijri.day")?, "hijri.day")?,
        month: data.date.hijri.month.number,
        year: data.date.hijri.year.as_i64("hijri.year")? as i32,
    };
    if !(1..=12).contains(&hijri.month) {
        return Err(FetchError::Malformed(format!("hijri month {}", hijri.month)));
    }

    let gregorian = data
        .date
        .gregorian
        .and_then(|g| NaiveDate::parse_from_str(&g.date, "%d-%m-%Y").ok());
    let timezone = data.meta.and_then(|m| m.timezone);

    let schedule = PrayerSchedule::new(city, &times, hijri)
        .map_err(|e| FetchError::Malformed(e.to_string()))?
        .with_timezone(timezone)
        .with_gregorian(gregorian);
    Ok(schedule)
}

/// "05:12" or "05:12 (+03)"
fn parse_clock(raw: &str) -> Result<NaiveTime, FetchError> {
    let hhmm = raw.split_whitespace().next().unwrap_or_default();
    NaiveTime::parse_from_str(hhmm, "%H:%M")
        .map_err(|e| FetchError::Malformed(format!("bad time {:?}: {}", raw, e)))
}

fn to_u32(value: i64, field: &str) -> Result<u32, FetchError> {
    u32::try_from(value).map_err(|_| FetchError::Malformed(format!("{} out of range: {}", field, value)))
}
