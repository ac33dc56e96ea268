use anyhow::Result;
use log::{info, warn};
use rusqlite::Connection;

use crate::db::repository::PreferenceRepo;
use crate::models::PrayerSchedule;
use crate::prayer_times::api::FetchError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchRequest {
    pub id: u64,
    pub city: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApplyOutcome {
    Applied,
    /// A newer request was issued after this one; the result was dropped.
    Stale,
    Failed,
}

/// Holds the active schedule and decides which fetch results may replace it.
#[derive(Debug, Default)]
pub struct ScheduleProvider {
    active: Option<PrayerSchedule>,
    latest: Option<FetchRequest>,
    in_flight: bool,
    next_id: u64,
    last_fetch_failed: bool,
}

impl ScheduleProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a fetch for `city`. Earlier outstanding requests become stale.
    pub fn request(&mut self, city: &str) -> FetchRequest {
        self.next_id += 1;
        let request = FetchRequest {
            id: self.next_id,
            city: city.trim().to_string(),
        };
        self.latest = Some(request.clone());
        self.in_flight = true;
        request
    }

    pub fn complete(
        &mut self,
        conn: &Connection,
        request_id: u64,
        result: Result<PrayerSchedule, FetchError>,
    ) -> Result<ApplyOutcome> {
        let Some(latest) = self.latest.as_ref().filter(|r| r.id == request_id) else {
            info!("Dropping stale schedule response #{}", request_id);
            return Ok(ApplyOutcome::Stale);
        };
        let city = latest.city.clone();
        self.in_flight = false;

        match result {
            Ok(schedule) => {
                info!("Loaded schedule for {}", schedule.city());
                if let Some(tz) = schedule.timezone() {
                    log::debug!("Times for {} are in {}; compared against the local clock", city, tz);
                }
                self.active = Some(schedule);
                self.last_fetch_failed = false;
                PreferenceRepo::set_last_city(conn, &city)?;
                Ok(ApplyOutcome::Applied)
            }
            Err(e) => {
                warn!("Fetching schedule for {} failed: {}", city, e);
                self.last_fetch_failed = true;
                Ok(ApplyOutcome::Failed)
            }
        }
    }

    pub fn schedule(&self) -> Option<&PrayerSchedule> {
        self.active.as_ref()
    }

    /// City of the loaded schedule.
    pub fn city(&self) -> Option<&str> {
        self.active.as_ref().map(|s| s.city())
    }

    /// City of the outstanding request, if one has not come back yet.
    pub fn pending_city(&self) -> Option<&str> {
        self.latest
            .as_ref()
            .filter(|_| self.in_flight)
            .map(|r| r.city.as_str())
    }

    pub fn last_fetch_failed(&self) -> bool {
        self.last_fetch_failed
    }

    /// City of the most recent request, whatever its outcome.
    pub fn requested_city(&self) -> Option<&str> {
        self.latest.as_ref().map(|r| r.city.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::migrations::run_migrations;
    use crate::models::schedule::fixtures::sample_schedule;
    use crate::models::{HijriDate, PrayerType};

    fn conn() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        run_migrations(&conn).unwrap();
        conn
    }

    fn schedule_for(city: &str) -> PrayerSchedule {
        let times: Vec<_> = sample_schedule().entries().collect();
        PrayerSchedule::new(city, &times, HijriDate { day: 1, month: 1, year: 1448 }).unwrap()
    }

    fn not_found() -> FetchError {
        FetchError::Status {
            code: 400,
            message: "Unable to find city.".into(),
        }
    }

    #[test]
    fn success_replaces_schedule_and_persists_city() {
        let conn = conn();
        let mut provider = ScheduleProvider::new();
        let req = provider.request("  Konya ");
        assert_eq!(req.city, "Konya");
        assert_eq!(provider.pending_city(), Some("Konya"));

        let outcome = provider.complete(&conn, req.id, Ok(schedule_for("Konya"))).unwrap();
        assert_eq!(outcome, ApplyOutcome::Applied);
        assert_eq!(provider.city(), Some("Konya"));
        assert_eq!(provider.pending_city(), None);
        assert!(!provider.last_fetch_failed());
        assert_eq!(
            PreferenceRepo::last_city(&conn, "Sakarya").unwrap(),
            "Konya"
        );
    }

    #[test]
    fn failure_keeps_previous_schedule_and_sets_flag() {
        let conn = conn();
        let mut provider = ScheduleProvider::new();
        let first = provider.request("Konya");
        provider.complete(&conn, first.id, Ok(schedule_for("Konya"))).unwrap();

        let second = provider.request("Atlantis");
        let outcome = provider.complete(&conn, second.id, Err(not_found())).unwrap();
        assert_eq!(outcome, ApplyOutcome::Failed);
        assert!(provider.last_fetch_failed());
        assert_eq!(provider.city(), Some("Konya"));
        assert_eq!(provider.requested_city(), Some("Atlantis"));
        assert_eq!(PreferenceRepo::last_city(&conn, "Sakarya").unwrap(), "Konya");

        let third = provider.request("Bursa");
        provider.complete(&conn, third.id, Ok(schedule_for("Bursa"))).unwrap();
        assert!(!provider.last_fetch_failed());
    }

    #[test]
    fn slow_stale_response_cannot_overwrite_newer_one() {
        let conn = conn();
        let mut provider = ScheduleProvider::new();
        let slow = provider.request("Ankara");
        let fast = provider.request("İzmir");

        let outcome = provider.complete(&conn, fast.id, Ok(schedule_for("İzmir"))).unwrap();
        assert_eq!(outcome, ApplyOutcome::Applied);

        let outcome = provider.complete(&conn, slow.id, Ok(schedule_for("Ankara"))).unwrap();
        assert_eq!(outcome, ApplyOutcome::Stale);
        assert_eq!(provider.city(), Some("İzmir"));
        assert_eq!(PreferenceRepo::last_city(&conn, "Sakarya").unwrap(), "İzmir");
    }

    #[test]
    fn stale_failure_does_not_raise_flag() {
        let conn = conn();
        let mut provider = ScheduleProvider::new();
        let old = provider.request("Atlantis");
        let new = provider.request("Sakarya");
        assert_eq!(
            provider.complete(&conn, old.id, Err(not_found())).unwrap(),
            ApplyOutcome::Stale
        );
        assert!(!provider.last_fetch_failed());
        assert_eq!(provider.pending_city(), Some("Sakarya"));
        provider.complete(&conn, new.id, Ok(schedule_for("Sakarya"))).unwrap();
        assert_eq!(provider.schedule().map(|s| s.time(PrayerType::Asr)), Some(sample_schedule().time(PrayerType::Asr)));
    }
}
