use std::sync::mpsc::Sender;
use std::sync::Arc;
use std::thread;

use anyhow::Result;
use chrono::{Local, NaiveDateTime};
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind};
use log::{error, info, warn};
use ratatui::{
    layout::{Constraint, Direction, Layout},
    widgets::Block,
    Frame,
};
use rusqlite::Connection;

use crate::alert::{self, AlertSink};
use crate::models::PrayerSchedule;
use crate::prayer_times::{
    compute_next_prayer, derive_background, should_alert, ApplyOutcome, Background, FetchError,
    NextPrayer, ScheduleProvider, ScheduleSource,
};
use crate::tui::events::{Event, EventHandler};
use crate::tui::theme;
use crate::tui::widgets::header::HeaderInfo;
use crate::tui::widgets::statusbar::FetchStatus;
use crate::tui::widgets::{header, next_prayer, prayers, search, statusbar};
use crate::utils::format::is_friday;

/// Source of the current local wall-clock instant.
pub trait Clock {
    fn now(&self) -> NaiveDateTime;
}

pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum InputMode {
    Normal,
    CityInput,
}

pub struct App {
    pub provider: ScheduleProvider,
    pub now: NaiveDateTime,
    pub muted: bool,
    pub should_quit: bool,
    pub input_mode: InputMode,
    pub input_buffer: String,

    // Derived on every tick
    pub next_prayer: Option<NextPrayer>,
    pub background: Background,

    clock: Box<dyn Clock>,
    source: Arc<dyn ScheduleSource>,
    alert: Box<dyn AlertSink>,
    events: Sender<Event>,
}

impl App {
    pub fn new(
        source: Arc<dyn ScheduleSource>,
        alert: Box<dyn AlertSink>,
        clock: Box<dyn Clock>,
        events: Sender<Event>,
        muted: bool,
    ) -> Self {
        let now = clock.now();
        App {
            provider: ScheduleProvider::new(),
            now,
            muted,
            should_quit: false,
            input_mode: InputMode::Normal,
            input_buffer: String::new(),
            next_prayer: None,
            background: derive_background(now),
            clock,
            source,
            alert,
            events,
        }
    }

    /// Start fetching `city` on a worker thread; the result comes back as
    /// `Event::Fetched`.
    pub fn request_city(&mut self, city: &str) {
        if city.trim().is_empty() {
            return;
        }
        let request = self.provider.request(city);
        info!("Requesting schedule #{} for {}", request.id, request.city);

        let source = Arc::clone(&self.source);
        let tx = self.events.clone();
        thread::spawn(move || {
            let result = source.fetch(&request.city);
            let _ = tx.send(Event::Fetched {
                request_id: request.id,
                result,
            });
        });
    }

    pub fn on_fetched(
        &mut self,
        conn: &Connection,
        request_id: u64,
        result: Result<PrayerSchedule, FetchError>,
    ) {
        match self.provider.complete(conn, request_id, result) {
            Ok(ApplyOutcome::Applied) => self.recompute(),
            Ok(_) => {}
            Err(e) => error!("Saving last city: {:#}", e),
        }
    }

    pub fn tick(&mut self) {
        self.now = self.clock.now();
        self.recompute();
        if should_alert(self.provider.schedule(), self.now, self.muted) {
            alert::play(self.alert.as_ref());
        }
    }

    fn recompute(&mut self) {
        self.background = derive_background(self.now);
        self.next_prayer = self
            .provider
            .schedule()
            .map(|schedule| compute_next_prayer(schedule, self.now));
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        // Only handle actual key presses — ignore release/repeat events from some terminals
        if key.kind != KeyEventKind::Press {
            return;
        }
        match self.input_mode {
            InputMode::CityInput => self.handle_city_input(key),
            InputMode::Normal => self.handle_normal_key(key),
        }
    }

    fn handle_normal_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc | KeyCode::Char('q') => {
                self.should_quit = true;
            }
            KeyCode::Char('m') => {
                self.muted = !self.muted;
                info!("Alert {}", if self.muted { "muted" } else { "unmuted" });
            }
            KeyCode::Char('/') | KeyCode::Char('c') => {
                self.input_mode = InputMode::CityInput;
                self.input_buffer.clear();
            }
            KeyCode::Char('r') => {
                let city = self
                    .provider
                    .requested_city()
                    .or(self.provider.city())
                    .map(str::to_string);
                if let Some(city) = city {
                    self.request_city(&city);
                }
            }
            _ => {}
        }
    }

    fn handle_city_input(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => {
                self.input_mode = InputMode::Normal;
                self.input_buffer.clear();
            }
            KeyCode::Enter => {
                let city = self.input_buffer.trim().to_string();
                if city.is_empty() {
                    return;
                }
                self.request_city(&city);
                self.input_mode = InputMode::Normal;
                self.input_buffer.clear();
            }
            KeyCode::Backspace => {
                self.input_buffer.pop();
            }
            KeyCode::Char(c) if !c.is_control() => {
                self.input_buffer.push(c);
            }
            _ => {}
        }
    }

    /// City shown as the title: the loaded one, else whatever was asked for.
    pub fn display_city(&self) -> &str {
        self.provider
            .city()
            .or(self.provider.requested_city())
            .unwrap_or("")
    }

    fn fetch_status(&self) -> FetchStatus<'_> {
        if let Some(city) = self.provider.pending_city() {
            FetchStatus::Loading(city)
        } else if self.provider.last_fetch_failed() {
            FetchStatus::Failed(self.provider.requested_city().unwrap_or(""))
        } else {
            FetchStatus::Idle
        }
    }

    pub fn draw(&self, frame: &mut Frame) {
        let palette = theme::palette(self.background);
        let area = frame.area();

        frame.render_widget(Block::default().style(palette.base()), area);

        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Min(0),
                Constraint::Length(48),
                Constraint::Min(0),
            ])
            .split(area);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(6), // clock, dates, city
                Constraint::Length(6), // countdown + badge
                Constraint::Length(8), // six times
                Constraint::Length(3), // city input
                Constraint::Min(0),
                Constraint::Length(1), // status bar
            ])
            .split(columns[1]);

        let schedule = self.provider.schedule();
        header::render(
            frame,
            chunks[0],
            &palette,
            &HeaderInfo {
                now: self.now,
                hijri: schedule.map(|s| s.hijri().formatted()),
                city: self.display_city(),
                muted: self.muted,
            },
        );
        next_prayer::render(
            frame,
            chunks[1],
            &palette,
            self.next_prayer.as_ref(),
            is_friday(self.now.date()),
        );
        prayers::render(
            frame,
            chunks[2],
            &palette,
            schedule,
            self.next_prayer.as_ref().map(|n| n.prayer),
        );
        search::render(
            frame,
            chunks[3],
            &palette,
            &self.input_buffer,
            self.input_mode == InputMode::CityInput,
        );

        statusbar::render(frame, chunks[5], self.fetch_status());
    }
}

/// Run the TUI event loop.
pub fn run(
    conn: Connection,
    source: Arc<dyn ScheduleSource>,
    alert: Box<dyn AlertSink>,
    city: &str,
    muted: bool,
    tick_rate_ms: u64,
) -> Result<()> {
    let events = EventHandler::new(tick_rate_ms);
    let mut app = App::new(source, alert, Box::new(SystemClock), events.sender(), muted);
    app.request_city(city);
    app.tick();

    let mut terminal = ratatui::init();

    let outcome = loop {
        if let Err(e) = terminal.draw(|frame| app.draw(frame)) {
            break Err(e.into());
        }

        match events.next() {
            Ok(Event::Key(key)) => {
                app.handle_key(key);
                if app.should_quit {
                    break Ok(());
                }
            }
            Ok(Event::Tick) => app.tick(),
            Ok(Event::Fetched { request_id, result }) => {
                if let Err(e) = &result {
                    warn!("Schedule request #{} failed: {}", request_id, e);
                }
                app.on_fetched(&conn, request_id, result);
            }
            Err(e) => break Err(e.into()),
        }
    };

    ratatui::restore();
    outcome
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::migrations::run_migrations;
    use crate::db::repository::PreferenceRepo;
    use crate::models::schedule::fixtures::sample_schedule;
    use crate::models::{HijriDate, PrayerType};
    use crossterm::event::KeyModifiers;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::mpsc::{self, Receiver};
    use std::sync::Mutex;
    use std::time::Duration;

    struct FakeSource;

    impl ScheduleSource for FakeSource {
        fn fetch(&self, city: &str) -> Result<PrayerSchedule, FetchError> {
            if city == "Atlantis" {
                return Err(FetchError::Status {
                    code: 400,
                    message: "Unable to find city.".into(),
                });
            }
            let times: Vec<_> = sample_schedule().entries().collect();
            Ok(PrayerSchedule::new(city, &times, HijriDate { day: 8, month: 5, year: 1448 }).unwrap())
        }
    }

    struct CountingAlert(Arc<AtomicU32>);

    impl AlertSink for CountingAlert {
        fn play(&self) -> Result<()> {
            self.0.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
    }

    /// Clock the test can move forward.
    struct ManualClock(Arc<Mutex<NaiveDateTime>>);

    impl Clock for ManualClock {
        fn now(&self) -> NaiveDateTime {
            *self.0.lock().unwrap()
        }
    }

    struct Harness {
        app: App,
        rx: Receiver<Event>,
        conn: Connection,
        plays: Arc<AtomicU32>,
        time: Arc<Mutex<NaiveDateTime>>,
    }

    impl Harness {
        fn new(h: u32, m: u32, s: u32) -> Self {
            let (tx, rx) = mpsc::channel();
            let plays = Arc::new(AtomicU32::new(0));
            let time = Arc::new(Mutex::new(at(h, m, s)));
            let conn = Connection::open_in_memory().unwrap();
            run_migrations(&conn).unwrap();
            let app = App::new(
                Arc::new(FakeSource),
                Box::new(CountingAlert(Arc::clone(&plays))),
                Box::new(ManualClock(Arc::clone(&time))),
                tx,
                false,
            );
            Self { app, rx, conn, plays, time }
        }

        fn set_time(&self, h: u32, m: u32, s: u32) {
            *self.time.lock().unwrap() = at(h, m, s);
        }

        /// Deliver the next fetch result to the app.
        fn pump_fetch(&mut self) {
            match self.rx.recv_timeout(Duration::from_secs(5)).unwrap() {
                Event::Fetched { request_id, result } => {
                    self.app.on_fetched(&self.conn, request_id, result)
                }
                other => panic!("unexpected event {:?}", other),
            }
        }

        fn type_city(&mut self, city: &str) {
            self.app.handle_key(key(KeyCode::Char('/')));
            for c in city.chars() {
                self.app.handle_key(key(KeyCode::Char(c)));
            }
            self.app.handle_key(key(KeyCode::Enter));
        }
    }

    fn at(h: u32, m: u32, s: u32) -> NaiveDateTime {
        chrono::NaiveDate::from_ymd_opt(2026, 10, 19)
            .unwrap()
            .and_hms_opt(h, m, s)
            .unwrap()
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn nothing_to_show_before_first_fetch() {
        let mut h = Harness::new(12, 15, 0);
        h.app.tick();
        assert!(h.app.next_prayer.is_none());
        assert_eq!(h.app.background, Background::Day);
        assert_eq!(h.plays.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn city_input_loads_schedule_and_countdown() {
        let mut h = Harness::new(14, 0, 0);
        h.type_city("Konya");
        assert_eq!(h.app.input_mode, InputMode::Normal);
        assert_eq!(h.app.provider.pending_city(), Some("Konya"));
        h.pump_fetch();

        let next = h.app.next_prayer.as_ref().unwrap();
        assert_eq!(next.prayer, PrayerType::Asr);
        assert_eq!(next.remaining.to_string(), "1:45:00");
        assert_eq!(h.app.display_city(), "Konya");
        assert_eq!(PreferenceRepo::last_city(&h.conn, "Sakarya").unwrap(), "Konya");
    }

    #[test]
    fn unknown_city_keeps_old_schedule() {
        let mut h = Harness::new(14, 0, 0);
        h.app.request_city("Konya");
        h.pump_fetch();
        h.type_city("Atlantis");
        h.pump_fetch();

        assert!(h.app.provider.last_fetch_failed());
        assert_eq!(h.app.provider.city(), Some("Konya"));
        assert!(h.app.next_prayer.is_some());
    }

    #[test]
    fn alert_plays_once_at_prayer_minute_unless_muted() {
        let mut h = Harness::new(12, 14, 59);
        h.app.request_city("Konya");
        h.pump_fetch();

        h.set_time(12, 15, 0);
        h.app.tick();
        h.set_time(12, 15, 1);
        h.app.tick();
        assert_eq!(h.plays.load(Ordering::SeqCst), 1);

        h.app.handle_key(key(KeyCode::Char('m')));
        assert!(h.app.muted);
        h.set_time(15, 45, 0);
        h.app.tick();
        assert_eq!(h.plays.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn tick_updates_background() {
        let mut h = Harness::new(16, 59, 59);
        h.app.tick();
        assert_eq!(h.app.background, Background::Day);
        h.set_time(17, 0, 0);
        h.app.tick();
        assert_eq!(h.app.background, Background::Sunset);
        h.set_time(20, 0, 0);
        h.app.tick();
        assert_eq!(h.app.background, Background::Night);
    }

    #[test]
    fn escape_cancels_city_input_and_blank_is_ignored() {
        let mut h = Harness::new(9, 0, 0);
        h.app.handle_key(key(KeyCode::Char('c')));
        h.app.handle_key(key(KeyCode::Char('x')));
        h.app.handle_key(key(KeyCode::Esc));
        assert_eq!(h.app.input_mode, InputMode::Normal);
        assert!(h.app.input_buffer.is_empty());
        assert!(!h.app.should_quit);

        h.type_city("   ");
        assert_eq!(h.app.provider.requested_city(), None);
        assert!(h.rx.try_recv().is_err());

        h.app.handle_key(key(KeyCode::Esc));
        h.app.handle_key(key(KeyCode::Esc));
        assert!(h.app.should_quit);
    }

    #[test]
    fn shortcut_letters_are_plain_text_while_editing() {
        let mut h = Harness::new(9, 0, 0);
        h.type_city("Qom");
        assert!(!h.app.should_quit);
        assert!(!h.app.muted);
        h.pump_fetch();
        assert_eq!(h.app.provider.city(), Some("Qom"));
    }
}
