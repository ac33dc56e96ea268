use anyhow::{Context, Result};
use chrono::NaiveDateTime;
use rusqlite::Connection;
use serde_json::json;

use crate::config::AppConfig;
use crate::db::repository::PreferenceRepo;
use crate::models::PrayerSchedule;
use crate::prayer_times::{compute_next_prayer, ScheduleSource};
use crate::utils::format::{format_date, format_time, is_friday, weekday_name};

// ─── ANSI helpers ────────────────────────────────────────────────────────────

macro_rules! println_colored {
    ($color:expr, $($arg:tt)*) => {{
        print!("{}", $color);
        print!($($arg)*);
        println!("\x1b[0m");
    }};
}

const GREEN: &str = "\x1b[32m";
const AMBER: &str = "\x1b[33m";
const DIM: &str = "\x1b[2m";
const BOLD: &str = "\x1b[1m";
const GOLD: &str = "\x1b[38;2;196;160;68m";

// ─── Times ───────────────────────────────────────────────────────────────────

pub fn handle_times(
    conn: &Connection,
    source: &dyn ScheduleSource,
    city: &str,
    now: NaiveDateTime,
    as_json: bool,
) -> Result<()> {
    let schedule = source
        .fetch(city)
        .with_context(|| format!("Fetching prayer times for {}", city))?;
    PreferenceRepo::set_last_city(conn, city)?;

    if as_json {
        let value = times_json(&schedule, now);
        println!("{}", serde_json::to_string_pretty(&value)?);
        return Ok(());
    }

    let today = now.date();
    println!();
    println_colored!(
        GOLD,
        "  {} — {} {}",
        schedule.city().to_uppercase(),
        format_date(today),
        weekday_name(today)
    );
    println_colored!(AMBER, "  ☾ {}", schedule.hijri().formatted());
    println!();

    let next = compute_next_prayer(&schedule, now);
    for (prayer, time) in schedule.entries() {
        let line = format!("  {:<8}  {}", prayer.display_name(), format_time(time));
        if prayer == next.prayer && !next.is_tomorrow(now) {
            println_colored!(BOLD, "{}  ◂", line);
        } else if today.and_time(time) <= now {
            println_colored!(DIM, "{}", line);
        } else {
            println!("{}", line);
        }
    }

    println!();
    println_colored!(
        AMBER,
        "  {} vaktine kalan süre: {}",
        next.label(),
        next.remaining
    );
    if is_friday(today) {
        println_colored!(GREEN, "  Hayırlı Cumalar");
    }
    println!();
    Ok(())
}

pub fn times_json(schedule: &PrayerSchedule, now: NaiveDateTime) -> serde_json::Value {
    let next = compute_next_prayer(schedule, now);
    let times: serde_json::Map<String, serde_json::Value> = schedule
        .entries()
        .map(|(prayer, time)| (prayer.api_key().to_string(), json!(format_time(time))))
        .collect();

    json!({
        "city": schedule.city(),
        "date": format_date(now.date()),
        "api_date": schedule.gregorian().map(format_date),
        "hijri": schedule.hijri().formatted(),
        "timezone": schedule.timezone(),
        "times": times,
        "next": {
            "prayer": next.prayer.api_key(),
            "label": next.label(),
            "remaining": next.remaining.to_string(),
            "remaining_seconds": next.remaining.total_seconds(),
        },
    })
}

// ─── Config ──────────────────────────────────────────────────────────────────

pub fn handle_config(config: &AppConfig, init: bool) -> Result<()> {
    let path = AppConfig::config_path()?;
    if init && !path.exists() {
        config.save_to(&path)?;
        println_colored!(GREEN, "  ✓ Wrote {}", path.display());
    } else {
        println!("  {}", path.display());
    }
    println_colored!(DIM, "  data: {}", AppConfig::data_dir()?.display());
    Ok(())
}
