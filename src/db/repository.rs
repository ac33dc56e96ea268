use anyhow::Result;
use rusqlite::{params, Connection, OptionalExtension};

// ─── Meta (key/value) ────────────────────────────────────────────────────────

pub struct MetaRepo;

impl MetaRepo {
    pub fn get(conn: &Connection, key: &str) -> Result<Option<String>> {
        conn.query_row(
            "SELECT value FROM app_meta WHERE key = ?1",
            params![key],
            |row| row.get(0),
        )
        .optional()
        .map(Option::flatten)
        .map_err(anyhow::Error::from)
    }

    pub fn set(conn: &Connection, key: &str, value: &str) -> Result<()> {
        conn.execute(
            "INSERT INTO app_meta (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value = ?2",
            params![key, value],
        )?;
        Ok(())
    }
}

// ─── User preferences ────────────────────────────────────────────────────────

const LAST_CITY_KEY: &str = "last_city";

pub struct PreferenceRepo;

impl PreferenceRepo {
    /// Last city that loaded successfully, or `default` on first run.
    pub fn last_city(conn: &Connection, default: &str) -> Result<String> {
        let stored = MetaRepo::get(conn, LAST_CITY_KEY)?;
        Ok(stored
            .map(|c| c.trim().to_string())
            .filter(|c| !c.is_empty())
            .unwrap_or_else(|| default.to_string()))
    }

    pub fn set_last_city(conn: &Connection, city: &str) -> Result<()> {
        MetaRepo::set(conn, LAST_CITY_KEY, city)
    }
}
