// src/repository.rs

use crate::constants::{FIRST_DAY, LAST_DAY, STORAGE_KEY};
use crate::error::StoreError;
use crate::models::UserProgress;
use log::{debug, warn};
use rusqlite::{params, Connection, OptionalExtension, Result};

/// Raw value stored under `key`, if any.
pub fn get_value(conn: &Connection, key: &str) -> Result<Option<String>> {
    conn.query_row("SELECT value FROM kv_store WHERE key = ?", [key], |row| {
        row.get(0)
    })
    .optional()
}

pub fn put_value(conn: &Connection, key: &str, value: &str) -> Result<()> {
    conn.execute(
        "INSERT OR REPLACE INTO kv_store (key, value) VALUES (?, ?)",
        params![key, value],
    )?;
    Ok(())
}

pub fn delete_value(conn: &Connection, key: &str) -> Result<()> {
    conn.execute("DELETE FROM kv_store WHERE key = ?", [key])?;
    Ok(())
}

/// Reads the whole progress record. Missing or unreadable data falls back to a
/// fresh record; only a failing database is an error.
pub fn load_progress(conn: &Connection) -> Result<UserProgress> {
    let Some(raw) = get_value(conn, STORAGE_KEY)? else {
        debug!("[DB] No saved progress. Starting fresh.");
        return Ok(UserProgress::default());
    };

    match serde_json::from_str::<UserProgress>(&raw) {
        Ok(progress) => {
            if let Some((level, lp)) = progress
                .levels
                .iter()
                .find(|(_, lp)| !(FIRST_DAY..=LAST_DAY).contains(&lp.current_day))
            {
                warn!(
                    "Saved progress has day {} for {}. Replacing with defaults.",
                    lp.current_day, level
                );
                return Ok(UserProgress::default());
            }
            debug!("[DB] Loaded progress ({} bytes)", raw.len());
            Ok(progress)
        }
        Err(e) => {
            warn!("Saved progress is unreadable ({}). Replacing with defaults.", e);
            Ok(UserProgress::default())
        }
    }
}

/// Writes the whole progress record under the fixed storage key.
pub fn save_progress(conn: &Connection, progress: &UserProgress) -> std::result::Result<(), StoreError> {
    let raw = serde_json::to_string(progress)?;
    put_value(conn, STORAGE_KEY, &raw)?;
    debug!("[DB] Saved progress ({} bytes)", raw.len());
    Ok(())
}

pub fn clear_progress(conn: &Connection) -> Result<()> {
    delete_value(conn, STORAGE_KEY)
}
