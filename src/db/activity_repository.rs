use crate::error::Result;
use crate::models::activity::ActivityEntry;
use chrono::Local;
use rusqlite::{params, Connection};

pub fn log_activity(conn: &Connection, action: &str, details: &str) -> Result<()> {
    let timestamp = Local::now().format("%Y-%m-%d %H:%M:%S").to_string();
    conn.execute(
        "INSERT INTO activity_log (timestamp, action, details) VALUES (?1, ?2, ?3)",
        params![timestamp, action, details],
    )?;
    Ok(())
}

/// Most recent entries first. When `goal` is given, only entries whose
/// details mention it (case-insensitive) are returned.
pub fn get_recent_activity(
    conn: &Connection,
    goal: Option<&str>,
    limit: usize,
) -> Result<Vec<ActivityEntry>> {
    let pattern = goal.map(|g| format!("%{}%", g.to_lowercase()));
    let mut stmt = conn.prepare(
        "SELECT id, timestamp, action, details FROM activity_log
         WHERE ?1 IS NULL OR LOWER(details) LIKE ?1
         ORDER BY id DESC LIMIT ?2",
    )?;

    let iter = stmt.query_map(params![pattern, limit as i64], |row| {
        Ok(ActivityEntry {
            id: row.get(0)?,
            timestamp: row.get(1)?,
            action: row.get(2)?,
            details: row.get(3)?,
        })
    })?;

    let mut entries = Vec::new();
    for entry in iter {
        entries.push(entry?);
    }
    Ok(entries)
}
