use std::path::Path;

use anyhow::{Context, Result};
use rusqlite::{params, OptionalExtension};

use crate::infra::sqlite::schema::open_connection;

pub fn read_slot(db_path: &Path, key: &str) -> Result<Option<String>> {
    let conn = open_connection(db_path)?;
    conn.query_row("SELECT value FROM slot WHERE key = ?1", [key], |row| {
        row.get::<_, String>(0)
    })
    .optional()
    .with_context(|| format!("failed to read slot '{key}'"))
}

pub fn write_slot(db_path: &Path, key: &str, value: &str) -> Result<()> {
    let conn = open_connection(db_path)?;
    conn.execute(
        "INSERT INTO slot(key, value)
         VALUES (?1, ?2)
         ON CONFLICT(key) DO UPDATE SET
             value = excluded.value,
             updated_at = CURRENT_TIMESTAMP",
        params![key, value],
    )
    .with_context(|| format!("failed to write slot '{key}'"))?;
    Ok(())
}

pub fn delete_slot(db_path: &Path, key: &str) -> Result<bool> {
    let conn = open_connection(db_path)?;
    let removed = conn
        .execute("DELETE FROM slot WHERE key = ?1", [key])
        .with_context(|| format!("failed to delete slot '{key}'"))?;
    Ok(removed > 0)
}

pub fn list_slot_keys(db_path: &Path) -> Result<Vec<String>> {
    let conn = open_connection(db_path)?;
    let mut stmt = conn
        .prepare("SELECT key FROM slot ORDER BY key ASC")
        .context("failed to prepare slot key query")?;
    let keys = stmt
        .query_map([], |row| row.get::<_, String>(0))
        .context("failed to query slot keys")?
        .collect::<rusqlite::Result<Vec<_>>>()
        .context("failed to collect slot keys")?;
    Ok(keys)
}

pub fn clear_slots(db_path: &Path) -> Result<()> {
    let conn = open_connection(db_path)?;
    conn.execute("DELETE FROM slot", [])
        .context("failed to clear slots")?;
    Ok(())
}
