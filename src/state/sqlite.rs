//! SQLite-backed client state

use super::traits::{StateKey, StateResult, StateStore};
use rusqlite::{params, Connection, OptionalExtension};
use serde_json::Value;
use std::path::Path;
use std::sync::{Mutex, MutexGuard, PoisonError};

/// Client state in a single-table SQLite database
pub struct SqliteState {
    conn: Mutex<Connection>,
}

impl SqliteState {
    fn init_schema(conn: &Connection) -> StateResult<()> {
        conn.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS state (
                key TEXT PRIMARY KEY,
                value_json TEXT NOT NULL
            );
            "#,
        )?;
        Ok(())
    }

    /// Open or create the database at `path`, creating parent directories
    pub fn open(path: impl AsRef<Path>) -> StateResult<Self> {
        if let Some(parent) = path.as_ref().parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let conn = Connection::open(path)?;
        Self::init_schema(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    pub fn open_in_memory() -> StateResult<Self> {
        let conn = Connection::open_in_memory()?;
        Self::init_schema(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn conn(&self) -> MutexGuard<'_, Connection> {
        self.conn.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl StateStore for SqliteState {
    fn get(&self, key: StateKey) -> StateResult<Option<Value>> {
        let raw: Option<String> = self
            .conn()
            .query_row(
                "SELECT value_json FROM state WHERE key = ?1",
                params![key.as_str()],
                |row| row.get(0),
            )
            .optional()?;
        match raw {
            Some(json) => match serde_json::from_str::<Value>(&json)? {
                Value::Null => Ok(None),
                value => Ok(Some(value)),
            },
            None => Ok(None),
        }
    }

    fn set(&self, key: StateKey, value: Value) -> StateResult<()> {
        let json = serde_json::to_string(&value)?;
        self.conn().execute(
            "INSERT INTO state (key, value_json) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value_json = excluded.value_json",
            params![key.as_str(), json],
        )?;
        Ok(())
    }

    fn remove(&self, key: StateKey) -> StateResult<()> {
        self.conn()
            .execute("DELETE FROM state WHERE key = ?1", params![key.as_str()])?;
        Ok(())
    }
}
