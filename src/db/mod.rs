//! Durable local key-value storage.
//!
//! A single-device string store backed by SQLite. The session layer keeps the
//! login token and the serialized user here; nothing else is persisted.

mod schema;

use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use anyhow::Result;
use chrono::Utc;
use rusqlite::{Connection, OptionalExtension};

#[derive(Clone)]
pub struct LocalStorage {
    conn: Arc<Mutex<Connection>>,
}

impl LocalStorage {
    pub fn open(path: PathBuf) -> Result<Self> {
        let parent = path
            .parent()
            .ok_or_else(|| anyhow::anyhow!("Storage path has no parent directory"))?;
        std::fs::create_dir_all(parent)?;
        let conn = Connection::open(&path)?;
        conn.pragma_update(None, "journal_mode", "WAL")?;
        tracing::debug!("Opened local storage at {}", path.display());
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    pub fn open_default() -> Result<Self> {
        Self::open(Self::default_path()?)
    }

    /// Location of the storage file in the platform data directory.
    pub fn default_path() -> Result<PathBuf> {
        let dirs = directories::ProjectDirs::from("", "", "project-dashboard")
            .ok_or_else(|| anyhow::anyhow!("Could not determine data directory"))?;
        Ok(dirs.data_dir().join("storage.db"))
    }

    pub fn open_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    pub fn migrate(&self) -> Result<()> {
        let conn = self.conn.lock().expect("storage lock poisoned");
        schema::run_migrations(&conn)
    }

    pub fn get_item(&self, key: &str) -> Result<Option<String>> {
        let conn = self.conn.lock().expect("storage lock poisoned");
        let value = conn
            .query_row(
                "SELECT value FROM local_storage WHERE key = ?",
                [key],
                |row| row.get(0),
            )
            .optional()?;
        Ok(value)
    }

    pub fn set_item(&self, key: &str, value: &str) -> Result<()> {
        let conn = self.conn.lock().expect("storage lock poisoned");
        conn.execute(
            "INSERT INTO local_storage (key, value, updated_at) VALUES (?, ?, ?)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at",
            (key, value, Utc::now().to_rfc3339()),
        )?;
        Ok(())
    }

    /// Remove a key. Returns whether anything was stored under it.
    pub fn remove_item(&self, key: &str) -> Result<bool> {
        let conn = self.conn.lock().expect("storage lock poisoned");
        let rows = conn.execute("DELETE FROM local_storage WHERE key = ?", [key])?;
        Ok(rows > 0)
    }

    pub fn keys(&self) -> Result<Vec<String>> {
        let conn = self.conn.lock().expect("storage lock poisoned");
        let mut stmt = conn.prepare("SELECT key FROM local_storage ORDER BY key")?;
        let keys = stmt
            .query_map([], |row| row.get(0))?
            .collect::<Result<Vec<String>, _>>()?;
        Ok(keys)
    }
}
