// file: src/database/client.rs
// description: SQLite connection wrapper shared by the api, pipeline and cli
// reference: https://docs.rs/rusqlite

use crate::config::DatabaseConfig;
use crate::error::{PaperError, Result};
use rusqlite::{Connection, OptionalExtension, params};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::{Mutex, MutexGuard};
use tracing::{debug, info};

/// Handle to the papers database. Clones share one connection.
#[derive(Clone)]
pub struct PaperStore {
    conn: Arc<Mutex<Connection>>,
    location: PathBuf,
}

impl PaperStore {
    pub fn open(config: &DatabaseConfig) -> Result<Self> {
        Self::open_path(&config.path)
    }

    pub fn open_path(path: &Path) -> Result<Self> {
        info!("Opening SQLite database at {}", path.display());

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent).map_err(|source| PaperError::FileOperation {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        let conn = Connection::open(path)?;

        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
            location: path.to_path_buf(),
        })
    }

    /// In-memory database, used by tests.
    pub fn in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;

        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
            location: PathBuf::from(":memory:"),
        })
    }

    pub fn location(&self) -> &Path {
        &self.location
    }

    pub(crate) async fn connection(&self) -> MutexGuard<'_, Connection> {
        self.conn.lock().await
    }

    pub async fn ping(&self) -> Result<bool> {
        debug!("Checking SQLite connection");

        let conn = self.connection().await;
        let one: i64 = conn.query_row("SELECT 1", [], |row| row.get(0))?;
        Ok(one == 1)
    }

    pub async fn table_exists(&self, table_name: &str) -> Result<bool> {
        let conn = self.connection().await;
        let found = conn
            .query_row(
                "SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = ?1",
                params![table_name],
                |_| Ok(()),
            )
            .optional()?;

        Ok(found.is_some())
    }

    pub async fn count_rows(&self, table_name: &str) -> Result<u64> {
        if !self.table_exists(table_name).await? {
            return Ok(0);
        }

        let conn = self.connection().await;
        let sql = format!("SELECT COUNT(*) FROM {}", table_name);
        let count: i64 = conn.query_row(&sql, [], |row| row.get(0))?;

        Ok(count as u64)
    }
}
