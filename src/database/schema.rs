// file: src/database/schema.rs
// description: SQLite schema management for papers and their generated artifacts
// reference: https://docs.rs/rusqlite

use crate::database::client::PaperStore;
use crate::error::Result;
use tracing::{info, warn};

pub const TABLES: [&str; 3] = ["papers", "summaries", "gaps"];

const CREATE_TABLES: &str = "
    CREATE TABLE IF NOT EXISTS papers (
        id           INTEGER PRIMARY KEY AUTOINCREMENT,
        title        TEXT NOT NULL,
        authors      TEXT NOT NULL,
        abstract     TEXT NOT NULL,
        content      TEXT NOT NULL,
        filename     TEXT NOT NULL,
        stored_path  TEXT NOT NULL,
        content_hash TEXT NOT NULL,
        page_count   INTEGER NOT NULL,
        created_at   TEXT NOT NULL
    );
    CREATE TABLE IF NOT EXISTS summaries (
        id         INTEGER PRIMARY KEY AUTOINCREMENT,
        paper_id   INTEGER NOT NULL,
        summary    TEXT NOT NULL,
        created_at TEXT NOT NULL
    );
    CREATE TABLE IF NOT EXISTS gaps (
        id         INTEGER PRIMARY KEY AUTOINCREMENT,
        paper_id   INTEGER NOT NULL,
        gaps       TEXT NOT NULL,
        created_at TEXT NOT NULL
    );";

pub struct SchemaManager<'a> {
    store: &'a PaperStore,
}

impl<'a> SchemaManager<'a> {
    pub fn new(store: &'a PaperStore) -> Self {
        Self { store }
    }

    pub async fn initialize(&self) -> Result<()> {
        info!("Initializing SQLite schema");

        let conn = self.store.connection().await;
        conn.execute_batch(CREATE_TABLES)?;

        info!("SQLite schema initialized successfully");
        Ok(())
    }

    pub async fn verify_schema(&self) -> Result<bool> {
        let mut valid = true;

        for table in TABLES {
            if self.store.table_exists(table).await? {
                info!("Table '{}' exists", table);
            } else {
                warn!("Table '{}' does not exist", table);
                valid = false;
            }
        }

        Ok(valid)
    }

    pub async fn drop_all_tables(&self) -> Result<()> {
        warn!("Dropping all tables in SQLite");

        let conn = self.store.connection().await;
        for table in TABLES {
            conn.execute_batch(&format!("DROP TABLE IF EXISTS {};", table))?;
            info!("Dropped table: {}", table);
        }

        Ok(())
    }
}
