use super::migrations::{get_db_version, init_with_migrations};
use crate::libs::config::MEMORY_DATABASE;
use crate::libs::messages::Message;
use crate::msg_debug;
use anyhow::Result;
use rusqlite::Connection;
use std::fs;
use std::path::Path;

/// An open SQLite database with the schema migrated to the latest version.
pub struct Db {
    pub conn: Connection,
    fresh: bool,
    location: String,
}

impl Db {
    /// Opens `location` (a file path or `:memory:`) and applies pending
    /// migrations. Parent directories of a file path are created.
    pub fn open(location: &str) -> Result<Db> {
        let mut conn = Self::new_without_migrations(location)?;
        let fresh = get_db_version(&conn)? == 0;
        init_with_migrations(&mut conn)?;

        msg_debug!(Message::StoreOpened(location.to_string()));

        Ok(Db {
            conn,
            fresh,
            location: location.to_string(),
        })
    }

    pub fn open_in_memory() -> Result<Db> {
        Self::open(MEMORY_DATABASE)
    }

    /// Raw connection with foreign keys enabled and no schema applied.
    pub fn new_without_migrations(location: &str) -> Result<Connection> {
        let conn = if location == MEMORY_DATABASE {
            Connection::open_in_memory()?
        } else {
            if let Some(parent) = Path::new(location).parent() {
                if !parent.as_os_str().is_empty() && !parent.exists() {
                    fs::create_dir_all(parent)?;
                }
            }
            Connection::open(location)?
        };
        conn.pragma_update(None, "foreign_keys", "ON")?;

        Ok(conn)
    }

    /// `true` when no migration had been applied before this open.
    pub fn is_fresh(&self) -> bool {
        self.fresh
    }

    pub fn location(&self) -> &str {
        &self.location
    }

    pub fn close(self) -> Result<()> {
        self.conn.close().map_err(|(_, e)| e)?;
        msg_debug!(Message::StoreClosed);
        Ok(())
    }
}
