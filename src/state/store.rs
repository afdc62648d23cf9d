use rusqlite::{Connection, OptionalExtension, Result as SqlResult};
use std::path::PathBuf;
use tracing::info;

use super::data::ContactDetails;

/// The Store manages the local SQLite database.
/// It remembers the last submitted contact details and recently used
/// album codes so the user does not retype them on every visit.
pub struct Store {
    conn: Connection,
    db_path: PathBuf,
}

impl Store {
    /// Open the store, creating the database on first run.
    ///
    /// The database file lives in the user's data directory:
    /// - Linux: ~/.local/share/video-studio/studio.db
    /// - macOS: ~/Library/Application Support/video-studio/studio.db
    /// - Windows: %APPDATA%\video-studio\studio.db
    pub fn new() -> SqlResult<Self> {
        let db_path = Self::db_path();

        // Ensure the parent directory exists
        if let Some(parent) = db_path.parent() {
            std::fs::create_dir_all(parent)
                .expect("Failed to create application data directory");
        }

        let conn = Connection::open(&db_path)?;
        info!(path = %db_path.display(), "store opened");

        Self::from_connection(conn, db_path)
    }

    /// Wrap an already-open connection (tests use an in-memory database)
    fn from_connection(conn: Connection, db_path: PathBuf) -> SqlResult<Self> {
        let store = Store { conn, db_path };
        store.init_schema()?;
        Ok(store)
    }

    /// Get the path where the database should be stored
    fn db_path() -> PathBuf {
        let mut path = dirs::data_dir()
            .or_else(|| dirs::home_dir())
            .expect("Could not determine user data directory");

        path.push("video-studio");
        path.push("studio.db");
        path
    }

    /// Initialize the database schema.
    /// Creates all necessary tables and indexes if they don't exist.
    fn init_schema(&self) -> SqlResult<()> {
        // Remembered contact details, newest row wins
        self.conn.execute(
            "CREATE TABLE IF NOT EXISTS contacts (
                id          INTEGER PRIMARY KEY AUTOINCREMENT,
                name        TEXT NOT NULL,
                whatsapp    TEXT NOT NULL,
                email       TEXT NOT NULL,
                saved_at    INTEGER NOT NULL
            )",
            [],
        )?;

        // Recently used album codes
        self.conn.execute(
            "CREATE TABLE IF NOT EXISTS albums (
                code        TEXT PRIMARY KEY,
                last_used   INTEGER NOT NULL
            )",
            [],
        )?;

        self.conn.execute(
            "CREATE INDEX IF NOT EXISTS idx_albums_last_used
             ON albums(last_used DESC)",
            [],
        )?;

        Ok(())
    }

    /// Remember the contact details of the latest submission
    pub fn save_contact(&self, details: &ContactDetails) -> SqlResult<()> {
        self.conn.execute(
            "INSERT INTO contacts (name, whatsapp, email, saved_at) VALUES (?1, ?2, ?3, ?4)",
            rusqlite::params![
                &details.name,
                &details.whatsapp,
                &details.email,
                chrono::Utc::now().timestamp(),
            ],
        )?;
        Ok(())
    }

    /// The most recently saved contact details, if any
    pub fn last_contact(&self) -> SqlResult<Option<ContactDetails>> {
        self.conn
            .query_row(
                "SELECT name, whatsapp, email FROM contacts ORDER BY saved_at DESC, id DESC LIMIT 1",
                [],
                |row| {
                    Ok(ContactDetails {
                        name: row.get(0)?,
                        whatsapp: row.get(1)?,
                        email: row.get(2)?,
                    })
                },
            )
            .optional()
    }

    /// Mark an album code as used now
    pub fn remember_album(&self, code: &str) -> SqlResult<()> {
        self.conn.execute(
            "INSERT INTO albums (code, last_used) VALUES (?1, ?2)
             ON CONFLICT(code) DO UPDATE SET last_used = excluded.last_used",
            rusqlite::params![code, chrono::Utc::now().timestamp()],
        )?;
        Ok(())
    }

    /// Recently used album codes, most recent first
    pub fn recent_albums(&self, limit: usize) -> SqlResult<Vec<String>> {
        let mut stmt = self
            .conn
            .prepare("SELECT code FROM albums ORDER BY last_used DESC LIMIT ?1")?;

        let code_iter = stmt.query_map([limit], |row| row.get(0))?;

        let mut codes = Vec::new();
        for code in code_iter {
            codes.push(code?);
        }

        Ok(codes)
    }
}

// Implement Debug for better error messages
impl std::fmt::Debug for Store {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Store")
            .field("db_path", &self.db_path)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn memory_store() -> Store {
        let conn = Connection::open_in_memory().unwrap();
        Store::from_connection(conn, PathBuf::new()).unwrap()
    }

    #[test]
    fn test_last_contact_empty_store() {
        let store = memory_store();
        assert_eq!(store.last_contact().unwrap(), None);
    }

    #[test]
    fn test_contact_round_trip() {
        let store = memory_store();
        let details = ContactDetails {
            name: "Asha Rao".to_string(),
            whatsapp: "+91 98765 43210".to_string(),
            email: "asha@example.com".to_string(),
        };
        store.save_contact(&details).unwrap();
        assert_eq!(store.last_contact().unwrap(), Some(details));
    }

    #[test]
    fn test_latest_contact_wins() {
        let store = memory_store();
        let first = ContactDetails {
            name: "First".to_string(),
            whatsapp: "1111111111".to_string(),
            email: "first@example.com".to_string(),
        };
        let second = ContactDetails {
            name: "Second".to_string(),
            whatsapp: "2222222222".to_string(),
            email: "second@example.com".to_string(),
        };
        store.save_contact(&first).unwrap();
        store.save_contact(&second).unwrap();
        assert_eq!(store.last_contact().unwrap(), Some(second));
    }

    #[test]
    fn test_recent_albums_dedupe_on_code() {
        let store = memory_store();
        store.remember_album("282853GMQB").unwrap();
        store.remember_album("101010ABCD").unwrap();
        store.remember_album("282853GMQB").unwrap();

        let codes = store.recent_albums(10).unwrap();
        assert_eq!(codes.len(), 2);
        assert!(codes.contains(&"282853GMQB".to_string()));
        assert!(codes.contains(&"101010ABCD".to_string()));
    }

    #[test]
    fn test_recent_albums_respects_limit() {
        let store = memory_store();
        for code in ["a", "b", "c", "d"] {
            store.remember_album(code).unwrap();
        }
        assert_eq!(store.recent_albums(2).unwrap().len(), 2);
    }
}
