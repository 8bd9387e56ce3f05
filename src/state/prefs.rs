use rusqlite::{Connection, OptionalExtension};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Key under which the user's identifier is persisted
pub const QR_TEXT_KEY: &str = "qrText";

/// Failure reading or writing the preference store
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("preference database error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("could not create {path}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("could not determine user data directory")]
    NoDataDir,
}

/// String-keyed get/set store. Last write wins.
pub trait Store {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError>;
}

/// Prefs persists key-value pairs in a small SQLite database.
pub struct Prefs {
    conn: Connection,
    db_path: Option<PathBuf>,
}

impl Prefs {
    /// Open (or create) the preference database in the user's data directory:
    /// - Linux: ~/.local/share/qrc-generator/prefs.db
    /// - macOS: ~/Library/Application Support/qrc-generator/prefs.db
    /// - Windows: %APPDATA%\qrc-generator\prefs.db
    pub fn open_default() -> Result<Self, StoreError> {
        Self::open(&Self::default_path()?)
    }

    /// Open (or create) the preference database at `db_path`
    pub fn open(db_path: &Path) -> Result<Self, StoreError> {
        if let Some(parent) = db_path.parent() {
            std::fs::create_dir_all(parent).map_err(|source| StoreError::CreateDir {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        let conn = Connection::open(db_path)?;

        let prefs = Prefs {
            conn,
            db_path: Some(db_path.to_path_buf()),
        };
        prefs.init_schema()?;
        Ok(prefs)
    }

    /// Non-persistent store, gone when dropped
    #[cfg(test)]
    pub fn in_memory() -> Result<Self, StoreError> {
        let prefs = Prefs {
            conn: Connection::open_in_memory()?,
            db_path: None,
        };
        prefs.init_schema()?;
        Ok(prefs)
    }

    fn default_path() -> Result<PathBuf, StoreError> {
        let mut path = dirs::data_dir()
            .or_else(dirs::home_dir)
            .ok_or(StoreError::NoDataDir)?;

        path.push("qrc-generator");
        path.push("prefs.db");
        Ok(path)
    }

    fn init_schema(&self) -> Result<(), StoreError> {
        self.conn.execute(
            "CREATE TABLE IF NOT EXISTS prefs (
                key     TEXT PRIMARY KEY,
                value   TEXT NOT NULL
            )",
            [],
        )?;
        Ok(())
    }

    /// Path to the database file, `None` for in-memory stores
    pub fn path(&self) -> Option<&Path> {
        self.db_path.as_deref()
    }
}

impl Store for Prefs {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let value = self
            .conn
            .query_row(
                "SELECT value FROM prefs WHERE key = ?1",
                [key],
                |row| row.get(0),
            )
            .optional()?;
        Ok(value)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.conn.execute(
            "INSERT INTO prefs (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value",
            rusqlite::params![key, value],
        )?;
        Ok(())
    }
}

impl std::fmt::Debug for Prefs {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Prefs")
            .field("db_path", &self.db_path)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_key_is_absent() {
        let prefs = Prefs::in_memory().unwrap();
        assert_eq!(prefs.get(QR_TEXT_KEY).unwrap(), None);
        assert!(prefs.path().is_none());
    }

    #[test]
    fn test_set_then_get() {
        let mut prefs = Prefs::in_memory().unwrap();
        prefs.set(QR_TEXT_KEY, "224195").unwrap();
        assert_eq!(prefs.get(QR_TEXT_KEY).unwrap().as_deref(), Some("224195"));
    }

    #[test]
    fn test_last_write_wins() {
        let mut prefs = Prefs::in_memory().unwrap();
        prefs.set(QR_TEXT_KEY, "first").unwrap();
        prefs.set(QR_TEXT_KEY, "second").unwrap();
        assert_eq!(prefs.get(QR_TEXT_KEY).unwrap().as_deref(), Some("second"));
    }

    #[test]
    fn test_survives_reopen() {
        let dir = std::env::temp_dir().join(format!("qrc-generator-prefs-{}", std::process::id()));
        let db_path = dir.join("prefs.db");

        {
            let mut prefs = Prefs::open(&db_path).unwrap();
            prefs.set(QR_TEXT_KEY, "abc").unwrap();
        }
        let prefs = Prefs::open(&db_path).unwrap();
        assert_eq!(prefs.get(QR_TEXT_KEY).unwrap().as_deref(), Some("abc"));
        assert_eq!(prefs.path(), Some(db_path.as_path()));

        drop(prefs);
        let _ = std::fs::remove_dir_all(&dir);
    }
}
