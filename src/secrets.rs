use std::path::Path;

use rusqlite::{Connection, OptionalExtension, params};

/// Local key-value store of configuration secrets, one sqlite table.
///
/// Stands in for the hosting platform's secret store: the apps read
/// `test_secret` from here purely to confirm access, and the sheets client
/// picks up its optional API token from the same place.
pub struct SecretsDb {
    conn: Connection,
}

pub const TEST_SECRET: &str = "test_secret";
pub const GSHEETS_TOKEN: &str = "gsheets_token";

impl SecretsDb {
    pub fn open(path: &Path) -> Result<Self, String> {
        if let Some(dir) = path.parent() {
            std::fs::create_dir_all(dir)
                .map_err(|e| format!("Failed to create the secrets directory {:?}. \n{}", dir, e))?;
        }

        let conn = Connection::open(path)
            .map_err(|e| format!("Failed to open the secrets db at {:?}. \n{}", path, e))?;

        Self::with_connection(conn)
    }

    #[cfg(test)]
    pub fn open_in_memory() -> Result<Self, String> {
        let conn = Connection::open_in_memory()
            .map_err(|e| format!("Failed to open an in-memory secrets db. \n{}", e))?;
        Self::with_connection(conn)
    }

    fn with_connection(conn: Connection) -> Result<Self, String> {
        conn.execute(
            "CREATE TABLE IF NOT EXISTS secrets (name TEXT PRIMARY KEY, value TEXT NOT NULL)",
            [],
        )
        .map_err(|e| format!("Failed to create the secrets table. \n{}", e))?;

        Ok(SecretsDb { conn })
    }

    pub fn get(&self, name: &str) -> Result<Option<String>, String> {
        self.conn
            .query_row(
                "SELECT value FROM secrets WHERE name = ?1",
                params![name],
                |row| row.get::<_, String>(0),
            )
            .optional()
            .map_err(|e| format!("Lookup of secret {} failed. \n{}", name, e))
    }

    /// Like get, but a missing entry is an error. Used for `test_secret`
    /// where the original app let the platform's own error surface it.
    pub fn require(&self, name: &str) -> Result<String, String> {
        self.get(name)?
            .ok_or_else(|| format!("Secret {} is not in the secrets db.", name))
    }

    pub fn set(&self, name: &str, value: &str) -> Result<(), String> {
        self.conn
            .execute(
                "INSERT INTO secrets (name, value) VALUES (?1, ?2)
                 ON CONFLICT(name) DO UPDATE SET value = excluded.value",
                params![name, value],
            )
            .map_err(|e| format!("Failed to store secret {}. \n{}", name, e))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_get_and_overwrite() {
        let db = SecretsDb::open_in_memory().unwrap();
        assert_eq!(db.get(TEST_SECRET).unwrap(), None);

        db.set(TEST_SECRET, "hunter2").unwrap();
        assert_eq!(db.require(TEST_SECRET).unwrap(), "hunter2");

        db.set(TEST_SECRET, "hunter3").unwrap();
        assert_eq!(db.require(TEST_SECRET).unwrap(), "hunter3");
    }

    #[test]
    fn require_reports_the_missing_name() {
        let db = SecretsDb::open_in_memory().unwrap();
        let err = db.require(GSHEETS_TOKEN).unwrap_err();
        assert!(err.contains(GSHEETS_TOKEN));
    }
}
