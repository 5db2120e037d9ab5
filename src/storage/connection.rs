//! Per-call SQLite connections
//!
//! Nothing here holds a connection between calls. Each operation opens the
//! database file, runs, and drops the handle before returning, on success and
//! on every error path alike.

use std::path::Path;

use rusqlite::{Connection, OptionalExtension, Transaction};

use crate::config::{StoreConfig, ensure_db_dir};
use crate::{Error, Result};

/// Handle to a database file. Cheap to clone; opens nothing until used.
#[derive(Debug, Clone)]
pub struct Database {
    config: StoreConfig,
}

impl Database {
    pub fn new(config: StoreConfig) -> Self {
        Self { config }
    }

    pub fn path(&self) -> &Path {
        &self.config.database
    }

    /// Open a fresh connection with the configured foreign-key enforcement
    pub fn connect(&self) -> Result<Connection> {
        ensure_db_dir(&self.config.database)?;
        let conn = Connection::open(&self.config.database)?;
        conn.pragma_update(None, "foreign_keys", self.config.foreign_keys)?;
        Ok(conn)
    }

    /// Run `statements` one by one, outside any transaction.
    ///
    /// The first failing statement aborts the run; statements already applied
    /// stay applied.
    pub fn execute_schema(&self, statements: &[&str]) -> Result<()> {
        let conn = self.connect()?;
        for stmt in statements {
            conn.execute(stmt, [])?;
        }
        tracing::debug!(
            database = %self.config.database.display(),
            statements = statements.len(),
            "schema ensured"
        );
        Ok(())
    }

    /// Read-only access on a fresh connection
    pub fn read<T, F>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&Connection) -> Result<T>,
    {
        let conn = self.connect()?;
        f(&conn)
    }

    /// Run `f` inside one transaction: commit on `Ok`, roll back on `Err`.
    pub fn write<T, F>(&self, op: &'static str, f: F) -> Result<T>
    where
        F: FnOnce(&Transaction<'_>) -> Result<T>,
    {
        let mut conn = self.connect()?;
        let tx = conn.transaction()?;

        match f(&tx) {
            Ok(value) => {
                tx.commit()?;
                tracing::debug!(op, "committed");
                Ok(value)
            }
            Err(err) => {
                if let Err(rollback_err) = tx.rollback() {
                    tracing::warn!(op, error = %rollback_err, "rollback failed");
                }
                tracing::debug!(op, error = %err, "rolled back");
                Err(err)
            }
        }
    }
}

/// Does `table` have a row whose `key_column` equals `id`?
///
/// `table` and `key_column` are always crate constants, never user input.
pub(crate) fn row_exists(conn: &Connection, table: &str, key_column: &str, id: i64) -> Result<bool> {
    let sql = format!("SELECT 1 FROM {table} WHERE {key_column} = ?1");
    let found: Option<i64> = conn.query_row(&sql, [id], |row| row.get(0)).optional()?;
    Ok(found.is_some())
}

pub(crate) fn count(conn: &Connection, sql: &str) -> Result<usize> {
    let count: i64 = conn.query_row(sql, [], |row| row.get(0))?;
    Ok(count as usize)
}

/// Map a failed insert to the caller-facing outcome.
///
/// UNIQUE and PRIMARY KEY violations become `Duplicate`; a foreign-key
/// violation becomes `NotFound`; everything else stays a storage error.
pub(crate) fn classify_write_error(err: rusqlite::Error, entity: &'static str) -> Error {
    if let rusqlite::Error::SqliteFailure(ref failure, ref message) = err {
        let detail = message.clone().unwrap_or_else(|| failure.to_string());
        match failure.extended_code {
            rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE | rusqlite::ffi::SQLITE_CONSTRAINT_PRIMARYKEY => {
                tracing::warn!(entity, %detail, "duplicate rejected");
                return Error::Duplicate { entity, detail };
            }
            rusqlite::ffi::SQLITE_CONSTRAINT_FOREIGNKEY => {
                tracing::warn!(entity, %detail, "dangling reference rejected");
                return Error::NotFound {
                    entity: "referenced row",
                    key: detail,
                };
            }
            _ => {}
        }
    }
    Error::Storage(err)
}

#[cfg(test)]
mod tests {
    use super::*;

    const CREATE_PAIRS: &str =
        "CREATE TABLE IF NOT EXISTS pairs (id INTEGER PRIMARY KEY AUTOINCREMENT, name TEXT NOT NULL UNIQUE)";

    fn scratch() -> (tempfile::TempDir, Database) {
        let dir = tempfile::tempdir().unwrap();
        let db = Database::new(StoreConfig::new(dir.path().join("nested").join("scratch.db")));
        db.execute_schema(&[CREATE_PAIRS]).unwrap();
        (dir, db)
    }

    fn insert(tx: &Transaction<'_>, name: &str) -> Result<i64> {
        tx.execute("INSERT INTO pairs (name) VALUES (?1)", [name])
            .map_err(|e| classify_write_error(e, "pair"))?;
        Ok(tx.last_insert_rowid())
    }

    #[test]
    fn test_connect_creates_parent_dir() {
        let (_dir, db) = scratch();
        assert!(db.path().exists());
    }

    #[test]
    fn test_foreign_keys_pragma_follows_config() {
        let dir = tempfile::tempdir().unwrap();
        let on = Database::new(StoreConfig::new(dir.path().join("a.db")));
        let off = Database::new(StoreConfig::new(dir.path().join("b.db")).with_foreign_keys(false));

        let read_flag = |db: &Database| {
            db.read(|conn| Ok(conn.query_row("PRAGMA foreign_keys", [], |r| r.get::<_, i64>(0))?))
                .unwrap()
        };
        assert_eq!(read_flag(&on), 1);
        assert_eq!(read_flag(&off), 0);
    }

    #[test]
    fn test_write_commits_on_ok() {
        let (_dir, db) = scratch();
        let id = db.write("insert", |tx| insert(tx, "alpha")).unwrap();
        assert!(id > 0);
        assert_eq!(db.read(|c| count(c, "SELECT COUNT(*) FROM pairs")).unwrap(), 1);
    }

    #[test]
    fn test_write_rolls_back_on_err() {
        let (_dir, db) = scratch();
        let result = db.write("insert-then-fail", |tx| {
            insert(tx, "beta")?;
            Err::<(), _>(Error::not_found("pair", 42))
        });
        assert!(result.unwrap_err().is_not_found());
        assert_eq!(db.read(|c| count(c, "SELECT COUNT(*) FROM pairs")).unwrap(), 0);
    }

    #[test]
    fn test_unique_violation_is_duplicate() {
        let (_dir, db) = scratch();
        db.write("insert", |tx| insert(tx, "gamma")).unwrap();
        let err = db.write("insert", |tx| insert(tx, "gamma")).unwrap_err();
        assert!(err.is_duplicate());
    }

    #[test]
    fn test_row_exists() {
        let (_dir, db) = scratch();
        let id = db.write("insert", |tx| insert(tx, "delta")).unwrap();
        db.read(|conn| {
            assert!(row_exists(conn, "pairs", "id", id)?);
            assert!(!row_exists(conn, "pairs", "id", id + 1)?);
            Ok(())
        })
        .unwrap();
    }

    #[test]
    fn test_execute_schema_is_idempotent() {
        let (_dir, db) = scratch();
        db.execute_schema(&[CREATE_PAIRS]).unwrap();
        db.execute_schema(&[CREATE_PAIRS]).unwrap();
    }

    #[test]
    fn test_bad_ddl_keeps_earlier_statements() {
        let (_dir, db) = scratch();
        let result = db.execute_schema(&[
            "CREATE TABLE IF NOT EXISTS kept (id INTEGER PRIMARY KEY)",
            "CREATE TABLE broken (",
        ]);
        assert!(matches!(result, Err(Error::Storage(_))));
        let kept = db
            .read(|c| count(c, "SELECT COUNT(*) FROM sqlite_master WHERE name = 'kept'"))
            .unwrap();
        assert_eq!(kept, 1);
    }

    #[test]
    fn test_foreign_key_violation_is_not_found() {
        let (_dir, db) = scratch();
        db.execute_schema(&[
            "CREATE TABLE IF NOT EXISTS children (id INTEGER PRIMARY KEY, pair_id INTEGER NOT NULL REFERENCES pairs(id))",
        ])
        .unwrap();

        let err = db
            .write("insert-child", |tx| {
                tx.execute("INSERT INTO children (pair_id) VALUES (?1)", [99])
                    .map_err(|e| classify_write_error(e, "child"))?;
                Ok(())
            })
            .unwrap_err();

        assert!(err.is_not_found());
        assert_eq!(
            db.read(|c| count(c, "SELECT COUNT(*) FROM children")).unwrap(),
            0
        );
    }
}
