//! SQLite storage implementation

use super::schema;
use crate::record::{ClassRecord, MethodRecord, Visibility};
use crate::{Error, Result};
use rusqlite::{Connection, params};
use std::path::Path;

/// SQLite-backed storage for the structural catalog
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    /// Open a database file (creates if it doesn't exist)
    pub fn open(path: &Path) -> Result<Self> {
        let conn = Connection::open(path)?;
        let store = Self { conn };
        store.initialize_schema()?;
        Ok(store)
    }

    /// Open an in-memory database (for testing)
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let store = Self { conn };
        store.initialize_schema()?;
        Ok(store)
    }

    /// Initialize the database schema
    fn initialize_schema(&self) -> Result<()> {
        self.conn.execute_batch("PRAGMA foreign_keys = ON")?;
        for stmt in schema::all_schema_statements() {
            self.conn.execute(stmt, [])?;
        }
        Ok(())
    }

    // ========== Transactions ==========

    /// Begin a transaction
    pub fn begin_transaction(&self) -> Result<()> {
        self.conn.execute_batch("BEGIN")?;
        Ok(())
    }

    /// Commit the current transaction
    pub fn commit(&self) -> Result<()> {
        self.conn.execute_batch("COMMIT")?;
        Ok(())
    }

    /// Roll back the current transaction
    pub fn rollback(&self) -> Result<()> {
        self.conn.execute_batch("ROLLBACK")?;
        Ok(())
    }

    // ========== Class Operations ==========

    /// Insert a class record and return its assigned row id.
    ///
    /// The returned id is the durable identity the caller writes into the
    /// `class_id` of each owned method before persisting it.
    pub fn insert_class(&self, class: &ClassRecord) -> Result<i64> {
        self.conn.execute(
            r#"
            INSERT INTO classes (name, file_path, line_number, superclass, interfaces, class_type)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            "#,
            params![
                class.name,
                class.path,
                class.line,
                class.superclass,
                class.interfaces_column(),
                class.kind,
            ],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    /// Find all classes declared in a file, in declaration order
    pub fn classes_in_file(&self, path: &str) -> Result<Vec<ClassRecord>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, name, file_path, line_number, superclass, interfaces, class_type
             FROM classes WHERE file_path = ?1 ORDER BY line_number",
        )?;
        let classes = stmt
            .query_map([path], Self::row_to_class)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(classes)
    }

    /// Find classes by name pattern (LIKE query)
    pub fn find_classes_by_name(&self, pattern: &str) -> Result<Vec<ClassRecord>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, name, file_path, line_number, superclass, interfaces, class_type
             FROM classes WHERE name LIKE ?1 ORDER BY file_path, line_number",
        )?;
        let classes = stmt
            .query_map([pattern], Self::row_to_class)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(classes)
    }

    /// Count all classes
    pub fn count_classes(&self) -> Result<usize> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM classes", [], |row| row.get(0))?;
        Ok(count as usize)
    }

    fn row_to_class(row: &rusqlite::Row) -> rusqlite::Result<ClassRecord> {
        Ok(ClassRecord {
            id: Some(row.get(0)?),
            name: row.get(1)?,
            path: row.get(2)?,
            line: row.get(3)?,
            superclass: row.get(4)?,
            interfaces: ClassRecord::interfaces_from_column(row.get(5)?),
            kind: row.get(6)?,
        })
    }

    // ========== Method Operations ==========

    /// Insert a method record.
    ///
    /// The record must already carry its owner's id; inserting a method
    /// whose foreign key is unresolved is a caller defect, not a storage
    /// anomaly.
    pub fn insert_method(&self, method: &MethodRecord) -> Result<()> {
        let class_id = method
            .class_id
            .ok_or_else(|| Error::UnresolvedForeignKey(method.name.clone()))?;
        self.conn.execute(
            r#"
            INSERT INTO methods (class_id, method_name, line_number, return_type, modifier, is_static)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            "#,
            params![
                class_id,
                method.name,
                method.line,
                method.return_type,
                method.visibility.map(|v| v.as_str()),
                method.is_static,
            ],
        )?;
        Ok(())
    }

    /// Find all methods owned by a class, in declaration order
    pub fn methods_for_class(&self, class_id: i64) -> Result<Vec<MethodRecord>> {
        let mut stmt = self.conn.prepare(
            "SELECT class_id, method_name, line_number, return_type, modifier, is_static
             FROM methods WHERE class_id = ?1 ORDER BY line_number",
        )?;
        let methods = stmt
            .query_map([class_id], Self::row_to_method)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(methods)
    }

    /// Count all methods
    pub fn count_methods(&self) -> Result<usize> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM methods", [], |row| row.get(0))?;
        Ok(count as usize)
    }

    fn row_to_method(row: &rusqlite::Row) -> rusqlite::Result<MethodRecord> {
        let modifier: Option<String> = row.get(4)?;
        let visibility = modifier
            .map(|m| {
                m.parse::<Visibility>().map_err(|e| {
                    rusqlite::Error::FromSqlConversionFailure(
                        4,
                        rusqlite::types::Type::Text,
                        Box::new(e),
                    )
                })
            })
            .transpose()?;

        Ok(MethodRecord {
            class_id: Some(row.get(0)?),
            name: row.get(1)?,
            line: row.get(2)?,
            return_type: row.get(3)?,
            visibility,
            is_static: row.get(5)?,
        })
    }

    // ========== Stats ==========

    /// Get row counts for the whole catalog
    pub fn stats(&self) -> Result<DbStats> {
        let files: i64 = self.conn.query_row(
            "SELECT COUNT(DISTINCT file_path) FROM classes",
            [],
            |row| row.get(0),
        )?;
        Ok(DbStats {
            classes: self.count_classes()?,
            methods: self.count_methods()?,
            files: files as usize,
        })
    }
}

/// Catalog-wide row counts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DbStats {
    pub classes: usize,
    pub methods: usize,
    pub files: usize,
}

impl std::fmt::Display for DbStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} classes, {} methods across {} files",
            self.classes, self.methods, self.files
        )
    }
}
