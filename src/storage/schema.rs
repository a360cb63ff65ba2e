//! Database schema definitions

/// SQL to create the classes table
pub const CREATE_CLASSES_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS classes (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL,
    file_path TEXT NOT NULL,
    line_number INTEGER NOT NULL,
    superclass TEXT,
    interfaces TEXT,
    class_type TEXT NOT NULL
)
"#;

/// SQL to create the methods table
pub const CREATE_METHODS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS methods (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    class_id INTEGER NOT NULL,
    method_name TEXT NOT NULL,
    line_number INTEGER NOT NULL,
    return_type TEXT,
    modifier TEXT,
    is_static BOOLEAN NOT NULL DEFAULT 0,
    FOREIGN KEY (class_id) REFERENCES classes(id) ON DELETE CASCADE
)
"#;

/// SQL to create indexes
pub const CREATE_INDEXES: &[&str] = &[
    "CREATE INDEX IF NOT EXISTS idx_classes_name ON classes(name)",
    "CREATE INDEX IF NOT EXISTS idx_classes_file ON classes(file_path)",
    "CREATE INDEX IF NOT EXISTS idx_methods_class ON methods(class_id)",
    "CREATE INDEX IF NOT EXISTS idx_methods_name ON methods(method_name)",
];

/// All schema creation statements
pub fn all_schema_statements() -> Vec<&'static str> {
    let mut stmts = vec![CREATE_CLASSES_TABLE, CREATE_METHODS_TABLE];
    stmts.extend(CREATE_INDEXES.iter().copied());
    stmts
}
