//! # Classdex - Structural catalog extractor for Java codebases
//!
//! Classdex scans a Java source tree and extracts a normalized catalog of
//! type declarations (classes, interfaces, enums) and their methods into
//! SQLite for downstream querying.
//!
//! Classdex provides:
//! - Class and method records with persistence-assigned identity
//! - Two interchangeable extraction strategies: a line-oriented regex
//!   scanner and a tree-sitter based AST walker
//! - SQLite-backed storage with a classes/methods foreign-key schema
//! - A directory crawler that ties extraction to persistence per file

pub mod record;
pub mod parser;
pub mod storage;
pub mod crawler;
pub mod ignore;
pub mod config;

// Re-exports for convenient access
pub use record::{ClassRecord, MethodRecord, Visibility};
pub use parser::{SourceParser, Strategy, TypeGroup};
pub use storage::SqliteStore;
pub use crawler::{crawl, CrawlStats};

/// Result type alias for Classdex operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for Classdex operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Grammar error: {0}")]
    Grammar(String),

    #[error("Storage error: {0}")]
    Storage(#[from] rusqlite::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Unknown strategy: {0}")]
    UnknownStrategy(String),

    #[error("Unresolved foreign key: method {0} has no owning class id")]
    UnresolvedForeignKey(String),
}
