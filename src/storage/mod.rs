//! Storage Layer - SQLite-backed persistence
//!
//! System of record is SQLite with tables:
//! - classes(id, name, file_path, line_number, superclass, interfaces, class_type)
//! - methods(id, class_id, method_name, line_number, return_type, modifier, is_static)
//!
//! `class_id` is the foreign key linking each method to its owning class;
//! it is assigned by the caller after the class row obtains its id.

pub mod schema;
pub mod sqlite;

pub use sqlite::{DbStats, SqliteStore};
