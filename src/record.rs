//! Record types - the normalized extraction output
//!
//! Extraction produces two linked record kinds:
//! - `ClassRecord`: one per type declaration (class, interface, enum)
//! - `MethodRecord`: one per method signature, keyed to its owning class
//!
//! Identity is assigned by persistence: `ClassRecord::id` is `None` until
//! the record is inserted, and `MethodRecord::class_id` is resolved by the
//! caller once the owner has an id. Classifiers never touch either field.

use crate::Error;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Declaration kind emitted by the scan strategy for a plain class.
pub const KIND_CLASS: &str = "class";
/// Declaration kind for an interface.
pub const KIND_INTERFACE: &str = "interface";
/// Declaration kind for an enum.
pub const KIND_ENUM: &str = "enum";
/// Declaration kind for a record class (AST strategy only).
pub const KIND_RECORD: &str = "record";

/// Visibility modifier on a method signature.
///
/// Absence (modeled as `Option<Visibility>` on the record) means
/// package-private or unspecified. `static` is tracked separately and is
/// never folded into visibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    Public,
    Private,
    Protected,
}

impl Visibility {
    /// Get the string representation of the visibility modifier
    pub fn as_str(&self) -> &'static str {
        match self {
            Visibility::Public => "public",
            Visibility::Private => "private",
            Visibility::Protected => "protected",
        }
    }
}

impl FromStr for Visibility {
    type Err = Error;

    fn from_str(s: &str) -> crate::Result<Self> {
        match s {
            "public" => Ok(Visibility::Public),
            "private" => Ok(Visibility::Private),
            "protected" => Ok(Visibility::Protected),
            _ => Err(Error::Parse(format!("Unknown visibility modifier: {}", s))),
        }
    }
}

impl std::fmt::Display for Visibility {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A type declaration extracted from one source file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassRecord {
    /// Row id, assigned by persistence; `None` before the record is saved
    pub id: Option<i64>,
    /// Declared type name
    pub name: String,
    /// Source file path, stored verbatim
    pub path: String,
    /// 1-based declaration line number
    pub line: u32,
    /// Declared supertype following `extends`, if any
    pub superclass: Option<String>,
    /// Declared interfaces following `implements`, in declaration order
    pub interfaces: Option<Vec<String>>,
    /// Declaration kind tag: "class", "interface", "enum", ...
    ///
    /// Kept as an open string rather than a closed enum so a grammar that
    /// exposes further declaration kinds (e.g. "record") can pass them
    /// through without a schema change.
    pub kind: String,
}

impl ClassRecord {
    /// Create a new class record with identity unset
    pub fn new(
        name: impl Into<String>,
        path: impl Into<String>,
        line: u32,
        kind: impl Into<String>,
    ) -> Self {
        Self {
            id: None,
            name: name.into(),
            path: path.into(),
            line,
            superclass: None,
            interfaces: None,
            kind: kind.into(),
        }
    }

    /// Set the declared supertype
    pub fn with_superclass(mut self, superclass: impl Into<String>) -> Self {
        self.superclass = Some(superclass.into());
        self
    }

    /// Set the declared interface list
    pub fn with_interfaces(mut self, interfaces: Vec<String>) -> Self {
        self.interfaces = Some(interfaces);
        self
    }

    /// Interfaces joined for storage as a single TEXT column
    pub fn interfaces_column(&self) -> Option<String> {
        self.interfaces.as_ref().map(|list| list.join(", "))
    }

    /// Split a stored interfaces column back into the declared list
    pub fn interfaces_from_column(column: Option<String>) -> Option<Vec<String>> {
        column.map(|s| {
            s.split(',')
                .map(|part| part.trim().to_string())
                .filter(|part| !part.is_empty())
                .collect()
        })
    }
}

/// A method signature extracted from one source file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MethodRecord {
    /// Foreign key to the owning class's row id; `None` until the owner
    /// has been persisted and the crawler resolves it
    pub class_id: Option<i64>,
    /// Method name
    pub name: String,
    /// 1-based declaration line number
    pub line: u32,
    /// Declared return type; absent when extraction cannot determine it
    pub return_type: Option<String>,
    /// Visibility modifier; absent means package-private/unspecified
    pub visibility: Option<Visibility>,
    /// Whether the signature carries `static`
    pub is_static: bool,
}

impl MethodRecord {
    /// Create a new method record with the foreign key unset
    pub fn new(name: impl Into<String>, line: u32) -> Self {
        Self {
            class_id: None,
            name: name.into(),
            line,
            return_type: None,
            visibility: None,
            is_static: false,
        }
    }

    /// Set the declared return type
    pub fn with_return_type(mut self, return_type: impl Into<String>) -> Self {
        self.return_type = Some(return_type.into());
        self
    }

    /// Set the visibility modifier
    pub fn with_visibility(mut self, visibility: Visibility) -> Self {
        self.visibility = Some(visibility);
        self
    }

    /// Set the static flag
    pub fn with_static(mut self, is_static: bool) -> Self {
        self.is_static = is_static;
        self
    }
}
