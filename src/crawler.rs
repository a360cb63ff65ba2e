//! Directory crawler
//!
//! Walks a source tree, runs the chosen extraction strategy on every
//! `.java` file, and persists the resulting record groups. The foreign key
//! from method to class is resolved here, once per group, after the class
//! row obtains its id; classifiers never see the store.
//!
//! One malformed or unreadable file never terminates the run: failures are
//! logged per file and the traversal always completes.

use crate::Result;
use crate::ignore::IgnoreFilter;
use crate::parser::{SourceParser, TypeGroup};
use crate::storage::SqliteStore;
use std::path::Path;

/// Counters accumulated over one crawl
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct CrawlStats {
    /// Source files found and handed to the parser
    pub files_scanned: usize,
    /// Files that failed to read, parse, or persist
    pub files_failed: usize,
    /// Class records persisted
    pub classes: usize,
    /// Method records persisted
    pub methods: usize,
}

impl std::fmt::Display for CrawlStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} files scanned ({} failed), {} classes, {} methods",
            self.files_scanned, self.files_failed, self.classes, self.methods
        )
    }
}

/// Persist one file's extraction output as a single transaction.
///
/// Each class is inserted first; its assigned id is written into every
/// owned method before that method is inserted, so a failed class insert
/// suppresses its dependent method inserts. Returns the persisted
/// (classes, methods) counts.
pub fn persist_groups(store: &SqliteStore, groups: Vec<TypeGroup>) -> Result<(usize, usize)> {
    let mut classes = 0;
    let mut methods = 0;

    store.begin_transaction()?;
    let outcome: Result<()> = (|| {
        for group in groups {
            let class_id = store.insert_class(&group.class)?;
            classes += 1;
            for mut method in group.methods {
                method.class_id = Some(class_id);
                store.insert_method(&method)?;
                methods += 1;
            }
        }
        Ok(())
    })();

    match outcome {
        Ok(()) => {
            store.commit()?;
            Ok((classes, methods))
        }
        Err(e) => {
            let _ = store.rollback();
            Err(e)
        }
    }
}

/// Crawl a source tree, extracting and persisting every `.java` file
pub fn crawl(
    root: &Path,
    store: &SqliteStore,
    parser: &dyn SourceParser,
    filter: &IgnoreFilter,
) -> Result<CrawlStats> {
    let mut stats = CrawlStats::default();

    let walker = walkdir::WalkDir::new(root)
        .into_iter()
        .filter_entry(|e| e.path() == root || !filter.is_ignored(e.path(), e.file_type().is_dir()));

    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                tracing::error!("Walk error under {}: {}", root.display(), e);
                stats.files_failed += 1;
                continue;
            }
        };
        if !entry.file_type().is_file() {
            continue;
        }
        let file_path = entry.path();
        if file_path.extension().and_then(|e| e.to_str()) != Some("java") {
            continue;
        }

        let relative = file_path.strip_prefix(root).unwrap_or(file_path);
        let relative_str = relative.to_string_lossy();
        tracing::info!("Analyzing {}", relative_str);
        stats.files_scanned += 1;

        let source = match std::fs::read_to_string(file_path) {
            Ok(source) => source,
            Err(e) => {
                tracing::error!("Failed to read {}: {}", file_path.display(), e);
                stats.files_failed += 1;
                continue;
            }
        };

        match parser.parse(&relative_str, &source) {
            Ok(groups) => match persist_groups(store, groups) {
                Ok((classes, methods)) => {
                    stats.classes += classes;
                    stats.methods += methods;
                }
                Err(e) => {
                    tracing::error!("Failed to persist {}: {}", relative_str, e);
                    stats.files_failed += 1;
                }
            },
            Err(e) => {
                tracing::error!("Failed to parse {}: {}", relative_str, e);
                stats.files_failed += 1;
            }
        }
    }

    Ok(stats)
}
