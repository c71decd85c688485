//! Directory traversal and duplicate-candidate collection.
//!
//! The scanner walks the root depth-first (symlinks followed, entries sorted
//! by file name so runs are reproducible) and classifies every regular file,
//! in this order:
//!
//! 1. Names in the ignore set are announced and dropped entirely.
//! 2. Files below the tiny threshold go to the tiny side channel.
//! 3. Names in the junk set are deleted on sight when the path is mutable.
//! 4. Everything else lands in the grouping table under its name/size key.
//!
//! Unreadable entries are logged and skipped; a scan never aborts over a
//! single bad file.

use std::borrow::Cow;
use std::cmp::Ordering;
use std::collections::{BTreeMap, HashSet};
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::console::Console;
use crate::delete::Deleter;
use crate::guard::PathGuard;

/// File names never recorded anywhere (macOS Finder droppings).
pub const DEFAULT_IGNORED: &[&str] = &[".DS_Store"];

/// File names deleted on sight inside mutable paths.
pub const DEFAULT_JUNK: &[&str] = &[".picasa.ini", "Thumbs.db"];

/// One regular file discovered during a scan.
///
/// The grouping key is derived at construction from the file name and size
/// (`"{name}.{size}"`) and never changes afterward, which is why the fields
/// are read-only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileRecord {
    path: PathBuf,
    size: u64,
    key: String,
}

impl FileRecord {
    /// Build a record for `path` with the given byte size.
    #[must_use]
    pub fn new(path: PathBuf, size: u64) -> Self {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let key = format!("{name}.{size}");
        Self { path, size, key }
    }

    /// Absolute path of the file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Byte size at discovery time.
    #[must_use]
    pub fn size(&self) -> u64 {
        self.size
    }

    /// Grouping key: file name, a dot, then the decimal size.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Final name component, lossily decoded.
    #[must_use]
    pub fn file_name(&self) -> Cow<'_, str> {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy())
            .unwrap_or_default()
    }
}

// Byte-wise path order, so member listings match plain string sorting.
impl Ord for FileRecord {
    fn cmp(&self, other: &Self) -> Ordering {
        self.path
            .as_os_str()
            .cmp(other.path.as_os_str())
            .then_with(|| self.size.cmp(&other.size))
    }
}

impl PartialOrd for FileRecord {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Everything one scan produced for the resolution phase.
#[derive(Debug, Default)]
pub struct ScanOutcome {
    /// Key to all records sharing it, iterated in ascending key order.
    pub groups: BTreeMap<String, Vec<FileRecord>>,
    /// Files below the tiny threshold, in traversal order.
    pub tiny: Vec<FileRecord>,
}

/// Counters accumulated over one scan.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ScanStats {
    /// Regular files examined.
    pub files_seen: u64,
    /// Files dropped via the ignore set.
    pub ignored: u64,
    /// Files diverted to the tiny channel.
    pub tiny: u64,
    /// Junk files sent for deletion.
    pub junk: u64,
    /// Files appended to the grouping table.
    pub grouped: u64,
    /// Entries that could not be read.
    pub errors: u64,
}

/// Walks a tree and classifies its files.
pub struct Scanner<'a> {
    guard: &'a PathGuard,
    tiny_threshold: u64,
    ignored: HashSet<String>,
    junk: HashSet<String>,
}

impl<'a> Scanner<'a> {
    /// Scanner with the default ignore and junk sets. A `tiny_threshold` of
    /// zero disables the tiny channel.
    #[must_use]
    pub fn new(guard: &'a PathGuard, tiny_threshold: u64) -> Self {
        Self {
            guard,
            tiny_threshold,
            ignored: DEFAULT_IGNORED.iter().map(ToString::to_string).collect(),
            junk: DEFAULT_JUNK.iter().map(ToString::to_string).collect(),
        }
    }

    /// Replace the ignore set.
    #[must_use]
    pub fn with_ignored(mut self, names: &[&str]) -> Self {
        self.ignored = names.iter().map(ToString::to_string).collect();
        self
    }

    /// Replace the junk set.
    #[must_use]
    pub fn with_junk(mut self, names: &[&str]) -> Self {
        self.junk = names.iter().map(ToString::to_string).collect();
        self
    }

    /// Walk `root` and classify every regular file. Junk deletions run
    /// through `deleter` as they are encountered.
    pub fn scan(
        &self,
        root: &Path,
        deleter: &mut Deleter,
        console: &mut dyn Console,
    ) -> (ScanOutcome, ScanStats) {
        let mut outcome = ScanOutcome::default();
        let mut stats = ScanStats::default();

        for entry in WalkDir::new(root).follow_links(true).sort_by_file_name() {
            let entry = match entry {
                Ok(entry) => entry,
                Err(err) => {
                    log::warn!("problem collecting file data: {err}");
                    stats.errors += 1;
                    continue;
                }
            };
            if !entry.file_type().is_file() {
                continue;
            }
            stats.files_seen += 1;

            // Ignored names are announced before the size is even read.
            let name = entry.file_name().to_string_lossy().into_owned();
            if self.ignored.contains(name.as_str()) {
                console.line(&format!("IGNORING ===> {}", entry.path().display()));
                stats.ignored += 1;
                continue;
            }

            let size = match entry.metadata() {
                Ok(meta) => meta.len(),
                Err(err) => {
                    log::warn!(
                        "problem reading metadata for {}: {err}",
                        entry.path().display()
                    );
                    stats.errors += 1;
                    continue;
                }
            };
            self.classify(
                FileRecord::new(entry.into_path(), size),
                &name,
                &mut outcome,
                &mut stats,
                deleter,
                console,
            );
        }

        log::info!(
            "scan complete: {} files seen, {} grouped, {} tiny, {} ignored, {} junk, {} errors",
            stats.files_seen,
            stats.grouped,
            stats.tiny,
            stats.ignored,
            stats.junk,
            stats.errors
        );
        (outcome, stats)
    }

    fn classify(
        &self,
        record: FileRecord,
        name: &str,
        outcome: &mut ScanOutcome,
        stats: &mut ScanStats,
        deleter: &mut Deleter,
        console: &mut dyn Console,
    ) {
        if self.tiny_threshold > 0 && record.size() < self.tiny_threshold {
            outcome.tiny.push(record);
            stats.tiny += 1;
            return;
        }

        if self.junk.contains(name) && self.guard.is_mutable(record.path()) {
            deleter.delete(&record, "requested deleted file", console);
            stats.junk += 1;
            return;
        }

        outcome
            .groups
            .entry(record.key().to_string())
            .or_default()
            .push(record);
        stats.grouped += 1;
    }
}
