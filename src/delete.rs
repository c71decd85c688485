//! Deletion executor.
//!
//! Every file and directory removal in the tool flows through [`Deleter`]:
//! it owns the dry-run switch, the byte accounting, and the one-level
//! empty-parent cleanup. Filesystem errors are logged with their context and
//! never propagated, so one stubborn path cannot stop a run.
//!
//! In dry-run mode nothing is touched; instead every would-be deletion is
//! recorded in a simulated set so later emptiness checks (and repeat
//! deletions of the same path) behave exactly as they would in a real run.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use crate::console::Console;
use crate::scanner::FileRecord;

/// Totals accumulated across one run.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct DeleteSummary {
    /// Bytes reclaimed (or that would be, in dry-run).
    pub bytes: u64,
    /// Files deleted.
    pub files: u64,
    /// Emptied directories removed.
    pub dirs: u64,
}

/// Performs (or simulates) deletions and keeps the running totals.
#[derive(Debug)]
pub struct Deleter {
    dry_run: bool,
    summary: DeleteSummary,
    simulated: HashSet<PathBuf>,
}

impl Deleter {
    /// A fresh executor. With `dry_run` set, no filesystem mutation happens.
    #[must_use]
    pub fn new(dry_run: bool) -> Self {
        Self {
            dry_run,
            summary: DeleteSummary::default(),
            simulated: HashSet::new(),
        }
    }

    /// Delete one file, then remove its parent directory if that left it
    /// empty. A path that no longer exists is a silent no-op; an earlier
    /// group may already have consumed it. Failures are logged under
    /// `context` and swallowed.
    pub fn delete(&mut self, record: &FileRecord, context: &str, console: &mut dyn Console) {
        if self.is_gone(record.path()) {
            return;
        }

        if self.dry_run {
            self.simulated.insert(record.path().to_path_buf());
        } else if let Err(err) = fs::remove_file(record.path()) {
            log::error!(
                "problem deleting {} {} [{}]: {err}",
                context,
                record.path().display(),
                record.size()
            );
            return;
        }

        console.line(&format!(
            "\t\tFile {}deleted: {} [{}]",
            self.qualifier(),
            record.path().display(),
            record.size()
        ));
        log::debug!("deleted {} {}", context, record.path().display());
        self.summary.bytes += record.size();
        self.summary.files += 1;

        if let Some(parent) = record.path().parent() {
            if self.is_dir_empty(parent) {
                self.remove_empty_dir(parent, console);
            }
        }
    }

    /// Totals so far.
    #[must_use]
    pub fn summary(&self) -> DeleteSummary {
        self.summary
    }

    /// Bytes reclaimed so far.
    #[must_use]
    pub fn bytes_deleted(&self) -> u64 {
        self.summary.bytes
    }

    fn qualifier(&self) -> &'static str {
        if self.dry_run {
            "would have been "
        } else {
            ""
        }
    }

    fn is_gone(&self, path: &Path) -> bool {
        if self.dry_run && self.simulated.contains(path) {
            return true;
        }
        !path.exists()
    }

    /// Whether `dir` holds no entries, counting simulated deletions as
    /// already gone. Unreadable directories count as non-empty.
    fn is_dir_empty(&self, dir: &Path) -> bool {
        let entries = match fs::read_dir(dir) {
            Ok(entries) => entries,
            Err(err) => {
                log::error!(
                    "problem determining if directory is empty: {}: {err}",
                    dir.display()
                );
                return false;
            }
        };
        for entry in entries {
            match entry {
                Ok(entry) => {
                    if !(self.dry_run && self.simulated.contains(&entry.path())) {
                        return false;
                    }
                }
                Err(err) => {
                    log::error!(
                        "problem determining if directory is empty: {}: {err}",
                        dir.display()
                    );
                    return false;
                }
            }
        }
        true
    }

    // One level only; an emptied grandparent stays in place.
    fn remove_empty_dir(&mut self, dir: &Path, console: &mut dyn Console) {
        if self.dry_run {
            self.simulated.insert(dir.to_path_buf());
        } else if let Err(err) = fs::remove_dir(dir) {
            log::error!("problem deleting empty directory {}: {err}", dir.display());
            return;
        }

        console.line(&format!(
            "\t\tEmpty directory {}deleted: {}",
            self.qualifier(),
            dir.display()
        ));
        self.summary.dirs += 1;
    }
}
