//! Resolution engine.
//!
//! Consumes a [`ScanOutcome`](crate::scanner::ScanOutcome) and decides, per
//! duplicate group, which copies go. Three policies exist: keep the first
//! member automatically, ask the operator per group, or ask the operator
//! once per shared directory set across all groups. Tiny files are handled
//! first in their own section when the side channel is enabled.
//!
//! Groups only reach a policy when they have at least two members and at
//! least one member the guard would allow deleting. The interactive policies
//! deliberately do not re-filter the operator's pick through the guard; the
//! explicit choice wins inside an already qualified group.

use std::collections::{BTreeMap, BTreeSet};
use std::path::PathBuf;

use crate::console::{Answer, Console};
use crate::delete::Deleter;
use crate::guard::PathGuard;
use crate::report;
use crate::scanner::{FileRecord, ScanOutcome};

/// How duplicate groups are resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Keep the first member of each sorted group, delete the rest.
    PickFirst,
    /// Prompt per group for the copy to keep.
    InteractivePickFile,
    /// Prompt once per shared directory set, covering all its groups.
    InteractivePickDirectory,
}

/// Groups whose members span exactly the same parent directories, pooled so
/// one answer settles all of them.
type SharedDirMap = BTreeMap<BTreeSet<PathBuf>, BTreeSet<FileRecord>>;

/// Applies one [`Mode`] to everything a scan produced.
pub struct Resolver<'a> {
    guard: &'a PathGuard,
    mode: Mode,
    tiny_threshold: u64,
}

impl<'a> Resolver<'a> {
    #[must_use]
    pub fn new(guard: &'a PathGuard, mode: Mode, tiny_threshold: u64) -> Self {
        Self {
            guard,
            mode,
            tiny_threshold,
        }
    }

    /// Run the tiny-file pass (when enabled) and then the duplicate pass.
    pub fn resolve(&self, outcome: ScanOutcome, deleter: &mut Deleter, console: &mut dyn Console) {
        log::debug!("resolving {} group(s) with {:?}", outcome.groups.len(), self.mode);
        if self.tiny_threshold > 0 {
            self.handle_tiny(&outcome.tiny, deleter, console);
        }
        self.handle_duplicates(outcome.groups, deleter, console);
    }

    /// Hidden tiny files are deleted, visible ones only reported, and
    /// immutable ones passed over silently.
    fn handle_tiny(&self, tiny: &[FileRecord], deleter: &mut Deleter, console: &mut dyn Console) {
        report::section(console, "Tiny Files");
        for record in tiny {
            if !self.guard.is_mutable(record.path()) {
                continue;
            }
            if record.file_name().starts_with('.') {
                deleter.delete(record, "tiny file", console);
            } else {
                console.line(&format!(
                    "skipping tiny file {} [{}]",
                    record.path().display(),
                    record.size()
                ));
            }
        }
    }

    fn handle_duplicates(
        &self,
        groups: BTreeMap<String, Vec<FileRecord>>,
        deleter: &mut Deleter,
        console: &mut dyn Console,
    ) {
        report::section(console, "Duplicates");

        let mut shared_dirs = SharedDirMap::new();
        for (key, mut dups) in groups {
            if dups.len() < 2 {
                continue;
            }
            if !dups.iter().any(|dup| self.guard.is_mutable(dup.path())) {
                console.line(&format!("skipping read-only duplicates: {key}"));
                continue;
            }
            dups.sort_by(|a, b| a.path().as_os_str().cmp(b.path().as_os_str()));

            match self.mode {
                Mode::PickFirst => self.pick_first(&dups, deleter, console),
                Mode::InteractivePickFile => self.pick_file(&dups, deleter, console),
                Mode::InteractivePickDirectory => Self::pool_by_directories(&mut shared_dirs, dups),
            }
        }

        // Shared-directory decisions need the full table, hence a second pass.
        if self.mode == Mode::InteractivePickDirectory {
            self.pick_directories(shared_dirs, deleter, console);
        }
    }

    /// Keep the lexically first member, delete the remaining mutable ones.
    fn pick_first(&self, dups: &[FileRecord], deleter: &mut Deleter, console: &mut dyn Console) {
        let first = &dups[0];
        console.line("========");
        console.line(&format!("{} [{}]", first.file_name(), first.size()));
        for dup in dups {
            if let Some(parent) = dup.path().parent() {
                console.line(&format!("\t{}", parent.display()));
            }
        }

        let mut deletions = 0;
        for dup in &dups[1..] {
            if self.guard.is_mutable(dup.path()) {
                deleter.delete(dup, "duplicate", console);
                deletions += 1;
                // At least one copy survives no matter what.
                if deletions == dups.len() - 1 {
                    break;
                }
            }
        }
    }

    fn pick_file(&self, dups: &[FileRecord], deleter: &mut Deleter, console: &mut dyn Console) {
        console.line("Choose the version of the file to keep:");
        for (index, dup) in dups.iter().enumerate() {
            console.line(&format!(
                "\t{index}) {} [{}]",
                dup.path().display(),
                dup.size()
            ));
        }
        console.line(&format!("\t{}) SKIP", dups.len()));

        match console.read_answer() {
            Answer::Choice(choice) => {
                // Negative and oversized answers both mean skip.
                let keep = usize::try_from(choice).ok().filter(|&keep| keep < dups.len());
                if let Some(keep) = keep {
                    for (index, dup) in dups.iter().enumerate() {
                        if index != keep {
                            deleter.delete(dup, "duplicate", console);
                        }
                    }
                }
            }
            Answer::Invalid => {
                log::warn!("unreadable answer, leaving group untouched");
            }
        }
    }

    /// Pass 1 of InteractivePickDirectory: pool a sorted group under the set
    /// of parent directories its members span.
    fn pool_by_directories(shared_dirs: &mut SharedDirMap, dups: Vec<FileRecord>) {
        let dirs: BTreeSet<PathBuf> = dups
            .iter()
            .filter_map(|dup| dup.path().parent())
            .map(PathBuf::from)
            .collect();
        shared_dirs.entry(dirs).or_default().extend(dups);
    }

    /// Pass 2: one prompt per directory set; the chosen directory keeps its
    /// copies of every pooled file, everything elsewhere goes.
    fn pick_directories(
        &self,
        shared_dirs: SharedDirMap,
        deleter: &mut Deleter,
        console: &mut dyn Console,
    ) {
        for (dirs, records) in shared_dirs {
            let keys: Vec<&str> = records
                .iter()
                .map(FileRecord::key)
                .collect::<BTreeSet<_>>()
                .into_iter()
                .collect();
            console.line(&format!(
                "Choose the directory where you want to keep the following files ([{}]):",
                keys.join(", ")
            ));

            let candidates: Vec<&PathBuf> = dirs.iter().collect();
            for (index, dir) in candidates.iter().enumerate() {
                console.line(&format!("\t{index}) {}", dir.display()));
            }
            console.line(&format!("\t{}) SKIP", candidates.len()));

            match console.read_answer() {
                Answer::Choice(choice) => {
                    let keep = usize::try_from(choice)
                        .ok()
                        .filter(|&keep| keep < candidates.len());
                    if let Some(keep) = keep {
                        let keep_dir = candidates[keep];
                        for record in &records {
                            if !record.path().starts_with(keep_dir) {
                                deleter.delete(record, "duplicate", console);
                            }
                        }
                    }
                }
                Answer::Invalid => {
                    log::warn!("unreadable answer, leaving directory set untouched");
                }
            }
        }
    }
}
