//! dupsweep - Guarded duplicate file sweeper
//!
//! Scans a directory tree for likely duplicates (same file name, same byte
//! size; content is never read), resolves each group by policy or by asking
//! the operator, and deletes losing copies only inside directories declared
//! editable. Comes with a tiny-file side channel, junk-file cleanup, empty
//! directory removal and a dry-run mode.

pub mod cli;
pub mod console;
pub mod delete;
pub mod error;
pub mod guard;
pub mod logging;
pub mod report;
pub mod resolve;
pub mod scanner;

use std::path::PathBuf;

use bytesize::ByteSize;

use crate::cli::Cli;
use crate::console::{Console, StdioConsole};
use crate::delete::{DeleteSummary, Deleter};
use crate::error::{ConfigError, ExitCode};
use crate::guard::PathGuard;
use crate::resolve::{Mode, Resolver};
use crate::scanner::Scanner;

/// Validated parameters for one sweep.
#[derive(Debug, Clone)]
pub struct RunOptions {
    /// Directory tree to scan.
    pub root: PathBuf,
    /// Resolution policy.
    pub mode: Mode,
    /// Directories (resolved against the root) where deletion is allowed.
    /// Empty means the whole root is editable.
    pub mutable_dirs: Vec<PathBuf>,
    /// Files below this size go to the tiny channel; 0 disables it.
    pub tiny_threshold: u64,
    /// Report deletions without performing them.
    pub dry_run: bool,
}

/// Run one sweep: validate the root, build the guard, scan, resolve, and
/// emit the closing byte total.
///
/// # Errors
///
/// Returns a [`ConfigError`] when the root or a declared mutable directory
/// is unusable. Everything after that point is recovered and logged.
///
/// # Example
///
/// ```no_run
/// use dupsweep::console::StdioConsole;
/// use dupsweep::resolve::Mode;
/// use dupsweep::{run, RunOptions};
///
/// # fn main() -> Result<(), dupsweep::error::ConfigError> {
/// let options = RunOptions {
///     root: "/photos".into(),
///     mode: Mode::PickFirst,
///     mutable_dirs: Vec::new(),
///     tiny_threshold: 0,
///     dry_run: true,
/// };
/// let summary = run(&options, &mut StdioConsole)?;
/// println!("would reclaim {} bytes", summary.bytes);
/// # Ok(())
/// # }
/// ```
pub fn run(options: &RunOptions, console: &mut dyn Console) -> Result<DeleteSummary, ConfigError> {
    let root = std::path::absolute(&options.root)
        .map_err(|_| ConfigError::InvalidRoot(options.root.clone()))?;
    if !root.is_dir() {
        return Err(ConfigError::InvalidRoot(options.root.clone()));
    }

    let mutable_dirs = if options.mutable_dirs.is_empty() {
        vec![root.clone()]
    } else {
        options.mutable_dirs.clone()
    };
    let guard = PathGuard::new(&root, &mutable_dirs)?;

    log::info!("scanning {} with {:?}", root.display(), options.mode);
    if options.dry_run {
        log::info!("debug mode: nothing will be deleted");
    }

    let mut deleter = Deleter::new(options.dry_run);
    let scanner = Scanner::new(&guard, options.tiny_threshold);
    let (outcome, _) = scanner.scan(&root, &mut deleter, console);

    Resolver::new(&guard, options.mode, options.tiny_threshold)
        .resolve(outcome, &mut deleter, console);

    console.line(&report::total_line(deleter.bytes_deleted()));

    let summary = deleter.summary();
    log::info!(
        "run complete: {} reclaimed ({} files, {} empty dirs)",
        ByteSize::b(summary.bytes),
        summary.files,
        summary.dirs
    );
    Ok(summary)
}

/// Binary entry point: set up logging, map the parsed arguments, and run
/// against the stdio console.
///
/// # Errors
///
/// Propagates configuration errors; `main` downcasts them to pick the exit
/// code.
pub fn run_app(cli: Cli) -> anyhow::Result<ExitCode> {
    logging::init(cli.verbose, cli.quiet);

    let options = RunOptions {
        root: cli.root,
        mode: cli.mode.into(),
        mutable_dirs: cli.editable_dirs,
        tiny_threshold: cli.tiny_size,
        dry_run: cli.debug,
    };

    run(&options, &mut StdioConsole)?;
    Ok(ExitCode::Success)
}
