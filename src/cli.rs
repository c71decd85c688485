//! Command-line interface definitions.
//!
//! All arguments are defined with the clap derive API. The tool is a single
//! batch command, so there are no subcommands.
//!
//! # Example
//!
//! ```bash
//! # Keep the first copy of every duplicate automatically
//! dupsweep ~/pictures --mode pick-first
//!
//! # Only allow deletions under two subdirectories
//! dupsweep ~/pictures -m pick-first -e imports -e exports
//!
//! # Divert files under 4 kB into the tiny-file channel, dry-run
//! dupsweep ~/pictures -m interactive-pick-file -s 4KB --debug
//! ```

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

use crate::resolve::Mode;

/// Duplicate file sweeper.
///
/// Files are considered likely duplicates when they share a file name and a
/// byte size; content is never read. Deletions only happen under directories
/// declared editable, and `--debug` previews a run without touching anything.
#[derive(Debug, Parser)]
#[command(name = "dupsweep")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Root directory to scan
    #[arg(value_name = "ROOT")]
    pub root: PathBuf,

    /// How duplicate groups are resolved
    #[arg(short, long, value_enum)]
    pub mode: ModeArg,

    /// Directory (relative to the root) where deletions are allowed
    ///
    /// Can be specified multiple times. When omitted, the whole root is
    /// editable.
    #[arg(short = 'e', long = "editable", value_name = "DIR")]
    pub editable_dirs: Vec<PathBuf>,

    /// Divert files smaller than this into the tiny-file channel (e.g., 500, 4KB)
    ///
    /// Supports suffixes: B, KB, KiB, MB, MiB, GB, GiB, TB, TiB.
    /// 0 disables the channel.
    #[arg(
        short = 's',
        long = "tiny-size",
        value_name = "SIZE",
        default_value = "0",
        value_parser = parse_size
    )]
    pub tiny_size: u64,

    /// Report what would be deleted without touching the filesystem
    #[arg(short, long)]
    pub debug: bool,

    /// Increase verbosity level (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress all log output except errors
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,
}

/// Resolution policy selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ModeArg {
    /// Keep the first copy of each group, delete the rest
    PickFirst,
    /// Ask which copy to keep, group by group
    InteractivePickFile,
    /// Ask once per directory set shared by several groups
    InteractivePickDirectory,
}

impl From<ModeArg> for Mode {
    fn from(arg: ModeArg) -> Self {
        match arg {
            ModeArg::PickFirst => Mode::PickFirst,
            ModeArg::InteractivePickFile => Mode::InteractivePickFile,
            ModeArg::InteractivePickDirectory => Mode::InteractivePickDirectory,
        }
    }
}

impl std::fmt::Display for ModeArg {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ModeArg::PickFirst => write!(f, "pick-first"),
            ModeArg::InteractivePickFile => write!(f, "interactive-pick-file"),
            ModeArg::InteractivePickDirectory => write!(f, "interactive-pick-directory"),
        }
    }
}

/// Parse a human-readable size string into bytes.
///
/// Supports suffixes: B, KB, KiB, MB, MiB, GB, GiB, TB, TiB.
/// Case-insensitive. Numbers without suffix are treated as bytes.
///
/// # Examples
///
/// ```
/// use dupsweep::cli::parse_size;
///
/// assert_eq!(parse_size("500").unwrap(), 500);
/// assert_eq!(parse_size("4KB").unwrap(), 4_000);
/// assert_eq!(parse_size("1MiB").unwrap(), 1_048_576);
/// ```
///
/// # Errors
///
/// Returns an error if the string is empty, contains an invalid number,
/// a negative number, or an unknown size suffix.
pub fn parse_size(s: &str) -> Result<u64, String> {
    let s = s.trim();
    if s.is_empty() {
        return Err("Size cannot be empty".to_string());
    }

    // Find where the number ends and the suffix begins
    let (num_str, suffix) = match s.find(|c: char| !c.is_ascii_digit() && c != '.') {
        Some(idx) => (&s[..idx], s[idx..].trim().to_uppercase()),
        None => (s, String::new()),
    };

    let num: f64 = num_str
        .parse()
        .map_err(|_| format!("Invalid number: '{num_str}'"))?;

    if num < 0.0 {
        return Err("Size cannot be negative".to_string());
    }

    let multiplier: u64 = match suffix.as_str() {
        "" | "B" => 1,
        "KB" | "K" => 1_000,
        "KIB" => 1_024,
        "MB" | "M" => 1_000_000,
        "MIB" => 1_048_576,
        "GB" | "G" => 1_000_000_000,
        "GIB" => 1_073_741_824,
        "TB" | "T" => 1_000_000_000_000,
        "TIB" => 1_099_511_627_776,
        _ => return Err(format!("Unknown size suffix: '{suffix}'")),
    };

    Ok((num * multiplier as f64) as u64)
}
