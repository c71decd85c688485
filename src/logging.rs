//! Logging setup.
//!
//! Diagnostics go through the `log` facade with an `env_logger` backend and
//! land on stderr, keeping stdout free for report output. The level comes
//! from, in priority order:
//!
//! 1. the `RUST_LOG` environment variable, if set,
//! 2. the CLI flags: `--quiet` (errors only), `-v` (debug), `-vv` (trace),
//! 3. the default, info.

use env_logger::Builder;
use log::LevelFilter;
use std::env;
use std::io::Write;

/// Initialize the logging subsystem from the CLI verbosity flags.
///
/// # Panics
///
/// Panics if called more than once; `env_logger` can only be installed once
/// per process.
pub fn init(verbose: u8, quiet: bool) {
    let mut builder = Builder::new();

    if env::var("RUST_LOG").is_ok() {
        builder.parse_default_env();
    } else {
        builder.filter_level(level_for(verbose, quiet));
    }

    // Compact single-line format; module path only once tracing.
    builder.format(move |buf, record| {
        let level = record.level();
        let style = buf.default_level_style(level);
        if verbose >= 2 {
            writeln!(
                buf,
                "{style}{level:<5}{style:#} [{}] {}",
                record.module_path().unwrap_or("unknown"),
                record.args()
            )
        } else {
            writeln!(buf, "{style}{level:<5}{style:#} {}", record.args())
        }
    });

    builder.init();
    log::debug!("logging initialized at {:?}", log::max_level());
}

/// Map the CLI flags to a filter level. `quiet` wins over any verbosity.
fn level_for(verbose: u8, quiet: bool) -> LevelFilter {
    if quiet {
        LevelFilter::Error
    } else {
        match verbose {
            0 => LevelFilter::Info,
            1 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    }
}
