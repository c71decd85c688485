//! Report formatting: section banners and SI byte counts.
//!
//! All operator-facing output goes through [`Console`](crate::console::Console)
//! lines built here or at the call sites. The byte formatter is the one piece
//! with an exact contract: base-1000 units, one decimal place, and integer
//! bytes below 1 kB, so `999` renders as `999 B` and `1000` as `1.0 kB`.

use crate::console::Console;

/// SI prefixes above bytes, ascending by magnitude.
const SI_PREFIXES: &[u8] = b"kMGTPE";

/// Format a byte count with base-1000 SI units and one decimal place.
///
/// Values below 1000 are shown as exact integers. Values just under the next
/// unit boundary can round up to `1000.0` of the current unit (`999_999`
/// gives `1000.0 kB`); that artifact is part of the output contract.
///
/// # Example
///
/// ```
/// use dupsweep::report::human_bytes;
///
/// assert_eq!(human_bytes(999), "999 B");
/// assert_eq!(human_bytes(1500), "1.5 kB");
/// assert_eq!(human_bytes(1_234_567_890), "1.2 GB");
/// ```
#[must_use]
pub fn human_bytes(bytes: u64) -> String {
    const UNIT: u64 = 1000;
    if bytes < UNIT {
        return format!("{bytes} B");
    }
    let exp = bytes.ilog(UNIT);
    let prefix = SI_PREFIXES[(exp - 1) as usize] as char;
    let value = bytes as f64 / (UNIT as f64).powi(exp as i32);
    format!("{value:.1} {prefix}B")
}

/// The closing line of every run.
#[must_use]
pub fn total_line(bytes: u64) -> String {
    format!("Total amount of bytes cleaned: {}", human_bytes(bytes))
}

/// Emit a section banner.
pub fn section(console: &mut dyn Console, title: &str) {
    console.line("================================");
    console.line(&format!(" {title}"));
    console.line("================================");
}
