//! Mutable-path gate.
//!
//! Deletions are only ever allowed under directories the operator declared
//! editable. The gate works on absolute path strings: a path is mutable iff
//! its string form starts with one of the declared prefixes, so files nested
//! anywhere beneath a declared directory inherit its mutability. The
//! comparison is textual prefix containment, not component matching.

use std::path::{Path, PathBuf};

use crate::error::ConfigError;

/// Set of absolute directory prefixes under which deletion is permitted.
#[derive(Debug, Clone)]
pub struct PathGuard {
    prefixes: Vec<String>,
}

impl PathGuard {
    /// Build the gate from the absolutized scan root and the declared
    /// directory names. Each name is resolved against the root (an absolute
    /// name stands alone) and must exist as a directory.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::BadMutableDir`] for the first declared name
    /// that does not resolve to an existing directory.
    pub fn new(root: &Path, mutable_dirs: &[PathBuf]) -> Result<Self, ConfigError> {
        let mut prefixes = Vec::with_capacity(mutable_dirs.len());
        for dir in mutable_dirs {
            let resolved = root.join(dir);
            if !resolved.is_dir() {
                return Err(ConfigError::BadMutableDir(dir.clone()));
            }
            prefixes.push(resolved.to_string_lossy().into_owned());
        }
        prefixes.sort();
        Ok(Self { prefixes })
    }

    /// Whether a deletion at this path would be permitted.
    #[must_use]
    pub fn is_mutable(&self, path: &Path) -> bool {
        let text = path.to_string_lossy();
        self.prefixes
            .iter()
            .any(|prefix| text.starts_with(prefix.as_str()))
    }
}
