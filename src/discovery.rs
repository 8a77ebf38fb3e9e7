//! Project directory discovery.
//!
//! Projects are the immediate children of each entry in a colon-separated
//! search path (the merged config paths and `$CDPATH`). Discovery never
//! recurses; drill-down listings are loaded on demand.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};

/// A discovered project directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Directory {
    /// Display name (the final path segment).
    pub name: String,
    /// Absolute path.
    pub path: PathBuf,
    /// Whether the directory contains non-hidden subdirectories.
    /// Computed once at discovery time; staleness within one interactive
    /// run is acceptable.
    pub has_subdirs: bool,
}

/// Find all project directories in the search path locations.
///
/// Only immediate children are returned. Hidden entries and plain files are
/// skipped, as are search path entries that do not exist or cannot be read.
pub fn discover_directories(search_path: &str) -> Vec<Directory> {
    let mut dirs = Vec::new();

    for base in search_path.split(':') {
        let base = base.trim();
        if base.is_empty() {
            continue;
        }

        let Some(base_path) = expand_home(base) else {
            continue;
        };

        let Ok(children) = list_child_dirs(&base_path) else {
            continue;
        };
        dirs.extend(children);
    }

    dirs
}

/// Immediate non-hidden subdirectories of a directory, for drill-down.
pub fn subdirectories(dir: &Directory) -> io::Result<Vec<Directory>> {
    list_child_dirs(&dir.path)
}

fn list_child_dirs(base: &Path) -> io::Result<Vec<Directory>> {
    let mut children = Vec::new();

    for entry in fs::read_dir(base)? {
        let Ok(entry) = entry else {
            continue;
        };
        let name = entry.file_name().to_string_lossy().into_owned();
        if name.starts_with('.') {
            continue;
        }
        let path = entry.path();
        if !path.is_dir() {
            continue;
        }

        children.push(Directory {
            has_subdirs: has_subdirectories(&path),
            name,
            path,
        });
    }

    // read_dir order is platform-dependent; sort for a stable listing.
    children.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(children)
}

/// Whether a directory contains any non-hidden subdirectories.
fn has_subdirectories(path: &Path) -> bool {
    let Ok(entries) = fs::read_dir(path) else {
        return false;
    };

    entries.flatten().any(|entry| {
        !entry.file_name().to_string_lossy().starts_with('.') && entry.path().is_dir()
    })
}

/// Expand a leading `~` to the home directory.
///
/// Returns `None` when the home directory cannot be determined.
fn expand_home(path: &str) -> Option<PathBuf> {
    if let Some(rest) = path.strip_prefix('~') {
        let home = dirs::home_dir()?;
        return Some(home.join(rest.trim_start_matches('/')));
    }
    Some(PathBuf::from(path))
}

/// Resolve a CLI path argument to an existing absolute directory.
///
/// Accepts `.` for the current directory and a leading `~` for home.
pub fn resolve_dir_arg(arg: &str) -> Result<PathBuf> {
    let resolved = if arg == "." {
        std::env::current_dir().context("failed to get current directory")?
    } else {
        let expanded = expand_home(arg).context("failed to get home directory")?;
        std::path::absolute(&expanded)
            .with_context(|| format!("failed to resolve path: {}", expanded.display()))?
    };

    match fs::metadata(&resolved) {
        Ok(meta) if meta.is_dir() => Ok(resolved),
        Ok(_) => bail!("not a directory: {}", resolved.display()),
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            bail!("directory does not exist: {}", resolved.display())
        }
        Err(err) => Err(err).with_context(|| format!("failed to stat path: {}", resolved.display())),
    }
}
