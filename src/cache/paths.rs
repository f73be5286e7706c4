// Cache path utilities.
// Resolves the on-disk cache location and maps cache keys to file names.

use std::path::{Path, PathBuf};

use directories::ProjectDirs;

/// Get the base cache directory (~/.cache/repocards on Linux).
pub fn cache_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "repocards").map(|dirs| dirs.cache_dir().to_path_buf())
}

/// Directory holding one JSON file per cached repo.
pub fn entries_dir(base: &Path) -> PathBuf {
    base.join("entries")
}

/// Path to the log file written while the card browser owns the terminal.
pub fn log_path(base: &Path) -> PathBuf {
    base.join("repocards.log")
}

/// File name of the entry stored under `key`.
pub fn entry_file_name(key: &str) -> String {
    format!("{}.json", sanitize_name(key))
}

/// Sanitize a name for use in filesystem paths.
/// Replaces problematic characters with underscores.
pub fn sanitize_name(name: &str) -> String {
    name.chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            _ => c,
        })
        .collect()
}
