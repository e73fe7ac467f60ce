use once_cell::sync::Lazy;
use std::path::PathBuf;

/// Project root for the current process, fixed at first use from the
/// working directory.
pub static PROJECT_ROOT: Lazy<PathBuf> =
    Lazy::new(|| std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")));

/// Whether the host requires case-insensitive path comparison.
pub fn case_insensitive_paths() -> bool {
    cfg!(windows)
}
