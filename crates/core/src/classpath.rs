//! Default classpath providers.

use cljscope_plugin::{ClasspathEntry, ClasspathProvider};
use std::path::PathBuf;

/// Fixed, caller-assembled classpath. Order is preserved as given.
pub struct StaticClasspath {
    entries: Vec<ClasspathEntry>,
}

impl StaticClasspath {
    pub fn new(entries: Vec<ClasspathEntry>) -> Self {
        Self { entries }
    }

    /// Build from an ordered list of paths, inferring each entry's kind.
    pub fn from_paths<I, P>(paths: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        Self::new(paths.into_iter().map(ClasspathEntry::from_path).collect())
    }
}

impl ClasspathProvider for StaticClasspath {
    fn entries(&self) -> Vec<ClasspathEntry> {
        self.entries.clone()
    }
}

/// Parses a classpath string from the environment, split on the host
/// separator (`:` on Unix, `;` on Windows), kinds inferred per path.
/// A missing or empty variable yields an empty classpath.
pub fn classpath_from_env(var: &str) -> StaticClasspath {
    let raw = std::env::var(var).unwrap_or_default();
    let sep = if cfg!(windows) { ';' } else { ':' };
    StaticClasspath::from_paths(raw.split(sep).filter(|s| !s.is_empty()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use cljscope_plugin::EntryKind;

    #[test]
    fn test_static_classpath_preserves_order() {
        let classpath = StaticClasspath::from_paths(["/proj/src", "/repo/a.jar", "/proj/test"]);
        let entries = classpath.entries();
        assert_eq!(entries.len(), 3);
        assert_eq!(entries[0].path, PathBuf::from("/proj/src"));
        assert_eq!(entries[0].kind, EntryKind::Directory);
        assert_eq!(entries[1].kind, EntryKind::Archive);
        assert_eq!(entries[2].path, PathBuf::from("/proj/test"));
    }

    #[test]
    fn test_classpath_from_env() {
        let sep = if cfg!(windows) { ';' } else { ':' };
        let value = format!("/proj/src{sep}/repo/lib.jar{sep}{sep}");
        // SAFETY: variable name is unique to this test.
        unsafe { std::env::set_var("CLJSCOPE_TEST_CLASSPATH", &value) };

        let entries = classpath_from_env("CLJSCOPE_TEST_CLASSPATH").entries();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].path, PathBuf::from("/proj/src"));
        assert!(entries[1].is_archive());
    }

    #[test]
    fn test_classpath_from_missing_env() {
        assert!(classpath_from_env("CLJSCOPE_TEST_UNSET").entries().is_empty());
    }
}
