//! Loaded-namespace classification.
//!
//! Rule tables are data, not control flow: consumers extend the
//! vendoring-prefix list or add internal patterns without touching the
//! core.

use regex::Regex;

/// Literal prefixes used by dependency-relocation tools that rewrite
/// third-party namespaces under a private prefix.
pub const INLINED_DEP_PREFIXES: &[&str] = &[
    "mranderson",
    "cider.inlined-deps",
    "deps.",
    "eastwood.copieddeps",
];

/// Classification of a loaded namespace name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NamespaceClass {
    /// Vendored/inlined copy of another library.
    InlinedDep,
    /// Matches a caller-supplied internal pattern.
    Internal,
    Ordinary,
}

/// Classifies loaded namespaces from a literal-prefix table and a set of
/// search-anywhere regular expressions.
#[derive(Debug, Clone)]
pub struct NamespaceFilter {
    inlined_prefixes: Vec<String>,
    internal_patterns: Vec<Regex>,
}

impl NamespaceFilter {
    pub fn new() -> Self {
        Self {
            inlined_prefixes: INLINED_DEP_PREFIXES.iter().map(|p| p.to_string()).collect(),
            internal_patterns: Vec::new(),
        }
    }

    pub fn with_patterns(patterns: Vec<Regex>) -> Self {
        let mut filter = Self::new();
        filter.internal_patterns = patterns;
        filter
    }

    /// Extend the vendoring-prefix table.
    pub fn add_inlined_prefix(&mut self, prefix: impl Into<String>) {
        self.inlined_prefixes.push(prefix.into());
    }

    pub fn add_pattern(&mut self, pattern: Regex) {
        self.internal_patterns.push(pattern);
    }

    pub fn classify(&self, name: &str) -> NamespaceClass {
        if self
            .inlined_prefixes
            .iter()
            .any(|p| name.starts_with(p.as_str()))
        {
            return NamespaceClass::InlinedDep;
        }
        if self.internal_patterns.iter().any(|re| re.is_match(name)) {
            return NamespaceClass::Internal;
        }
        NamespaceClass::Ordinary
    }

    /// True when the name survives listing (neither inlined nor internal).
    pub fn admits(&self, name: &str) -> bool {
        self.classify(name) == NamespaceClass::Ordinary
    }

    /// [`admits`](Self::admits) with call-level patterns applied on top of
    /// the configured ones.
    pub fn admits_with(&self, name: &str, extra: &[Regex]) -> bool {
        self.admits(name) && !extra.iter().any(|re| re.is_match(name))
    }
}

impl Default for NamespaceFilter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inlined_prefixes() {
        let filter = NamespaceFilter::new();
        assert_eq!(filter.classify("mranderson.x.y"), NamespaceClass::InlinedDep);
        assert_eq!(
            filter.classify("cider.inlined-deps.toolsreader.v1v3v6.clojure.tools.reader"),
            NamespaceClass::InlinedDep
        );
        assert_eq!(filter.classify("deps.toolsreader"), NamespaceClass::InlinedDep);
        // literal prefixes, not patterns: "dep." is not "deps."
        assert_eq!(filter.classify("dep.internal.z"), NamespaceClass::Ordinary);
        assert_eq!(filter.classify("app.core"), NamespaceClass::Ordinary);
    }

    #[test]
    fn test_internal_patterns_search_anywhere() {
        let filter =
            NamespaceFilter::with_patterns(vec![Regex::new("^dep\\.").unwrap(), Regex::new("impl").unwrap()]);
        assert_eq!(filter.classify("dep.internal.z"), NamespaceClass::Internal);
        assert_eq!(filter.classify("app.impl.detail"), NamespaceClass::Internal);
        assert_eq!(filter.classify("app.core"), NamespaceClass::Ordinary);
    }

    #[test]
    fn test_prefix_wins_over_pattern() {
        let filter = NamespaceFilter::with_patterns(vec![Regex::new("mranderson").unwrap()]);
        assert_eq!(filter.classify("mranderson.x.y"), NamespaceClass::InlinedDep);
    }

    #[test]
    fn test_admits_with_extra_patterns() {
        let filter = NamespaceFilter::new();
        let extra = vec![Regex::new("^dep\\.").unwrap()];
        assert!(filter.admits_with("app.core", &extra));
        assert!(!filter.admits_with("dep.internal.z", &extra));
        assert!(!filter.admits_with("mranderson.x.y", &extra));
    }

    #[test]
    fn test_extended_prefix_table() {
        let mut filter = NamespaceFilter::new();
        filter.add_inlined_prefix("shadow.vendored");
        assert_eq!(
            filter.classify("shadow.vendored.http"),
            NamespaceClass::InlinedDep
        );
    }
}
