//! Resolution API.
//!
//! The public operations over the classpath and the live registry,
//! composed from the scanner, the declaration matcher, and the
//! loaded-namespace filter. Failures never escape these entry points:
//! every operation degrades to an absent or empty result.

use crate::decl::{self, HeaderParser};
use crate::filter::NamespaceFilter;
use crate::scan::{ClasspathScanner, ScanScope};
use crate::util;
use cljscope_plugin::{
    ArchiveReader, CandidateSource, ClasspathProvider, DeclarationParser, ModuleRegistry,
};
use regex::Regex;
use std::collections::BTreeSet;
use std::path::PathBuf;
use tracing::{debug, warn};

pub struct NamespaceResolver {
    classpath: Box<dyn ClasspathProvider>,
    archives: Box<dyn ArchiveReader>,
    registry: Box<dyn ModuleRegistry>,
    parser: Box<dyn DeclarationParser>,
    filter: NamespaceFilter,
    project_root: PathBuf,
    case_insensitive: bool,
}

impl NamespaceResolver {
    pub fn new(
        classpath: Box<dyn ClasspathProvider>,
        archives: Box<dyn ArchiveReader>,
        registry: Box<dyn ModuleRegistry>,
    ) -> Self {
        Self {
            classpath,
            archives,
            registry,
            parser: Box::new(HeaderParser::new()),
            filter: NamespaceFilter::new(),
            project_root: util::PROJECT_ROOT.clone(),
            case_insensitive: util::case_insensitive_paths(),
        }
    }

    pub fn with_parser(mut self, parser: Box<dyn DeclarationParser>) -> Self {
        self.parser = parser;
        self
    }

    pub fn with_filter(mut self, filter: NamespaceFilter) -> Self {
        self.filter = filter;
        self
    }

    pub fn with_project_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.project_root = root.into();
        self
    }

    pub fn with_case_insensitive_paths(mut self, case_insensitive: bool) -> Self {
        self.case_insensitive = case_insensitive;
        self
    }

    fn scanner(&self) -> ClasspathScanner<'_> {
        ClasspathScanner::new(
            self.classpath.entries(),
            self.archives.as_ref(),
            self.project_root.clone(),
            self.case_insensitive,
        )
    }

    /// Requests the runtime load `name`, returning the resolved name.
    /// `None` on malformed names and on any load failure; requiring an
    /// already loaded namespace is a no-op.
    pub fn ensure_loaded(&self, name: &str) -> Option<String> {
        if !decl::is_well_formed(name) {
            debug!("Refusing to load malformed namespace name {:?}", name);
            return None;
        }
        match self.registry.require(name) {
            Ok(()) => Some(name.to_string()),
            Err(err) => {
                debug!("Failed to load namespace {}: {}", name, err);
                None
            }
        }
    }

    /// Distinct namespaces declared by sources under the project root.
    pub fn project_namespaces(&self) -> BTreeSet<String> {
        let scanner = self.scanner();
        let mut names = BTreeSet::new();
        for item in scanner.scan(ScanScope::Project) {
            let candidate = match item {
                Ok(candidate) => candidate,
                Err(err) => {
                    // one bad entry does not invalidate the rest of the scan
                    warn!("Skipping unreadable classpath entry: {}", err);
                    continue;
                }
            };
            let declared =
                decl::read_declaration(&candidate, self.archives.as_ref(), self.parser.as_ref());
            if let Some(name) = declared.name {
                names.insert(name);
            }
        }
        names
    }

    /// Every loaded namespace except inlined-dependency and internal
    /// ones, sorted ascending. `patterns` extends the configured internal
    /// patterns for this call.
    pub fn loaded_namespaces(&self, patterns: &[Regex]) -> Vec<String> {
        let mut names: Vec<String> = self
            .registry
            .loaded()
            .into_iter()
            .filter(|name| self.filter.admits_with(name, patterns))
            .collect();
        names.sort();
        names.dedup();
        names
    }

    /// Project namespaces that are currently loaded, sorted ascending.
    /// The inlined/internal filter does not apply: a project namespace is
    /// never vendored.
    pub fn loaded_project_namespaces(&self) -> Vec<String> {
        let loaded: BTreeSet<String> = self.registry.loaded().into_iter().collect();
        self.project_namespaces()
            .into_iter()
            .filter(|name| loaded.contains(name))
            .collect()
    }

    /// Loads every project namespace, returning the successfully loaded
    /// subset, sorted ascending.
    pub fn load_project_namespaces(&self) -> Vec<String> {
        self.project_namespaces()
            .into_iter()
            .filter_map(|name| self.ensure_loaded(&name))
            .collect()
    }

    /// First candidate in classpath order whose declared name equals
    /// `name`. Short-circuits on the first match; a scan failure degrades
    /// the whole call to `None`.
    pub fn resolve_source(&self, name: &str) -> Option<CandidateSource> {
        if !decl::is_well_formed(name) {
            return None;
        }
        let scanner = self.scanner();
        for item in scanner.scan(ScanScope::All) {
            let candidate = match item {
                Ok(candidate) => candidate,
                Err(err) => {
                    warn!("Aborting source resolution for {}: {}", name, err);
                    return None;
                }
            };
            let declared =
                decl::read_declaration(&candidate, self.archives.as_ref(), self.parser.as_ref());
            if declared.name.as_deref() == Some(name) {
                return Some(candidate);
            }
        }
        None
    }

    /// True when any exported binding of the namespace carries the test
    /// marker.
    pub fn has_tests(&self, ns: &str) -> bool {
        self.registry.exports(ns).iter().any(|binding| binding.test)
    }
}
