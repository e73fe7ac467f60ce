//! In-memory module registry.
//!
//! Default [`ModuleRegistry`] for embedders that model the guest runtime
//! in-process, and the registry used throughout the test suites. Follows
//! the live-registry contract: require is a no-op for already-loaded
//! namespaces.

use crate::error::ScopeError;
use cljscope_plugin::{Binding, BoxError, ModuleRegistry};
use std::collections::{BTreeMap, BTreeSet};
use std::sync::RwLock;

#[derive(Default)]
struct RegistryState {
    available: BTreeMap<String, Vec<Binding>>,
    loaded: BTreeSet<String>,
    load_counts: BTreeMap<String, usize>,
}

pub struct InMemoryRegistry {
    state: RwLock<RegistryState>,
}

impl InMemoryRegistry {
    pub fn new() -> Self {
        Self {
            state: RwLock::new(RegistryState::default()),
        }
    }

    /// Register a namespace that `require` can load.
    pub fn define(&self, ns: impl Into<String>, bindings: Vec<Binding>) {
        let mut state = self.state.write().unwrap();
        state.available.insert(ns.into(), bindings);
    }

    /// Register a namespace and immediately mark it loaded.
    pub fn define_loaded(&self, ns: impl Into<String>, bindings: Vec<Binding>) {
        let ns = ns.into();
        let mut state = self.state.write().unwrap();
        state.available.insert(ns.clone(), bindings);
        state.loaded.insert(ns);
    }

    /// Number of times `require` actually loaded the namespace.
    pub fn load_count(&self, ns: &str) -> usize {
        let state = self.state.read().unwrap();
        state.load_counts.get(ns).copied().unwrap_or(0)
    }

    pub fn is_loaded(&self, ns: &str) -> bool {
        let state = self.state.read().unwrap();
        state.loaded.contains(ns)
    }
}

impl Default for InMemoryRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl ModuleRegistry for InMemoryRegistry {
    fn loaded(&self) -> Vec<String> {
        let state = self.state.read().unwrap();
        state.loaded.iter().cloned().collect()
    }

    fn exports(&self, ns: &str) -> Vec<Binding> {
        let state = self.state.read().unwrap();
        if !state.loaded.contains(ns) {
            return Vec::new();
        }
        state.available.get(ns).cloned().unwrap_or_default()
    }

    fn require(&self, ns: &str) -> Result<(), BoxError> {
        let mut state = self.state.write().unwrap();
        if state.loaded.contains(ns) {
            return Ok(());
        }
        if !state.available.contains_key(ns) {
            return Err(Box::new(ScopeError::Registry(format!(
                "namespace not found: {ns}"
            ))));
        }
        state.loaded.insert(ns.to_string());
        *state.load_counts.entry(ns.to_string()).or_default() += 1;
        Ok(())
    }
}
