//! Read/require capability over the live module registry.
//!
//! The core only ever reads registry state; the single mutation it can
//! ask for goes through [`ModuleRegistry::require`].

use crate::BoxError;
use serde::{Deserialize, Serialize};

/// An exported binding of a loaded namespace.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Binding {
    pub name: String,
    /// Test-marker metadata flag.
    pub test: bool,
}

impl Binding {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            test: false,
        }
    }

    pub fn test(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            test: true,
        }
    }
}

/// The runtime's module registry, injected per target runtime.
pub trait ModuleRegistry: Send + Sync {
    /// Names of all currently loaded namespaces.
    fn loaded(&self) -> Vec<String>;

    /// Exported bindings of a loaded namespace; empty when not loaded.
    fn exports(&self, ns: &str) -> Vec<Binding>;

    /// Load the namespace if not already loaded. Requiring an already
    /// loaded namespace must be a no-op.
    fn require(&self, ns: &str) -> Result<(), BoxError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_binding_constructors() {
        let plain = Binding::new("compute");
        assert!(!plain.test);
        let marked = Binding::test("compute-test");
        assert!(marked.test);
        assert_eq!(marked.name, "compute-test");
    }
}
