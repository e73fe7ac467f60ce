//! Declaration-header parsing seam.

/// Result of parsing one candidate source.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ModuleDeclaration {
    /// Declared symbolic name; `None` when the content has no readable
    /// declaration header.
    pub name: Option<String>,
}

impl ModuleDeclaration {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
        }
    }

    pub fn absent() -> Self {
        Self { name: None }
    }
}

/// Extracts the declared symbolic name from source text.
///
/// Implementations must tolerate malformed, truncated, or non-source
/// content by returning `None`; they never fail hard.
pub trait DeclarationParser: Send + Sync {
    fn declared_name(&self, source: &str) -> Option<String>;
}
