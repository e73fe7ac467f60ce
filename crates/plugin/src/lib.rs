//! Collaborator capability traits and shared models for cljscope.
//!
//! This crate defines the seams between the resolution core and the
//! process it introspects:
//! - Classpath provision (ordered directories and archives)
//! - Archive entry enumeration and content reads
//! - The live module registry (loaded namespaces, bindings, require)
//! - Declaration-header parsing

pub mod classpath;
pub mod parse;
pub mod runtime;

pub use classpath::{
    ArchiveReader, CandidateSource, ClasspathEntry, ClasspathProvider, EntryKind, path_is_under,
};
pub use parse::{DeclarationParser, ModuleDeclaration};
pub use runtime::{Binding, ModuleRegistry};

/// Error type for collaborator operations
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;
