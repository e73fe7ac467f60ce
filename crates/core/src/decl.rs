//! Declaration matcher.
//!
//! Parses the `(ns name ...)` header of a candidate source and extracts
//! the declared symbolic name. The scanner may present candidates that
//! were never meant to be modules, so every parse failure, I/O included,
//! degrades to "no declaration" instead of an error.

use cljscope_plugin::{ArchiveReader, CandidateSource, DeclarationParser, ModuleDeclaration};
use std::fs;
use tracing::debug;

/// Default declaration parser for `(ns name ...)` headers.
pub struct HeaderParser;

impl HeaderParser {
    pub fn new() -> Self {
        Self
    }
}

impl Default for HeaderParser {
    fn default() -> Self {
        Self::new()
    }
}

impl DeclarationParser for HeaderParser {
    fn declared_name(&self, source: &str) -> Option<String> {
        parse_header(source)
    }
}

/// Reads a candidate's content and parses its declaration header.
pub fn read_declaration(
    candidate: &CandidateSource,
    archives: &dyn ArchiveReader,
    parser: &dyn DeclarationParser,
) -> ModuleDeclaration {
    let content = match candidate {
        CandidateSource::File(path) => match fs::read(path) {
            Ok(bytes) => String::from_utf8_lossy(&bytes).into_owned(),
            Err(err) => {
                debug!("Unreadable candidate {:?}: {}", path, err);
                return ModuleDeclaration::absent();
            }
        },
        CandidateSource::ArchiveEntry { archive, entry } => {
            match archives.read_entry(archive, entry) {
                Ok(text) => text,
                Err(err) => {
                    debug!("Unreadable archive entry {:?}!/{}: {}", archive, entry, err);
                    return ModuleDeclaration::absent();
                }
            }
        }
    };

    match parser.declared_name(&content) {
        Some(name) => ModuleDeclaration::named(name),
        None => ModuleDeclaration::absent(),
    }
}

/// A well-formed symbolic name: dot-separated non-empty segments of
/// symbol characters, no segment starting with a digit.
pub fn is_well_formed(name: &str) -> bool {
    !name.is_empty()
        && name.split('.').all(|seg| {
            !seg.is_empty()
                && !seg.starts_with(|c: char| c.is_ascii_digit())
                && seg.chars().all(is_symbol_char)
        })
}

fn is_symbol_char(c: char) -> bool {
    c.is_alphanumeric()
        || matches!(
            c,
            '-' | '_' | '+' | '*' | '!' | '?' | '<' | '>' | '=' | '\'' | '$' | '&' | '%'
        )
}

/// Expected resource path for a namespace relative to a source root
/// (`app.some-lib` becomes `app/some_lib.clj`).
pub fn ns_to_path(name: &str) -> String {
    format!("{}.clj", name.replace('-', "_").replace('.', "/"))
}

/// Inverse of [`ns_to_path`] for a source-root-relative path.
pub fn path_to_ns(path: &str) -> Option<String> {
    let stem = path
        .strip_suffix(".cljc")
        .or_else(|| path.strip_suffix(".clj"))?;
    let ns = stem.replace(['/', '\\'], ".").replace('_', "-");
    is_well_formed(&ns).then_some(ns)
}

fn parse_header(source: &str) -> Option<String> {
    let rest = skip_trivia(source);
    let rest = rest.strip_prefix('(')?;
    let rest = skip_trivia(rest);
    let rest = rest.strip_prefix("ns")?;

    // "ns" must end the token; reject e.g. "(nsx ..." and a bare "(ns"
    let boundary = rest.chars().next()?;
    if !boundary.is_whitespace() && !matches!(boundary, ',' | ';' | '^') {
        return None;
    }

    let mut rest = skip_trivia(rest);
    while let Some(meta) = rest.strip_prefix('^') {
        rest = skip_trivia(skip_form(meta)?);
    }

    let name = take_symbol(rest)?;
    is_well_formed(&name).then_some(name)
}

/// Skips whitespace, commas, line comments, and shebang lines.
fn skip_trivia(mut s: &str) -> &str {
    loop {
        let trimmed = s.trim_start_matches(|c: char| c.is_whitespace() || c == ',');
        if let Some(comment) = trimmed
            .strip_prefix(';')
            .or_else(|| trimmed.strip_prefix("#!"))
        {
            s = match comment.find('\n') {
                Some(i) => &comment[i + 1..],
                None => "",
            };
        } else {
            return trimmed;
        }
    }
}

/// Skips one metadata form: a map with balanced braces, a string, or a
/// bare token. Returns `None` on truncated input.
fn skip_form(s: &str) -> Option<&str> {
    if let Some(map) = s.strip_prefix('{') {
        let mut depth = 1usize;
        for (i, c) in map.char_indices() {
            match c {
                '{' => depth += 1,
                '}' => {
                    depth -= 1;
                    if depth == 0 {
                        return Some(&map[i + 1..]);
                    }
                }
                _ => {}
            }
        }
        None
    } else if let Some(string) = s.strip_prefix('"') {
        let mut escaped = false;
        for (i, c) in string.char_indices() {
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == '"' {
                return Some(&string[i + 1..]);
            }
        }
        None
    } else if s.is_empty() {
        None
    } else {
        let end = s
            .find(|c: char| c.is_whitespace() || ",()[]{}\";".contains(c))
            .unwrap_or(s.len());
        Some(&s[end..])
    }
}

fn take_symbol(s: &str) -> Option<String> {
    let end = s
        .find(|c: char| c.is_whitespace() || ",()[]{}\";".contains(c))
        .unwrap_or(s.len());
    if end == 0 {
        return None;
    }
    Some(s[..end].to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(source: &str) -> Option<String> {
        HeaderParser::new().declared_name(source)
    }

    #[test]
    fn test_plain_header() {
        assert_eq!(parse("(ns app.core)"), Some("app.core".to_string()));
        assert_eq!(
            parse("(ns app.core\n  (:require [app.util :as util]))"),
            Some("app.core".to_string())
        );
    }

    #[test]
    fn test_leading_trivia() {
        let source = "#!/usr/bin/env runner\n;; copyright\n\n,,(ns app.core)";
        assert_eq!(parse(source), Some("app.core".to_string()));
    }

    #[test]
    fn test_metadata_before_name() {
        assert_eq!(parse("(ns ^:internal app.core)"), Some("app.core".to_string()));
        assert_eq!(
            parse("(ns ^{:doc \"entry {point}\" :added \"1.0\"} app.core)"),
            Some("app.core".to_string())
        );
        assert_eq!(
            parse("(ns ^:a ^:b app.core)"),
            Some("app.core".to_string())
        );
    }

    #[test]
    fn test_not_a_declaration() {
        assert_eq!(parse(""), None);
        assert_eq!(parse("{:config true}"), None);
        assert_eq!(parse("(def x 1)"), None);
        assert_eq!(parse("(nsx app.core)"), None);
        assert_eq!(parse("ns app.core"), None);
        assert_eq!(parse(";; only a comment"), None);
    }

    #[test]
    fn test_truncated_input_degrades() {
        assert_eq!(parse("(ns"), None);
        assert_eq!(parse("(ns "), None);
        assert_eq!(parse("(ns ^{:doc \"unterminated"), None);
        assert_eq!(parse("(ns ^{:never :closed app.core"), None);
        // name right at EOF is still readable
        assert_eq!(parse("(ns app.core"), Some("app.core".to_string()));
    }

    #[test]
    fn test_binary_garbage_degrades() {
        let garbage = String::from_utf8_lossy(&[0x50, 0x4B, 0x03, 0x04, 0xFF, 0x00]).into_owned();
        assert_eq!(parse(&garbage), None);
    }

    #[test]
    fn test_malformed_declared_name_rejected() {
        assert_eq!(parse("(ns app..core)"), None);
        assert_eq!(parse("(ns .app)"), None);
    }

    #[test]
    fn test_well_formed() {
        assert!(is_well_formed("app.core"));
        assert!(is_well_formed("some-lib.impl_detail"));
        assert!(is_well_formed("single"));
        assert!(!is_well_formed(""));
        assert!(!is_well_formed("app..core"));
        assert!(!is_well_formed(".app.core"));
        assert!(!is_well_formed("app.core."));
        assert!(!is_well_formed("app core"));
        assert!(!is_well_formed("app.1core"));
        assert!(!is_well_formed("app/core"));
    }

    #[test]
    fn test_ns_path_munging() {
        assert_eq!(ns_to_path("app.some-lib"), "app/some_lib.clj");
        assert_eq!(path_to_ns("app/some_lib.clj"), Some("app.some-lib".to_string()));
        assert_eq!(path_to_ns("app/some_lib.cljc"), Some("app.some-lib".to_string()));
        assert_eq!(path_to_ns("app/some_lib.txt"), None);
        assert_eq!(path_to_ns("META-INF/MANIFEST.MF"), None);
    }

    #[test]
    fn test_read_declaration_from_file() {
        use cljscope_plugin::BoxError;
        use std::path::Path;

        struct NoArchives;
        impl ArchiveReader for NoArchives {
            fn entry_names(&self, _: &Path) -> Result<Vec<String>, BoxError> {
                Err("no archives in this test".into())
            }
            fn read_entry(&self, _: &Path, _: &str) -> Result<String, BoxError> {
                Err("no archives in this test".into())
            }
        }

        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("core.clj");
        std::fs::write(&path, "(ns app.core)").unwrap();

        let parser = HeaderParser::new();
        let decl = read_declaration(&CandidateSource::File(path), &NoArchives, &parser);
        assert_eq!(decl.name.as_deref(), Some("app.core"));

        let missing = CandidateSource::File(temp.path().join("absent.clj"));
        let decl = read_declaration(&missing, &NoArchives, &parser);
        assert_eq!(decl.name, None);

        let unreadable_entry = CandidateSource::ArchiveEntry {
            archive: temp.path().join("absent.jar"),
            entry: "x.clj".to_string(),
        };
        let decl = read_declaration(&unreadable_entry, &NoArchives, &parser);
        assert_eq!(decl.name, None);
    }
}
