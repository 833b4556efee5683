//! Reference domain types.
//!
//! A reference is one piece of context attached to a chat request: the live
//! editor selection, a range of an open document, or a whole file. The
//! participant resolves each reference into literal text and splices it into
//! the user's prompt.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// The marker that prefixes an anchor name inside a prompt (`#selection`).
pub const ANCHOR_MARKER: char = '#';

/// Identifier of a document or resource (`file:///src/main.rs`, `https://...`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Uri(String);

impl Uri {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Build a `file://` URI from a filesystem path.
    pub fn from_path(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref().to_string_lossy().replace('\\', "/");
        if path.starts_with('/') {
            Self(format!("file://{path}"))
        } else {
            Self(format!("file:///{path}"))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn scheme(&self) -> Option<&str> {
        self.0.split_once("://").map(|(scheme, _)| scheme)
    }

    /// The filesystem path for `file:` URIs. Bare strings are treated as paths.
    pub fn to_file_path(&self) -> Option<PathBuf> {
        match self.0.split_once("://") {
            Some(("file", rest)) => {
                // `file:///C:/x` carries a drive letter after the leading slash
                match rest.strip_prefix('/') {
                    Some(drive) if drive.as_bytes().get(1) == Some(&b':') => {
                        Some(PathBuf::from(drive))
                    }
                    _ => Some(PathBuf::from(rest)),
                }
            }
            Some(_) => None,
            None => Some(PathBuf::from(&self.0)),
        }
    }

    /// The last path segment, used to build `#file:<name>` anchors.
    pub fn file_name(&self) -> &str {
        self.0
            .trim_end_matches('/')
            .rsplit('/')
            .next()
            .unwrap_or(self.0.as_str())
    }
}

impl std::fmt::Display for Uri {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Uri {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

/// A zero-based line/character position inside a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    pub line: u32,
    pub character: u32,
}

impl Position {
    pub fn new(line: u32, character: u32) -> Self {
        Self { line, character }
    }
}

/// A span between two positions. `start` is always before or equal to `end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Range {
    pub start: Position,
    pub end: Position,
}

impl Range {
    /// Create a range, swapping the ends if they are given in reverse.
    pub fn new(start: Position, end: Position) -> Self {
        if end < start {
            Self { start: end, end: start }
        } else {
            Self { start, end }
        }
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// Where a resolved reference came from, surfaced to the caller as a citation.
///
/// Equality is structural: two references pointing at the same document
/// range produce the same location and are cited once.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Location {
    /// A document plus a character range inside it.
    Range { uri: Uri, range: Range },
    /// A bare resource identifier (whole files, web links).
    Uri { uri: Uri },
}

impl Location {
    pub fn range(uri: Uri, range: Range) -> Self {
        Self::Range { uri, range }
    }

    pub fn uri(uri: Uri) -> Self {
        Self::Uri { uri }
    }

    pub fn resource(&self) -> &Uri {
        match self {
            Self::Range { uri, .. } | Self::Uri { uri } => uri,
        }
    }
}

impl std::fmt::Display for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Range { uri, range } => write!(
                f,
                "{uri}#L{}:{}-L{}:{}",
                range.start.line + 1,
                range.start.character + 1,
                range.end.line + 1,
                range.end.character + 1
            ),
            Self::Uri { uri } => write!(f, "{uri}"),
        }
    }
}

/// One piece of context attached to a request.
///
/// Each variant carries its `anchor_name`: the placeholder token (without
/// the leading `#`) that marks where the resolved text goes in the prompt.
/// Append-mode document ranges are the exception; their text is added to
/// the end of the prompt instead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reference {
    /// The current selection in the active editor, queried live.
    EditorSelection {
        anchor_name: String,
        /// When set, the active editor must be showing this document.
        expected_document: Option<Uri>,
    },

    /// A range of a document that must currently be open.
    DocumentRange {
        anchor_name: String,
        document: Uri,
        range: Range,
        append: bool,
    },

    /// A whole file read straight from storage.
    File { anchor_name: String, document: Uri },

    /// A reference kind this relay does not understand. Always ignored.
    Unsupported { kind: String, anchor_name: String },
}

impl Reference {
    pub const SELECTION_KIND: &'static str = "copilot.selection";
    pub const DOCUMENT_KIND: &'static str = "vscode.document";
    pub const FILE_KIND: &'static str = "vscode.file";

    /// The host's tag for this reference kind.
    pub fn kind(&self) -> &str {
        match self {
            Self::EditorSelection { .. } => Self::SELECTION_KIND,
            Self::DocumentRange { .. } => Self::DOCUMENT_KIND,
            Self::File { .. } => Self::FILE_KIND,
            Self::Unsupported { kind, .. } => kind,
        }
    }

    pub fn anchor_name(&self) -> &str {
        match self {
            Self::EditorSelection { anchor_name, .. }
            | Self::DocumentRange { anchor_name, .. }
            | Self::File { anchor_name, .. }
            | Self::Unsupported { anchor_name, .. } => anchor_name,
        }
    }

    /// The literal token searched for in the prompt, e.g. `#selection`.
    pub fn placeholder(&self) -> String {
        format!("{ANCHOR_MARKER}{}", self.anchor_name())
    }

    pub fn is_append(&self) -> bool {
        matches!(self, Self::DocumentRange { append: true, .. })
    }

    /// Convenience constructor for a `#file:<name>` reference.
    pub fn file(document: Uri) -> Self {
        let anchor_name = format!("file:{}", document.file_name());
        Self::File {
            anchor_name,
            document,
        }
    }
}

/// The outcome of resolving one reference successfully.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedReference {
    pub source: Reference,
    pub text: String,
    pub location: Location,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uri_from_unix_path() {
        let uri = Uri::from_path("/home/user/notes.md");
        assert_eq!(uri.as_str(), "file:///home/user/notes.md");
        assert_eq!(uri.scheme(), Some("file"));
        assert_eq!(
            uri.to_file_path(),
            Some(PathBuf::from("/home/user/notes.md"))
        );
        assert_eq!(uri.file_name(), "notes.md");
    }

    #[test]
    fn non_file_uri_has_no_path() {
        let uri = Uri::new("https://en.wikipedia.org/wiki/Yoda");
        assert_eq!(uri.to_file_path(), None);
        assert_eq!(uri.file_name(), "Yoda");
    }

    #[test]
    fn windows_drive_drops_leading_slash() {
        assert_eq!(
            Uri::new("file:///C:/src/main.rs").to_file_path(),
            Some(PathBuf::from("C:/src/main.rs"))
        );
    }

    #[test]
    fn multibyte_authority_is_not_a_drive() {
        assert_eq!(
            Uri::new("file://é:/notes.md").to_file_path(),
            Some(PathBuf::from("é:/notes.md"))
        );
    }

    #[test]
    fn bare_string_is_a_path() {
        assert_eq!(
            Uri::new("src/lib.rs").to_file_path(),
            Some(PathBuf::from("src/lib.rs"))
        );
    }

    #[test]
    fn range_normalizes_reversed_ends() {
        let range = Range::new(Position::new(3, 1), Position::new(1, 0));
        assert_eq!(range.start, Position::new(1, 0));
        assert_eq!(range.end, Position::new(3, 1));
    }

    #[test]
    fn placeholder_uses_marker() {
        let reference = Reference::EditorSelection {
            anchor_name: "selection".into(),
            expected_document: None,
        };
        assert_eq!(reference.placeholder(), "#selection");
        assert_eq!(reference.kind(), "copilot.selection");
        assert!(!reference.is_append());
    }

    #[test]
    fn file_reference_anchor() {
        let reference = Reference::file(Uri::from_path("/tmp/a/readme.md"));
        assert_eq!(reference.placeholder(), "#file:readme.md");
        assert_eq!(reference.kind(), Reference::FILE_KIND);
    }

    #[test]
    fn locations_compare_structurally() {
        let range = Range::new(Position::new(0, 0), Position::new(0, 4));
        let a = Location::range(Uri::new("file:///a.rs"), range);
        let b = Location::range(Uri::new("file:///a.rs"), range);
        let c = Location::uri(Uri::new("file:///a.rs"));
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_eq!(c.resource(), a.resource());
    }

    #[test]
    fn location_display_is_one_based() {
        let range = Range::new(Position::new(0, 0), Position::new(2, 5));
        let loc = Location::range(Uri::new("file:///a.rs"), range);
        assert_eq!(loc.to_string(), "file:///a.rs#L1:1-L3:6");
    }
}
