//! Reference resolution — turns one reference into literal text.
//!
//! Each reference kind has its own source and its own failure mode:
//!
//! | Kind | Source | When it can't be read |
//! |------|--------|-----------------------|
//! | Editor selection | live active editor | skipped (`Unresolvable`) |
//! | Document range | open-document registry | skipped (`Unresolvable`) |
//! | File | file reader | **hard error** (`ResolveError::FileRead`) |
//! | Unsupported | — | skipped (`Unresolvable`) |
//!
//! The asymmetry is intentional: a closed editor tab is routine, but a file
//! the user named explicitly must exist.

use parrot_core::error::ResolveError;
use parrot_core::host::HostContext;
use parrot_core::reference::{Location, Reference, ResolvedReference, Uri};
use tracing::debug;

/// Why a reference was skipped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Unresolvable {
    /// No editor is active.
    NoActiveEditor,
    /// The active editor has nothing selected.
    EmptySelection,
    /// The active editor shows a different document than the reference expects.
    EditorMismatch { expected: Uri, actual: Uri },
    /// The referenced document is no longer open.
    DocumentNotOpen(Uri),
    /// A reference kind this relay does not handle.
    UnsupportedKind(String),
}

impl std::fmt::Display for Unresolvable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NoActiveEditor => write!(f, "no active editor"),
            Self::EmptySelection => write!(f, "nothing selected"),
            Self::EditorMismatch { expected, actual } => {
                write!(f, "active editor shows {actual}, expected {expected}")
            }
            Self::DocumentNotOpen(uri) => write!(f, "document {uri} is not open"),
            Self::UnsupportedKind(kind) => write!(f, "unsupported reference kind '{kind}'"),
        }
    }
}

/// The outcome of resolving a single reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    Resolved(ResolvedReference),
    Unresolvable(Unresolvable),
}

/// Resolves references against the host's editor, documents and files.
///
/// Read-only: resolution never changes editor or document state.
#[derive(Clone)]
pub struct ReferenceResolver {
    host: HostContext,
}

impl ReferenceResolver {
    pub fn new(host: HostContext) -> Self {
        Self { host }
    }

    /// Resolve one reference.
    ///
    /// Returns `Ok(Resolution::Unresolvable(_))` for the recoverable cases and
    /// `Err` only when an explicitly named file cannot be read.
    pub async fn resolve(&self, reference: &Reference) -> Result<Resolution, ResolveError> {
        match reference {
            Reference::EditorSelection {
                expected_document, ..
            } => Ok(self.resolve_selection(reference, expected_document.as_ref()).await),

            Reference::DocumentRange {
                document, range, ..
            } => {
                let Some(open) = self.host.documents.find_open_document(document).await else {
                    return Ok(Resolution::Unresolvable(Unresolvable::DocumentNotOpen(
                        document.clone(),
                    )));
                };
                Ok(Resolution::Resolved(ResolvedReference {
                    source: reference.clone(),
                    text: open.get_text(range),
                    location: Location::range(document.clone(), *range),
                }))
            }

            Reference::File { document, .. } => {
                let bytes = self.host.files.read_file(document).await.map_err(|source| {
                    ResolveError::FileRead {
                        uri: document.clone(),
                        source,
                    }
                })?;
                debug!(uri = %document, bytes = bytes.len(), "Read referenced file");
                Ok(Resolution::Resolved(ResolvedReference {
                    source: reference.clone(),
                    text: String::from_utf8_lossy(&bytes).into_owned(),
                    location: Location::uri(document.clone()),
                }))
            }

            Reference::Unsupported { kind, .. } => {
                Ok(Resolution::Unresolvable(Unresolvable::UnsupportedKind(kind.clone())))
            }
        }
    }

    async fn resolve_selection(
        &self,
        reference: &Reference,
        expected_document: Option<&Uri>,
    ) -> Resolution {
        let editor = &self.host.editor;
        let (Some(text), Some(location)) =
            (editor.selection_text().await, editor.selection_location().await)
        else {
            return Resolution::Unresolvable(Unresolvable::NoActiveEditor);
        };

        if let Some(expected) = expected_document {
            if location.resource() != expected {
                return Resolution::Unresolvable(Unresolvable::EditorMismatch {
                    expected: expected.clone(),
                    actual: location.resource().clone(),
                });
            }
        }

        if text.is_empty() {
            return Resolution::Unresolvable(Unresolvable::EmptySelection);
        }

        Resolution::Resolved(ResolvedReference {
            source: reference.clone(),
            text,
            location,
        })
    }
}
