//! Host collaborator traits — the editor-side state the resolver reads.
//!
//! The participant never owns documents or editors. It asks these read-only
//! collaborators for the current selection, for an open document, or for a
//! file's bytes. Implementations live in `parrot-workspace` (standalone
//! host) or in an editor integration.

use async_trait::async_trait;
use std::sync::Arc;

use crate::reference::{Location, Range, Uri};

/// A document the host currently has open.
pub trait Document: Send + Sync {
    fn uri(&self) -> &Uri;

    /// Text covered by `range`. Out-of-bounds positions are clamped.
    fn get_text(&self, range: &Range) -> String;
}

/// The live "active editor" of the host.
#[async_trait]
pub trait ActiveEditor: Send + Sync {
    /// Text currently selected, or `None` when no editor is active.
    async fn selection_text(&self) -> Option<String>;

    /// Where the current selection lives, or `None` when no editor is active.
    async fn selection_location(&self) -> Option<Location>;
}

/// The set of documents the host is tracking as open.
#[async_trait]
pub trait DocumentRegistry: Send + Sync {
    /// Look up an open document. `None` once it has been closed or disposed.
    async fn find_open_document(&self, uri: &Uri) -> Option<Arc<dyn Document>>;
}

/// Byte-level file access, independent of what is open.
#[async_trait]
pub trait FileReader: Send + Sync {
    async fn read_file(&self, uri: &Uri) -> std::io::Result<Vec<u8>>;
}

/// The three collaborators bundled for one request.
#[derive(Clone)]
pub struct HostContext {
    pub editor: Arc<dyn ActiveEditor>,
    pub documents: Arc<dyn DocumentRegistry>,
    pub files: Arc<dyn FileReader>,
}

impl HostContext {
    pub fn new(
        editor: Arc<dyn ActiveEditor>,
        documents: Arc<dyn DocumentRegistry>,
        files: Arc<dyn FileReader>,
    ) -> Self {
        Self {
            editor,
            documents,
            files,
        }
    }
}
