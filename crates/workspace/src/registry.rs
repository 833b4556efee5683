//! Open-document registry.

use async_trait::async_trait;
use parrot_core::host::{Document, DocumentRegistry};
use parrot_core::reference::Uri;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::document::TextDocument;

/// The documents currently "open", keyed by URI.
///
/// Closing a document makes every reference to it unresolvable.
pub struct OpenDocuments {
    documents: RwLock<HashMap<Uri, Arc<TextDocument>>>,
}

impl OpenDocuments {
    pub fn new() -> Self {
        Self {
            documents: RwLock::new(HashMap::new()),
        }
    }

    /// Track a document as open. Replaces an earlier version with the same URI.
    pub async fn open(&self, document: TextDocument) -> Arc<TextDocument> {
        let document = Arc::new(document);
        self.documents
            .write()
            .await
            .insert(document.uri().clone(), Arc::clone(&document));
        document
    }

    /// Stop tracking a document. Returns whether it was open.
    pub async fn close(&self, uri: &Uri) -> bool {
        let closed = self.documents.write().await.remove(uri).is_some();
        if closed {
            tracing::debug!(uri = %uri, "Document closed");
        }
        closed
    }

    pub async fn len(&self) -> usize {
        self.documents.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.documents.read().await.is_empty()
    }
}

impl Default for OpenDocuments {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DocumentRegistry for OpenDocuments {
    async fn find_open_document(&self, uri: &Uri) -> Option<Arc<dyn Document>> {
        self.documents
            .read()
            .await
            .get(uri)
            .map(|d| Arc::clone(d) as Arc<dyn Document>)
    }
}
