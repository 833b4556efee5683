//! An active editor with a selection fixed when the host starts.

use async_trait::async_trait;
use parrot_core::host::{ActiveEditor, Document};
use parrot_core::reference::{Location, Range};
use std::sync::Arc;

use crate::document::TextDocument;

/// The active editor as seen by the standalone host.
///
/// `FixedSelection::none()` models "no editor is active".
#[derive(Clone, Default)]
pub struct FixedSelection {
    active: Option<(Arc<TextDocument>, Range)>,
}

impl FixedSelection {
    pub fn new(document: Arc<TextDocument>, selection: Range) -> Self {
        Self {
            active: Some((document, selection)),
        }
    }

    pub fn none() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ActiveEditor for FixedSelection {
    async fn selection_text(&self) -> Option<String> {
        self.active
            .as_ref()
            .map(|(document, range)| document.get_text(range))
    }

    async fn selection_location(&self) -> Option<Location> {
        self.active
            .as_ref()
            .map(|(document, range)| Location::range(document.uri().clone(), *range))
    }
}
