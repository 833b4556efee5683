//! In-memory text documents.

use parrot_core::host::Document;
use parrot_core::reference::{Position, Range, Uri};
use std::path::Path;

/// A document held fully in memory.
///
/// Positions are zero-based lines and character (Unicode scalar) offsets.
#[derive(Debug, Clone)]
pub struct TextDocument {
    uri: Uri,
    text: String,
    /// Byte offset where each line starts.
    line_starts: Vec<usize>,
}

impl TextDocument {
    pub fn new(uri: Uri, text: impl Into<String>) -> Self {
        let text = text.into();
        let line_starts = std::iter::once(0)
            .chain(text.match_indices('\n').map(|(i, _)| i + 1))
            .collect();
        Self {
            uri,
            text,
            line_starts,
        }
    }

    /// Load a document from disk, keyed by its `file://` URI.
    pub async fn open(path: impl AsRef<Path>) -> std::io::Result<Self> {
        let path = path.as_ref();
        let text = tokio::fs::read_to_string(path).await?;
        Ok(Self::new(Uri::from_path(path), text))
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }

    /// The range covering the whole document.
    pub fn full_range(&self) -> Range {
        self.range_of(0, self.text.len())
    }

    /// Byte offset of a position, clamped to the document.
    fn offset_at(&self, position: Position) -> usize {
        let Some(&line_start) = self.line_starts.get(position.line as usize) else {
            return self.text.len();
        };
        let line_end = self
            .line_starts
            .get(position.line as usize + 1)
            .map(|next| next - 1)
            .unwrap_or(self.text.len());
        let line = &self.text[line_start..line_end];
        let within = line
            .char_indices()
            .nth(position.character as usize)
            .map(|(i, _)| i)
            .unwrap_or(line.len());
        line_start + within
    }

    fn position_at(&self, offset: usize) -> Position {
        let line = match self.line_starts.binary_search(&offset) {
            Ok(line) => line,
            Err(next) => next - 1,
        };
        let character = self.text[self.line_starts[line]..offset].chars().count();
        Position::new(line as u32, character as u32)
    }

    fn range_of(&self, start: usize, end: usize) -> Range {
        Range::new(self.position_at(start), self.position_at(end))
    }
}

impl Document for TextDocument {
    fn uri(&self) -> &Uri {
        &self.uri
    }

    fn get_text(&self, range: &Range) -> String {
        let start = self.offset_at(range.start);
        let end = self.offset_at(range.end);
        self.text[start..end.max(start)].to_string()
    }
}
