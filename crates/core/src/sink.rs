//! Response sink — where a chat response is written as it is produced.

use serde::{Deserialize, Serialize};

use crate::reference::Location;

/// One item emitted to a response sink, in emission order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ResponsePart {
    Progress { message: String },
    Markdown { content: String },
    Reference { location: Location },
}

/// Accepts markdown chunks, progress notes and citations.
///
/// Parts are delivered in the order they are produced; sinks must not
/// reorder them.
pub trait ResponseSink: Send {
    fn progress(&mut self, message: &str);

    fn markdown(&mut self, content: &str);

    fn reference(&mut self, location: Location);
}

/// A sink that records every part, for tests and buffered callers.
#[derive(Debug, Default, Clone)]
pub struct RecordingSink {
    pub parts: Vec<ResponsePart>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// All markdown chunks concatenated.
    pub fn markdown_text(&self) -> String {
        self.parts
            .iter()
            .filter_map(|p| match p {
                ResponsePart::Markdown { content } => Some(content.as_str()),
                _ => None,
            })
            .collect()
    }

    pub fn references(&self) -> Vec<&Location> {
        self.parts
            .iter()
            .filter_map(|p| match p {
                ResponsePart::Reference { location } => Some(location),
                _ => None,
            })
            .collect()
    }
}

impl ResponseSink for RecordingSink {
    fn progress(&mut self, message: &str) {
        self.parts.push(ResponsePart::Progress {
            message: message.to_string(),
        });
    }

    fn markdown(&mut self, content: &str) {
        self.parts.push(ResponsePart::Markdown {
            content: content.to_string(),
        });
    }

    fn reference(&mut self, location: Location) {
        self.parts.push(ResponsePart::Reference { location });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reference::Uri;

    #[test]
    fn recording_sink_keeps_order() {
        let mut sink = RecordingSink::new();
        sink.progress("thinking");
        sink.markdown("Hello, ");
        sink.reference(Location::uri(Uri::new("https://example.com")));
        sink.markdown("world");

        assert_eq!(sink.parts.len(), 4);
        assert_eq!(sink.markdown_text(), "Hello, world");
        assert_eq!(sink.references().len(), 1);
        assert!(matches!(sink.parts[0], ResponsePart::Progress { .. }));
    }

    #[test]
    fn part_serialization() {
        let part = ResponsePart::Markdown {
            content: "hi".into(),
        };
        let json = serde_json::to_string(&part).unwrap();
        assert!(json.contains(r#""type":"markdown""#));
    }
}
