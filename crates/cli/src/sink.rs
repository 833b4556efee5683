//! Terminal response sink.

use parrot_core::reference::Location;
use parrot_core::sink::ResponseSink;
use std::io::Write;

/// Streams markdown to stdout as it arrives; progress goes to stderr.
/// Citations are held back and printed by [`StdoutSink::finish`].
#[derive(Debug, Default)]
pub struct StdoutSink {
    references: Vec<Location>,
    wrote_markdown: bool,
}

impl StdoutSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// End the response and list its references.
    pub fn finish(self) {
        if self.wrote_markdown {
            println!();
        }
        if self.references.is_empty() {
            return;
        }
        println!();
        println!("References:");
        for location in &self.references {
            println!("  - {location}");
        }
    }
}

impl ResponseSink for StdoutSink {
    fn progress(&mut self, message: &str) {
        eprintln!("🦜 {message}");
    }

    fn markdown(&mut self, content: &str) {
        let mut stdout = std::io::stdout().lock();
        // A closed stdout just loses output
        let _ = stdout.write_all(content.as_bytes());
        let _ = stdout.flush();
        self.wrote_markdown = true;
    }

    fn reference(&mut self, location: Location) {
        self.references.push(location);
    }
}
