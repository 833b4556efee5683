//! Host collaborators for running Parrot outside an editor.
//!
//! Provides what an editor integration would otherwise supply:
//! - `TextDocument` — an in-memory document with line/character ranges
//! - `OpenDocuments` — the registry of documents the user has "open"
//! - `FixedSelection` — an active editor whose selection is set up front
//! - `FsFileReader` — reads files from the local filesystem

pub mod document;
pub mod editor;
pub mod fs;
pub mod registry;

pub use document::TextDocument;
pub use editor::FixedSelection;
pub use fs::FsFileReader;
pub use registry::OpenDocuments;
