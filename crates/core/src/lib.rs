//! # Parrot Core
//!
//! Domain types, collaborator traits, and error definitions for the Parrot
//! prompt relay. This crate has **no backend or host dependencies** — it
//! defines the model that all other crates implement against.
//!
//! ## Design Philosophy
//!
//! Every external collaborator (editor, open documents, file storage, chat
//! model, response sink) is a trait here. Implementations live in their
//! respective crates, so the participant can be driven by a real editor,
//! by the standalone CLI host, or by scripted test doubles.

pub mod error;
pub mod host;
pub mod message;
pub mod provider;
pub mod reference;
pub mod request;
pub mod sink;
pub mod tool;

// Re-export key types at crate root for ergonomics
pub use error::{CommandError, Error, ProviderError, ResolveError, Result, ToolError};
pub use host::{ActiveEditor, Document, DocumentRegistry, FileReader, HostContext};
pub use message::{Message, Role};
pub use provider::{ChatModel, ModelCatalog, ModelInfo, ModelRequest, ModelSelector, StreamChunk};
pub use reference::{Location, Position, Range, Reference, ResolvedReference, Uri};
pub use request::ChatRequest;
pub use sink::{RecordingSink, ResponsePart, ResponseSink};
pub use tool::{InvocationPrompt, Tool, ToolCall, ToolRegistry, ToolResult};

pub use tokio_util::sync::CancellationToken;
