//! Standalone parrot tools.
//!
//! Tools are invoked directly by a chat host rather than through the
//! participant: the host asks `prepare_invocation` for confirmation texts,
//! then calls `execute`.

pub mod repeat_like;
pub mod say_name;

use parrot_core::provider::ModelCatalog;
use parrot_core::tool::ToolRegistry;
use std::sync::Arc;

pub use repeat_like::RepeatLikeTool;
pub use say_name::SayNameTool;

/// A registry holding both parrot tools.
pub fn default_registry(catalog: Arc<dyn ModelCatalog>) -> ToolRegistry {
    let mut registry = ToolRegistry::new();
    registry.register(Box::new(say_name::SayNameTool));
    registry.register(Box::new(repeat_like::RepeatLikeTool::new(catalog)));
    registry
}
