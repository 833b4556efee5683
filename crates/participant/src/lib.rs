//! # Parrot Participant
//!
//! The request pipeline behind the parrot chat participant:
//!
//! ```text
//! ChatRequest → ReferenceResolver → PromptAssembler → (echo | Dispatcher → ChatModel) → ResponseSink
//! ```
//!
//! - [`context`] resolves references and splices them into the prompt.
//! - [`directive`] turns a `like…` command into a style instruction.
//! - [`dispatcher`] picks a model and streams its reply.
//! - [`handler`] ties the steps together for one request.

pub mod context;
pub mod directive;
pub mod dispatcher;
pub mod feedback;
pub mod followup;
pub mod handler;
pub mod repeat;

#[cfg(test)]
mod test_helpers;

pub use context::{PromptAssembler, PromptAssembly, ReferenceResolver, Resolution, Unresolvable};
pub use directive::{STYLE_COMMAND_PREFIX, Style, build_directive};
pub use dispatcher::{Dispatcher, OFF_TOPIC_MESSAGE, Relayed, TextStream};
pub use feedback::{Feedback, FeedbackKind, Notice, NoticeLevel, handle_feedback};
pub use followup::{Followup, generate_followups};
pub use handler::{ChatHandler, ChatOutcome, list_models};
pub use repeat::repeat_message;
