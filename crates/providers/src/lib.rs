//! Chat model backends for Parrot.
//!
//! All models implement the `parrot_core::ChatModel` trait. The catalog
//! exposes the configured models to the participant.

pub mod catalog;
pub mod openai_compat;

pub use catalog::{ConfiguredCatalog, build_from_config};
pub use openai_compat::OpenAiCompatModel;
