//! Chat model traits — the abstraction over text-generation backends.
//!
//! A `ModelCatalog` lists the models a backend offers; a `ChatModel` takes an
//! ordered message list and streams text back.
//!
//! Implementations: OpenAI-compatible endpoints, scripted test models.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

use crate::error::ProviderError;
use crate::message::Message;

/// Describes one model offered by a backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelInfo {
    /// The identifier the backend expects on the wire (e.g. "gpt-4o-2024-05-13")
    pub id: String,

    /// Who serves the model (e.g. "copilot", "openai")
    pub vendor: String,

    /// The model family users pick by name (e.g. "gpt-4o")
    pub family: String,

    /// Backend-reported version
    pub version: String,
}

impl ModelInfo {
    /// `family version`, the way models are listed to users.
    pub fn label(&self) -> String {
        format!("{} {}", self.family, self.version)
    }
}

/// Filter for `ModelCatalog::select_models`. Empty fields match everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModelSelector {
    pub vendor: Option<String>,
    pub family: Option<String>,
}

impl ModelSelector {
    pub fn vendor(vendor: impl Into<String>) -> Self {
        Self {
            vendor: Some(vendor.into()),
            family: None,
        }
    }

    /// Case-insensitive match on every populated field.
    pub fn matches(&self, info: &ModelInfo) -> bool {
        let vendor_ok = self
            .vendor
            .as_ref()
            .is_none_or(|v| v.eq_ignore_ascii_case(&info.vendor));
        let family_ok = self
            .family
            .as_ref()
            .is_none_or(|f| f.eq_ignore_ascii_case(&info.family));
        vendor_ok && family_ok
    }
}

/// Options for a single model request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelRequest {
    /// The messages, in the order the model should read them
    pub messages: Vec<Message>,

    /// Temperature (0.0 = deterministic, 1.0 = creative)
    #[serde(default = "default_temperature")]
    pub temperature: f32,

    /// Maximum tokens to generate
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
}

fn default_temperature() -> f32 {
    0.7
}

impl ModelRequest {
    pub fn new(messages: Vec<Message>) -> Self {
        Self {
            messages,
            temperature: default_temperature(),
            max_tokens: None,
        }
    }
}

/// A single chunk in a streaming response.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StreamChunk {
    /// Partial content delta
    #[serde(default)]
    pub content: Option<String>,

    /// Whether this is the final chunk
    #[serde(default)]
    pub done: bool,
}

impl StreamChunk {
    pub fn text(content: impl Into<String>) -> Self {
        Self {
            content: Some(content.into()),
            done: false,
        }
    }

    pub fn done() -> Self {
        Self {
            content: None,
            done: true,
        }
    }
}

/// Receiving half of a model's output stream.
pub type ChunkReceiver = tokio::sync::mpsc::Receiver<Result<StreamChunk, ProviderError>>;

/// One backend model that can be asked to generate text.
#[async_trait]
pub trait ChatModel: Send + Sync {
    fn info(&self) -> &ModelInfo;

    /// Send the request and return a stream of response chunks.
    ///
    /// Implementations stop producing chunks once `cancel` fires.
    async fn send_request(
        &self,
        request: ModelRequest,
        cancel: CancellationToken,
    ) -> Result<ChunkReceiver, ProviderError>;
}

/// Lists the models a backend currently offers.
#[async_trait]
pub trait ModelCatalog: Send + Sync {
    async fn select_models(
        &self,
        selector: &ModelSelector,
    ) -> Result<Vec<Arc<dyn ChatModel>>, ProviderError>;
}
