//! OpenAI-compatible chat model implementation.
//!
//! Works with: OpenAI, OpenRouter, Ollama, vLLM, GitHub Models, and any
//! endpoint exposing `/v1/chat/completions` with SSE streaming.

use async_trait::async_trait;
use futures::StreamExt;
use parrot_core::error::ProviderError;
use parrot_core::message::{Message, Role};
use parrot_core::provider::{ChatModel, ChunkReceiver, ModelInfo, ModelRequest, StreamChunk};
use serde::{Deserialize, Serialize};
use tokio_util::sync::CancellationToken;
use tracing::{debug, trace, warn};

/// A chat model served by an OpenAI-compatible endpoint.
pub struct OpenAiCompatModel {
    info: ModelInfo,
    base_url: String,
    api_key: String,
    client: reqwest::Client,
}

impl OpenAiCompatModel {
    /// Create a new model handle. `info.id` is sent as the wire model name.
    pub fn new(info: ModelInfo, base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(120))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            info,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
            client,
        }
    }

    /// Convert our Message types to OpenAI API format.
    fn to_api_messages(messages: &[Message]) -> Vec<ApiMessage> {
        messages
            .iter()
            .map(|m| ApiMessage {
                role: match m.role {
                    Role::User => "user".into(),
                    Role::Assistant => "assistant".into(),
                    Role::System => "system".into(),
                },
                content: m.content.clone(),
            })
            .collect()
    }

    fn request_body(&self, request: &ModelRequest) -> serde_json::Value {
        let mut body = serde_json::json!({
            "model": self.info.id,
            "messages": Self::to_api_messages(&request.messages),
            "temperature": request.temperature,
            "stream": true,
        });

        if let Some(max_tokens) = request.max_tokens {
            body["max_tokens"] = serde_json::json!(max_tokens);
        }

        body
    }
}

/// Map a non-200 status and body to a provider error.
fn classify_status(status: u16, body: String) -> ProviderError {
    match status {
        429 => ProviderError::RateLimited {
            retry_after_secs: 5,
        },
        401 | 403 => ProviderError::AuthenticationFailed(
            "Invalid API key or insufficient permissions".into(),
        ),
        400 if body.contains("off_topic") || body.contains("content_filter") => {
            ProviderError::ContentFiltered { reason: body }
        }
        _ => ProviderError::ApiError {
            status_code: status,
            message: body,
        },
    }
}

/// Map a reqwest failure, keeping timeouts distinct from other transport errors.
fn map_transport_error(error: reqwest::Error, streaming: bool) -> ProviderError {
    if error.is_timeout() {
        ProviderError::Timeout(error.to_string())
    } else if streaming {
        ProviderError::StreamInterrupted(error.to_string())
    } else {
        ProviderError::Network(error.to_string())
    }
}

/// Accumulates raw SSE bytes and yields complete lines.
///
/// Network chunks can end mid-codepoint, so decoding waits for the newline.
#[derive(Debug, Default)]
struct LineBuffer {
    bytes: Vec<u8>,
}

impl LineBuffer {
    fn push(&mut self, chunk: &[u8]) -> Vec<String> {
        self.bytes.extend_from_slice(chunk);

        let mut lines = Vec::new();
        while let Some(end) = self.bytes.iter().position(|&b| b == b'\n') {
            let line: Vec<u8> = self.bytes.drain(..=end).collect();
            let text = String::from_utf8_lossy(&line[..end]);
            lines.push(text.trim_end_matches('\r').to_string());
        }
        lines
    }
}

/// What one SSE line means for the stream.
#[derive(Debug, PartialEq)]
enum SseEvent {
    /// Blank line, comment, or a chunk with nothing to forward.
    Skip,
    Text(String),
    Filtered(String),
    Done,
}

fn parse_sse_line(line: &str) -> SseEvent {
    let Some(data) = line.strip_prefix("data:") else {
        return SseEvent::Skip;
    };
    let data = data.trim();

    if data == "[DONE]" {
        return SseEvent::Done;
    }

    match serde_json::from_str::<StreamResponse>(data) {
        Ok(resp) => {
            let Some(choice) = resp.choices.into_iter().next() else {
                return SseEvent::Skip;
            };
            if choice.finish_reason.as_deref() == Some("content_filter") {
                return SseEvent::Filtered("content_filter".into());
            }
            match choice.delta.content {
                Some(content) if !content.is_empty() => SseEvent::Text(content),
                _ => SseEvent::Skip,
            }
        }
        Err(e) => {
            trace!(data = %data, error = %e, "Ignoring unparseable SSE chunk");
            SseEvent::Skip
        }
    }
}

#[async_trait]
impl ChatModel for OpenAiCompatModel {
    fn info(&self) -> &ModelInfo {
        &self.info
    }

    async fn send_request(
        &self,
        request: ModelRequest,
        cancel: CancellationToken,
    ) -> Result<ChunkReceiver, ProviderError> {
        let url = format!("{}/chat/completions", self.base_url);
        let body = self.request_body(&request);

        debug!(model = %self.info.id, family = %self.info.family, "Sending streaming request");

        let response = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .header("Accept", "text/event-stream")
            .json(&body)
            .send()
            .await
            .map_err(|e| map_transport_error(e, false))?;

        let status = response.status().as_u16();
        if status != 200 {
            let error_body = response.text().await.unwrap_or_default();
            warn!(status, body = %error_body, "Provider streaming error");
            return Err(classify_status(status, error_body));
        }

        let (tx, rx) = tokio::sync::mpsc::channel(64);
        let model_id = self.info.id.clone();

        // Spawn task to read the SSE byte stream and parse chunks
        tokio::spawn(async move {
            let mut byte_stream = response.bytes_stream();
            let mut buffer = LineBuffer::default();

            loop {
                let next = tokio::select! {
                    _ = cancel.cancelled() => {
                        debug!(model = %model_id, "Stream cancelled");
                        return;
                    }
                    next = byte_stream.next() => next,
                };

                let Some(chunk_result) = next else { break };
                let bytes = match chunk_result {
                    Ok(b) => b,
                    Err(e) => {
                        let _ = tx.send(Err(map_transport_error(e, true))).await;
                        return;
                    }
                };

                for line in buffer.push(&bytes) {
                    match parse_sse_line(&line) {
                        SseEvent::Skip => {}
                        SseEvent::Text(content) => {
                            if tx.send(Ok(StreamChunk::text(content))).await.is_err() {
                                return; // receiver dropped
                            }
                        }
                        SseEvent::Filtered(reason) => {
                            let _ = tx.send(Err(ProviderError::ContentFiltered { reason })).await;
                            return;
                        }
                        SseEvent::Done => {
                            let _ = tx.send(Ok(StreamChunk::done())).await;
                            return;
                        }
                    }
                }
            }

            // Stream ended without [DONE]
            let _ = tx.send(Ok(StreamChunk::done())).await;
        });

        Ok(rx)
    }
}

// --- OpenAI API types (internal) ---

#[derive(Debug, Serialize, Deserialize)]
struct ApiMessage {
    role: String,
    content: String,
}

/// A single SSE `data: {...}` chunk from a streaming response.
#[derive(Debug, Deserialize)]
struct StreamResponse {
    #[serde(default)]
    choices: Vec<StreamChoice>,
}

#[derive(Debug, Deserialize)]
struct StreamChoice {
    delta: StreamDelta,
    #[serde(default)]
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct StreamDelta {
    #[serde(default)]
    content: Option<String>,
}
