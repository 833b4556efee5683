//! Generation dispatch — picks a model, sends `[directive, prompt]`, and
//! streams the reply back.
//!
//! The returned stream is lazy and single-pass. It ends when the backend
//! finishes or the cancellation token fires, whichever comes first; chunks
//! already yielded stay yielded.

use futures::StreamExt;
use futures::stream::{self, BoxStream};
use parrot_core::error::ProviderError;
use parrot_core::message::Message;
use parrot_core::provider::{ChatModel, ChunkReceiver, ModelCatalog, ModelRequest, ModelSelector};
use parrot_core::sink::ResponseSink;
use std::sync::Arc;
use std::time::Instant;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// Shown instead of an error when the backend refuses an off-topic prompt.
pub const OFF_TOPIC_MESSAGE: &str = "I am sorry, I can only parrot coding stuff";

/// Streamed text fragments, in backend order.
pub type TextStream = BoxStream<'static, Result<String, ProviderError>>;

/// How a relay to the sink ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Relayed {
    /// The backend finished; every chunk was written.
    Completed { chunks: usize },
    /// Cancellation fired; chunks written before it stay written.
    Cancelled { chunks: usize },
    /// The backend refused the prompt as off-topic.
    OffTopic,
}

/// Sends styled prompts to models from a catalog.
#[derive(Clone)]
pub struct Dispatcher {
    catalog: Arc<dyn ModelCatalog>,
    vendor: String,
    temperature: f32,
    max_tokens: Option<u32>,
}

impl Dispatcher {
    pub fn new(catalog: Arc<dyn ModelCatalog>, vendor: impl Into<String>) -> Self {
        Self {
            catalog,
            vendor: vendor.into(),
            temperature: 0.7,
            max_tokens: None,
        }
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: Option<u32>) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    pub fn catalog(&self) -> &Arc<dyn ModelCatalog> {
        &self.catalog
    }

    pub fn vendor(&self) -> &str {
        &self.vendor
    }

    /// Find the vendor's model whose family matches, ignoring case.
    ///
    /// On a miss the error lists every model the vendor offers.
    pub async fn select_model(&self, family: &str) -> Result<Arc<dyn ChatModel>, ProviderError> {
        let models = self
            .catalog
            .select_models(&ModelSelector::vendor(&self.vendor))
            .await?;

        models
            .iter()
            .find(|m| m.info().family.eq_ignore_ascii_case(family))
            .cloned()
            .ok_or_else(|| {
                warn!(family, vendor = %self.vendor, available = models.len(), "Model not found");
                ProviderError::ModelNotFound {
                    family: family.to_string(),
                    available: models.iter().map(|m| m.info().label()).collect(),
                }
            })
    }

    /// Send `[directive, prompt]` to the model of the given family.
    pub async fn dispatch(
        &self,
        directive: &str,
        prompt: &str,
        family: &str,
        cancel: CancellationToken,
    ) -> Result<TextStream, ProviderError> {
        let model = self.select_model(family).await?;

        let mut request = ModelRequest::new(vec![Message::user(directive), Message::user(prompt)]);
        request.temperature = self.temperature;
        request.max_tokens = self.max_tokens;

        info!(model = %model.info().id, family = %model.info().family, "Dispatching prompt");
        let started = Instant::now();
        let rx = model.send_request(request, cancel.clone()).await?;
        debug!(
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Model accepted request"
        );

        Ok(text_stream(rx, cancel))
    }

    /// Dispatch and write every chunk to `sink` as it arrives.
    ///
    /// Off-topic refusals, whether at send time or mid-stream, become
    /// [`OFF_TOPIC_MESSAGE`]. Every other backend error is returned as is.
    pub async fn stream_to(
        &self,
        directive: &str,
        prompt: &str,
        family: &str,
        sink: &mut dyn ResponseSink,
        cancel: CancellationToken,
    ) -> Result<Relayed, ProviderError> {
        let result = match self.dispatch(directive, prompt, family, cancel.clone()).await {
            Ok(stream) => relay(stream, sink, &cancel).await,
            Err(e) => Err(e),
        };

        match result {
            Err(e) if e.is_off_topic() => {
                warn!(error = %e, "Backend refused off-topic prompt");
                sink.markdown(OFF_TOPIC_MESSAGE);
                Ok(Relayed::OffTopic)
            }
            other => other,
        }
    }
}

/// Write each fragment to `sink` in order, one at a time.
pub async fn relay(
    mut stream: TextStream,
    sink: &mut dyn ResponseSink,
    cancel: &CancellationToken,
) -> Result<Relayed, ProviderError> {
    let mut chunks = 0;
    while let Some(fragment) = stream.next().await {
        sink.markdown(&fragment?);
        chunks += 1;
    }

    if cancel.is_cancelled() {
        debug!(chunks, "Relay cancelled");
        Ok(Relayed::Cancelled { chunks })
    } else {
        Ok(Relayed::Completed { chunks })
    }
}

/// Adapt a chunk receiver into a text stream that stops on cancellation.
fn text_stream(rx: ChunkReceiver, cancel: CancellationToken) -> TextStream {
    stream::unfold(Some((rx, cancel)), |state| async move {
        let (mut rx, cancel) = state?;
        loop {
            let next = tokio::select! {
                biased;
                _ = cancel.cancelled() => return None,
                next = rx.recv() => next,
            };

            match next {
                None => return None,
                Some(Err(e)) => return Some((Err(e), None)),
                Some(Ok(chunk)) => {
                    let text = chunk.content.filter(|t| !t.is_empty());
                    match (text, chunk.done) {
                        (Some(text), true) => return Some((Ok(text), None)),
                        (Some(text), false) => return Some((Ok(text), Some((rx, cancel)))),
                        (None, true) => return None,
                        (None, false) => continue,
                    }
                }
            }
        }
    })
    .boxed()
}
