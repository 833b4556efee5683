//! Repeat-like tool — repeats text in a named style.
//!
//! `like = "parrot"` echoes the text. Any other style goes to the first
//! model in the catalog; when no model answers, a fixed stand-in sentence
//! is returned instead of an error.

use async_trait::async_trait;
use parrot_core::error::ToolError;
use parrot_core::message::Message;
use parrot_core::provider::{ModelCatalog, ModelRequest, ModelSelector};
use parrot_core::tool::{InvocationPrompt, Tool, ToolResult};
use parrot_participant::Style;
use serde::Deserialize;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

const MISSING_ARGUMENTS: &str = "Both 'text' and 'like' parameters are required.";

#[derive(Debug, Deserialize)]
struct RepeatLikeArgs {
    #[serde(default)]
    text: String,
    #[serde(default)]
    like: String,
}

impl RepeatLikeArgs {
    fn parse(arguments: &serde_json::Value) -> Result<Self, ToolError> {
        let args: Self = serde_json::from_value(arguments.clone())
            .map_err(|e| ToolError::InvalidArguments(e.to_string()))?;
        if args.text.is_empty() || args.like.is_empty() {
            return Err(ToolError::InvalidArguments(MISSING_ARGUMENTS.into()));
        }
        Ok(args)
    }
}

pub struct RepeatLikeTool {
    catalog: Arc<dyn ModelCatalog>,
}

impl RepeatLikeTool {
    pub fn new(catalog: Arc<dyn ModelCatalog>) -> Self {
        Self { catalog }
    }

    async fn transform(&self, text: &str, style: &str, cancel: CancellationToken) -> String {
        let models = match self.catalog.select_models(&ModelSelector::default()).await {
            Ok(models) => models,
            Err(e) => {
                warn!(error = %e, "Listing models failed");
                return format!("🎭 \"{text}\" (as {style} would say it)");
            }
        };
        let Some(model) = models.first() else {
            return format!("🎭 I would repeat \"{text}\" like {style}, but no language model is available.");
        };

        let directive = Style::from_name(style).directive();
        let request = ModelRequest::new(vec![Message::user(directive), Message::user(text)]);
        debug!(model = %model.info().id, style, "Repeating with style");

        let mut rx = match model.send_request(request, cancel.clone()).await {
            Ok(rx) => rx,
            Err(e) => {
                warn!(error = %e, "Style request failed");
                return format!("🎭 \"{text}\" (as {style} would say it)");
            }
        };

        let mut output = String::new();
        while let Some(chunk) = rx.recv().await {
            match chunk {
                Ok(chunk) => {
                    if let Some(content) = chunk.content {
                        output.push_str(&content);
                    }
                    if chunk.done || cancel.is_cancelled() {
                        break;
                    }
                }
                Err(e) => {
                    warn!(error = %e, "Style stream failed");
                    return format!("🎭 \"{text}\" (as {style} would say it)");
                }
            }
        }

        let output = output.trim();
        if output.is_empty() {
            format!("🎭 \"{text}\" (in the style of {style})")
        } else {
            output.to_string()
        }
    }
}

#[async_trait]
impl Tool for RepeatLikeTool {
    fn name(&self) -> &str {
        "parrot_repeat_like"
    }

    fn description(&self) -> &str {
        "Repeat the given text in the style of a character, e.g. yoda or pirate."
    }

    fn parameters_schema(&self) -> serde_json::Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "text": {
                    "type": "string",
                    "description": "The text to repeat"
                },
                "like": {
                    "type": "string",
                    "description": "The style to repeat it in, e.g. 'yoda', 'pirate', 'parrot', 'shakespeare'"
                }
            },
            "required": ["text", "like"]
        })
    }

    fn prepare_invocation(&self, arguments: &serde_json::Value) -> Result<InvocationPrompt, ToolError> {
        let RepeatLikeArgs { text, like } = RepeatLikeArgs::parse(arguments)?;
        Ok(InvocationPrompt {
            invocation_message: format!("Parroting \"{text}\" like {like}..."),
            confirmation_title: "Parrot Like".into(),
            confirmation_message: format!("Would you like me to parrot \"{text}\" in the style of {like}?"),
        })
    }

    async fn execute(&self, arguments: serde_json::Value) -> Result<ToolResult, ToolError> {
        let RepeatLikeArgs { text, like } = RepeatLikeArgs::parse(&arguments)?;

        if like.eq_ignore_ascii_case("parrot") {
            return Ok(ToolResult::ok(text));
        }

        let output = self.transform(&text, &like, CancellationToken::new()).await;
        Ok(ToolResult::ok(output))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parrot_core::error::ProviderError;
    use parrot_core::provider::{ChatModel, ChunkReceiver, ModelInfo, StreamChunk};
    use std::sync::Mutex;

    struct CannedModel {
        info: ModelInfo,
        reply: Result<Vec<&'static str>, ProviderError>,
        directives: Mutex<Vec<String>>,
    }

    impl CannedModel {
        fn new(reply: Result<Vec<&'static str>, ProviderError>) -> Arc<Self> {
            Arc::new(Self {
                info: ModelInfo {
                    id: "gpt-4o".into(),
                    vendor: "copilot".into(),
                    family: "gpt-4o".into(),
                    version: "1".into(),
                },
                reply,
                directives: Mutex::new(Vec::new()),
            })
        }
    }

    #[async_trait]
    impl ChatModel for CannedModel {
        fn info(&self) -> &ModelInfo {
            &self.info
        }

        async fn send_request(
            &self,
            request: ModelRequest,
            _cancel: CancellationToken,
        ) -> Result<ChunkReceiver, ProviderError> {
            self.directives
                .lock()
                .unwrap()
                .push(request.messages[0].content.clone());
            let chunks = self.reply.clone()?;
            let (tx, rx) = tokio::sync::mpsc::channel(chunks.len() + 1);
            for chunk in chunks {
                tx.send(Ok(StreamChunk::text(chunk))).await.unwrap();
            }
            tx.send(Ok(StreamChunk::done())).await.unwrap();
            Ok(rx)
        }
    }

    struct Catalog(Vec<Arc<dyn ChatModel>>);

    #[async_trait]
    impl ModelCatalog for Catalog {
        async fn select_models(
            &self,
            _selector: &ModelSelector,
        ) -> Result<Vec<Arc<dyn ChatModel>>, ProviderError> {
            Ok(self.0.clone())
        }
    }

    fn tool_with(model: Option<Arc<CannedModel>>) -> RepeatLikeTool {
        let models = model.into_iter().map(|m| m as Arc<dyn ChatModel>).collect();
        RepeatLikeTool::new(Arc::new(Catalog(models)))
    }

    #[test]
    fn prepare_requires_both_arguments() {
        let tool = tool_with(None);
        let err = tool
            .prepare_invocation(&serde_json::json!({"text": "hi"}))
            .unwrap_err();
        assert!(matches!(err, ToolError::InvalidArguments(m) if m == MISSING_ARGUMENTS));
    }

    #[test]
    fn prepare_describes_the_call() {
        let prompt = tool_with(None)
            .prepare_invocation(&serde_json::json!({"text": "hi", "like": "yoda"}))
            .unwrap();
        assert_eq!(prompt.invocation_message, "Parroting \"hi\" like yoda...");
        assert_eq!(prompt.confirmation_title, "Parrot Like");
        assert_eq!(
            prompt.confirmation_message,
            "Would you like me to parrot \"hi\" in the style of yoda?"
        );
    }

    #[tokio::test]
    async fn parrot_style_echoes_without_a_model() {
        let model = CannedModel::new(Ok(vec!["unused"]));
        let tool = tool_with(Some(model.clone()));
        let result = tool
            .execute(serde_json::json!({"text": "hello", "like": "PARROT"}))
            .await
            .unwrap();
        assert_eq!(result.output, "hello");
        assert!(model.directives.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn no_model_available() {
        let result = tool_with(None)
            .execute(serde_json::json!({"text": "hello", "like": "yoda"}))
            .await
            .unwrap();
        assert_eq!(
            result.output,
            "🎭 I would repeat \"hello\" like yoda, but no language model is available."
        );
    }

    #[tokio::test]
    async fn model_output_is_concatenated_and_trimmed() {
        let model = CannedModel::new(Ok(vec![" Hello", ", you ", "say. "]));
        let tool = tool_with(Some(model.clone()));
        let result = tool
            .execute(serde_json::json!({"text": "you say hello", "like": "Yoda"}))
            .await
            .unwrap();
        assert_eq!(result.output, "Hello, you say.");
        assert!(model.directives.lock().unwrap()[0].contains("coding yoda parrot"));
    }

    #[tokio::test]
    async fn generic_style_uses_template() {
        let model = CannedModel::new(Ok(vec!["Forsooth"]));
        let tool = tool_with(Some(model.clone()));
        tool.execute(serde_json::json!({"text": "hi", "like": "shakespeare"}))
            .await
            .unwrap();
        assert!(model.directives.lock().unwrap()[0].contains("coding shakespeare."));
    }

    #[tokio::test]
    async fn empty_output_falls_back() {
        let tool = tool_with(Some(CannedModel::new(Ok(vec!["  "]))));
        let result = tool
            .execute(serde_json::json!({"text": "hi", "like": "pirate"}))
            .await
            .unwrap();
        assert_eq!(result.output, "🎭 \"hi\" (in the style of pirate)");
    }

    #[tokio::test]
    async fn backend_failure_falls_back() {
        let tool = tool_with(Some(CannedModel::new(Err(ProviderError::Network(
            "down".into(),
        )))));
        let result = tool
            .execute(serde_json::json!({"text": "hi", "like": "pirate"}))
            .await
            .unwrap();
        assert!(result.success);
        assert_eq!(result.output, "🎭 \"hi\" (as pirate would say it)");
    }
}
