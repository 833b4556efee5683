//! Model catalog — the configured set of chat models.
//!
//! Builds one `ChatModel` per `[[models]]` entry and answers
//! `select_models` queries against them.

use async_trait::async_trait;
use parrot_core::error::ProviderError;
use parrot_core::provider::{ChatModel, ModelCatalog, ModelInfo, ModelSelector};
use std::sync::Arc;

use crate::openai_compat::OpenAiCompatModel;

/// A fixed list of models, in configuration order.
#[derive(Default)]
pub struct ConfiguredCatalog {
    models: Vec<Arc<dyn ChatModel>>,
}

impl ConfiguredCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a model to the catalog.
    pub fn register(&mut self, model: Arc<dyn ChatModel>) {
        self.models.push(model);
    }

    pub fn len(&self) -> usize {
        self.models.len()
    }

    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }
}

#[async_trait]
impl ModelCatalog for ConfiguredCatalog {
    async fn select_models(
        &self,
        selector: &ModelSelector,
    ) -> Result<Vec<Arc<dyn ChatModel>>, ProviderError> {
        Ok(self
            .models
            .iter()
            .filter(|m| selector.matches(m.info()))
            .cloned()
            .collect())
    }
}

/// Build the catalog from configuration.
pub fn build_from_config(config: &parrot_config::AppConfig) -> ConfiguredCatalog {
    let mut catalog = ConfiguredCatalog::new();

    for model in &config.models {
        let provider_name = model
            .provider
            .clone()
            .unwrap_or_else(|| config.default_provider.clone());
        let provider_config = config.providers.get(&provider_name);

        let api_key = provider_config
            .and_then(|p| p.api_key.clone())
            .or_else(|| config.api_key.clone())
            .unwrap_or_default();

        let base_url = provider_config
            .and_then(|p| p.api_url.clone())
            .unwrap_or_else(|| default_base_url(&provider_name));

        let info = ModelInfo {
            id: model.model_id().to_string(),
            vendor: config.vendor.clone(),
            family: model.family.clone(),
            version: model.version.clone(),
        };

        tracing::debug!(family = %info.family, provider = %provider_name, "Registering model");
        catalog.register(Arc::new(OpenAiCompatModel::new(info, base_url, api_key)));
    }

    catalog
}

/// Get the default base URL for well-known providers.
fn default_base_url(provider_name: &str) -> String {
    match provider_name {
        "openai" => "https://api.openai.com/v1".into(),
        "openrouter" => "https://openrouter.ai/api/v1".into(),
        "github" => "https://models.inference.ai.azure.com".into(),
        "ollama" => "http://localhost:11434/v1".into(),
        "vllm" => "http://localhost:8000/v1".into(),
        "llamacpp" | "llama.cpp" => "http://localhost:8080/v1".into(),
        _ => format!("https://{provider_name}.api.example.com/v1"),
    }
}
