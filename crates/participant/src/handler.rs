//! The chat handler — one request in, a stream of response parts out.
//!
//! Flow:
//! 1. Progress note, then the fixed demo references.
//! 2. `listmodels` lists the catalog and stops.
//! 3. Assemble the prompt; an empty prompt gets a hint and stops.
//! 4. Cite everything the prompt drew from.
//! 5. With a style command, dispatch to a model; without one, echo.

use parrot_config::AppConfig;
use parrot_core::error::{Error, ProviderError};
use parrot_core::host::HostContext;
use parrot_core::provider::{ModelCatalog, ModelSelector};
use parrot_core::reference::{Location, Uri};
use parrot_core::request::ChatRequest;
use parrot_core::sink::ResponseSink;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use crate::context::{PromptAssembler, ReferenceResolver};
use crate::directive::build_directive;
use crate::dispatcher::{Dispatcher, Relayed};

pub const PROGRESS_MESSAGE: &str = "looking at something to parrot....";
pub const EMPTY_PROMPT_HINT: &str = "Polly wants a cracker, you need to tell me something to repeat";
pub const LIST_MODELS_COMMAND: &str = "listmodels";

const ARTICLE_URL: &str = "https://pascoal.net/2024/10/22/gh-copilot-extensions";
const YODA_URL: &str = "https://en.wikipedia.org/wiki/Yoda";
const PIRATE_URL: &str = "https://en.wikipedia.org/wiki/International_Talk_Like_a_Pirate_Day";

/// Which branch a request took.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatOutcome {
    /// No command: the assembled prompt was echoed back.
    Parroted,
    /// A style command ran against a model.
    Styled(Relayed),
    /// `listmodels`: the catalog was listed.
    ListedModels { count: usize },
    /// The assembled prompt was empty; only a hint was written.
    NothingToRepeat,
}

/// Handles parrot chat requests.
#[derive(Clone)]
pub struct ChatHandler {
    assembler: PromptAssembler,
    dispatcher: Dispatcher,
    default_family: String,
}

impl ChatHandler {
    pub fn new(host: HostContext, dispatcher: Dispatcher, default_family: impl Into<String>) -> Self {
        Self {
            assembler: PromptAssembler::new(ReferenceResolver::new(host)),
            dispatcher,
            default_family: default_family.into(),
        }
    }

    /// Build a handler using the configured vendor, sampling and default model.
    pub fn from_config(host: HostContext, catalog: Arc<dyn ModelCatalog>, config: &AppConfig) -> Self {
        let dispatcher = Dispatcher::new(catalog, config.vendor.clone())
            .with_temperature(config.temperature)
            .with_max_tokens(config.max_tokens);
        Self::new(host, dispatcher, config.default_model.clone())
    }

    pub async fn handle(
        &self,
        request: &ChatRequest,
        sink: &mut dyn ResponseSink,
        cancel: CancellationToken,
    ) -> Result<ChatOutcome, Error> {
        let command = request.command.as_deref();

        sink.progress(PROGRESS_MESSAGE);
        debug!(
            request_id = %request.id,
            command = ?command,
            prompt = %request.prompt,
            references = ?request.references.iter().map(|r| r.kind()).collect::<Vec<_>>(),
            "Handling chat request"
        );

        add_demo_references(command, sink);

        if command == Some(LIST_MODELS_COMMAND) {
            let count = list_models(self.dispatcher.catalog().as_ref(), self.dispatcher.vendor(), sink).await?;
            return Ok(ChatOutcome::ListedModels { count });
        }

        let assembly = self.assembler.assemble(&request.prompt, &request.references).await?;
        if assembly.is_empty() {
            sink.markdown(EMPTY_PROMPT_HINT);
            return Ok(ChatOutcome::NothingToRepeat);
        }

        for citation in &assembly.citations {
            sink.reference(citation.clone());
        }

        let Some(command) = command else {
            sink.markdown(&assembly.prompt);
            return Ok(ChatOutcome::Parroted);
        };

        let directive = build_directive(command)?;
        let family = request.model_family_or(&self.default_family);
        debug!(family, directive = %directive, prompt = %assembly.prompt, "Parroting with style");

        let relayed = self
            .dispatcher
            .stream_to(&directive, &assembly.prompt, family, sink, cancel)
            .await?;
        info!(request_id = %request.id, outcome = ?relayed, "Styled response finished");
        Ok(ChatOutcome::Styled(relayed))
    }
}

/// The article link on every response, plus a style page for the two
/// built-in style commands.
fn add_demo_references(command: Option<&str>, sink: &mut dyn ResponseSink) {
    sink.reference(Location::uri(Uri::new(ARTICLE_URL)));
    match command {
        Some("likeyoda") => sink.reference(Location::uri(Uri::new(YODA_URL))),
        Some("likeapirate") => sink.reference(Location::uri(Uri::new(PIRATE_URL))),
        _ => {}
    }
}

/// Write the vendor's models as a markdown list. Returns how many were listed.
pub async fn list_models(
    catalog: &dyn ModelCatalog,
    vendor: &str,
    sink: &mut dyn ResponseSink,
) -> Result<usize, ProviderError> {
    let models = catalog.select_models(&ModelSelector::vendor(vendor)).await?;

    sink.markdown("Available Models\n");
    for model in &models {
        let info = model.info();
        sink.markdown(&format!("- **{}** ({})\n", info.family, info.version));
        sink.markdown("\n");
    }
    Ok(models.len())
}
