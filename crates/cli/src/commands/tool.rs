//! `parrot tool` — run a standalone tool.

use clap::Subcommand;
use parrot_config::AppConfig;
use parrot_core::tool::ToolCall;
use std::sync::Arc;

#[derive(Subcommand, Debug)]
pub enum ToolCommand {
    /// Ask the parrot its name
    SayName,

    /// Repeat text in a style
    RepeatLike {
        /// Text to repeat
        #[arg(long)]
        text: String,

        /// Style, e.g. yoda, pirate, parrot, shakespeare
        #[arg(long)]
        like: String,
    },
}

impl ToolCommand {
    fn call(&self) -> ToolCall {
        match self {
            Self::SayName => ToolCall {
                name: "parrot_say_name".into(),
                arguments: serde_json::json!({}),
            },
            Self::RepeatLike { text, like } => ToolCall {
                name: "parrot_repeat_like".into(),
                arguments: serde_json::json!({ "text": text, "like": like }),
            },
        }
    }
}

pub async fn run(command: ToolCommand) -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load().map_err(|e| format!("Failed to load config: {e}"))?;
    let catalog = Arc::new(parrot_providers::build_from_config(&config));
    let registry = parrot_tools::default_registry(catalog);

    let call = command.call();
    let prompt = registry.prepare(&call)?;
    eprintln!("{}: {}", prompt.confirmation_title, prompt.confirmation_message);
    eprintln!("{}", prompt.invocation_message);

    let result = registry.execute(&call).await?;
    println!("{}", result.output);
    Ok(())
}
