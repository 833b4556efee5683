//! Say-name tool — the parrot introduces itself.

use async_trait::async_trait;
use parrot_core::error::ToolError;
use parrot_core::tool::{InvocationPrompt, Tool, ToolResult};
use rand::Rng;

pub const PARROT_NAMES: [&str; 9] = [
    "Polly",
    "Captain Feathers",
    "Ruby",
    "Emerald",
    "Echo",
    "Mango",
    "Kiwi",
    "Pepper",
    "Storm",
];

pub struct SayNameTool;

#[async_trait]
impl Tool for SayNameTool {
    fn name(&self) -> &str {
        "parrot_say_name"
    }

    fn description(&self) -> &str {
        "Ask the parrot its name."
    }

    fn parameters_schema(&self) -> serde_json::Value {
        serde_json::json!({
            "type": "object",
            "properties": {}
        })
    }

    fn prepare_invocation(&self, _arguments: &serde_json::Value) -> Result<InvocationPrompt, ToolError> {
        Ok(InvocationPrompt {
            invocation_message: "Getting the parrot's name...".into(),
            confirmation_title: "Parrot".into(),
            confirmation_message: "Would you like to know the name of the parrot? 🦜 I will say it".into(),
        })
    }

    async fn execute(&self, _arguments: serde_json::Value) -> Result<ToolResult, ToolError> {
        let name = PARROT_NAMES[rand::rng().random_range(0..PARROT_NAMES.len())];
        Ok(ToolResult::ok(format!("🦜 My name is {name}")))
    }
}
