//! Follow-up suggestions offered after a response.

use parrot_config::FollowupConfig;
use rand::Rng;
use serde::Serialize;
use tracing::debug;

/// Prompts a follow-up may suggest.
pub const FOLLOWUP_PROMPTS: [&str; 4] = [
    "How Can I write my own VS Code extension?",
    "I Love VS Code",
    "I Love GitHub Copilot",
    "GitHub Copilot Extensions are so cool",
];

/// A suggested next request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Followup {
    pub label: String,
    pub prompt: String,
    /// The command to run; empty for a plain parrot.
    pub command: String,
}

/// Suggest follow-ups, all sharing one randomly picked prompt.
///
/// Returns `None` when follow-ups are turned off.
pub fn generate_followups<R: Rng + ?Sized>(
    config: &FollowupConfig,
    rng: &mut R,
) -> Option<Vec<Followup>> {
    if !config.enabled {
        debug!("Follow-ups are disabled");
        return None;
    }

    let prompt = FOLLOWUP_PROMPTS[rng.random_range(0..FOLLOWUP_PROMPTS.len())];

    let mut followups = vec![Followup {
        label: format!("🦜Parrot '{prompt}'"),
        prompt: prompt.to_string(),
        command: String::new(),
    }];

    if config.like_enabled {
        followups.push(Followup {
            label: format!("🦜Parrot '{prompt}' like a pirate"),
            prompt: prompt.to_string(),
            command: "likeapirate".into(),
        });
        followups.push(Followup {
            label: format!("🦜 Parrot '{prompt}' like Yoda"),
            prompt: prompt.to_string(),
            command: "likeyoda".into(),
        });
    }

    Some(followups)
}
