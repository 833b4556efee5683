//! The standalone repeat command.

pub const NOTHING_TO_REPEAT: &str = "🦜 polly wants something to repeat... 🦜";

/// What the parrot says back for `input`.
pub fn repeat_message(input: Option<&str>) -> String {
    match input {
        Some(text) if !text.is_empty() => text.to_string(),
        _ => NOTHING_TO_REPEAT.to_string(),
    }
}
