//! Style directives — the instruction sent ahead of the user's prompt.
//!
//! A style command is `like` followed by a style word (`likeyoda`,
//! `likeapirate`, `likeashakespeare`, ...). Two styles have hand-written
//! directives; anything else gets a generic template naming the style.

use parrot_core::error::CommandError;

/// Every style command starts with this.
pub const STYLE_COMMAND_PREFIX: &str = "like";

const YODA_MARKER: &str = "yoda";
const PIRATE_MARKER: &str = "pirate";

/// A speaking style the parrot can imitate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Style {
    Yoda,
    Pirate,
    /// Any other style, named literally.
    Other(String),
}

impl Style {
    /// Parse a style command keyword.
    ///
    /// The marker match is a case-sensitive substring test, so `likeayoda`
    /// and `likeyoda` both pick Yoda.
    pub fn from_command(keyword: &str) -> Result<Self, CommandError> {
        let Some(name) = keyword.strip_prefix(STYLE_COMMAND_PREFIX) else {
            return Err(CommandError::InvalidCommand(keyword.to_string()));
        };
        if name.is_empty() {
            return Err(CommandError::InvalidCommand(keyword.to_string()));
        }

        Ok(if keyword.contains(YODA_MARKER) {
            Self::Yoda
        } else if keyword.contains(PIRATE_MARKER) {
            Self::Pirate
        } else {
            Self::Other(name.to_string())
        })
    }

    /// Parse a bare style name, as given to the repeat-like tool.
    pub fn from_name(name: &str) -> Self {
        match name.to_lowercase().as_str() {
            YODA_MARKER => Self::Yoda,
            PIRATE_MARKER => Self::Pirate,
            _ => Self::Other(name.to_string()),
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Self::Yoda => YODA_MARKER,
            Self::Pirate => PIRATE_MARKER,
            Self::Other(name) => name,
        }
    }

    /// The instruction text for this style. Independent of the prompt.
    pub fn directive(&self) -> String {
        match self {
            Self::Yoda => "Repeat what I will say below, but make it sound like a coding yoda parrot. \
                 Use Yoda's distinctive speech patterns with inverted sentence structure, \
                 wisdom-focused language, and characteristic phrases. Return the text in plaintext."
                .to_string(),
            Self::Pirate => "Repeat what I will say below, but make it sound like a coding pirate parrot. \
                 Use pirate vocabulary, \"Arr!\", \"Ahoy!\", ship terminology, and seafaring expressions. \
                 Return the text in plaintext."
                .to_string(),
            Self::Other(style) => format!(
                "Repeat what I will say below, but make it sound like a coding {style}. \
                 Adopt the characteristic speech patterns, vocabulary, and mannerisms of this style. \
                 Return the text in plaintext."
            ),
        }
    }
}

/// Build the directive for a style command keyword.
pub fn build_directive(keyword: &str) -> Result<String, CommandError> {
    Style::from_command(keyword).map(|style| style.directive())
}
