//! Error types for the Parrot domain.
//!
//! Uses `thiserror` for ergonomic error definitions.
//! Each bounded context has its own error variant.

use thiserror::Error;

use crate::reference::Uri;

/// The top-level error type for all Parrot operations.
#[derive(Debug, Error)]
pub enum Error {
    // --- Reference resolution errors ---
    #[error("Reference error: {0}")]
    Resolve(#[from] ResolveError),

    // --- Command errors ---
    #[error("Command error: {0}")]
    Command(#[from] CommandError),

    // --- Provider errors ---
    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),

    // --- Tool errors ---
    #[error("Tool error: {0}")]
    Tool(#[from] ToolError),
}

/// Result type alias using our Error.
pub type Result<T> = std::result::Result<T, Error>;

// --- Bounded context errors ---

/// A reference that cannot be silently skipped.
///
/// Only explicitly named files fail hard; closed documents and missing
/// editors are reported as `Resolution::Unresolvable` instead.
#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("Failed to read file {uri}: {source}")]
    FileRead {
        uri: Uri,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("Invalid command: '{0}'")]
    InvalidCommand(String),
}

#[derive(Debug, Clone, Error)]
pub enum ProviderError {
    #[error("API request failed: {message} (status: {status_code})")]
    ApiError { status_code: u16, message: String },

    #[error("Rate limited by provider, retry after {retry_after_secs}s")]
    RateLimited { retry_after_secs: u64 },

    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    #[error("Model **{family}** not found. \n\nAvailable Models\n\n{}", format_available(.available))]
    ModelNotFound {
        family: String,
        available: Vec<String>,
    },

    #[error("Request rejected by content policy: {reason}")]
    ContentFiltered { reason: String },

    #[error("Stream interrupted: {0}")]
    StreamInterrupted(String),

    #[error("Request timed out: {0}")]
    Timeout(String),

    #[error("Network error: {0}")]
    Network(String),
}

impl ProviderError {
    /// Whether the backend refused the request as off-topic.
    pub fn is_off_topic(&self) -> bool {
        matches!(self, Self::ContentFiltered { reason } if reason.contains("off_topic"))
    }
}

fn format_available(available: &[String]) -> String {
    available
        .iter()
        .map(|m| format!("- {m} "))
        .collect::<Vec<_>>()
        .join("\n")
}

#[derive(Debug, Error)]
pub enum ToolError {
    #[error("Tool not found: {0}")]
    NotFound(String),

    #[error("Invalid tool arguments: {0}")]
    InvalidArguments(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn provider_error_displays_correctly() {
        let err = Error::Provider(ProviderError::ApiError {
            status_code: 429,
            message: "Too many requests".into(),
        });
        assert!(err.to_string().contains("429"));
        assert!(err.to_string().contains("Too many requests"));
    }

    #[test]
    fn model_not_found_lists_every_model() {
        let err = ProviderError::ModelNotFound {
            family: "gpt-5".into(),
            available: vec!["gpt-4o 2024-05-13".into(), "claude-3.5-sonnet 1".into()],
        };
        let text = err.to_string();
        assert!(text.contains("**gpt-5**"));
        assert!(text.contains("- gpt-4o 2024-05-13"));
        assert!(text.contains("- claude-3.5-sonnet 1"));
    }

    #[test]
    fn off_topic_classification() {
        let off_topic = ProviderError::ContentFiltered {
            reason: "Response got filtered: off_topic".into(),
        };
        assert!(off_topic.is_off_topic());

        let other = ProviderError::ContentFiltered {
            reason: "violence".into(),
        };
        assert!(!other.is_off_topic());
        assert!(!ProviderError::Network("off_topic".into()).is_off_topic());
    }

    #[test]
    fn file_read_error_names_the_file() {
        let err = Error::from(ResolveError::FileRead {
            uri: Uri::new("file:///missing.txt"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "not found"),
        });
        assert!(err.to_string().contains("file:///missing.txt"));
    }
}
