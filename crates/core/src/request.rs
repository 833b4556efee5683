//! Inbound chat requests.

use uuid::Uuid;

use crate::reference::Reference;

/// One request addressed to the parrot participant.
#[derive(Debug, Clone)]
pub struct ChatRequest {
    /// Correlates log lines for this request.
    pub id: String,

    /// The raw prompt as typed, placeholders included.
    pub prompt: String,

    /// The slash command, e.g. `likeyoda`, if any.
    pub command: Option<String>,

    /// Context attached to the prompt, in the order supplied.
    pub references: Vec<Reference>,

    /// The model family the user picked, if any.
    pub model_family: Option<String>,
}

impl ChatRequest {
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            prompt: prompt.into(),
            command: None,
            references: Vec::new(),
            model_family: None,
        }
    }

    pub fn with_command(mut self, command: impl Into<String>) -> Self {
        let command = command.into();
        self.command = if command.is_empty() { None } else { Some(command) };
        self
    }

    pub fn with_reference(mut self, reference: Reference) -> Self {
        self.references.push(reference);
        self
    }

    pub fn with_references(mut self, references: impl IntoIterator<Item = Reference>) -> Self {
        self.references.extend(references);
        self
    }

    pub fn with_model_family(mut self, family: impl Into<String>) -> Self {
        self.model_family = Some(family.into());
        self
    }

    /// The user-selected model family, or `default` when none was picked.
    pub fn model_family_or<'a>(&'a self, default: &'a str) -> &'a str {
        self.model_family.as_deref().unwrap_or(default)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_selected_model_wins() {
        let request = ChatRequest::new("hi").with_model_family("gpt-3");
        assert_eq!(request.model_family_or("gpt-4o"), "gpt-3");
    }

    #[test]
    fn default_model_when_none_selected() {
        let request = ChatRequest::new("hi");
        assert_eq!(request.model_family_or("gpt-4o"), "gpt-4o");
    }

    #[test]
    fn empty_command_is_no_command() {
        let request = ChatRequest::new("hi").with_command("");
        assert!(request.command.is_none());
    }
}
