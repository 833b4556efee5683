//! Feedback on a response, answered with a short notice.

use serde::{Deserialize, Serialize};
use tracing::info;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FeedbackKind {
    Helpful,
    Unhelpful,
    /// A kind this handler doesn't recognize.
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Feedback {
    pub kind: FeedbackKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unhelpful_reason: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeLevel {
    Info,
    Warning,
}

/// A message to show the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    fn info(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Info,
            message: message.into(),
        }
    }

    fn warning(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Warning,
            message: message.into(),
        }
    }
}

pub fn handle_feedback(feedback: &Feedback) -> Notice {
    info!(kind = ?feedback.kind, reason = ?feedback.unhelpful_reason, "Feedback received");

    match feedback.kind {
        FeedbackKind::Helpful => Notice::info("🚀 Happy that you liked it."),
        FeedbackKind::Unhelpful => {
            let extra = feedback
                .unhelpful_reason
                .as_deref()
                .filter(|r| !r.is_empty())
                .map(|r| format!(" With Reason: {r}"))
                .unwrap_or_default();
            Notice::warning(format!("😢 Sorry that you didn't like our response.{extra}"))
        }
        FeedbackKind::Unknown => Notice::info("Don't know what to do with this feedback type."),
    }
}
