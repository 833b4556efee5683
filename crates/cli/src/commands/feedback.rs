//! `parrot feedback` — rate a response.

use clap::ValueEnum;
use parrot_participant::{Feedback, FeedbackKind, NoticeLevel, handle_feedback};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FeedbackArg {
    Helpful,
    Unhelpful,
}

impl From<FeedbackArg> for FeedbackKind {
    fn from(arg: FeedbackArg) -> Self {
        match arg {
            FeedbackArg::Helpful => FeedbackKind::Helpful,
            FeedbackArg::Unhelpful => FeedbackKind::Unhelpful,
        }
    }
}

pub fn run(kind: FeedbackArg, reason: Option<String>) {
    let notice = handle_feedback(&Feedback {
        kind: kind.into(),
        unhelpful_reason: reason,
    });
    match notice.level {
        NoticeLevel::Info => println!("{}", notice.message),
        NoticeLevel::Warning => eprintln!("{}", notice.message),
    }
}
