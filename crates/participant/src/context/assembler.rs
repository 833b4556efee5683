//! Prompt assembly — splices resolved references into the user's prompt.
//!
//! # Algorithm
//!
//! 1. Trim the raw prompt once.
//! 2. Resolve references in the order supplied.
//! 3. Unresolvable → skip. Inline reference → replace **every** occurrence of
//!    `#anchor`. Append-mode reference → add `" " + text` to the end.
//! 4. Record each resolved location once, in first-seen order.
//!
//! A hard resolution failure aborts the whole assembly; nothing partial is
//! returned.

use parrot_core::error::ResolveError;
use parrot_core::reference::{Location, Reference};
use tracing::{debug, warn};

use crate::context::resolver::{ReferenceResolver, Resolution};

/// The assembled prompt and the locations it drew from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptAssembly {
    /// The prompt with every resolvable reference spliced in.
    pub prompt: String,
    /// Deduplicated citations, in first-seen order.
    pub citations: Vec<Location>,
}

impl PromptAssembly {
    /// Nothing to relay: the caller should show a hint instead of generating.
    pub fn is_empty(&self) -> bool {
        self.prompt.is_empty()
    }
}

/// Drives the resolver over a reference list.
#[derive(Clone)]
pub struct PromptAssembler {
    resolver: ReferenceResolver,
}

impl PromptAssembler {
    pub fn new(resolver: ReferenceResolver) -> Self {
        Self { resolver }
    }

    pub async fn assemble(
        &self,
        raw_prompt: &str,
        references: &[Reference],
    ) -> Result<PromptAssembly, ResolveError> {
        let mut prompt = raw_prompt.trim().to_string();
        let mut citations: Vec<Location> = Vec::new();

        for reference in references {
            let resolved = match self.resolver.resolve(reference).await? {
                Resolution::Resolved(resolved) => resolved,
                Resolution::Unresolvable(reason) => {
                    debug!(
                        kind = reference.kind(),
                        anchor = reference.anchor_name(),
                        %reason,
                        "Skipping reference"
                    );
                    continue;
                }
            };

            if reference.is_append() {
                prompt.push(' ');
                prompt.push_str(&resolved.text);
            } else {
                let placeholder = reference.placeholder();
                if !prompt.contains(&placeholder) {
                    warn!(placeholder = %placeholder, "Reference placeholder not found in prompt");
                }
                prompt = prompt.replace(&placeholder, &resolved.text);
            }

            if !citations.contains(&resolved.location) {
                citations.push(resolved.location);
            }
        }

        Ok(PromptAssembly { prompt, citations })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::{MockHost, range};
    use parrot_core::reference::Uri;

    fn assembler(host: MockHost) -> PromptAssembler {
        PromptAssembler::new(ReferenceResolver::new(host.into_context()))
    }

    fn doc_ref(anchor: &str, uri: &str, append: bool) -> Reference {
        Reference::DocumentRange {
            anchor_name: anchor.into(),
            document: Uri::new(uri),
            range: range(),
            append,
        }
    }

    fn selection_host() -> MockHost {
        MockHost::new().with_document("file:///a.rs", "selected text")
    }

    #[tokio::test]
    async fn trims_prompt_without_references() {
        let result = assembler(MockHost::new())
            .assemble("  Hello, world!  ", &[])
            .await
            .unwrap();
        assert_eq!(result.prompt, "Hello, world!");
        assert!(result.citations.is_empty());
    }

    #[tokio::test]
    async fn inlines_document_reference() {
        let result = assembler(selection_host())
            .assemble(
                "Check this out: #selection",
                &[doc_ref("selection", "file:///a.rs", false)],
            )
            .await
            .unwrap();
        assert_eq!(result.prompt, "Check this out: selected text");
        assert_eq!(
            result.citations,
            vec![Location::range(Uri::new("file:///a.rs"), range())]
        );
    }

    #[tokio::test]
    async fn closed_document_leaves_prompt_untouched() {
        let result = assembler(MockHost::new())
            .assemble(
                "Check this out: #selection",
                &[doc_ref("selection", "file:///a.rs", false)],
            )
            .await
            .unwrap();
        assert_eq!(result.prompt, "Check this out: #selection");
        assert!(result.citations.is_empty());
    }

    #[tokio::test]
    async fn repeated_placeholder_is_replaced_everywhere_and_cited_once() {
        let result = assembler(selection_host())
            .assemble(
                "First: #selection, Second: #selection",
                &[doc_ref("selection", "file:///a.rs", false)],
            )
            .await
            .unwrap();
        assert_eq!(result.prompt, "First: selected text, Second: selected text");
        assert_eq!(result.citations.len(), 1);
    }

    #[tokio::test]
    async fn append_mode_adds_one_space() {
        let result = assembler(selection_host())
            .assemble(
                "Check this out:",
                &[doc_ref("implicit", "file:///a.rs", true)],
            )
            .await
            .unwrap();
        assert_eq!(result.prompt, "Check this out: selected text");
        assert_eq!(result.citations.len(), 1);
    }

    #[tokio::test]
    async fn multiple_appends_keep_supplied_order() {
        let host = MockHost::new()
            .with_document("file:///a.rs", "alpha")
            .with_document("file:///b.rs", "beta");
        let result = assembler(host)
            .assemble(
                "Look:",
                &[
                    doc_ref("one", "file:///a.rs", true),
                    doc_ref("two", "file:///b.rs", true),
                ],
            )
            .await
            .unwrap();
        assert_eq!(result.prompt, "Look: alpha beta");
        assert_eq!(result.citations.len(), 2);
        assert_eq!(result.citations[0].resource(), &Uri::new("file:///a.rs"));
        assert_eq!(result.citations[1].resource(), &Uri::new("file:///b.rs"));
    }

    #[tokio::test]
    async fn append_never_rewrites_existing_text() {
        let host = MockHost::new().with_document("file:///a.rs", "#keep");
        let result = assembler(host)
            .assemble(
                "Keep #keep as is",
                &[doc_ref("keep", "file:///a.rs", true)],
            )
            .await
            .unwrap();
        assert_eq!(result.prompt, "Keep #keep as is #keep");
    }

    #[tokio::test]
    async fn unknown_placeholder_left_verbatim() {
        let result = assembler(selection_host())
            .assemble(
                "#selection and #other",
                &[doc_ref("selection", "file:///a.rs", false)],
            )
            .await
            .unwrap();
        assert_eq!(result.prompt, "selected text and #other");
    }

    #[tokio::test]
    async fn unsupported_reference_is_ignored() {
        let result = assembler(selection_host())
            .assemble(
                "Check this out: #selection",
                &[Reference::Unsupported {
                    kind: "unsupported.reference".into(),
                    anchor_name: "selection".into(),
                }],
            )
            .await
            .unwrap();
        assert_eq!(result.prompt, "Check this out: #selection");
        assert!(result.citations.is_empty());
    }

    #[tokio::test]
    async fn two_references_to_same_location_cited_once() {
        let result = assembler(selection_host())
            .assemble(
                "#a then #b",
                &[
                    doc_ref("a", "file:///a.rs", false),
                    doc_ref("b", "file:///a.rs", false),
                ],
            )
            .await
            .unwrap();
        assert_eq!(result.prompt, "selected text then selected text");
        assert_eq!(result.citations.len(), 1);
    }

    #[tokio::test]
    async fn file_reference_inlines_content() {
        let host = MockHost::new().with_file("file:///docs/notes.md", "be kind");
        let result = assembler(host)
            .assemble(
                "Summarize #file:notes.md please",
                &[Reference::file(Uri::new("file:///docs/notes.md"))],
            )
            .await
            .unwrap();
        assert_eq!(result.prompt, "Summarize be kind please");
        assert_eq!(
            result.citations,
            vec![Location::uri(Uri::new("file:///docs/notes.md"))]
        );
    }

    #[tokio::test]
    async fn file_failure_aborts_everything() {
        let host = selection_host();
        let result = assembler(host)
            .assemble(
                "#selection and #file:gone.md",
                &[
                    doc_ref("selection", "file:///a.rs", false),
                    Reference::file(Uri::new("file:///gone.md")),
                ],
            )
            .await;
        assert!(matches!(result, Err(ResolveError::FileRead { .. })));
    }

    #[tokio::test]
    async fn empty_prompt_is_flagged() {
        let result = assembler(MockHost::new())
            .assemble("   ", &[doc_ref("implicit", "file:///a.rs", true)])
            .await
            .unwrap();
        assert!(result.is_empty());

        let non_empty = assembler(selection_host())
            .assemble("", &[doc_ref("implicit", "file:///a.rs", true)])
            .await
            .unwrap();
        assert!(!non_empty.is_empty());
    }
}
