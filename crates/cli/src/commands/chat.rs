//! `parrot chat` — parrot a prompt with optional references and style.
//!
//! References are given as flags and named in the prompt with `#name`:
//!
//! ```text
//! parrot chat "explain #sel" --ref sel=src/main.rs@1:1-3:20 --command likeapirate
//! ```
//!
//! Ranges are one-based `LINE:COL-LINE:COL`; without a range the whole file
//! is used.

use clap::Args;
use parrot_config::AppConfig;
use parrot_core::host::{Document, HostContext};
use parrot_core::provider::ModelCatalog;
use parrot_core::reference::{Position, Range, Reference, Uri};
use parrot_core::request::ChatRequest;
use parrot_participant::{ChatHandler, ChatOutcome};
use parrot_workspace::{FixedSelection, FsFileReader, OpenDocuments, TextDocument};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::commands::followups;
use crate::sink::StdoutSink;

#[derive(Args, Debug)]
pub struct ChatArgs {
    /// The prompt; `#name` marks where a reference's text goes
    prompt: Vec<String>,

    /// Style command, e.g. likeyoda, likeapirate, listmodels
    #[arg(short, long)]
    command: Option<String>,

    /// Model family to use for style commands
    #[arg(short, long)]
    model: Option<String>,

    /// Inline a file at `#file:<name>`
    #[arg(long = "file", value_name = "PATH")]
    files: Vec<PathBuf>,

    /// Inline (part of) a document at `#NAME`
    #[arg(long = "ref", value_name = "NAME=PATH[@RANGE]", value_parser = parse_ref_spec)]
    refs: Vec<RefSpec>,

    /// Append (part of) a document to the end of the prompt
    #[arg(long = "attach", value_name = "PATH[@RANGE]", value_parser = parse_doc_spec)]
    attachments: Vec<DocSpec>,

    /// Treat this range as the active editor selection, available as `#selection`
    #[arg(long, value_name = "PATH@RANGE", value_parser = parse_doc_spec)]
    selection: Option<DocSpec>,
}

/// A document path with an optional range.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocSpec {
    pub path: PathBuf,
    pub range: Option<Range>,
}

/// A named document reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RefSpec {
    pub name: String,
    pub doc: DocSpec,
}

pub async fn run(args: ChatArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load().map_err(|e| format!("Failed to load config: {e}"))?;
    let catalog: Arc<dyn ModelCatalog> = Arc::new(parrot_providers::build_from_config(&config));

    let (host, references) = build_context(&args).await?;

    let mut request = ChatRequest::new(args.prompt.join(" ")).with_references(references);
    if let Some(command) = &args.command {
        request = request.with_command(command.clone());
    }
    if let Some(model) = &args.model {
        request = request.with_model_family(model.clone());
    }

    let handler = ChatHandler::from_config(host, catalog, &config);

    let cancel = CancellationToken::new();
    let on_ctrl_c = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            on_ctrl_c.cancel();
        }
    });

    let mut sink = StdoutSink::new();
    let result = handler.handle(&request, &mut sink, cancel).await;
    sink.finish();
    let outcome = result?;
    debug!(?outcome, "Chat finished");

    if !matches!(outcome, ChatOutcome::ListedModels { .. }) {
        followups::print(&config);
    }
    Ok(())
}

/// Open the referenced documents and build the request's references.
///
/// Order: selection, named refs, files, then attachments.
async fn build_context(args: &ChatArgs) -> std::io::Result<(HostContext, Vec<Reference>)> {
    let documents = Arc::new(OpenDocuments::new());
    let mut references = Vec::new();

    let editor = match &args.selection {
        Some(spec) => {
            let document = open(&documents, &spec.path).await?;
            let range = spec.range.unwrap_or_else(|| document.full_range());
            references.push(Reference::EditorSelection {
                anchor_name: "selection".into(),
                expected_document: Some(document_uri(&document)),
            });
            FixedSelection::new(document, range)
        }
        None => FixedSelection::none(),
    };

    for spec in &args.refs {
        let document = open(&documents, &spec.doc.path).await?;
        references.push(Reference::DocumentRange {
            anchor_name: spec.name.clone(),
            document: document_uri(&document),
            range: spec.doc.range.unwrap_or_else(|| document.full_range()),
            append: false,
        });
    }

    for path in &args.files {
        references.push(Reference::file(Uri::from_path(std::path::absolute(path)?)));
    }

    for spec in &args.attachments {
        let document = open(&documents, &spec.path).await?;
        let uri = document_uri(&document);
        references.push(Reference::DocumentRange {
            anchor_name: uri.file_name().to_string(),
            document: uri,
            range: spec.range.unwrap_or_else(|| document.full_range()),
            append: true,
        });
    }

    let host = HostContext::new(Arc::new(editor), documents, Arc::new(FsFileReader::new()));
    Ok((host, references))
}

async fn open(documents: &OpenDocuments, path: &Path) -> std::io::Result<Arc<TextDocument>> {
    let path = std::path::absolute(path)?;
    let document = TextDocument::open(&path)
        .await
        .map_err(|e| std::io::Error::new(e.kind(), format!("{}: {e}", path.display())))?;
    Ok(documents.open(document).await)
}

fn document_uri(document: &TextDocument) -> Uri {
    document.uri().clone()
}

/// Parse `NAME=PATH[@RANGE]`.
pub fn parse_ref_spec(value: &str) -> Result<RefSpec, String> {
    let (name, doc) = value
        .split_once('=')
        .ok_or_else(|| format!("expected NAME=PATH[@RANGE], got '{value}'"))?;
    let name = name.trim_start_matches('#');
    if name.is_empty() {
        return Err(format!("reference name is empty in '{value}'"));
    }
    Ok(RefSpec {
        name: name.to_string(),
        doc: parse_doc_spec(doc)?,
    })
}

/// Parse `PATH[@RANGE]`. An `@` whose suffix isn't a range is part of the path.
pub fn parse_doc_spec(value: &str) -> Result<DocSpec, String> {
    if value.is_empty() {
        return Err("path is empty".into());
    }
    if let Some((path, range)) = value.rsplit_once('@') {
        if let Ok(range) = parse_range(range) {
            return Ok(DocSpec {
                path: PathBuf::from(path),
                range: Some(range),
            });
        }
    }
    Ok(DocSpec {
        path: PathBuf::from(value),
        range: None,
    })
}

/// Parse a one-based `LINE:COL-LINE:COL` into a zero-based range.
pub fn parse_range(value: &str) -> Result<Range, String> {
    let (start, end) = value
        .split_once('-')
        .ok_or_else(|| format!("expected LINE:COL-LINE:COL, got '{value}'"))?;
    Ok(Range::new(parse_position(start)?, parse_position(end)?))
}

fn parse_position(value: &str) -> Result<Position, String> {
    let (line, character) = value
        .split_once(':')
        .ok_or_else(|| format!("expected LINE:COL, got '{value}'"))?;
    let parse = |part: &str| -> Result<u32, String> {
        match part.trim().parse::<u32>() {
            Ok(n) if n >= 1 => Ok(n - 1),
            _ => Err(format!("'{part}' is not a positive number")),
        }
    };
    Ok(Position::new(parse(line)?, parse(character)?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn range_is_converted_to_zero_based() {
        let range = parse_range("1:1-3:6").unwrap();
        assert_eq!(range.start, Position::new(0, 0));
        assert_eq!(range.end, Position::new(2, 5));
    }

    #[test]
    fn range_rejects_zero_and_garbage() {
        assert!(parse_range("0:1-1:1").is_err());
        assert!(parse_range("1:1").is_err());
        assert!(parse_range("a:b-c:d").is_err());
    }

    #[test]
    fn doc_spec_with_and_without_range() {
        let spec = parse_doc_spec("src/main.rs@2:1-2:10").unwrap();
        assert_eq!(spec.path, PathBuf::from("src/main.rs"));
        assert!(spec.range.is_some());

        let spec = parse_doc_spec("notes@home.md").unwrap();
        assert_eq!(spec.path, PathBuf::from("notes@home.md"));
        assert!(spec.range.is_none());
    }

    #[test]
    fn ref_spec_strips_marker() {
        let spec = parse_ref_spec("#sel=a.rs").unwrap();
        assert_eq!(spec.name, "sel");
        assert_eq!(spec.doc.path, PathBuf::from("a.rs"));
        assert!(parse_ref_spec("a.rs").is_err());
        assert!(parse_ref_spec("=a.rs").is_err());
    }

    #[tokio::test]
    async fn context_collects_references_in_order() {
        let dir = tempfile::tempdir().unwrap();
        let main = dir.path().join("main.rs");
        std::fs::write(&main, "fn main() {}\n").unwrap();

        let args = ChatArgs {
            prompt: vec!["look".into()],
            command: None,
            model: None,
            files: vec![main.clone()],
            refs: vec![RefSpec {
                name: "code".into(),
                doc: DocSpec {
                    path: main.clone(),
                    range: None,
                },
            }],
            attachments: vec![DocSpec {
                path: main.clone(),
                range: Some(parse_range("1:1-1:3").unwrap()),
            }],
            selection: Some(DocSpec {
                path: main,
                range: None,
            }),
        };

        let (_, references) = build_context(&args).await.unwrap();
        let kinds: Vec<&str> = references.iter().map(|r| r.kind()).collect();
        assert_eq!(
            kinds,
            vec![
                Reference::SELECTION_KIND,
                Reference::DOCUMENT_KIND,
                Reference::FILE_KIND,
                Reference::DOCUMENT_KIND
            ]
        );
        assert!(references[3].is_append());
        assert_eq!(references[1].anchor_name(), "code");
    }

    #[tokio::test]
    async fn missing_document_is_reported() {
        let args = ChatArgs {
            prompt: vec![],
            command: None,
            model: None,
            files: vec![],
            refs: vec![],
            attachments: vec![DocSpec {
                path: PathBuf::from("/tmp/parrot_cli_missing_document.rs"),
                range: None,
            }],
            selection: None,
        };
        assert!(build_context(&args).await.is_err());
    }
}
