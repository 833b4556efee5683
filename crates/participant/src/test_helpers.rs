//! Shared test doubles for participant tests.

use async_trait::async_trait;
use parrot_core::error::ProviderError;
use parrot_core::host::{ActiveEditor, Document, DocumentRegistry, FileReader, HostContext};
use parrot_core::provider::{
    ChatModel, ChunkReceiver, ModelCatalog, ModelInfo, ModelRequest, ModelSelector, StreamChunk,
};
use parrot_core::reference::{Location, Position, Range, Uri};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

/// A document whose text is returned verbatim for any range.
pub struct StubDocument {
    pub uri: Uri,
    pub text: String,
}

impl Document for StubDocument {
    fn uri(&self) -> &Uri {
        &self.uri
    }

    fn get_text(&self, _range: &Range) -> String {
        self.text.clone()
    }
}

/// Host collaborators backed by plain maps, with call counting.
#[derive(Default)]
pub struct MockHost {
    pub selection: Option<(String, Location)>,
    pub documents: HashMap<Uri, String>,
    pub files: HashMap<Uri, Vec<u8>>,
    pub file_reads: Mutex<usize>,
}

impl MockHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_selection(mut self, text: &str, uri: &str) -> Self {
        self.selection = Some((text.to_string(), Location::range(Uri::new(uri), range())));
        self
    }

    pub fn with_document(mut self, uri: &str, text: &str) -> Self {
        self.documents.insert(Uri::new(uri), text.to_string());
        self
    }

    pub fn with_file(mut self, uri: &str, content: &str) -> Self {
        self.files.insert(Uri::new(uri), content.as_bytes().to_vec());
        self
    }

    pub fn into_context(self) -> HostContext {
        self.into_shared().1
    }

    /// The context plus a handle for inspecting call counts afterwards.
    pub fn into_shared(self) -> (Arc<Self>, HostContext) {
        let host = Arc::new(self);
        let context = HostContext::new(host.clone(), host.clone(), host.clone());
        (host, context)
    }

    pub fn file_read_count(&self) -> usize {
        *self.file_reads.lock().unwrap()
    }
}

#[async_trait]
impl ActiveEditor for MockHost {
    async fn selection_text(&self) -> Option<String> {
        self.selection.as_ref().map(|(text, _)| text.clone())
    }

    async fn selection_location(&self) -> Option<Location> {
        self.selection.as_ref().map(|(_, location)| location.clone())
    }
}

#[async_trait]
impl DocumentRegistry for MockHost {
    async fn find_open_document(&self, uri: &Uri) -> Option<Arc<dyn Document>> {
        self.documents.get(uri).map(|text| {
            Arc::new(StubDocument {
                uri: uri.clone(),
                text: text.clone(),
            }) as Arc<dyn Document>
        })
    }
}

#[async_trait]
impl FileReader for MockHost {
    async fn read_file(&self, uri: &Uri) -> std::io::Result<Vec<u8>> {
        *self.file_reads.lock().unwrap() += 1;
        self.files.get(uri).cloned().ok_or_else(|| {
            std::io::Error::new(std::io::ErrorKind::NotFound, format!("{uri} not found"))
        })
    }
}

/// The range every mock reference uses.
pub fn range() -> Range {
    Range::new(Position::new(0, 0), Position::new(0, 13))
}

/// How a scripted model behaves when asked.
#[derive(Clone)]
pub enum Script {
    /// Stream these chunks, then finish.
    Chunks(Vec<&'static str>),
    /// Fail before streaming.
    Fail(ProviderError),
    /// Stream these chunks, then fail.
    ChunksThenFail(Vec<&'static str>, ProviderError),
    /// Stream these chunks, then keep the stream open without finishing.
    ChunksThenHang(Vec<&'static str>),
}

/// A chat model that replays a script and records every request.
pub struct ScriptedModel {
    info: ModelInfo,
    script: Script,
    pub requests: Mutex<Vec<ModelRequest>>,
    open_streams: Mutex<Vec<mpsc::Sender<Result<StreamChunk, ProviderError>>>>,
}

impl ScriptedModel {
    pub fn new(family: &str, script: Script) -> Self {
        Self {
            info: ModelInfo {
                id: family.into(),
                vendor: "copilot".into(),
                family: family.into(),
                version: "1.0".into(),
            },
            script,
            requests: Mutex::new(Vec::new()),
            open_streams: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

#[async_trait]
impl ChatModel for ScriptedModel {
    fn info(&self) -> &ModelInfo {
        &self.info
    }

    async fn send_request(
        &self,
        request: ModelRequest,
        _cancel: CancellationToken,
    ) -> Result<ChunkReceiver, ProviderError> {
        self.requests.lock().unwrap().push(request);

        let (chunks, tail) = match self.script.clone() {
            Script::Fail(e) => return Err(e),
            Script::Chunks(chunks) => (chunks, Some(Ok(StreamChunk::done()))),
            Script::ChunksThenFail(chunks, e) => (chunks, Some(Err(e))),
            Script::ChunksThenHang(chunks) => (chunks, None),
        };

        let (tx, rx) = mpsc::channel(chunks.len() + 2);
        for chunk in chunks {
            let _ = tx.send(Ok(StreamChunk::text(chunk))).await;
        }
        match tail {
            Some(last) => {
                let _ = tx.send(last).await;
            }
            None => self.open_streams.lock().unwrap().push(tx),
        }
        Ok(rx)
    }
}

/// A catalog over a fixed list of models.
pub struct StaticCatalog {
    pub models: Vec<Arc<dyn ChatModel>>,
}

impl StaticCatalog {
    pub fn new(models: Vec<Arc<dyn ChatModel>>) -> Self {
        Self { models }
    }
}

#[async_trait]
impl ModelCatalog for StaticCatalog {
    async fn select_models(
        &self,
        selector: &ModelSelector,
    ) -> Result<Vec<Arc<dyn ChatModel>>, ProviderError> {
        Ok(self
            .models
            .iter()
            .filter(|m| selector.matches(m.info()))
            .cloned()
            .collect())
    }
}
