//! Test doubles shared by the bridge's unit tests

use async_trait::async_trait;
use engine::{LoadResult, ReplyEngine};
use shared::{BatchId, Fields, KnowledgeSource, LoadError, Logger};
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use tokio::sync::oneshot;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Load,
    Finalize,
    Reply(String, String),
}

/// Shared view of the calls a [`SpyEngine`] received
#[derive(Debug, Clone, Default)]
pub struct CallLog(Arc<Mutex<Vec<Call>>>);

impl CallLog {
    fn push(&self, call: Call) {
        self.0.lock().unwrap().push(call);
    }

    pub fn snapshot(&self) -> Vec<Call> {
        self.0.lock().unwrap().clone()
    }

    pub fn replies(&self) -> usize {
        self.snapshot()
            .iter()
            .filter(|c| matches!(c, Call::Reply(..)))
            .count()
    }
}

/// Engine that records every call and echoes the utterance back
pub struct SpyEngine {
    calls: CallLog,
    gate: Option<oneshot::Receiver<()>>,
    fail_path: Option<PathBuf>,
    loads: u64,
}

impl SpyEngine {
    pub fn new() -> Self {
        Self {
            calls: CallLog::default(),
            gate: None,
            fail_path: None,
            loads: 0,
        }
    }

    /// Loads report the file as unreadable
    pub fn failing(path: impl Into<PathBuf>) -> Self {
        Self {
            fail_path: Some(path.into()),
            ..Self::new()
        }
    }

    /// Loads stay suspended until the returned sender fires
    pub fn gated() -> (Self, oneshot::Sender<()>) {
        let (tx, rx) = oneshot::channel();
        let engine = Self {
            gate: Some(rx),
            ..Self::new()
        };
        (engine, tx)
    }

    pub fn calls(&self) -> CallLog {
        self.calls.clone()
    }
}

#[async_trait]
impl ReplyEngine for SpyEngine {
    async fn load_knowledge(&mut self, _sources: &KnowledgeSource) -> LoadResult {
        self.calls.push(Call::Load);
        if let Some(gate) = self.gate.take() {
            let _ = gate.await;
        }

        let batch = BatchId(self.loads);
        self.loads += 1;

        match &self.fail_path {
            Some(path) => Err(LoadError::Unreadable {
                path: path.clone(),
                source: std::io::Error::new(std::io::ErrorKind::NotFound, "No such file or directory"),
            }),
            None => Ok(batch),
        }
    }

    fn finalize(&mut self) {
        self.calls.push(Call::Finalize);
    }

    fn get_reply(&mut self, user: &str, text: &str) -> String {
        self.calls.push(Call::Reply(user.to_string(), text.to_string()));
        format!("echo: {}", text)
    }
}

/// Logger that keeps every message for inspection
#[derive(Debug, Default)]
pub struct RecordingLogger {
    entries: Mutex<Vec<(tracing::Level, String)>>,
}

impl RecordingLogger {
    pub fn shared() -> Arc<Self> {
        Arc::new(Self::default())
    }

    fn record(&self, level: tracing::Level, message: &str) {
        self.entries
            .lock()
            .unwrap()
            .push((level, message.to_string()));
    }

    fn at(&self, level: tracing::Level) -> Vec<String> {
        self.entries
            .lock()
            .unwrap()
            .iter()
            .filter(|(l, _)| *l == level)
            .map(|(_, m)| m.clone())
            .collect()
    }

    pub fn infos(&self) -> Vec<String> {
        self.at(tracing::Level::INFO)
    }

    pub fn errors(&self) -> Vec<String> {
        self.at(tracing::Level::ERROR)
    }
}

impl Logger for RecordingLogger {
    fn log(&self, level: tracing::Level, message: &str, _fields: Fields<'_>) {
        self.record(level, message);
    }
}
