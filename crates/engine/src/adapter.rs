//! ReplyEngine - the port the bridge drives
//!
//! The bridge never looks inside an engine. It loads knowledge, asks for
//! the reply set to be finalized once, and then asks for replies.
//!
//! ```text
//! Bridge               │  Engine
//! ─────────────────────┼──────────────────────────
//! load_knowledge()  ───┼─► parse + register (async)
//! finalize()        ───┼─► sort reply set
//! get_reply()       ───┼─► match, may update per-user memory
//! ```

use async_trait::async_trait;
use shared::{BatchId, KnowledgeSource, LoadError};

/// Outcome of a single knowledge load
pub type LoadResult = std::result::Result<BatchId, LoadError>;

/// Reply engine adapter
///
/// Implementations must load a multi-file batch atomically: either every
/// file is registered and one [`BatchId`] comes back, or nothing changes and
/// one [`LoadError`] comes back. An empty source is a valid load.
///
/// Calling [`get_reply`](ReplyEngine::get_reply) before
/// [`finalize`](ReplyEngine::finalize) is unsupported. Engines need not
/// guard against it; the bridge sequences the calls.
#[async_trait]
pub trait ReplyEngine: Send {
    /// Parse and register every file named by `sources`
    async fn load_knowledge(&mut self, sources: &KnowledgeSource) -> LoadResult;

    /// Order the reply set; required once after each successful load
    fn finalize(&mut self);

    /// Reply to `text` spoken by `user`
    ///
    /// Never suspends. Faults inside the engine are not caught by the bridge.
    fn get_reply(&mut self, user: &str, text: &str) -> String;
}

#[async_trait]
impl<E: ReplyEngine + ?Sized> ReplyEngine for Box<E> {
    async fn load_knowledge(&mut self, sources: &KnowledgeSource) -> LoadResult {
        (**self).load_knowledge(sources).await
    }

    fn finalize(&mut self) {
        (**self).finalize()
    }

    fn get_reply(&mut self, user: &str, text: &str) -> String {
        (**self).get_reply(user, text)
    }
}
