//! LoadCoordinator - drives one knowledge load to a single outcome
//!
//! ```text
//! Idle ──start()──► Loading ──ok──► finalize() ──► Loaded   (Ready minted)
//!                       └──────err──────────────► LoadFailed
//! ```
//!
//! Loaded and LoadFailed are terminal. A retry takes a fresh coordinator.

use engine::ReplyEngine;
use shared::{BatchId, BridgeError, KnowledgeSource, LoadPhase, Logger, Result};
use std::sync::Arc;

/// Proof that an engine finished loading and was finalized
///
/// Only [`LoadCoordinator::start`] can create one, so holding a `Ready`
/// is the only way to ask the engine for replies.
pub struct Ready<'e, E: ?Sized> {
    engine: &'e mut E,
    batch: BatchId,
}

impl<'e, E: ReplyEngine + ?Sized> Ready<'e, E> {
    /// Batch reported by the load that produced this handle
    pub fn batch(&self) -> BatchId {
        self.batch
    }

    /// Ask the engine for a reply
    pub fn reply(&mut self, user: &str, text: &str) -> String {
        self.engine.get_reply(user, text)
    }
}

impl<E: ?Sized> std::fmt::Debug for Ready<'_, E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Ready")
            .field("batch", &self.batch)
            .finish_non_exhaustive()
    }
}

/// Drives a single load attempt
pub struct LoadCoordinator {
    phase: LoadPhase,
    logger: Arc<dyn Logger>,
}

impl LoadCoordinator {
    pub fn new(logger: Arc<dyn Logger>) -> Self {
        Self {
            phase: LoadPhase::Idle,
            logger,
        }
    }

    pub fn phase(&self) -> LoadPhase {
        self.phase
    }

    /// Load `sources` into `engine`, finalize on success
    ///
    /// Resolves exactly once. On failure the error is reported to the
    /// logger and no [`Ready`] exists.
    pub async fn start<'e, E>(
        &mut self,
        engine: &'e mut E,
        sources: &KnowledgeSource,
    ) -> Result<Ready<'e, E>>
    where
        E: ReplyEngine + ?Sized,
    {
        if self.phase != LoadPhase::Idle {
            return Err(BridgeError::CoordinatorSpent(self.phase));
        }

        self.phase = LoadPhase::Loading;
        tracing::debug!(?sources, "Loading knowledge");

        match engine.load_knowledge(sources).await {
            Ok(batch) => {
                self.logger.info(
                    &format!("Knowledge batch #{} has finished loading", batch),
                    &[("batch", batch.to_string().as_str())],
                );
                // Replies must be sorted before the first lookup
                engine.finalize();
                self.phase = LoadPhase::Loaded;
                Ok(Ready { engine, batch })
            }
            Err(err) => {
                self.phase = LoadPhase::LoadFailed;
                self.logger.error(
                    &format!("Error when loading knowledge: {}", err),
                    &[("detail", err.detail().as_str())],
                );
                Err(err.into())
            }
        }
    }
}
