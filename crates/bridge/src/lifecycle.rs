//! BoundaryLifecycle - load first, attach the UI only once ready
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────┐
//! │ BoundaryLifecycle (owns engine + mount)                    │
//! │                                                            │
//! │  start() ──► LoadCoordinator ──err──► logger, stay inert   │
//! │                    │ ok (finalized)                        │
//! │                    ▼                                       │
//! │            port::channel()                                 │
//! │              │          │                                  │
//! │       mount.embed(ui)   MessageRouter(bridge end)          │
//! └────────────────────────────────────────────────────────────┘
//! ```

use crate::coordinator::LoadCoordinator;
use crate::mount::Mount;
use crate::port;
use crate::router::{MessageRouter, RouterSummary};
use engine::ReplyEngine;
use shared::{BatchId, BridgeConfig, BridgeError, LoadPhase, Logger, Result};
use std::sync::Arc;

/// Owns the engine and the mount point and sequences their use
pub struct BoundaryLifecycle<E, M> {
    engine: E,
    mount: M,
    config: BridgeConfig,
    logger: Arc<dyn Logger>,
    phase: LoadPhase,
    attempts: u32,
}

impl<E, M> BoundaryLifecycle<E, M>
where
    E: ReplyEngine,
    M: Mount,
{
    pub fn new(engine: E, mount: M, config: BridgeConfig, logger: Arc<dyn Logger>) -> Self {
        Self {
            engine,
            mount,
            config,
            logger,
            phase: LoadPhase::Idle,
            attempts: 0,
        }
    }

    /// Phase of the most recent load attempt
    pub fn phase(&self) -> LoadPhase {
        self.phase
    }

    /// Number of load attempts made so far
    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    pub fn config(&self) -> &BridgeConfig {
        &self.config
    }

    /// Load the configured knowledge and, on success, attach the UI
    ///
    /// On failure the mount is left untouched and the error is returned;
    /// calling `start` again makes a fresh attempt. Once a load has
    /// succeeded the UI is attached for good and further calls fail with
    /// `CoordinatorSpent`.
    pub async fn start(&mut self) -> Result<Attached<'_, E>> {
        if self.phase == LoadPhase::Loaded {
            return Err(BridgeError::CoordinatorSpent(self.phase));
        }
        self.config.validate()?;

        let Self {
            engine,
            mount,
            config,
            logger,
            phase,
            attempts,
        } = self;

        *attempts += 1;
        let mut coordinator = LoadCoordinator::new(logger.clone());
        let outcome = coordinator.start(engine, &config.knowledge).await;
        *phase = coordinator.phase();
        let ready = outcome?;

        let (bridge_end, ui_end) = port::channel(config.buffer_size);
        tracing::info!(mount = %mount.name(), batch = %ready.batch(), "Attaching UI");
        mount.embed(ui_end);

        Ok(Attached {
            router: MessageRouter::new(ready, bridge_end),
        })
    }

    /// `start` followed by serving until the UI disconnects
    pub async fn run(&mut self) -> Result<RouterSummary> {
        let attached = self.start().await?;
        Ok(attached.serve().await)
    }
}

/// A boundary whose UI is embedded and whose router is wired
pub struct Attached<'e, E: ?Sized> {
    router: MessageRouter<'e, E>,
}

impl<'e, E: ReplyEngine + ?Sized> Attached<'e, E> {
    pub fn batch(&self) -> BatchId {
        self.router.batch()
    }

    /// Route requests until the UI closes either direction
    pub async fn serve(self) -> RouterSummary {
        self.router.run().await
    }
}
