//! rivebridge check command

use super::args::BridgeArgs;
use bridge::LoadCoordinator;
use clap::Args;
use engine::TriggerTableEngine;
use shared::TracingLogger;
use std::sync::Arc;

#[derive(Debug, Args)]
pub struct CheckCommand {
    #[command(flatten)]
    pub bridge: BridgeArgs,
}

impl CheckCommand {
    pub async fn run(&self) -> anyhow::Result<()> {
        let config = self.bridge.resolve()?;
        let mut engine = TriggerTableEngine::new();
        let mut coordinator = LoadCoordinator::new(Arc::new(TracingLogger));

        let ready = coordinator.start(&mut engine, &config.knowledge).await?;
        let batch = ready.batch();
        drop(ready);

        println!(
            "✓ Knowledge batch #{} loaded ({} triggers)",
            batch,
            engine.trigger_count()
        );
        Ok(())
    }
}
