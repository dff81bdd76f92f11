//! rivebridge serve command - JSON lines on stdin/stdout act as the UI

use super::args::BridgeArgs;
use crate::wire;
use bridge::{BoundaryLifecycle, ChannelMount, UiPort};
use clap::Args;
use engine::TriggerTableEngine;
use shared::TracingLogger;
use std::sync::Arc;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};

#[derive(Debug, Args)]
pub struct ServeCommand {
    #[command(flatten)]
    pub bridge: BridgeArgs,
}

/// Line counts from one pump session
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PumpStats {
    pub received: u64,
    pub rejected: u64,
    pub written: u64,
}

impl ServeCommand {
    pub async fn run(&self) -> anyhow::Result<()> {
        let config = self.bridge.resolve()?;
        let default_user = config.default_user.clone();
        let (mount, handle) = ChannelMount::new("stdio");

        let mut lifecycle = BoundaryLifecycle::new(
            TriggerTableEngine::new(),
            mount,
            config,
            Arc::new(TracingLogger),
        );
        let attached = lifecycle.start().await?;
        let ui = handle
            .attached()
            .await
            .ok_or_else(|| anyhow::anyhow!("bridge loaded but never attached the UI"))?;

        let stdin = tokio::io::BufReader::new(tokio::io::stdin());
        let stdout = tokio::io::stdout();
        let (summary, stats) = tokio::join!(
            attached.serve(),
            pump(ui, stdin, stdout, &default_user)
        );
        let stats = stats?;

        tracing::info!(
            routed = summary.routed,
            received = stats.received,
            rejected = stats.rejected,
            "Serve finished"
        );
        Ok(())
    }
}

/// Shuttle lines between a reader/writer pair and the UI port
///
/// Runs until `input` hits EOF and every pending response is written.
/// Lines that do not decode are logged and skipped. A failed write ends
/// the session with an error instead of stalling the router.
pub async fn pump<R, W>(
    ui: UiPort,
    input: R,
    mut output: W,
    default_user: &str,
) -> anyhow::Result<PumpStats>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let (sender, mut responses) = ui.into_split();

    let reader = async move {
        let mut lines = input.lines();
        let mut received = 0;
        let mut rejected = 0;

        while let Some(line) = lines.next_line().await? {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            match wire::decode_request(line, default_user) {
                Ok(request) => {
                    sender.send(request).await?;
                    received += 1;
                }
                Err(e) => {
                    tracing::warn!(error = %e, line, "Skipping undecodable request");
                    rejected += 1;
                }
            }
        }

        anyhow::Ok((received, rejected))
    };

    // Owns the receiver so a failed write closes the response channel
    let writer = async move {
        let mut written = 0;
        while let Some(response) = responses.recv().await {
            let mut line = wire::encode_response(&response)?;
            line.push('\n');
            output.write_all(line.as_bytes()).await?;
            output.flush().await?;
            written += 1;
        }
        anyhow::Ok(written)
    };

    let (read, written) = tokio::join!(reader, writer);
    let (received, rejected) = read?;

    Ok(PumpStats {
        received,
        rejected,
        written: written?,
    })
}
