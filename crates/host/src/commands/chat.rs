//! rivebridge chat command - interactive REPL acting as the UI

use super::args::BridgeArgs;
use bridge::{BoundaryLifecycle, ChannelMount, UiPort};
use clap::Args;
use engine::TriggerTableEngine;
use shared::{CorrelationToken, Request, TracingLogger};
use std::io::Write;
use std::sync::Arc;
use tokio::io::AsyncBufReadExt;

#[derive(Debug, Args)]
pub struct ChatCommand {
    #[command(flatten)]
    pub bridge: BridgeArgs,

    /// Talk as this user (defaults to the configured default user)
    #[arg(short, long)]
    pub user: Option<String>,
}

impl ChatCommand {
    pub async fn run(&self) -> anyhow::Result<()> {
        let config = self.bridge.resolve()?;
        let user = self.user.clone().unwrap_or_else(|| config.default_user.clone());
        let (mount, handle) = ChannelMount::new("chat");

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

        let mut session = ChatSession::new(user);
        let (_summary, result) = tokio::join!(attached.serve(), session.run(ui));
        result
    }
}

/// Interactive chat state
pub struct ChatSession {
    user: String,
    next_token: u64,
}

impl ChatSession {
    pub fn new(user: impl Into<String>) -> Self {
        Self {
            user: user.into(),
            next_token: 1,
        }
    }

    /// Run the REPL until /quit or EOF; dropping `ui` stops the bridge
    pub async fn run(&mut self, mut ui: UiPort) -> anyhow::Result<()> {
        println!("rivebridge chat");
        println!("Type /help for commands, /quit to exit");
        println!();

        let mut lines = tokio::io::BufReader::new(tokio::io::stdin()).lines();

        loop {
            print!("[{}] > ", self.user);
            std::io::stdout().flush()?;

            let Some(input) = lines.next_line().await? else {
                break;
            };
            let input = input.trim();

            if input.is_empty() {
                continue;
            }

            if input.starts_with('/') {
                match self.handle_command(input) {
                    Ok(true) => break,
                    Ok(false) => continue,
                    Err(e) => {
                        println!("Error: {}", e);
                        continue;
                    }
                }
            }

            ui.send(self.request(input)).await?;
            match ui.recv().await {
                Some(response) => println!("bot> {}", response.reply),
                None => break,
            }
        }

        Ok(())
    }

    /// Build the next request, numbering tokens from 1
    pub fn request(&mut self, text: &str) -> Request {
        let token = CorrelationToken::new(self.next_token);
        self.next_token += 1;
        Request::new(token, self.user.clone(), text)
    }

    /// Returns `Ok(true)` when the session should end
    pub fn handle_command(&mut self, input: &str) -> anyhow::Result<bool> {
        let parts: Vec<&str> = input.split_whitespace().collect();
        let cmd = parts.first().copied().unwrap_or("");

        match cmd {
            "/quit" | "/exit" | "/q" => {
                println!("Goodbye!");
                return Ok(true);
            }
            "/help" | "/h" => {
                println!("Commands:");
                println!("  /user [name] - Show or switch the user id");
                println!("  /quit        - Exit");
            }
            "/user" => {
                if parts.len() > 1 {
                    self.user = parts[1].to_string();
                    println!("User set to: {}", self.user);
                } else {
                    println!("Current user: {}", self.user);
                }
            }
            _ => anyhow::bail!("Unknown command: {}", cmd),
        }

        Ok(false)
    }
}
