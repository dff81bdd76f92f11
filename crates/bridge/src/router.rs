//! MessageRouter - relays UI requests to a ready engine

use crate::coordinator::Ready;
use crate::port::BridgePort;
use engine::ReplyEngine;
use shared::{BatchId, Request, Response};

/// Why a router stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouterExit {
    /// Every request sender was dropped
    RequestsClosed,
    /// The UI stopped listening for responses
    ResponsesClosed,
}

/// Summary returned when a router stops
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RouterSummary {
    pub batch: BatchId,
    pub routed: u64,
    pub exit: RouterExit,
}

/// Routes each request to the engine and answers with the same token
///
/// Requests are handled one at a time in arrival order; `get_reply` never
/// suspends, so responses leave in the order requests came in.
pub struct MessageRouter<'e, E: ?Sized> {
    ready: Ready<'e, E>,
    port: BridgePort,
    routed: u64,
}

impl<'e, E: ReplyEngine + ?Sized> MessageRouter<'e, E> {
    pub fn new(ready: Ready<'e, E>, port: BridgePort) -> Self {
        Self {
            ready,
            port,
            routed: 0,
        }
    }

    pub fn routed(&self) -> u64 {
        self.routed
    }

    pub fn batch(&self) -> BatchId {
        self.ready.batch()
    }

    /// Answer a single request
    pub fn handle(&mut self, request: Request) -> Response {
        tracing::debug!(token = %request.token, user = %request.user, text = %request.text, "Asking the engine");
        let reply = self.ready.reply(&request.user, &request.text);
        tracing::debug!(token = %request.token, reply = %reply, "Engine replied");

        self.routed += 1;
        Response::answering(request, reply)
    }

    /// Serve until either side of the port closes
    pub async fn run(mut self) -> RouterSummary {
        let exit = loop {
            let Some(request) = self.port.recv().await else {
                break RouterExit::RequestsClosed;
            };

            let response = self.handle(request);
            if let Err(e) = self.port.send(response).await {
                tracing::warn!(error = %e, "Dropping reply, UI no longer listening");
                break RouterExit::ResponsesClosed;
            }
        };

        tracing::info!(routed = self.routed, ?exit, "Message router stopped");
        RouterSummary {
            batch: self.ready.batch(),
            routed: self.routed,
            exit,
        }
    }
}
