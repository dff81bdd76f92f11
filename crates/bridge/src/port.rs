//! Ports - typed channels across the UI boundary
//!
//! ```text
//! ┌──────────────────────────────┐
//! │           UI side            │
//! │  RequestSender  ResponseRx   │
//! └───────┬──────────────▲───────┘
//!         │ Request      │ Response
//!         ▼              │
//! ┌──────────────────────┴───────┐
//! │  BridgePort (MessageRouter)  │
//! └──────────────────────────────┘
//! ```
//!
//! A pair is only created once the engine is ready, so the UI cannot hold
//! a sender before then.

use shared::{BridgeError, Request, Response, Result};
use tokio::sync::mpsc;

/// Create a connected bridge/UI port pair
pub fn channel(buffer_size: usize) -> (BridgePort, UiPort) {
    let (request_tx, request_rx) = mpsc::channel(buffer_size);
    let (response_tx, response_rx) = mpsc::channel(buffer_size);

    let bridge = BridgePort {
        requests: request_rx,
        responses: response_tx,
    };
    let ui = UiPort {
        requests: RequestSender { tx: request_tx },
        responses: ResponseReceiver { rx: response_rx },
    };

    (bridge, ui)
}

/// Bridge end: receives requests, emits responses
pub struct BridgePort {
    requests: mpsc::Receiver<Request>,
    responses: mpsc::Sender<Response>,
}

impl BridgePort {
    /// Wait for the next request; `None` once every sender is gone
    pub async fn recv(&mut self) -> Option<Request> {
        self.requests.recv().await
    }

    /// Emit a response toward the UI
    pub async fn send(&self, response: Response) -> Result<()> {
        self.responses
            .send(response)
            .await
            .map_err(|_| BridgeError::PortClosed("response receiver dropped".to_string()))
    }
}

impl std::fmt::Debug for BridgePort {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BridgePort")
            .field("responses_closed", &self.responses.is_closed())
            .finish_non_exhaustive()
    }
}

/// UI end of the boundary, handed to the mount on attach
#[derive(Debug)]
pub struct UiPort {
    requests: RequestSender,
    responses: ResponseReceiver,
}

impl UiPort {
    pub async fn send(&self, request: Request) -> Result<()> {
        self.requests.send(request).await
    }

    pub async fn recv(&mut self) -> Option<Response> {
        self.responses.recv().await
    }

    /// Drains every response already emitted, without waiting
    pub fn drain(&mut self) -> Vec<Response> {
        self.responses.drain()
    }

    /// Split into independently owned halves
    pub fn into_split(self) -> (RequestSender, ResponseReceiver) {
        (self.requests, self.responses)
    }
}

/// Sending half of the UI port; cloneable for several request sources
#[derive(Debug, Clone)]
pub struct RequestSender {
    tx: mpsc::Sender<Request>,
}

impl RequestSender {
    pub async fn send(&self, request: Request) -> Result<()> {
        self.tx
            .send(request)
            .await
            .map_err(|_| BridgeError::PortClosed("bridge stopped routing".to_string()))
    }

    pub fn is_closed(&self) -> bool {
        self.tx.is_closed()
    }
}

/// Receiving half of the UI port
#[derive(Debug)]
pub struct ResponseReceiver {
    rx: mpsc::Receiver<Response>,
}

impl ResponseReceiver {
    pub async fn recv(&mut self) -> Option<Response> {
        self.rx.recv().await
    }

    pub fn try_recv(&mut self) -> Option<Response> {
        self.rx.try_recv().ok()
    }

    pub fn drain(&mut self) -> Vec<Response> {
        let mut responses = Vec::new();
        while let Some(response) = self.try_recv() {
            responses.push(response);
        }
        responses
    }
}
