//! Message types crossing the UI boundary

use serde::{Deserialize, Serialize};

/// Caller-defined request identity.
///
/// The bridge never interprets it; it is echoed back on the matching
/// [`Response`] exactly as received.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CorrelationToken(serde_json::Value);

impl CorrelationToken {
    pub fn new(value: impl Into<serde_json::Value>) -> Self {
        Self(value.into())
    }

    pub fn as_value(&self) -> &serde_json::Value {
        &self.0
    }

    pub fn into_value(self) -> serde_json::Value {
        self.0
    }
}

impl std::fmt::Display for CorrelationToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.0 {
            serde_json::Value::String(s) => f.write_str(s),
            other => write!(f, "{}", other),
        }
    }
}

/// Identifier reported by a successful knowledge load
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BatchId(pub u64);

impl std::fmt::Display for BatchId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Inbound message from the UI
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Request {
    pub token: CorrelationToken,
    pub user: String,
    pub text: String,
}

impl Request {
    pub fn new(token: CorrelationToken, user: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            token,
            user: user.into(),
            text: text.into(),
        }
    }
}

/// Outbound message toward the UI
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Response {
    pub token: CorrelationToken,
    pub reply: String,
}

impl Response {
    /// Build the response for `request`, carrying its token unchanged
    pub fn answering(request: Request, reply: impl Into<String>) -> Self {
        Self {
            token: request.token,
            reply: reply.into(),
        }
    }
}
