//! JSON-lines wire format used by `rivebridge serve`
//!
//! Inbound, one request per line, either
//!
//! ```text
//! {"token": <any JSON>, "user": "alice", "text": "hello"}
//! [<id>, "hello"]
//! ```
//!
//! The two-element form uses `id` as the correlation token and as the user
//! id too: a string id is used as is, any other JSON value by its compact
//! JSON text (`42` talks as user `"42"`). Outbound is always
//! `{"token": <same JSON>, "reply": "..."}`.

use serde::Deserialize;
use shared::{CorrelationToken, Request, Response};

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Inbound {
    Canonical {
        token: CorrelationToken,
        #[serde(default)]
        user: Option<String>,
        text: String,
    },
    Pair(serde_json::Value, String),
}

/// Decode one inbound line
pub fn decode_request(line: &str, default_user: &str) -> serde_json::Result<Request> {
    let request = match serde_json::from_str::<Inbound>(line)? {
        Inbound::Canonical { token, user, text } => Request {
            token,
            user: user.unwrap_or_else(|| default_user.to_string()),
            text,
        },
        Inbound::Pair(id, text) => {
            let user = match &id {
                serde_json::Value::String(s) => s.clone(),
                other => other.to_string(),
            };
            Request {
                token: CorrelationToken::new(id),
                user,
                text,
            }
        }
    };
    Ok(request)
}

/// Encode one outbound line (without the trailing newline)
pub fn encode_response(response: &Response) -> serde_json::Result<String> {
    serde_json::to_string(response)
}
