//! Lenient JSON body extraction
//!
//! Handlers report a missing body with endpoint-specific messages, so the
//! extractor does not reject empty input. An empty body, `null` and `{}`
//! all extract as "no data". Malformed JSON and non-object bodies are
//! rejected with a 400 envelope.

use axum::async_trait;
use axum::body::Bytes;
use axum::extract::{FromRequest, Request};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{Map, Value};

use crate::ServerError;

/// A JSON object body, `None` when the client sent no data
#[derive(Debug, Clone, Default)]
pub struct Payload(pub Option<Map<String, Value>>);

impl Payload {
    /// Parse a raw body
    pub fn parse(body: &[u8]) -> Result<Self, ServerError> {
        if body.iter().all(u8::is_ascii_whitespace) {
            return Ok(Self(None));
        }

        let value: Value = serde_json::from_slice(body)
            .map_err(|e| ServerError::InvalidRequest(format!("Invalid JSON body: {}", e)))?;

        match value {
            Value::Null => Ok(Self(None)),
            Value::Object(map) if map.is_empty() => Ok(Self(None)),
            Value::Object(map) => Ok(Self(Some(map))),
            _ => Err(ServerError::InvalidRequest(
                "Request body must be a JSON object".to_string(),
            )),
        }
    }

    /// Deserialize the body into a request type, or `missing` as a 400
    /// when there is no data
    pub fn require<T: DeserializeOwned>(self, missing: &str) -> Result<T, ServerError> {
        let data = self
            .0
            .ok_or_else(|| ServerError::InvalidRequest(missing.to_string()))?;
        serde_json::from_value(Value::Object(data))
            .map_err(|e| ServerError::InvalidRequest(format!("Invalid request body: {}", e)))
    }
}

#[async_trait]
impl<S> FromRequest<S> for Payload
where
    S: Send + Sync,
{
    type Rejection = ServerError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let body = Bytes::from_request(req, state)
            .await
            .map_err(|e| ServerError::InvalidRequest(e.body_text()))?;
        Self::parse(&body)
    }
}

/// Integer field as form clients send it: a JSON number, a numeric string
/// or a boolean. Anything else deserializes as `Other` so the handler can
/// report its own message.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum LooseInteger {
    Int(i64),
    Float(f64),
    Bool(bool),
    Text(String),
    Other(Value),
}

impl LooseInteger {
    /// Integer value; fractions truncate toward zero, `true` is 1
    pub fn value(&self) -> Option<i64> {
        match self {
            Self::Int(n) => Some(*n),
            Self::Float(f) if f.is_finite() => Some(f.trunc() as i64),
            Self::Float(_) => None,
            Self::Bool(b) => Some(i64::from(*b)),
            Self::Text(s) => s.trim().parse().ok(),
            Self::Other(_) => None,
        }
    }

    /// Zero, `false`, the empty string and empty containers count as unset
    pub fn is_blank(&self) -> bool {
        match self {
            Self::Int(n) => *n == 0,
            Self::Float(f) => *f == 0.0,
            Self::Bool(b) => !b,
            Self::Text(s) => s.is_empty(),
            Self::Other(Value::Array(a)) => a.is_empty(),
            Self::Other(Value::Object(o)) => o.is_empty(),
            Self::Other(_) => false,
        }
    }
}
