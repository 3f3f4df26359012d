//! Payload carried from the HTTP ingress to WebSocket subscribers

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// An opaque value relayed without validation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Payload(Value);

impl Payload {
    pub fn new(value: Value) -> Self {
        Self(value)
    }

    pub fn value(&self) -> &Value {
        &self.0
    }

    /// Text frame sent to subscribers
    ///
    /// Strings go out verbatim; any other value as compact JSON.
    pub fn to_text(&self) -> String {
        match &self.0 {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        }
    }
}

impl From<String> for Payload {
    fn from(s: String) -> Self {
        Self(Value::String(s))
    }
}

impl From<&str> for Payload {
    fn from(s: &str) -> Self {
        Self(Value::String(s.to_string()))
    }
}

impl fmt::Display for Payload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_text())
    }
}
