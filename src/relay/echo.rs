//! Echo transformation

/// Prefix prepended to every echoed message
pub const ECHO_PREFIX: &str = "Echo: ";

/// A message received from a WebSocket peer
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Inbound {
    Text(String),
    Binary(Vec<u8>),
    /// Ping, pong or close frames
    Control,
}

/// Decode a binary frame as UTF-8, replacing invalid sequences
pub fn coerce_text(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes).into_owned()
}

/// Reply to send back for `message`, if any
pub fn echo_reply(message: &Inbound) -> Option<String> {
    match message {
        Inbound::Text(text) => Some(format!("{}{}", ECHO_PREFIX, text)),
        Inbound::Binary(bytes) => Some(format!("{}{}", ECHO_PREFIX, coerce_text(bytes))),
        Inbound::Control => None,
    }
}
