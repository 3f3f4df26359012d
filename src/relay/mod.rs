//! Message relay core
//!
//! Holds the connection registry and broadcaster used by the HTTP-to-WebSocket
//! variant, and the pure echo transformation used by the echo variant.

pub mod broadcaster;
pub mod echo;
pub mod payload;
pub mod registry;

pub use broadcaster::Broadcaster;
pub use echo::{coerce_text, echo_reply, Inbound, ECHO_PREFIX};
pub use payload::Payload;
pub use registry::{ConnectionId, ConnectionRegistry, Outbound, WS_BUFFER_SIZE};
