//! Listening WebSocket client
//!
//! Connects to a relay socket and prints everything it receives.

use std::io::Write;

use futures::StreamExt;
use tokio_tungstenite::connect_async;
use tracing::{debug, info};
use url::Url;

use crate::error::{RelayError, Result};
use crate::relay::coerce_text;

/// Broadcaster subscriber socket on the local machine
pub const DEFAULT_LISTEN_URL: &str = "ws://127.0.0.1:5001/";

/// Validate a listen URL, which must use `ws` or `wss`
pub fn parse_listen_url(raw: &str) -> Result<Url> {
    let url = Url::parse(raw)?;
    match url.scheme() {
        "ws" | "wss" => Ok(url),
        other => Err(RelayError::Client(format!(
            "unsupported scheme {}, expected ws or wss",
            other
        ))),
    }
}

/// Print every message from `url` to `out` until the connection closes
///
/// Each message becomes a `Received message: ` line; a read error becomes an
/// `Error: ` line and ends the session. `Closed.` is written last.
pub async fn listen<W: Write>(url: &Url, out: &mut W) -> Result<()> {
    let (mut stream, _) = connect_async(url.as_str()).await?;
    info!("Connected to {}", url);

    while let Some(msg) = stream.next().await {
        match msg {
            Ok(msg) if msg.is_text() || msg.is_binary() => {
                writeln!(out, "Received message: {}", coerce_text(&msg.into_data()))?;
                out.flush()?;
            }
            Ok(msg) if msg.is_close() => {
                debug!("Server closed the connection");
                break;
            }
            Ok(_) => {}
            Err(e) => {
                writeln!(out, "Error: {}", e)?;
                break;
            }
        }
    }

    writeln!(out, "Closed.")?;
    out.flush()?;
    Ok(())
}
