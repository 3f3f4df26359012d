//! Listener - Entry Point
//!
//! Usage: `wsrelay-listen [ws-url]`, defaulting to the local broadcaster.

use anyhow::Context;

use wsrelay::client::{self, DEFAULT_LISTEN_URL};
use wsrelay::{logging, Config};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env()?;
    logging::init(&config.log);

    let raw = std::env::args()
        .nth(1)
        .unwrap_or_else(|| DEFAULT_LISTEN_URL.to_string());
    let url = client::parse_listen_url(&raw).with_context(|| format!("invalid url {}", raw))?;

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    client::listen(&url, &mut out)
        .await
        .with_context(|| format!("listening on {}", url))?;

    Ok(())
}
