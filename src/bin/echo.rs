//! Echo server - Entry Point

use tracing::info;

use wsrelay::error::Result;
use wsrelay::websocket::WsServer;
use wsrelay::{logging, shutdown, Config};

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;
    logging::init(&config.log);

    info!("Starting echo server on {}", config.echo_addr());

    let server = WsServer::echo(&config.echo);
    server.run(shutdown::watch_signals()).await?;

    info!("Echo server stopped");
    Ok(())
}
