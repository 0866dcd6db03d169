// Server module entry
// Listener creation and the accept loop.

pub mod connection;
pub mod listener;

use std::sync::Arc;

use tokio::net::TcpListener;

use crate::config::AppState;
use crate::logger;

pub use listener::create_reusable_listener;

/// Accept connections forever, serving each on its own task.
pub async fn run(listener: TcpListener, state: Arc<AppState>) -> std::io::Result<()> {
    loop {
        match listener.accept().await {
            Ok((stream, peer_addr)) => {
                connection::accept_connection(stream, peer_addr, &state);
            }
            Err(e) => {
                logger::log_error(&format!("Failed to accept connection: {e}"));
            }
        }
    }
}
