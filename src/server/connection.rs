// Connection handling module
// Serves a single accepted TCP connection over HTTP/1.1.

use std::sync::Arc;

use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper_util::rt::TokioIo;

use crate::config::AppState;
use crate::handler;
use crate::logger;

/// Log and hand an accepted connection to its own task.
pub fn accept_connection(
    stream: tokio::net::TcpStream,
    peer_addr: std::net::SocketAddr,
    state: &Arc<AppState>,
) {
    if state.config.logging.access_log {
        logger::log_connection_accepted(&peer_addr);
    }

    let state = Arc::clone(state);
    tokio::spawn(async move {
        let io = TokioIo::new(stream);

        let conn = http1::Builder::new()
            .keep_alive(true)
            .serve_connection(
                io,
                service_fn(move |req| {
                    let state = Arc::clone(&state);
                    handler::handle_request(req, state)
                }),
            );

        if let Err(err) = conn.await {
            logger::log_connection_error(&err);
        }
    });
}
