//! Logger module
//!
//! Timestamped access and error logging for the server, optionally routed
//! to files via the thread-safe writer.

pub mod writer;

use std::net::SocketAddr;

use chrono::Utc;

use crate::config::Config;

/// Initialize the logger with configuration.
///
/// Should be called once at application startup.
pub fn init(config: &Config) -> std::io::Result<()> {
    writer::init(
        config.logging.access_log_file.as_deref(),
        config.logging.error_log_file.as_deref(),
    )
}

fn timestamp() -> String {
    Utc::now().format("%Y-%m-%dT%H:%M:%SZ").to_string()
}

/// Write to info/access log
fn write_info(message: &str) {
    if writer::is_initialized() {
        writer::get().write_info(message);
    } else {
        println!("{message}");
    }
}

/// Write to error log
fn write_error(message: &str) {
    if writer::is_initialized() {
        writer::get().write_error(message);
    } else {
        eprintln!("{message}");
    }
}

pub fn log_server_start(addr: &SocketAddr, config: &Config) {
    write_info("======================================");
    write_info(&format!("embserve listening on http://{addr}"));
    write_info(&format!(
        "Asset mode: {}",
        if config.assets.use_local {
            "local filesystem"
        } else {
            "embedded"
        }
    ));
    write_info(&format!("Route prefix: {}", config.assets.route_prefix));
    write_info("======================================");
}

/// One line per completed request, common-log style.
pub fn log_access(method: &hyper::Method, path: &str, status: u16, bytes: usize) {
    write_info(&format!(
        "[{}] {method} {path} -> {status} ({bytes} bytes)",
        timestamp()
    ));
}

pub fn log_connection_accepted(peer: &SocketAddr) {
    write_info(&format!("[{}] Connection from {peer}", timestamp()));
}

pub fn log_warning(message: &str) {
    write_error(&format!("[{}] [WARN] {message}", timestamp()));
}

pub fn log_error(message: &str) {
    write_error(&format!("[{}] [ERROR] {message}", timestamp()));
}

pub fn log_connection_error(err: &hyper::Error) {
    // Clients dropping keep-alive connections is routine noise
    if !err.is_incomplete_message() {
        log_error(&format!("Connection error: {err}"));
    }
}
