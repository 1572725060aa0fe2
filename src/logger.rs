//! Logger module
//!
//! Console logging for server lifecycle, per-request access lines, and
//! errors. The sink is stdout/stderr; callers only see the `log_*`
//! functions so the destination can be swapped without touching the
//! request pipeline.

use crate::config::Config;
use chrono::Local;
use hyper::Method;
use std::net::SocketAddr;

fn timestamp() -> String {
    Local::now().format("%Y-%m-%d %H:%M:%S").to_string()
}

pub fn log_server_start(addr: &SocketAddr, config: &Config) {
    println!("======================================");
    println!("Async server started successfully");
    println!("Listening on: http://{addr}");
    println!("Assets root: {}", config.assets.root);
    println!("Max body size: {} bytes", config.http.max_body_size);
    if let Some(workers) = config.server.workers {
        println!("Worker threads: {workers}");
    }
    println!("Using Tokio runtime for concurrency");
    println!("======================================\n");
}

/// One line per request: method and path
pub fn log_request(method: &Method, path: &str) {
    println!("[{}] {method} {path}", timestamp());
}

pub fn log_connection_accepted(peer_addr: &SocketAddr) {
    println!("[{}] [Connection] Accepted from: {peer_addr}", timestamp());
}

pub fn log_connection_error(err: &impl std::fmt::Debug) {
    eprintln!("[{}] [ERROR] Failed to serve connection: {err:?}", timestamp());
}

pub fn log_error(message: &str) {
    eprintln!("[{}] [ERROR] {message}", timestamp());
}

pub fn log_warning(message: &str) {
    eprintln!("[{}] [WARN] {message}", timestamp());
}
