//! Minimal asynchronous HTTP server that maps a fixed set of URL paths
//! to static assets on disk.
//!
//! The pipeline: the dispatcher inspects the request method, consults the
//! immutable route table for GET, resolves the path against the assets
//! root, loads the file asynchronously, and emits exactly one response.
//! POST bodies are echoed back verbatim; all other methods are rejected.

pub mod config;
pub mod handler;
pub mod http;
pub mod logger;
pub mod routes;
