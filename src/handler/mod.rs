//! Request handling module
//!
//! Splits the pipeline into dispatch (method and route decisions) and
//! assets (path resolution and file loading).

pub mod assets;
pub mod dispatcher;

pub use dispatcher::handle_request;
