//! Request dispatch module
//!
//! Per-connection control flow: branch on method, consult the route
//! table for GET, echo the buffered body for POST, reject anything
//! else. Every path through here invokes exactly one response builder,
//! so each request gets one status line, at most one Content-Type, and
//! one body.

use crate::config::AppState;
use crate::handler::assets::{self, AssetError};
use crate::http;
use crate::logger;
use http_body_util::{BodyExt, Full, LengthLimitError, Limited};
use hyper::body::{Body, Bytes};
use hyper::header::CONTENT_TYPE;
use hyper::{HeaderMap, Method, Request, Response};
use std::convert::Infallible;
use std::sync::Arc;

/// Main entry point for HTTP request handling
///
/// Generic over the body type so tests can drive it with `Full<Bytes>`
/// while the server feeds it `hyper::body::Incoming`.
pub async fn handle_request<B>(
    req: Request<B>,
    state: Arc<AppState>,
) -> Result<Response<Full<Bytes>>, Infallible>
where
    B: Body,
    B::Error: Into<Box<dyn std::error::Error + Send + Sync>>,
{
    let method = req.method().clone();
    let path = req.uri().path().to_owned();

    if state.config.logging.access_log {
        logger::log_request(&method, &path);
    }

    let response = match method {
        Method::GET => handle_get(&path, &state).await,
        Method::POST => handle_post(req, &state).await,
        other => {
            logger::log_warning(&format!("Method not allowed: {other}"));
            http::build_405_response()
        }
    };

    Ok(response)
}

/// Normalize the request path before route lookup
///
/// An empty path or bare `/` serves the index page. Query-only requests
/// arrive here as `/` already, so they fall into the same arm.
fn normalize_path(path: &str) -> &str {
    if path.is_empty() || path == "/" {
        "/index.html"
    } else {
        path
    }
}

/// GET pipeline: route lookup, path resolution, async load
async fn handle_get(path: &str, state: &AppState) -> Response<Full<Bytes>> {
    let path = normalize_path(path);

    let Some(route) = state.routes.lookup(path) else {
        return http::build_404_route_response();
    };

    let location = match assets::resolve(&state.assets_root, path) {
        Ok(location) => location,
        Err(e) => {
            // Only PathTraversal is possible here, before any disk access
            logger::log_warning(&format!("Rejected path {path}: {e}"));
            return http::build_403_response();
        }
    };

    match assets::load(&location).await {
        Ok(content) => http::build_asset_response(content, route.content_type),
        Err(AssetError::NotFound) => {
            logger::log_warning(&format!("Asset missing for route {path}"));
            http::build_404_asset_response()
        }
        Err(e) => {
            logger::log_error(&format!("Failed to load {}: {e}", location.display()));
            http::build_500_response(&e.to_string())
        }
    }
}

/// POST pipeline: buffer the body up to the configured cap, echo it back
async fn handle_post<B>(req: Request<B>, state: &AppState) -> Response<Full<Bytes>>
where
    B: Body,
    B::Error: Into<Box<dyn std::error::Error + Send + Sync>>,
{
    let max_body_size = state.config.http.max_body_size;

    // Declared-length fast path; the streaming cap below catches the rest
    if let Some(resp) = check_body_size(req.headers(), max_body_size) {
        return resp;
    }

    let content_type = req
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or(state.config.http.default_content_type.as_str())
        .to_owned();

    let limit = usize::try_from(max_body_size).unwrap_or(usize::MAX);
    match Limited::new(req.into_body(), limit).collect().await {
        Ok(collected) => http::build_echo_response(collected.to_bytes(), &content_type),
        Err(e) => {
            if e.downcast_ref::<LengthLimitError>().is_some() {
                logger::log_error(&format!(
                    "Request body exceeded cap of {max_body_size} bytes"
                ));
                http::build_413_response()
            } else {
                logger::log_warning(&format!("Failed to read request body: {e}"));
                http::build_400_response()
            }
        }
    }
}

/// Validate Content-Length header and return 413 if exceeded
fn check_body_size(headers: &HeaderMap, max_body_size: u64) -> Option<Response<Full<Bytes>>> {
    let content_length = headers.get("content-length")?;
    content_length.to_str().map_or_else(
        |_| {
            logger::log_warning("Content-Length header contains non-ASCII characters");
            None
        },
        |size_str| match size_str.parse::<u64>() {
            Ok(size) if size > max_body_size => {
                logger::log_error(&format!(
                    "Request body too large: {size} bytes (max: {max_body_size})"
                ));
                Some(http::build_413_response())
            }
            Err(_) => {
                logger::log_warning(&format!(
                    "Invalid Content-Length value: '{size_str}', skipping size check"
                ));
                None
            }
            _ => None,
        },
    )
}
