//! HTTP response building module
//!
//! Builders for every response shape the dispatcher can emit. Each
//! builder sets exactly one status and at most one Content-Type header;
//! callers invoke exactly one builder per request. Error bodies are
//! plain text throughout.

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::Response;

/// Build 200 response carrying asset bytes with the route's content type
pub fn build_asset_response(body: Bytes, content_type: &str) -> Response<Full<Bytes>> {
    Response::builder()
        .status(200)
        .header("Content-Type", content_type)
        .body(Full::new(body))
        .unwrap_or_else(|e| {
            log_build_error("200", &e);
            Response::new(Full::new(Bytes::new()))
        })
}

/// Build 200 echo response for a POST body
pub fn build_echo_response(body: Bytes, content_type: &str) -> Response<Full<Bytes>> {
    Response::builder()
        .status(200)
        .header("Content-Type", content_type)
        .body(Full::new(body))
        .unwrap_or_else(|e| {
            log_build_error("echo", &e);
            Response::new(Full::new(Bytes::new()))
        })
}

/// Build 404 Not Found response for a path with no route
pub fn build_404_route_response() -> Response<Full<Bytes>> {
    Response::builder()
        .status(404)
        .header("Content-Type", "text/html")
        .body(Full::new(Bytes::from("Not found")))
        .unwrap_or_else(|e| {
            log_build_error("404", &e);
            Response::new(Full::new(Bytes::from("Not found")))
        })
}

/// Build 404 Not Found response for a matched route whose file is missing
pub fn build_404_asset_response() -> Response<Full<Bytes>> {
    Response::builder()
        .status(404)
        .header("Content-Type", "text/plain")
        .body(Full::new(Bytes::from("Not found")))
        .unwrap_or_else(|e| {
            log_build_error("404", &e);
            Response::new(Full::new(Bytes::from("Not found")))
        })
}

/// Build 405 Method Not Allowed response
///
/// Carries no Content-Type, matching the served wire format.
pub fn build_405_response() -> Response<Full<Bytes>> {
    Response::builder()
        .status(405)
        .header("Allow", "GET, POST")
        .body(Full::new(Bytes::from("Method not allowed.")))
        .unwrap_or_else(|e| {
            log_build_error("405", &e);
            Response::new(Full::new(Bytes::from("Method not allowed.")))
        })
}

/// Build 403 Forbidden response for a path escaping the assets root
pub fn build_403_response() -> Response<Full<Bytes>> {
    Response::builder()
        .status(403)
        .header("Content-Type", "text/plain")
        .body(Full::new(Bytes::from("Forbidden")))
        .unwrap_or_else(|e| {
            log_build_error("403", &e);
            Response::new(Full::new(Bytes::from("Forbidden")))
        })
}

/// Build 413 Payload Too Large response
pub fn build_413_response() -> Response<Full<Bytes>> {
    Response::builder()
        .status(413)
        .header("Content-Type", "text/plain")
        .body(Full::new(Bytes::from("Payload too large")))
        .unwrap_or_else(|e| {
            log_build_error("413", &e);
            Response::new(Full::new(Bytes::from("Payload too large")))
        })
}

/// Build 400 Bad Request response for an unreadable request body
pub fn build_400_response() -> Response<Full<Bytes>> {
    Response::builder()
        .status(400)
        .header("Content-Type", "text/plain")
        .body(Full::new(Bytes::from("Bad request")))
        .unwrap_or_else(|e| {
            log_build_error("400", &e);
            Response::new(Full::new(Bytes::from("Bad request")))
        })
}

/// Build 500 Internal Server Error response carrying the I/O error text
pub fn build_500_response(message: &str) -> Response<Full<Bytes>> {
    Response::builder()
        .status(500)
        .header("Content-Type", "text/plain")
        .body(Full::new(Bytes::from(message.to_owned())))
        .unwrap_or_else(|e| {
            log_build_error("500", &e);
            Response::new(Full::new(Bytes::new()))
        })
}

/// Log response build error
fn log_build_error(status: &str, error: &hyper::http::Error) {
    crate::logger::log_error(&format!("Failed to build {status} response: {error}"));
}
