//! End-to-end dispatcher tests
//!
//! Drives `handle_request` directly with in-memory requests against a
//! per-test assets directory, covering every routing and status-code
//! outcome of the pipeline.

use http_body_util::{BodyExt, Full};
use hyper::body::Bytes;
use hyper::{Method, Request, Response, StatusCode};
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

use rust_fileserver::config::{
    AppState, AssetsConfig, Config, HttpConfig, LoggingConfig, PerformanceConfig, ServerConfig,
};
use rust_fileserver::handler;

const MAX_BODY_SIZE: u64 = 1024;

/// Build per-test state over a fresh assets directory populated with
/// the five routed files.
fn test_state(tag: &str) -> (Arc<AppState>, PathBuf) {
    let root = std::env::temp_dir().join(format!("fileserver-dispatch-{}-{tag}", std::process::id()));
    let _ = fs::remove_dir_all(&root);
    fs::create_dir_all(&root).expect("create assets root");

    fs::write(root.join("index.html"), b"<h1>index</h1>").expect("write index");
    fs::write(root.join("about.html"), b"<h1>about</h1>").expect("write about");
    fs::write(root.join("contact.html"), b"<h1>contact</h1>").expect("write contact");
    // Binary content proves bytes round-trip without a UTF-8 assumption
    fs::write(root.join("style.css"), [0x62u8, 0x6F, 0x64, 0x79, 0x00, 0xFF]).expect("write css");
    fs::write(root.join("scripts.js"), b"console.log(1);").expect("write js");

    let config = Config {
        server: ServerConfig {
            host: "127.0.0.1".to_owned(),
            port: 0,
            workers: None,
        },
        assets: AssetsConfig {
            root: root.display().to_string(),
        },
        http: HttpConfig {
            default_content_type: "text/plain".to_owned(),
            max_body_size: MAX_BODY_SIZE,
        },
        performance: PerformanceConfig {
            keep_alive_timeout: 75,
            request_timeout: 30,
        },
        logging: LoggingConfig { access_log: false },
    };

    (Arc::new(AppState::new(config)), root)
}

fn request(method: Method, path: &str) -> Request<Full<Bytes>> {
    Request::builder()
        .method(method)
        .uri(path)
        .body(Full::new(Bytes::new()))
        .expect("build request")
}

fn post(path: &str, content_type: Option<&str>, body: &[u8]) -> Request<Full<Bytes>> {
    let mut builder = Request::builder().method(Method::POST).uri(path);
    if let Some(ct) = content_type {
        builder = builder.header("Content-Type", ct);
    }
    builder
        .body(Full::new(Bytes::from(body.to_vec())))
        .expect("build request")
}

async fn send(state: &Arc<AppState>, req: Request<Full<Bytes>>) -> Response<Full<Bytes>> {
    handler::handle_request(req, Arc::clone(state))
        .await
        .expect("handler is infallible")
}

fn content_type(resp: &Response<Full<Bytes>>) -> Option<String> {
    resp.headers()
        .get("Content-Type")
        .and_then(|v| v.to_str().ok())
        .map(ToOwned::to_owned)
}

async fn body_bytes(resp: Response<Full<Bytes>>) -> Bytes {
    resp.into_body()
        .collect()
        .await
        .expect("collect body")
        .to_bytes()
}

#[tokio::test]
async fn every_route_serves_its_file_with_the_declared_content_type() {
    let (state, root) = test_state("all-routes");

    let expected = [
        ("/index.html", "text/html"),
        ("/about.html", "text/html"),
        ("/contact.html", "text/html"),
        ("/style.css", "text/css"),
        ("/scripts.js", "application/javascript"),
    ];

    for (path, declared_type) in expected {
        let resp = send(&state, request(Method::GET, path)).await;
        assert_eq!(resp.status(), StatusCode::OK, "status for {path}");
        assert_eq!(
            content_type(&resp).as_deref(),
            Some(declared_type),
            "content type for {path}"
        );

        let on_disk = fs::read(root.join(path.trim_start_matches('/'))).expect("read asset");
        assert_eq!(body_bytes(resp).await.as_ref(), on_disk, "body for {path}");
    }
}

#[tokio::test]
async fn root_is_equivalent_to_index() {
    let (state, _root) = test_state("root-alias");

    let from_root = send(&state, request(Method::GET, "/")).await;
    let from_index = send(&state, request(Method::GET, "/index.html")).await;

    assert_eq!(from_root.status(), from_index.status());
    assert_eq!(content_type(&from_root), content_type(&from_index));
    assert_eq!(
        body_bytes(from_root).await,
        body_bytes(from_index).await
    );
}

#[tokio::test]
async fn unknown_path_returns_404_html() {
    let (state, _root) = test_state("route-miss");

    let resp = send(&state, request(Method::GET, "/nope.html")).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    assert_eq!(content_type(&resp).as_deref(), Some("text/html"));
    assert_eq!(body_bytes(resp).await.as_ref(), b"Not found");
}

#[tokio::test]
async fn missing_asset_on_matched_route_returns_404_not_500() {
    let (state, root) = test_state("asset-missing");
    fs::remove_file(root.join("about.html")).expect("remove asset");

    let resp = send(&state, request(Method::GET, "/about.html")).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    assert_eq!(content_type(&resp).as_deref(), Some("text/plain"));
}

#[tokio::test]
async fn unreadable_asset_returns_500() {
    let (state, root) = test_state("asset-unreadable");
    // A directory where a file is expected fails the read with a
    // non-NotFound error kind
    fs::remove_file(root.join("contact.html")).expect("remove asset");
    fs::create_dir(root.join("contact.html")).expect("create dir in its place");

    let resp = send(&state, request(Method::GET, "/contact.html")).await;
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(content_type(&resp).as_deref(), Some("text/plain"));
}

#[tokio::test]
async fn post_echoes_body_verbatim() {
    let (state, _root) = test_state("post-echo");

    let resp = send(&state, post("/anything", Some("text/plain"), b"ehlo")).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(content_type(&resp).as_deref(), Some("text/plain"));
    assert_eq!(body_bytes(resp).await.as_ref(), b"ehlo");
}

#[tokio::test]
async fn post_preserves_declared_content_type() {
    let (state, _root) = test_state("post-json");

    let resp = send(
        &state,
        post("/data", Some("application/json"), br#"{"k":"v"}"#),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(content_type(&resp).as_deref(), Some("application/json"));
    assert_eq!(body_bytes(resp).await.as_ref(), br#"{"k":"v"}"#);
}

#[tokio::test]
async fn post_without_content_type_defaults_to_text_plain() {
    let (state, _root) = test_state("post-default-ct");

    let resp = send(&state, post("/echo", None, b"hello")).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(content_type(&resp).as_deref(), Some("text/plain"));
    assert_eq!(body_bytes(resp).await.as_ref(), b"hello");
}

#[tokio::test]
async fn post_body_over_cap_returns_413() {
    let (state, _root) = test_state("post-cap");

    let oversized = vec![b'x'; (MAX_BODY_SIZE + 1) as usize];
    let resp = send(&state, post("/echo", Some("text/plain"), &oversized)).await;
    assert_eq!(resp.status(), StatusCode::PAYLOAD_TOO_LARGE);
}

#[tokio::test]
async fn declared_oversized_content_length_returns_413() {
    let (state, _root) = test_state("post-cap-header");

    let req = Request::builder()
        .method(Method::POST)
        .uri("/echo")
        .header("Content-Length", (MAX_BODY_SIZE + 1).to_string())
        .body(Full::new(Bytes::new()))
        .expect("build request");
    let resp = send(&state, req).await;
    assert_eq!(resp.status(), StatusCode::PAYLOAD_TOO_LARGE);
}

#[tokio::test]
async fn non_get_post_methods_return_405() {
    let (state, _root) = test_state("method-reject");

    for method in [Method::PUT, Method::DELETE, Method::PATCH, Method::HEAD] {
        let resp = send(&state, request(method.clone(), "/index.html")).await;
        assert_eq!(resp.status(), StatusCode::METHOD_NOT_ALLOWED, "{method}");
        assert!(
            resp.headers().get("Content-Type").is_none(),
            "405 carries no content type ({method})"
        );
        assert_eq!(body_bytes(resp).await.as_ref(), b"Method not allowed.");
    }
}

#[tokio::test]
async fn traversal_path_never_serves_file_content() {
    let (state, root) = test_state("traversal");
    // Plant a file just outside the assets root
    let parent = root.parent().expect("root has a parent");
    let secret = parent.join("fileserver-secret.txt");
    fs::write(&secret, b"top secret").expect("write secret");

    let resp = send(
        &state,
        request(Method::GET, "/../fileserver-secret.txt"),
    )
    .await;
    // Not in the route table, so it is rejected before any resolution
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    assert_ne!(body_bytes(resp).await.as_ref(), b"top secret");

    let _ = fs::remove_file(secret);
}

#[tokio::test]
async fn concurrent_requests_complete_independently() {
    let (state, root) = test_state("concurrent");
    let paths = [
        "/index.html",
        "/about.html",
        "/contact.html",
        "/style.css",
        "/scripts.js",
    ];

    let mut tasks = Vec::new();
    for round in 0..4 {
        for path in paths {
            let state = Arc::clone(&state);
            tasks.push(tokio::spawn(async move {
                let resp = send(&state, request(Method::GET, path)).await;
                (round, path, resp.status(), body_bytes(resp).await)
            }));
        }
    }

    for task in tasks {
        let (_, path, status, body) = task.await.expect("task completes");
        assert_eq!(status, StatusCode::OK, "status for {path}");
        let on_disk = fs::read(root.join(path.trim_start_matches('/'))).expect("read asset");
        assert_eq!(body.as_ref(), on_disk, "body for {path}");
    }
}
