//! Asset resolution and loading module
//!
//! Converts a request path into a filesystem location under the assets
//! root and reads the file without blocking the connection task.

use std::io;
use std::path::{Component, Path, PathBuf};

use hyper::body::Bytes;
use thiserror::Error;
use tokio::fs;

/// Failure modes of the asset pipeline.
///
/// `NotFound` and `Io` stay separate because they map to different
/// status codes (404 vs 500). `PathTraversal` is raised before any
/// filesystem access happens.
#[derive(Debug, Error)]
pub enum AssetError {
    #[error("path escapes the assets root")]
    PathTraversal,
    #[error("asset not found")]
    NotFound,
    #[error("failed to read asset: {0}")]
    Io(io::Error),
}

/// Resolve a request path to a location under `assets_root`.
///
/// Strips any query or fragment, then joins the remaining segments onto
/// the root one component at a time. A `..` that would climb past the
/// root, or an absolute component, fails closed with
/// [`AssetError::PathTraversal`]. No existence check is performed here;
/// that is the loader's job.
pub fn resolve(assets_root: &Path, request_path: &str) -> Result<PathBuf, AssetError> {
    let path = request_path
        .split(['?', '#'])
        .next()
        .unwrap_or(request_path);
    let relative = path.trim_start_matches('/');

    let mut resolved = assets_root.to_path_buf();
    let mut depth: usize = 0;

    for component in Path::new(relative).components() {
        match component {
            Component::Normal(segment) => {
                resolved.push(segment);
                depth += 1;
            }
            Component::CurDir => {}
            Component::ParentDir => {
                if depth == 0 {
                    return Err(AssetError::PathTraversal);
                }
                resolved.pop();
                depth -= 1;
            }
            Component::RootDir | Component::Prefix(_) => {
                return Err(AssetError::PathTraversal);
            }
        }
    }

    Ok(resolved)
}

/// Read the file at `location` asynchronously.
///
/// Returns the raw bytes; no UTF-8 assumption is made so binary assets
/// round-trip unchanged.
pub async fn load(location: &Path) -> Result<Bytes, AssetError> {
    match fs::read(location).await {
        Ok(content) => Ok(Bytes::from(content)),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Err(AssetError::NotFound),
        Err(e) => Err(AssetError::Io(e)),
    }
}
