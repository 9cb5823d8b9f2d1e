//! Static asset fallback serving the single-page shell.
//!
//! Any GET that no other route claimed is resolved against the static
//! directory. Missing files fall back to `index.html` so client-side routes
//! load the shell; without a shell the request is a JSON `404`.
//!
//! Reads go through a capability handle on the static directory, so request
//! paths can never escape it.

use std::io;
use std::path::Path;
use std::sync::Arc;

use actix_web::http::{Method, header};
use actix_web::{HttpRequest, HttpResponse, web};
use cap_std::{ambient_authority, fs::Dir};
use tracing::{debug, warn};

use crate::domain::Error;
use crate::inbound::http::ApiResult;

const INDEX_FILE: &str = "index.html";

/// Handle on the directory served by [`serve_static`].
#[derive(Clone, Default)]
pub struct StaticFiles {
    root: Option<Arc<Dir>>,
}

impl StaticFiles {
    /// Open `path` for serving.
    ///
    /// A missing directory is logged and leaves the fallback answering `404`.
    pub fn open(path: &Path) -> Self {
        match Dir::open_ambient_dir(path, ambient_authority()) {
            Ok(dir) => Self::from_dir(dir),
            Err(err) => {
                warn!(path = %path.display(), error = %err, "static directory unavailable");
                Self::default()
            }
        }
    }

    pub fn from_dir(dir: Dir) -> Self {
        Self {
            root: Some(Arc::new(dir)),
        }
    }
}

struct Asset {
    body: Vec<u8>,
    content_type: &'static str,
}

fn content_type_for(path: &str) -> &'static str {
    let extension = path.rsplit_once('.').map(|(_, ext)| ext.to_ascii_lowercase());
    match extension.as_deref() {
        Some("html" | "htm") => "text/html; charset=utf-8",
        Some("js" | "mjs") => "text/javascript; charset=utf-8",
        Some("css") => "text/css; charset=utf-8",
        Some("json" | "map") => "application/json",
        Some("webmanifest") => "application/manifest+json",
        Some("svg") => "image/svg+xml",
        Some("png") => "image/png",
        Some("jpg" | "jpeg") => "image/jpeg",
        Some("ico") => "image/x-icon",
        Some("woff2") => "font/woff2",
        Some("txt") => "text/plain; charset=utf-8",
        _ => "application/octet-stream",
    }
}

/// Relative asset path for a request path, or `None` for the shell.
fn relative_path(request_path: &str) -> Option<&str> {
    let trimmed = request_path.trim_start_matches('/');
    if trimmed.is_empty() || trimmed.ends_with('/') {
        return None;
    }
    if trimmed.split('/').any(|segment| segment == ".." || segment == ".") {
        return None;
    }
    Some(trimmed)
}

fn read_file(dir: &Dir, path: &str) -> io::Result<Option<Vec<u8>>> {
    match dir.metadata(path) {
        Ok(meta) if meta.is_file() => dir.read(path).map(Some),
        Ok(_) => Ok(None),
        Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
        // Paths escaping the directory are refused by the capability layer.
        Err(err) if err.kind() == io::ErrorKind::PermissionDenied => Ok(None),
        Err(err) => Err(err),
    }
}

fn resolve(dir: &Dir, request_path: &str) -> io::Result<Option<Asset>> {
    if let Some(path) = relative_path(request_path) {
        if let Some(body) = read_file(dir, path)? {
            return Ok(Some(Asset {
                body,
                content_type: content_type_for(path),
            }));
        }
    }
    Ok(read_file(dir, INDEX_FILE)?.map(|body| Asset {
        body,
        content_type: content_type_for(INDEX_FILE),
    }))
}

/// Default service answering unmatched requests from the static directory.
pub async fn serve_static(
    req: HttpRequest,
    files: web::Data<StaticFiles>,
) -> ApiResult<HttpResponse> {
    let not_found = || Error::not_found(format!("no resource at {}", req.path()));
    if *req.method() != Method::GET && *req.method() != Method::HEAD {
        return Err(not_found());
    }
    let Some(root) = files.root.clone() else {
        return Err(not_found());
    };

    let request_path = req.path().to_owned();
    let asset = web::block(move || resolve(&root, &request_path))
        .await
        .map_err(|err| Error::internal(format!("static file task failed: {err}")))?
        .map_err(|err| Error::internal(format!("static file read failed: {err}")))?;

    match asset {
        Some(asset) => {
            debug!(path = req.path(), "serving static asset");
            Ok(HttpResponse::Ok()
                .insert_header((header::CONTENT_TYPE, asset.content_type))
                .body(asset.body))
        }
        None => Err(not_found()),
    }
}
