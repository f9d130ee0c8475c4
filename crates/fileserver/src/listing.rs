//! HTML directory listings for directories without an `index.html`
//!
//! Installed as the fallback of `ServeDir`, so it only sees requests the
//! static file service could not answer.

use std::convert::Infallible;
use std::future::Future;
use std::path::{Component, Path, PathBuf};
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};

use axum::{
    http::{header, Request, StatusCode},
    response::{Html, IntoResponse, Response},
};
use tower::Service;

/// Renders directory listings below a fixed root
#[derive(Debug, Clone)]
pub struct DirectoryListing {
    root: Arc<PathBuf>,
}

impl DirectoryListing {
    /// Create a listing service for `root`
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: Arc::new(root.into()),
        }
    }

    /// Answer a request for `uri_path` (still percent-encoded)
    pub async fn respond(&self, uri_path: &str) -> Response {
        let Some(relative) = urlencoding::decode(uri_path)
            .ok()
            .and_then(|decoded| relative_path(&decoded))
        else {
            return not_found();
        };

        let dir = self.root.join(relative);
        match tokio::fs::metadata(&dir).await {
            Ok(metadata) if metadata.is_dir() => {}
            _ => return not_found(),
        }

        // ServeDir redirects first when mounted as its fallback; this covers
        // the listing used as a service of its own
        if !uri_path.ends_with('/') {
            return (
                StatusCode::MOVED_PERMANENTLY,
                [(header::LOCATION, format!("{}/", uri_path))],
            )
                .into_response();
        }

        match read_entries(&dir).await {
            Ok(entries) => Html(render(&entries)).into_response(),
            Err(e) => {
                tracing::error!("Failed to read directory {}: {}", dir.display(), e);
                (StatusCode::INTERNAL_SERVER_ERROR, "Error reading directory\n").into_response()
            }
        }
    }
}

impl<B> Service<Request<B>> for DirectoryListing {
    type Response = Response;
    type Error = Infallible;
    type Future = Pin<Box<dyn Future<Output = Result<Response, Infallible>> + Send>>;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, request: Request<B>) -> Self::Future {
        let listing = self.clone();
        let path = request.uri().path().to_string();
        Box::pin(async move { Ok(listing.respond(&path).await) })
    }
}

/// Turn a decoded URL path into a path relative to the root
///
/// Returns `None` for anything that could leave the root.
fn relative_path(decoded: &str) -> Option<PathBuf> {
    let mut relative = PathBuf::new();
    for component in Path::new(decoded.trim_start_matches('/')).components() {
        match component {
            Component::Normal(part) => relative.push(part),
            Component::CurDir => {}
            Component::ParentDir | Component::RootDir | Component::Prefix(_) => return None,
        }
    }
    Some(relative)
}

/// Entry names sorted by name, directories suffixed with `/`
async fn read_entries(dir: &Path) -> std::io::Result<Vec<String>> {
    let mut entries = Vec::new();
    let mut read_dir = tokio::fs::read_dir(dir).await?;
    while let Some(entry) = read_dir.next_entry().await? {
        let mut name = entry.file_name().to_string_lossy().into_owned();
        if entry.file_type().await?.is_dir() {
            name.push('/');
        }
        entries.push(name);
    }
    entries.sort();
    Ok(entries)
}

fn render(entries: &[String]) -> String {
    let mut html = String::from("<!doctype html>\n<meta name=\"viewport\" content=\"width=device-width\">\n<pre>\n");
    for name in entries {
        let (stem, slash) = match name.strip_suffix('/') {
            Some(stem) => (stem, "/"),
            None => (name.as_str(), ""),
        };
        html.push_str(&format!(
            "<a href=\"{}{}\">{}</a>\n",
            urlencoding::encode(stem),
            slash,
            escape_html(name)
        ));
    }
    html.push_str("</pre>\n");
    html
}

fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&#34;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

fn not_found() -> Response {
    (StatusCode::NOT_FOUND, "404 page not found\n").into_response()
}
