use std::path::{Component, Path, PathBuf};

use axum::extract::Request;
use axum::handler::HandlerWithoutStateExt;
use axum::http::header::CONTENT_TYPE;
use axum::http::{HeaderName, HeaderValue, StatusCode, Uri};
use axum::middleware::{self, Next};
use axum::response::{IntoResponse, Response};
use axum::Router;
use percent_encoding::percent_decode_str;
use tower_http::services::ServeDir;
use tower_http::set_header::SetResponseHeaderLayer;

use crate::listing;

/// Builds the application router: files served from `root`, a directory
/// listing wherever no `index.html` exists, and the development CORS headers
/// stamped on every response.
///
/// `ServeDir` answers 405 by itself for anything other than GET/HEAD, so the
/// header layers sit outside it and cover that case too.
pub fn router(root: PathBuf) -> Router {
    let listing_root = root.clone();
    let fallback = move |uri: Uri| serve_directory_or_404(listing_root.clone(), uri);

    let files = ServeDir::new(root)
        .append_index_html_on_directories(true)
        .fallback(fallback.into_service());

    Router::new()
        .fallback_service(files)
        .layer(SetResponseHeaderLayer::if_not_present(
            HeaderName::from_static("access-control-allow-origin"),
            HeaderValue::from_static("*"),
        ))
        .layer(SetResponseHeaderLayer::if_not_present(
            HeaderName::from_static("access-control-allow-methods"),
            HeaderValue::from_static("GET, POST, OPTIONS"),
        ))
        .layer(SetResponseHeaderLayer::if_not_present(
            HeaderName::from_static("access-control-allow-headers"),
            HeaderValue::from_static("X-Requested-With"),
        ))
        .layer(middleware::from_fn(log_request))
}

/// Called by `ServeDir` when no file matched. Directories without an
/// `index.html` land here and get a rendered listing; everything else is 404.
async fn serve_directory_or_404(root: PathBuf, uri: Uri) -> Response {
    let Some(relative) = sanitize_path(uri.path()) else {
        return not_found();
    };

    let full = root.join(relative);
    match tokio::fs::metadata(&full).await {
        Ok(meta) if meta.is_dir() => match listing::render(uri.path(), &full).await {
            Ok(page) => (
                StatusCode::OK,
                [(CONTENT_TYPE, mime::TEXT_HTML_UTF_8.to_string())],
                page,
            )
                .into_response(),
            Err(err) => {
                log::error!("failed to list {}: {}", full.display(), err);
                (StatusCode::INTERNAL_SERVER_ERROR, "Failed to list directory").into_response()
            }
        },
        _ => not_found(),
    }
}

fn not_found() -> Response {
    (StatusCode::NOT_FOUND, "File not found").into_response()
}

/// Decodes the request path and rebuilds it from plain components, refusing
/// anything that could step outside the served root.
fn sanitize_path(path: &str) -> Option<PathBuf> {
    let decoded = percent_decode_str(path).decode_utf8().ok()?;
    let trimmed = decoded.trim_matches('/');

    let mut clean = PathBuf::new();
    for component in Path::new(trimmed).components() {
        match component {
            Component::Normal(segment) => clean.push(segment),
            Component::CurDir => {}
            Component::RootDir | Component::ParentDir | Component::Prefix(_) => return None,
        }
    }
    Some(clean)
}

async fn log_request(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_owned();
    let response = next.run(request).await;
    log::info!("\"{} {}\" {}", method, path, response.status().as_u16());
    response
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sanitize_keeps_plain_paths() {
        assert_eq!(sanitize_path("/media/clip.mp4"), Some(PathBuf::from("media/clip.mp4")));
        assert_eq!(sanitize_path("/"), Some(PathBuf::new()));
    }

    #[test]
    fn sanitize_decodes_percent_escapes() {
        assert_eq!(sanitize_path("/my%20file.txt"), Some(PathBuf::from("my file.txt")));
    }

    #[test]
    fn sanitize_rejects_traversal() {
        assert_eq!(sanitize_path("/../secret"), None);
        assert_eq!(sanitize_path("/%2e%2e/secret"), None);
        assert_eq!(sanitize_path("/a/../../b"), None);
    }

    #[test]
    fn sanitize_rejects_invalid_utf8() {
        assert_eq!(sanitize_path("/%ff%fe"), None);
    }
}
