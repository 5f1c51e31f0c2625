//! Static server for the wasm build of the visualization.
//!
//! Serves the `trunk`/`wasm-bindgen` output directory with compression and
//! sensible cache headers; everything else about the course site is static
//! files, so this is the whole deployment story.

use axum::{
    Router,
    body::Body,
    http::{HeaderValue, Request, header},
    middleware::{self, Next},
    response::Response,
    routing,
};
use tower::ServiceBuilder;
use tower_http::{
    compression::CompressionLayer,
    services::{ServeDir, ServeFile},
};

async fn healthz() -> &'static str {
    "ok"
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    let dist = std::env::var("AULA_DIST").unwrap_or_else(|_| "../dist".to_string());
    let index = format!("{dist}/index.html");
    let static_files = ServeDir::new(&dist).not_found_service(ServeFile::new(index));

    let app = Router::new()
        .route("/healthz", routing::get(healthz))
        .fallback_service(static_files)
        .layer(
            ServiceBuilder::new()
                .layer(CompressionLayer::new().br(true).gzip(true))
                .layer(middleware::from_fn(cache_control)),
        );

    let port = std::env::var("PORT").unwrap_or_else(|_| "8080".to_string());
    let addr = format!("0.0.0.0:{port}");
    tracing::info!("Serving {dist} on http://{addr}");

    let listener = tokio::net::TcpListener::bind(&addr).await.unwrap();
    axum::serve(listener, app).await.unwrap();
}

async fn cache_control(req: Request<Body>, next: Next) -> Response {
    let path = req.uri().path().to_owned();
    let mut res = next.run(req).await;

    res.headers_mut().insert(
        header::CACHE_CONTROL,
        HeaderValue::from_static(cache_policy(&path)),
    );
    res
}

/// Cache policy per path: HTML always revalidates so a redeploy shows up on
/// the next load, fingerprinted bundles cache forever, everything else
/// caches but revalidates.
fn cache_policy(path: &str) -> &'static str {
    if path == "/" || path.ends_with(".html") {
        return "no-cache, must-revalidate";
    }
    if is_fingerprinted_asset(path) {
        "public, max-age=31536000, immutable"
    } else {
        "public, max-age=0, must-revalidate"
    }
}

// Heuristic: treat "foo.<hash>.wasm/js/css" as fingerprinted.
fn is_fingerprinted_asset(path: &str) -> bool {
    let file = path.rsplit('/').next().unwrap_or(path);
    let mut parts = file.split('.');

    // need at least name.hash.ext  => 3 parts minimum
    let (Some(_), Some(hash), Some(_)) = (parts.next(), parts.next(), parts.next()) else {
        return false;
    };

    hash.len() >= 8 && hash.chars().all(|c| c.is_ascii_hexdigit())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_html_always_revalidates() {
        assert_eq!(cache_policy("/"), "no-cache, must-revalidate");
        assert_eq!(cache_policy("/semana-1.html"), "no-cache, must-revalidate");
    }

    #[test]
    fn test_fingerprinted_bundle_is_immutable() {
        assert_eq!(
            cache_policy("/aula_viz.4f9a01cde2b7.wasm"),
            "public, max-age=31536000, immutable"
        );
    }

    #[test]
    fn test_plain_asset_revalidates() {
        assert_eq!(
            cache_policy("/styles.css"),
            "public, max-age=0, must-revalidate"
        );
    }

    #[test]
    fn test_fingerprint_heuristic() {
        assert!(is_fingerprinted_asset("/js/app.deadbeef01.js"));
        assert!(!is_fingerprinted_asset("/js/app.js"));
        assert!(!is_fingerprinted_asset("/js/app.v2.js"));
    }
}
