//! Request handler module
//!
//! Routes crossword requests to the inference service and the state store,
//! and wraps each exchange with access logging.

mod hint;
mod payload;
mod prompts;
mod record;
pub mod router;

// Re-export main entry point
pub use router::{handle_request, HandlerError};

use crate::config::AppState;
use crate::http;
use crate::logger::{self, AccessLogEntry};
use http_body_util::Full;
use hyper::body::{Body, Bytes};
use hyper::header::{HeaderName, HeaderValue, REFERER, SERVER, USER_AGENT};
use hyper::{Request, Response};
use payload::RequestKind;
use std::net::SocketAddr;
use std::time::Instant;

/// Serve one request end to end
///
/// Router failures become a generic 500 (still carrying CORS headers). The
/// `Server` header is stamped and an access log line written when enabled.
pub async fn serve<B>(req: Request<B>, peer_addr: SocketAddr, state: &AppState) -> Response<Full<Bytes>>
where
    B: Body,
    B::Error: Into<Box<dyn std::error::Error + Send + Sync>>,
{
    let started = Instant::now();
    let mut entry = state.config.logging.access_log.then(|| access_entry(&req, peer_addr));

    let mut response = match handle_request(req, state).await {
        Ok(response) => response,
        Err(e) => {
            logger::log_error(&format!("Unhandled request failure: {e}"));
            let mut response = http::build_500_response();
            state.cors.apply(response.headers_mut());
            response
        }
    };

    if let Ok(server) = HeaderValue::from_str(&state.config.http.server_name) {
        response.headers_mut().insert(SERVER, server);
    }

    if let Some(entry) = entry.as_mut() {
        entry.status = response.status().as_u16();
        entry.body_bytes = response.body().size_hint().exact().unwrap_or(0);
        entry.request_time_us = u64::try_from(started.elapsed().as_micros()).unwrap_or(u64::MAX);
        entry.request_type = response.extensions().get::<RequestKind>().map(|k| k.as_str());
        logger::log_access(entry, &state.config.logging.access_log_format);
    }

    response
}

fn access_entry<B>(req: &Request<B>, peer_addr: SocketAddr) -> AccessLogEntry {
    let header = |name: HeaderName| {
        req.headers()
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(ToString::to_string)
    };

    let mut entry = AccessLogEntry::new(
        peer_addr.ip().to_string(),
        req.method().to_string(),
        req.uri().path().to_string(),
    );
    entry.query = req.uri().query().map(ToString::to_string);
    entry.http_version = match req.version() {
        hyper::Version::HTTP_10 => "1.0",
        hyper::Version::HTTP_2 => "2",
        _ => "1.1",
    }
    .to_string();
    entry.referer = header(REFERER);
    entry.user_agent = header(USER_AGENT);
    entry
}
