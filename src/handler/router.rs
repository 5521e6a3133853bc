//! Request routing dispatch module
//!
//! Entry point for HTTP request processing: method checks, crossword lookups
//! and dispatch of POST bodies by their `type`.

use crate::config::AppState;
use crate::handler::hint::extract_hint;
use crate::handler::payload::{self, DecodeError, HintRequest, PostRequest, SaveRequest, WordsRequest};
use crate::handler::prompts;
use crate::handler::record::CrosswordRecord;
use crate::http;
use crate::logger;
use http_body_util::{BodyExt, Full, LengthLimitError, Limited};
use hyper::body::{Body, Bytes};
use hyper::{Method, Request, Response, StatusCode};

const POST_ONLY_MESSAGE: &str = "Please send a POST request";
const INVALID_TYPE_MESSAGE: &str = "Please add valid type with post request";
const MISSING_ID_MESSAGE: &str = "Please provide a crossword id in the path";

/// Failures that escape the router and surface as a generic 500
#[derive(Debug, thiserror::Error)]
pub enum HandlerError {
    #[error("failed to read request body: {0}")]
    BodyRead(#[source] Box<dyn std::error::Error + Send + Sync>),
    #[error(transparent)]
    MalformedBody(DecodeError),
}

/// Main entry point for HTTP request handling
///
/// Every response produced here carries the CORS header set.
pub async fn handle_request<B>(
    req: Request<B>,
    state: &AppState,
) -> Result<Response<Full<Bytes>>, HandlerError>
where
    B: Body,
    B::Error: Into<Box<dyn std::error::Error + Send + Sync>>,
{
    let mut response = route_request(req, state).await?;
    state.cors.apply(response.headers_mut());
    Ok(response)
}

async fn route_request<B>(
    req: Request<B>,
    state: &AppState,
) -> Result<Response<Full<Bytes>>, HandlerError>
where
    B: Body,
    B::Error: Into<Box<dyn std::error::Error + Send + Sync>>,
{
    // 1. Preflight and lookups
    match *req.method() {
        Method::OPTIONS => return Ok(http::build_empty_response(StatusCode::OK)),
        Method::GET => return Ok(lookup_crossword(req.uri().path(), state).await),
        Method::POST => {}
        _ => {
            logger::log_warning(&format!("Method not allowed: {}", req.method()));
            return Ok(http::build_text_response(
                StatusCode::METHOD_NOT_ALLOWED,
                POST_ONLY_MESSAGE,
            ));
        }
    }

    // 2. Check body size
    if let Some(resp) = check_body_size(&req, state.config.http.max_body_size) {
        return Ok(resp);
    }

    // 3. Read and decode body; the limit also covers chunked bodies
    let limit = usize::try_from(state.config.http.max_body_size).unwrap_or(usize::MAX);
    let body = match Limited::new(req.into_body(), limit).collect().await {
        Ok(collected) => collected.to_bytes(),
        Err(e) if e.is::<LengthLimitError>() => {
            logger::log_error(&format!(
                "Request body too large: exceeded {limit} bytes while reading"
            ));
            return Ok(http::build_413_response());
        }
        Err(e) => return Err(HandlerError::BodyRead(e)),
    };

    let request = match payload::decode(&body) {
        Ok(request) => request,
        Err(DecodeError::UnsupportedType) => {
            logger::log_warning("POST without a supported type");
            return Ok(http::build_text_response(
                StatusCode::METHOD_NOT_ALLOWED,
                INVALID_TYPE_MESSAGE,
            ));
        }
        Err(e @ DecodeError::InvalidPayload { .. }) => {
            logger::log_warning(&e.to_string());
            return Ok(http::build_json_error(
                StatusCode::BAD_REQUEST,
                &format!("Invalid request body: {e}"),
            ));
        }
        Err(e @ DecodeError::Malformed(_)) => return Err(HandlerError::MalformedBody(e)),
    };

    // 4. Dispatch
    let kind = request.kind();
    let mut response = match request {
        PostRequest::Words(words) => generate_words(&words, state).await,
        PostRequest::CrosswordSave(save) => save_crossword(save, state).await,
        PostRequest::CrosswordHint(hint) => judge_hint(&hint, state).await,
    };
    response.extensions_mut().insert(kind);
    Ok(response)
}

/// Validate Content-Length header and return 413 if exceeded
fn check_body_size<B>(req: &Request<B>, max_body_size: u64) -> Option<Response<Full<Bytes>>> {
    let content_length = req.headers().get("content-length")?;
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

/// `GET /{id}`: stored bytes verbatim, or an empty body when nothing is stored
async fn lookup_crossword(path: &str, state: &AppState) -> Response<Full<Bytes>> {
    let key = path.strip_prefix('/').unwrap_or(path);
    if key.is_empty() {
        return http::build_text_response(StatusCode::BAD_REQUEST, MISSING_ID_MESSAGE);
    }

    match state.store.get(key).await {
        Ok(stored) => http::build_raw_json_response(StatusCode::OK, stored.unwrap_or_default()),
        Err(e) => {
            logger::log_error(&format!("Error loading crossword data for '{key}': {e}"));
            http::build_json_error(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to load crossword data",
            )
        }
    }
}

/// `type: words`: model output passed through as the JSON body
async fn generate_words(request: &WordsRequest, state: &AppState) -> Response<Full<Bytes>> {
    let prompt = prompts::words_prompt(request);
    match state
        .inference
        .run(&state.config.inference.words_model, &prompt)
        .await
    {
        Ok(output) => http::build_raw_json_response(StatusCode::OK, Bytes::from(output.response)),
        Err(e) => {
            logger::log_error(&format!("Error generating words: {e}"));
            http::build_json_error(StatusCode::INTERNAL_SERVER_ERROR, "Failed to generate words")
        }
    }
}

/// `type: crossword-save`: stamp and overwrite the record under `id`
async fn save_crossword(request: SaveRequest, state: &AppState) -> Response<Full<Bytes>> {
    let (key, record) = CrosswordRecord::from_save(request, chrono::Utc::now());
    let stored = match serde_json::to_vec(&record) {
        Ok(json) => state.store.put(&key, Bytes::from(json)).await.map_err(|e| e.to_string()),
        Err(e) => Err(e.to_string()),
    };

    match stored {
        Ok(()) => http::build_json_response(
            StatusCode::OK,
            &serde_json::json!({ "message": "Crossword data stored successfully" }),
        ),
        Err(e) => {
            logger::log_error(&format!("Error storing crossword data: {e}"));
            http::build_json_error(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to store crossword data",
            )
        }
    }
}

/// `type: crossword-hint`: bare `yes` or `no`
async fn judge_hint(request: &HintRequest, state: &AppState) -> Response<Full<Bytes>> {
    let prompt = prompts::hint_prompt(request);
    let verdict = match state
        .inference
        .run(&state.config.inference.hint_model, &prompt)
        .await
    {
        Ok(output) => extract_hint(&output.response).map_err(|e| e.to_string()),
        Err(e) => Err(e.to_string()),
    };

    match verdict {
        Ok(verdict) => http::build_raw_json_response(
            StatusCode::OK,
            Bytes::from_static(verdict.as_str().as_bytes()),
        ),
        Err(e) => {
            logger::log_error(&format!("Error getting hint: {e}"));
            http::build_json_error(StatusCode::INTERNAL_SERVER_ERROR, "Failed to get hint")
        }
    }
}
