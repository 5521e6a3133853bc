//! External backends
//!
//! The router talks to two collaborators through traits: an inference
//! service and a key-value store. Remote implementations use the Cloudflare
//! REST API; the in-memory store serves local runs and tests.

mod inference;
mod store;
mod workers_ai;
mod workers_kv;

#[cfg(test)]
pub mod testing;

pub use inference::{
    ChatMessage, InferenceClient, InferenceError, InferenceRequest, InferenceResponse, Role,
};
pub use store::{MemoryStore, StateStore, StoreError};
pub use workers_ai::WorkersAiClient;
pub use workers_kv::WorkersKvStore;

use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use reqwest::Url;

/// Join path segments onto an API base URL, encoding each segment
fn api_url<'a>(base: &Url, segments: impl IntoIterator<Item = &'a str>) -> Option<Url> {
    let mut url = base.clone();
    url.path_segments_mut().ok()?.pop_if_empty().extend(segments);
    Some(url)
}

/// Default headers carrying the bearer token
fn bearer_headers(token: &str) -> Result<HeaderMap, String> {
    let mut headers = HeaderMap::new();
    let value = HeaderValue::from_str(&format!("Bearer {token}"))
        .map_err(|e| format!("invalid api token: {e}"))?;
    headers.insert(AUTHORIZATION, value);
    Ok(headers)
}

/// First `errors[].message` entries of a Cloudflare API envelope, joined
fn envelope_errors(errors: &[ApiMessage]) -> String {
    if errors.is_empty() {
        return "unknown error".to_string();
    }
    errors
        .iter()
        .map(|e| e.message.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}

#[derive(Debug, serde::Deserialize)]
struct ApiMessage {
    #[serde(default)]
    message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_url_encodes_segments() {
        let base = Url::parse("https://api.example.com/client/v4/").unwrap();
        let url = api_url(&base, ["accounts", "acc", "values", "a b/c"]).unwrap();
        assert_eq!(
            url.as_str(),
            "https://api.example.com/client/v4/accounts/acc/values/a%20b%2Fc"
        );
    }

    #[test]
    fn test_api_url_without_trailing_slash() {
        let base = Url::parse("https://api.example.com/client/v4").unwrap();
        let url = api_url(&base, ["ai", "run"]).unwrap();
        assert_eq!(url.path(), "/client/v4/ai/run");
    }

    #[test]
    fn test_envelope_errors() {
        assert_eq!(envelope_errors(&[]), "unknown error");
        let errors = vec![
            ApiMessage {
                message: "bad model".to_string(),
            },
            ApiMessage {
                message: "quota".to_string(),
            },
        ];
        assert_eq!(envelope_errors(&errors), "bad model; quota");
    }
}
