//! Cloudflare Workers AI REST client
//!
//! `POST {base}/accounts/{account}/ai/run/{model}` with the chat request as
//! JSON. The reply is wrapped in the standard API envelope.

use async_trait::async_trait;
use reqwest::{Client, Url};
use serde::Deserialize;

use super::{api_url, bearer_headers, envelope_errors, ApiMessage};
use super::{InferenceClient, InferenceError, InferenceRequest, InferenceResponse};
use crate::config::InferenceConfig;
use crate::logger;

#[derive(Debug, Deserialize)]
struct Envelope {
    #[serde(default)]
    success: bool,
    result: Option<InferenceResponse>,
    #[serde(default)]
    errors: Vec<ApiMessage>,
}

pub struct WorkersAiClient {
    client: Client,
    base_url: Url,
    account_id: String,
}

impl WorkersAiClient {
    pub fn new(config: &InferenceConfig) -> Result<Self, InferenceError> {
        let base_url = Url::parse(&config.base_url)
            .map_err(|e| InferenceError::Config(format!("base url: {e}")))?;
        let headers = bearer_headers(&config.api_token).map_err(InferenceError::Config)?;
        let client = Client::builder().default_headers(headers).build()?;

        Ok(Self {
            client,
            base_url,
            account_id: config.account_id.clone(),
        })
    }

    /// Model ids such as `@cf/meta/llama-3-8b-instruct` keep their slashes
    fn run_url(&self, model: &str) -> Result<Url, InferenceError> {
        let segments = ["accounts", self.account_id.as_str(), "ai", "run"]
            .into_iter()
            .chain(model.split('/'));
        api_url(&self.base_url, segments)
            .ok_or_else(|| InferenceError::Config("base url cannot carry a path".to_string()))
    }
}

/// Unwrap the API envelope into the generated text
fn parse_envelope(body: &[u8]) -> Result<InferenceResponse, InferenceError> {
    let envelope: Envelope = serde_json::from_slice(body)?;
    match envelope.result {
        Some(result) if envelope.success => Ok(result),
        _ => Err(InferenceError::Api(envelope_errors(&envelope.errors))),
    }
}

#[async_trait]
impl InferenceClient for WorkersAiClient {
    fn name(&self) -> &'static str {
        "workers_ai"
    }

    async fn run(
        &self,
        model: &str,
        request: &InferenceRequest,
    ) -> Result<InferenceResponse, InferenceError> {
        let url = self.run_url(model)?;
        logger::log_debug(&format!(
            "[Inference] POST {url} ({} messages)",
            request.messages.len()
        ));

        let response = self.client.post(url).json(request).send().await?;
        let status = response.status();
        let body = response.bytes().await?;

        if !status.is_success() {
            return Err(InferenceError::Status {
                status: status.as_u16(),
                body: String::from_utf8_lossy(&body).into_owned(),
            });
        }

        parse_envelope(&body)
    }
}
