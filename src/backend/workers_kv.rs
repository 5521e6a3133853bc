//! Cloudflare Workers KV REST store
//!
//! Values live at
//! `{base}/accounts/{account}/storage/kv/namespaces/{namespace}/values/{key}`.
//! Reads of a missing key come back as HTTP 404.

use async_trait::async_trait;
use hyper::body::Bytes;
use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, StatusCode, Url};

use super::{api_url, bearer_headers, StateStore, StoreError};
use crate::config::StoreConfig;
use crate::logger;

pub struct WorkersKvStore {
    client: Client,
    base_url: Url,
    account_id: String,
    namespace_id: String,
}

impl WorkersKvStore {
    pub fn new(config: &StoreConfig) -> Result<Self, StoreError> {
        if config.namespace_id.is_empty() {
            return Err(StoreError::Config(
                "store.namespace_id is required for workers_kv".to_string(),
            ));
        }
        let base_url =
            Url::parse(&config.base_url).map_err(|e| StoreError::Config(format!("base url: {e}")))?;
        let headers = bearer_headers(&config.api_token).map_err(StoreError::Config)?;
        let client = Client::builder().default_headers(headers).build()?;

        Ok(Self {
            client,
            base_url,
            account_id: config.account_id.clone(),
            namespace_id: config.namespace_id.clone(),
        })
    }

    fn value_url(&self, key: &str) -> Result<Url, StoreError> {
        let segments = [
            "accounts",
            self.account_id.as_str(),
            "storage",
            "kv",
            "namespaces",
            self.namespace_id.as_str(),
            "values",
            key,
        ];
        api_url(&self.base_url, segments)
            .ok_or_else(|| StoreError::Config("base url cannot carry a path".to_string()))
    }
}

async fn status_error(response: reqwest::Response) -> StoreError {
    let status = response.status().as_u16();
    let body = response.text().await.unwrap_or_default();
    StoreError::Status { status, body }
}

#[async_trait]
impl StateStore for WorkersKvStore {
    fn name(&self) -> &'static str {
        "workers_kv"
    }

    async fn get(&self, key: &str) -> Result<Option<Bytes>, StoreError> {
        let url = self.value_url(key)?;
        logger::log_debug(&format!("[Store] GET {url}"));

        let response = self.client.get(url).send().await?;
        match response.status() {
            StatusCode::NOT_FOUND => Ok(None),
            s if s.is_success() => Ok(Some(response.bytes().await?)),
            _ => Err(status_error(response).await),
        }
    }

    async fn put(&self, key: &str, value: Bytes) -> Result<(), StoreError> {
        let url = self.value_url(key)?;
        logger::log_debug(&format!("[Store] PUT {url} ({} bytes)", value.len()));

        let response = self
            .client
            .put(url)
            .header(CONTENT_TYPE, "application/json")
            .body(value)
            .send()
            .await?;
        if response.status().is_success() {
            Ok(())
        } else {
            Err(status_error(response).await)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    fn store_config() -> StoreConfig {
        let mut cfg = Config::defaults().store;
        cfg.account_id = "acc".to_string();
        cfg.namespace_id = "ns".to_string();
        cfg
    }

    #[test]
    fn test_value_url() {
        let store = WorkersKvStore::new(&store_config()).unwrap();
        let url = store.value_url("room 7").unwrap();
        assert_eq!(
            url.as_str(),
            "https://api.cloudflare.com/client/v4/accounts/acc/storage/kv/namespaces/ns/values/room%207"
        );
    }

    #[test]
    fn test_namespace_required() {
        let mut cfg = store_config();
        cfg.namespace_id.clear();
        assert!(matches!(
            WorkersKvStore::new(&cfg),
            Err(StoreError::Config(_))
        ));
    }
}
