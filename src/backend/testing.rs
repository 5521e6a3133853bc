//! Test doubles for the backend traits

use async_trait::async_trait;
use hyper::body::Bytes;
use std::sync::Mutex;

use super::{
    InferenceClient, InferenceError, InferenceRequest, InferenceResponse, StateStore, StoreError,
};

/// Replies with canned text (or a canned failure) and records every call
pub struct ScriptedInference {
    reply: Option<String>,
    calls: Mutex<Vec<(String, InferenceRequest)>>,
}

impl ScriptedInference {
    pub fn replying(text: &str) -> Self {
        Self {
            reply: Some(text.to_string()),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn failing() -> Self {
        Self {
            reply: None,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<(String, InferenceRequest)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl InferenceClient for ScriptedInference {
    fn name(&self) -> &'static str {
        "scripted"
    }

    async fn run(
        &self,
        model: &str,
        request: &InferenceRequest,
    ) -> Result<InferenceResponse, InferenceError> {
        self.calls
            .lock()
            .unwrap()
            .push((model.to_string(), request.clone()));
        match &self.reply {
            Some(text) => Ok(InferenceResponse {
                response: text.clone(),
            }),
            None => Err(InferenceError::Status {
                status: 503,
                body: "model unavailable".to_string(),
            }),
        }
    }
}

/// Every read and write fails
pub struct FailingStore;

#[async_trait]
impl StateStore for FailingStore {
    fn name(&self) -> &'static str {
        "failing"
    }

    async fn get(&self, _key: &str) -> Result<Option<Bytes>, StoreError> {
        Err(StoreError::Status {
            status: 500,
            body: "backend down".to_string(),
        })
    }

    async fn put(&self, _key: &str, _value: Bytes) -> Result<(), StoreError> {
        Err(StoreError::Status {
            status: 500,
            body: "backend down".to_string(),
        })
    }
}
