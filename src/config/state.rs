// Application state module
// Holds the loaded configuration and the backends shared by every request

use std::sync::Arc;

use super::types::{Config, StoreBackend};
use crate::backend::{
    InferenceClient, InferenceError, MemoryStore, StateStore, StoreError, WorkersAiClient,
    WorkersKvStore,
};
use crate::http::CorsHeaders;

#[derive(Debug, thiserror::Error)]
pub enum StateError {
    #[error(transparent)]
    Inference(#[from] InferenceError),
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error("{0}")]
    Cors(String),
}

/// Application state
pub struct AppState {
    pub config: Config,
    pub cors: CorsHeaders,
    pub inference: Arc<dyn InferenceClient>,
    pub store: Arc<dyn StateStore>,
}

impl AppState {
    /// Create `AppState` with the backends selected by configuration
    pub fn from_config(config: Config) -> Result<Self, StateError> {
        let inference: Arc<dyn InferenceClient> = Arc::new(WorkersAiClient::new(&config.inference)?);
        let store: Arc<dyn StateStore> = match config.store.backend {
            StoreBackend::Memory => Arc::new(MemoryStore::new()),
            StoreBackend::WorkersKv => Arc::new(WorkersKvStore::new(&config.store)?),
        };
        Self::with_backends(config, inference, store)
    }

    /// Create `AppState` around explicit backends
    pub fn with_backends(
        config: Config,
        inference: Arc<dyn InferenceClient>,
        store: Arc<dyn StateStore>,
    ) -> Result<Self, StateError> {
        let cors = CorsHeaders::from_config(&config.http.cors).map_err(StateError::Cors)?;
        Ok(Self {
            config,
            cors,
            inference,
            store,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_backend_by_default() {
        let state = AppState::from_config(Config::defaults()).unwrap();
        assert_eq!(state.store.name(), "memory");
        assert_eq!(state.inference.name(), "workers_ai");
    }

    #[test]
    fn test_workers_kv_needs_namespace() {
        let mut cfg = Config::defaults();
        cfg.store.backend = StoreBackend::WorkersKv;
        assert!(matches!(
            AppState::from_config(cfg),
            Err(StateError::Store(StoreError::Config(_)))
        ));
    }
}
