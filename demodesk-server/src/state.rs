//! Application state shared across handlers

use std::sync::Arc;

use crate::config::EnvSource;
use crate::store::StoreHandle;

/// Shared application state. Built once at startup, never mutated.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    store: StoreHandle,
    env: EnvSource,
}

impl AppState {
    pub fn new(store: StoreHandle) -> Self {
        Self::with_env(store, EnvSource::Process)
    }

    pub fn with_env(store: StoreHandle, env: EnvSource) -> Self {
        Self {
            inner: Arc::new(AppStateInner { store, env }),
        }
    }

    pub fn store(&self) -> &StoreHandle {
        &self.inner.store
    }

    pub fn env(&self) -> &EnvSource {
        &self.inner.env
    }
}
