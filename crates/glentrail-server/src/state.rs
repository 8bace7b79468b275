// SPDX-License-Identifier: Apache-2.0

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use glentrail_core::time::now_ms;
use glentrail_store::{Store, StoreError};

use crate::config::ServerConfig;

/// Shared handler state. The store is a single SQLite connection behind a
/// mutex; handlers reach it through [`AppState::with_store`], which moves the
/// call onto the blocking pool so the async runtime never holds the lock.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<ServerConfig>,
    store: Arc<Mutex<Store>>,
    request_id_seed: Arc<AtomicU64>,
}

impl AppState {
    #[must_use]
    pub fn new(store: Store, config: ServerConfig) -> Self {
        Self {
            config: Arc::new(config),
            store: Arc::new(Mutex::new(store)),
            request_id_seed: Arc::new(AtomicU64::new(now_ms() as u64)),
        }
    }

    pub(crate) fn next_request_id(&self) -> String {
        let id = self.request_id_seed.fetch_add(1, Ordering::Relaxed);
        format!("req-{id:016x}")
    }

    /// Runs `f` against the store on a blocking thread. A poisoned mutex or a
    /// cancelled task surfaces as `StoreError::Internal` rather than a panic.
    pub(crate) async fn with_store<T, F>(&self, f: F) -> Result<T, StoreError>
    where
        T: Send + 'static,
        F: FnOnce(&mut Store) -> Result<T, StoreError> + Send + 'static,
    {
        let store = Arc::clone(&self.store);
        tokio::task::spawn_blocking(move || {
            let mut guard = store
                .lock()
                .map_err(|_| StoreError::Internal("store mutex poisoned".to_string()))?;
            f(&mut guard)
        })
        .await
        .map_err(|e| StoreError::Internal(format!("store task failed: {e}")))?
    }
}
