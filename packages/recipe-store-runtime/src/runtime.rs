//! Runtime loop owning the recipe store.

use recipe_store_core::RecipeStore;
use tokio::sync::mpsc;

use crate::api_handlers::{handle_api_request, RequestOutcome};
use crate::api_request::ApiRequest;

/// Request counters kept by the runtime.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RuntimeStats {
    /// Requests taken off the channel
    pub processed: u64,
    /// Requests rejected by validation or lookup
    pub rejected: u64,
    /// Create, update, and delete requests that changed the store
    pub mutations: u64,
}

/// Main runtime loop
pub struct Runtime {
    /// Recipe collection, owned exclusively by the runtime
    store: RecipeStore,
    /// API request receiver
    api_rx: mpsc::Receiver<ApiRequest>,
    /// Request counters
    stats: RuntimeStats,
}

impl Runtime {
    /// Create a new runtime
    pub fn new(store: RecipeStore, api_rx: mpsc::Receiver<ApiRequest>) -> Self {
        Self {
            store,
            api_rx,
            stats: RuntimeStats::default(),
        }
    }

    /// Returns the store for inspection.
    pub fn store(&self) -> &RecipeStore {
        &self.store
    }

    pub fn stats(&self) -> RuntimeStats {
        self.stats
    }

    /// Applies every request currently queued, without waiting for more.
    ///
    /// # Returns
    /// Number of requests processed.
    pub fn process_pending(&mut self) -> usize {
        let mut processed = 0;
        while let Ok(req) = self.api_rx.try_recv() {
            self.apply(req);
            processed += 1;
        }
        processed
    }

    /// Runs until every request sender has been dropped.
    ///
    /// # Returns
    /// The store, handed back so the caller decides when it is discarded.
    pub async fn run(mut self) -> RecipeStore {
        tracing::info!("Runtime started with {} recipes", self.store.len());
        while let Some(req) = self.api_rx.recv().await {
            self.apply(req);
        }
        tracing::info!(
            processed = self.stats.processed,
            rejected = self.stats.rejected,
            mutations = self.stats.mutations,
            "Runtime stopped with {} recipes",
            self.store.len()
        );
        self.store
    }

    fn apply(&mut self, req: ApiRequest) {
        let is_mutation = req.is_mutation();
        self.stats.processed += 1;
        match handle_api_request(&mut self.store, req) {
            RequestOutcome::Applied if is_mutation => self.stats.mutations += 1,
            RequestOutcome::Applied | RequestOutcome::Unchanged => {}
            RequestOutcome::Rejected => self.stats.rejected += 1,
        }
    }
}
