//! Scan job controller.
//!
//! [`ScanManager`] owns the scan status projection and enforces the
//! single-flight policy: at most one scan worker exists at any time.
//! The admit check and the transition into `scanning` happen under one
//! lock acquisition, so concurrent start requests cannot both be
//! admitted. The worker's handle is retained so shutdown can cancel it
//! and wait for it to wind down.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use lorascan_airtable::client::AirtableError;
use lorascan_airtable::store::LoraStore;
use lorascan_civitai::client::CivitaiClient;
use lorascan_civitai::extract::extract_lora;
use lorascan_core::scan::{ScanState, UNKNOWN};
use lorascan_core::types::ModelId;

/// How long shutdown waits for an in-flight scan before abandoning it.
const SHUTDOWN_GRACE: Duration = Duration::from_secs(5);

/// Orchestrates the fetch -> extract -> persist pipeline as a
/// single-flight background task with a pollable status projection.
///
/// Created once at application startup. The returned `Arc` is cheaply
/// cloneable into Axum state.
pub struct ScanManager {
    state: Mutex<ScanState>,
    catalog: CivitaiClient,
    store: LoraStore,
    /// Handle of the most recently spawned worker.
    worker: Mutex<Option<JoinHandle<()>>>,
    /// Cancelled during shutdown.
    cancel: CancellationToken,
}

/// Outcome of a start request.
#[derive(Debug)]
pub enum StartScan {
    /// A worker was spawned for this model.
    Started(ModelId),
    /// A scan is already in flight; no new work was admitted.
    AlreadyScanning {
        /// The model the in-flight worker is processing.
        current_model: Option<ModelId>,
    },
}

/// Result of an existence probe.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelPresence {
    /// Persisted by this process; answered without a remote call.
    RecentlyScanned,
    /// Found in the store by formula lookup.
    InStore,
    /// Not known anywhere.
    New,
}

impl ScanManager {
    pub fn new(catalog: CivitaiClient, store: LoraStore) -> Arc<Self> {
        Arc::new(Self {
            state: Mutex::new(ScanState::new()),
            catalog,
            store,
            worker: Mutex::new(None),
            cancel: CancellationToken::new(),
        })
    }

    /// Admit a scan for `model_id`, unless one is already in flight.
    ///
    /// The check and the transition into `scanning` share one lock
    /// guard, so two concurrent calls can never both spawn a worker.
    pub async fn start_scan(self: &Arc<Self>, model_id: ModelId) -> StartScan {
        {
            let mut state = self.state.lock().await;
            if state.is_scanning() {
                tracing::info!(
                    model_id,
                    current_model = ?state.current_model(),
                    "Scan request rejected, another scan is in flight"
                );
                return StartScan::AlreadyScanning {
                    current_model: state.current_model(),
                };
            }
            state.begin(model_id);
        }

        let manager = Arc::clone(self);
        let handle = tokio::spawn(async move {
            manager.run_scan(model_id).await;
        });
        *self.worker.lock().await = Some(handle);

        tracing::info!(model_id, "Scan started");
        StartScan::Started(model_id)
    }

    /// Snapshot of the status projection. Never waits on the worker.
    pub async fn status(&self) -> ScanState {
        self.state.lock().await.clone()
    }

    /// Reset phase, flag, current model, and error to their idle
    /// values. Scan history and the de-duplication set survive.
    pub async fn clear(&self) {
        self.state.lock().await.clear();
        tracing::info!("Scan status cleared");
    }

    /// Whether this model is already persisted.
    ///
    /// IDs scanned this process lifetime answer without a remote call;
    /// everything else goes through the store's formula lookup.
    pub async fn check_exists(&self, model_id: ModelId) -> Result<ModelPresence, AirtableError> {
        if self.state.lock().await.was_scanned(model_id) {
            return Ok(ModelPresence::RecentlyScanned);
        }
        if self.store.model_exists(model_id).await? {
            Ok(ModelPresence::InStore)
        } else {
            Ok(ModelPresence::New)
        }
    }

    /// Cancel any in-flight worker and wait briefly for it to stop.
    pub async fn shutdown(&self) {
        self.cancel.cancel();
        let handle = self.worker.lock().await.take();
        if let Some(handle) = handle {
            if tokio::time::timeout(SHUTDOWN_GRACE, handle).await.is_err() {
                tracing::warn!("Scan worker did not stop within the grace period");
            }
        }
    }

    /// One scan unit of work.
    ///
    /// Every exit path (fetch miss, store failure, cancellation) falls
    /// through to `finish`, so the projection can never be left in the
    /// scanning phase by a worker that has stopped running.
    async fn run_scan(&self, model_id: ModelId) {
        tokio::select! {
            _ = self.cancel.cancelled() => {
                tracing::warn!(model_id, "Scan cancelled during shutdown");
            }
            () = self.scan_once(model_id) => {}
        }

        self.state.lock().await.finish(Utc::now());
        tracing::info!(model_id, "Scan finished");
    }

    /// The fetch -> extract -> persist pipeline for one model.
    async fn scan_once(&self, model_id: ModelId) {
        let doc = match self.catalog.fetch_model(model_id).await {
            Ok(doc) => doc,
            Err(e) => {
                tracing::warn!(model_id, error = %e, "Failed to fetch model from catalog");
                let mut state = self.state.lock().await;
                state.record_failure(model_id, UNKNOWN, UNKNOWN, 0, e.to_string(), Utc::now());
                return;
            }
        };

        let (lora, examples) = extract_lora(&doc);
        tracing::info!(
            model_id,
            name = %lora.name,
            examples = examples.len(),
            "Extracted LoRA data"
        );

        let author = lora.author.as_deref().unwrap_or(UNKNOWN);
        match self.store.save(&lora, &examples).await {
            Ok(record_id) => {
                tracing::info!(model_id, record_id = %record_id, "Scan completed");
                let mut state = self.state.lock().await;
                state.record_success(model_id, &lora.name, author, examples.len(), Utc::now());
            }
            Err(e) => {
                tracing::error!(model_id, error = %e, "Failed to save scan to store");
                let mut state = self.state.lock().await;
                state.record_failure(
                    model_id,
                    &lora.name,
                    author,
                    examples.len(),
                    e.to_string(),
                    Utc::now(),
                );
            }
        }
    }
}
