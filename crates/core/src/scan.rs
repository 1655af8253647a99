//! In-memory scan status projection.
//!
//! [`ScanState`] is the single source of truth for the scan lifecycle:
//! the idle/scanning phase, the append-only result history, and the set
//! of model IDs persisted during this process lifetime. It is plain
//! synchronous data; the API crate wraps it in a mutex and funnels every
//! mutation through the methods here.

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::types::ModelId;

/// Placeholder for name/author when a scan fails before any model
/// metadata is available.
pub const UNKNOWN: &str = "Unknown";

/// Scan lifecycle phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ScanPhase {
    Idle,
    Scanning,
}

/// Outcome of a single scan attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ScanOutcome {
    Success,
    Error,
}

/// One entry in the scan history.
///
/// Appended once per completed attempt, never mutated or removed.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanResult {
    /// 1-based position in the history, as a string.
    pub id: String,
    pub timestamp: DateTime<Utc>,
    pub model_id: ModelId,
    pub model_name: String,
    pub author: String,
    /// Number of generation examples extracted from the catalog document.
    pub found_items: usize,
    pub status: ScanOutcome,
}

/// The scan status projection.
///
/// One instance exists per process, created at startup and mutated only
/// through the methods below. `status` and `is_scanning` are tracked as
/// separate fields because the wire format exposes both.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanState {
    status: ScanPhase,
    is_scanning: bool,
    /// Completion time of the most recent attempt.
    last_scan: Option<DateTime<Utc>>,
    current_model: Option<ModelId>,
    current_results: Vec<ScanResult>,
    /// Model IDs successfully persisted this process lifetime.
    scanned_ids: BTreeSet<ModelId>,
    /// Most recent failure message, cleared when a new scan is admitted.
    error: Option<String>,
}

impl ScanState {
    pub fn new() -> Self {
        Self {
            status: ScanPhase::Idle,
            is_scanning: false,
            last_scan: None,
            current_model: None,
            current_results: Vec::new(),
            scanned_ids: BTreeSet::new(),
            error: None,
        }
    }

    pub fn is_scanning(&self) -> bool {
        self.is_scanning
    }

    pub fn current_model(&self) -> Option<ModelId> {
        self.current_model
    }

    pub fn results(&self) -> &[ScanResult] {
        &self.current_results
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Whether `model_id` was persisted during this process lifetime.
    pub fn was_scanned(&self, model_id: ModelId) -> bool {
        self.scanned_ids.contains(&model_id)
    }

    /// Enter the scanning phase for `model_id` and clear any stale error.
    ///
    /// Callers must have checked `is_scanning` under the same lock guard;
    /// the admit decision and this transition form one critical section.
    pub fn begin(&mut self, model_id: ModelId) {
        self.status = ScanPhase::Scanning;
        self.is_scanning = true;
        self.current_model = Some(model_id);
        self.error = None;
    }

    /// Record a successful attempt and remember the ID as persisted.
    pub fn record_success(
        &mut self,
        model_id: ModelId,
        model_name: &str,
        author: &str,
        found_items: usize,
        now: DateTime<Utc>,
    ) {
        self.push_result(model_id, model_name, author, found_items, ScanOutcome::Success, now);
        self.scanned_ids.insert(model_id);
    }

    /// Record a failed attempt and expose `message` as the current error.
    ///
    /// The ID is deliberately not added to `scanned_ids`, so a later
    /// retry is not short-circuited by the de-duplication check.
    pub fn record_failure(
        &mut self,
        model_id: ModelId,
        model_name: &str,
        author: &str,
        found_items: usize,
        message: String,
        now: DateTime<Utc>,
    ) {
        self.push_result(model_id, model_name, author, found_items, ScanOutcome::Error, now);
        self.error = Some(message);
    }

    /// Leave the scanning phase and stamp the completion time.
    ///
    /// Runs after every attempt regardless of outcome; the projection
    /// must never be left in the scanning phase by a finished worker.
    pub fn finish(&mut self, now: DateTime<Utc>) {
        self.status = ScanPhase::Idle;
        self.is_scanning = false;
        self.last_scan = Some(now);
        self.current_model = None;
    }

    /// Reset phase, flag, current model, and error to their idle values.
    ///
    /// The result history and the de-duplication set survive a clear.
    pub fn clear(&mut self) {
        self.status = ScanPhase::Idle;
        self.is_scanning = false;
        self.current_model = None;
        self.error = None;
    }

    fn push_result(
        &mut self,
        model_id: ModelId,
        model_name: &str,
        author: &str,
        found_items: usize,
        status: ScanOutcome,
        now: DateTime<Utc>,
    ) {
        let id = (self.current_results.len() + 1).to_string();
        self.current_results.push(ScanResult {
            id,
            timestamp: now,
            model_id,
            model_name: model_name.to_string(),
            author: author.to_string(),
            found_items,
            status,
        });
    }
}

impl Default for ScanState {
    fn default() -> Self {
        Self::new()
    }
}
