//! Ranking session state machine.
//!
//! Owns job selection, the exploration parameters (k, epsilon), the fetch
//! lifecycle, the shown-set, and staleness detection. All state lives in a
//! single `RankingSession` mutated only through the transition functions
//! below; no other flow touches it.
//!
//! Network legs are split into `begin_*` / `apply_*` transitions: `begin`
//! issues a monotonically increasing ticket, `apply` compares the ticket
//! against the most recently issued one and discards superseded responses
//! entirely. The async convenience wrappers run both halves for the common
//! sequential path.

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::api::types::{
    JobRecord, ModelMeta, ModelState, RankedCandidate, RankingRequest, RankingResponse,
    DEFAULT_WEIGHTS,
};
use crate::api::{ApiError, MatchApi};
use crate::errors::CoreError;
use crate::notify::{Notification, NotificationSink};

/// Upper bound for the exploration rate, enforced at the request boundary.
pub const EPSILON_MAX: f64 = 0.30;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Fetching,
    Ready,
    Submitting,
    Error,
}

/// Ticket identifying one issued rankings fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchTicket(u64);

/// Ticket identifying one issued model pull.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModelTicket(u64);

/// What happened when a response was applied to the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApplyOutcome {
    Applied,
    /// Transport failure absorbed without an error state (model pulls).
    Failed,
    /// The request was superseded by a later one; the response was
    /// discarded entirely and no state changed.
    Stale,
}

pub struct RankingSession {
    api: Arc<dyn MatchApi>,
    notifier: Arc<dyn NotificationSink>,
    selected_job: Option<(i64, String)>,
    /// Raw user-entered k, kept as typed for display. Validated only at
    /// the request boundary.
    k: i64,
    epsilon: f64,
    weights: Vec<f64>,
    model_meta: ModelMeta,
    candidates: Vec<RankedCandidate>,
    shown_ids: Vec<i64>,
    phase: Phase,
    fetch_seq: u64,
    model_seq: u64,
}

impl RankingSession {
    pub fn new(
        api: Arc<dyn MatchApi>,
        notifier: Arc<dyn NotificationSink>,
        default_k: u32,
        default_epsilon: f64,
    ) -> Self {
        Self {
            api,
            notifier,
            selected_job: None,
            k: i64::from(default_k),
            epsilon: default_epsilon,
            weights: DEFAULT_WEIGHTS.to_vec(),
            model_meta: ModelMeta::default(),
            candidates: Vec::new(),
            shown_ids: Vec::new(),
            phase: Phase::Idle,
            fetch_seq: 0,
            model_seq: 0,
        }
    }

    // ────────────────────────────────────────────────────────────────────
    // Job selection and parameters
    // ────────────────────────────────────────────────────────────────────

    /// Selects a job and clears shortlist state from any previous job.
    /// Also invalidates in-flight fetches: their shown-set would belong to
    /// the old (job, fetch) pair.
    pub fn select_job(&mut self, job_id: i64, title: &str) {
        self.selected_job = Some((job_id, title.to_string()));
        self.candidates.clear();
        self.shown_ids.clear();
        self.fetch_seq += 1;
        self.phase = Phase::Idle;
        debug!(job_id, "Job selected");
    }

    /// Auto-selects the only job when exactly one exists and none is
    /// selected yet.
    pub fn auto_select(&mut self, jobs: &[JobRecord]) {
        if self.selected_job.is_none() {
            if let [only] = jobs {
                self.select_job(only.id, &only.title);
            }
        }
    }

    /// Stores the raw k value for display. No clamping here; the request
    /// boundary refuses non-positive values.
    pub fn set_k(&mut self, k: i64) {
        self.k = k;
    }

    pub fn set_epsilon(&mut self, epsilon: f64) {
        self.epsilon = epsilon;
    }

    // ────────────────────────────────────────────────────────────────────
    // Rankings fetch lifecycle
    // ────────────────────────────────────────────────────────────────────

    /// Validates preconditions and issues a fetch ticket. Phase moves to
    /// `Fetching`; epsilon is clamped into `[0, EPSILON_MAX]` on the
    /// outgoing request only (stored value untouched).
    pub fn begin_fetch(&mut self) -> Result<(FetchTicket, RankingRequest), CoreError> {
        let Some((job_id, _)) = self.selected_job else {
            self.notifier.push(Notification::error(
                "Select a job",
                "Choose a job before fetching rankings.",
            ));
            return Err(CoreError::NoJobSelected);
        };
        if self.k < 1 {
            self.notifier.push(Notification::error(
                "Invalid Top-K",
                "Top-K must be a positive whole number.",
            ));
            return Err(CoreError::InvalidTopK(self.k));
        }

        self.fetch_seq += 1;
        self.phase = Phase::Fetching;
        let request = RankingRequest {
            job_id,
            k: self.k as u32,
            epsilon: self.epsilon.clamp(0.0, EPSILON_MAX),
        };
        debug!(seq = self.fetch_seq, job_id, k = request.k, epsilon = request.epsilon, "Fetch issued");
        Ok((FetchTicket(self.fetch_seq), request))
    }

    /// Applies a fetch response. Superseded tickets are discarded entirely:
    /// the shown-set must always correspond to the most recently initiated
    /// fetch, never an interleaved older one. On success, weights,
    /// candidates, and shown-set are replaced together; no partial update
    /// is ever visible. On failure, prior state is retained untouched and
    /// the failure surfaces as `RankingsUnavailable`.
    pub fn apply_fetch(
        &mut self,
        ticket: FetchTicket,
        result: Result<RankingResponse, ApiError>,
    ) -> Result<ApplyOutcome, CoreError> {
        if ticket.0 != self.fetch_seq {
            debug!(ticket = ticket.0, current = self.fetch_seq, "Discarding stale fetch response");
            return Ok(ApplyOutcome::Stale);
        }

        match result {
            Ok(response) => {
                self.weights = if response.weights.is_empty() {
                    DEFAULT_WEIGHTS.to_vec()
                } else {
                    response.weights
                };
                self.shown_ids = response
                    .candidates
                    .iter()
                    .map(|c| c.candidate_id)
                    .collect();
                self.candidates = response.candidates;
                self.phase = Phase::Ready;
                info!(
                    job_id = response.job_id,
                    shown = self.shown_ids.len(),
                    "Rankings applied"
                );
                Ok(ApplyOutcome::Applied)
            }
            Err(e) => {
                warn!(error = %e, "Rankings fetch failed; prior shortlist retained");
                self.phase = Phase::Error;
                self.notifier.push(Notification::error(
                    "Rankings failed",
                    "Ensure the backend is running and resumes are ingested.",
                ));
                Err(CoreError::RankingsUnavailable(e))
            }
        }
    }

    /// Sequential fetch: begin, await the transport, apply. Validation
    /// errors are returned before any network contact.
    pub async fn fetch_rankings(&mut self) -> Result<ApplyOutcome, CoreError> {
        let (ticket, request) = self.begin_fetch()?;
        let result = self.api.fetch_rankings(&request).await;
        self.apply_fetch(ticket, result)
    }

    // ────────────────────────────────────────────────────────────────────
    // Model pull lifecycle
    // ────────────────────────────────────────────────────────────────────

    /// Issues a model-pull ticket. Best effort: no phase change, no
    /// preconditions.
    pub fn begin_model_pull(&mut self) -> ModelTicket {
        self.model_seq += 1;
        ModelTicket(self.model_seq)
    }

    /// Applies a model snapshot under the same last-issued-wins rule as
    /// fetches. Failure is absorbed (`ModelUnavailable` by design): the UI
    /// must remain usable on stale or default weights, so there is no
    /// error phase and no notification.
    pub fn apply_model(
        &mut self,
        ticket: ModelTicket,
        result: Result<ModelState, ApiError>,
    ) -> ApplyOutcome {
        if ticket.0 != self.model_seq {
            debug!(ticket = ticket.0, current = self.model_seq, "Discarding stale model response");
            return ApplyOutcome::Stale;
        }

        match result {
            Ok(state) => {
                self.weights = if state.weights.is_empty() {
                    DEFAULT_WEIGHTS.to_vec()
                } else {
                    state.weights
                };
                self.model_meta = ModelMeta {
                    learning_rate: state.lr,
                    l2: state.l2,
                    updated_at: state.updated_at,
                };
                ApplyOutcome::Applied
            }
            Err(e) => {
                debug!(error = %CoreError::ModelUnavailable(e), "Model pull absorbed");
                ApplyOutcome::Failed
            }
        }
    }

    /// Sequential best-effort model pull.
    pub async fn pull_model(&mut self) -> ApplyOutcome {
        let ticket = self.begin_model_pull();
        let result = self.api.fetch_model().await;
        self.apply_model(ticket, result)
    }

    // ────────────────────────────────────────────────────────────────────
    // Accessors
    // ────────────────────────────────────────────────────────────────────

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn selected_job_id(&self) -> Option<i64> {
        self.selected_job.as_ref().map(|(id, _)| *id)
    }

    /// Label for the current job: cached title, or a placeholder.
    pub fn job_label(&self) -> String {
        match &self.selected_job {
            Some((_, title)) if !title.is_empty() => title.clone(),
            Some((id, _)) => format!("Job #{id}"),
            None => "No job selected".to_string(),
        }
    }

    pub fn k(&self) -> i64 {
        self.k
    }

    pub fn epsilon(&self) -> f64 {
        self.epsilon
    }

    pub fn weights(&self) -> &[f64] {
        &self.weights
    }

    pub fn model_meta(&self) -> &ModelMeta {
        &self.model_meta
    }

    pub fn candidates(&self) -> &[RankedCandidate] {
        &self.candidates
    }

    /// Ordered candidate ids of the most recently applied fetch. Required
    /// verbatim in a feedback submission for correct attribution.
    pub fn shown_ids(&self) -> &[i64] {
        &self.shown_ids
    }

    pub(crate) fn set_phase(&mut self, phase: Phase) {
        self.phase = phase;
    }

    pub(crate) fn api(&self) -> Arc<dyn MatchApi> {
        Arc::clone(&self.api)
    }

    pub(crate) fn notify(&self, notification: Notification) {
        self.notifier.push(notification);
    }
}
