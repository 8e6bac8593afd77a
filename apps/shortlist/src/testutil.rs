//! Shared test fixtures: a scripted in-memory `MatchApi` with a call
//! journal, and candidate/response constructors.

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::api::types::{
    CreateJobRequest, CreateJobResponse, FeedbackRequest, FeedbackResponse, ModelState,
    RankedCandidate, RankingRequest, RankingResponse, ResumeIngested, DEFAULT_WEIGHTS,
};
use crate::api::{ApiError, MatchApi};

pub fn make_candidate(candidate_id: i64, score: f64) -> RankedCandidate {
    RankedCandidate {
        candidate_id,
        full_name: format!("Candidate {candidate_id}"),
        email: format!("c{candidate_id}@example.com"),
        phone: "555-111-2222".to_string(),
        skills: vec!["rust".to_string(), "sql".to_string()],
        years_exp: 5.0,
        edu_level_raw: 2,
        sem_sim: 0.9,
        skill_overlap: 0.5,
        jaccard: 0.4,
        years: 0.5,
        edu: 0.5,
        score,
        explore: false,
    }
}

pub fn make_ranking_response(job_id: i64, candidate_ids: &[i64]) -> RankingResponse {
    RankingResponse {
        job_id,
        weights: DEFAULT_WEIGHTS.to_vec(),
        candidates: candidate_ids
            .iter()
            .map(|id| make_candidate(*id, 0.65))
            .collect(),
    }
}

pub fn make_model_state(weights: &[f64]) -> ModelState {
    ModelState {
        weights: weights.to_vec(),
        lr: 0.1,
        l2: 1e-4,
        updated_at: None,
    }
}

pub fn api_down() -> ApiError {
    ApiError::Api {
        status: 500,
        message: "service unavailable".to_string(),
    }
}

/// Scripted `MatchApi`. Responses are consumed FIFO from per-endpoint
/// queues; an empty queue yields a canned success so happy-path tests stay
/// short. Every network call is journaled in order.
#[derive(Default)]
pub struct FakeApi {
    calls: Mutex<Vec<&'static str>>,
    rankings: Mutex<VecDeque<Result<RankingResponse, ApiError>>>,
    models: Mutex<VecDeque<Result<ModelState, ApiError>>>,
    feedbacks: Mutex<VecDeque<Result<FeedbackResponse, ApiError>>>,
    uploads: Mutex<VecDeque<Result<ResumeIngested, ApiError>>>,
    pub last_ranking_request: Mutex<Option<RankingRequest>>,
    pub last_feedback_request: Mutex<Option<FeedbackRequest>>,
}

impl FakeApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_rankings(&self, result: Result<RankingResponse, ApiError>) {
        self.rankings.lock().unwrap().push_back(result);
    }

    pub fn push_model(&self, result: Result<ModelState, ApiError>) {
        self.models.lock().unwrap().push_back(result);
    }

    pub fn push_feedback(&self, result: Result<FeedbackResponse, ApiError>) {
        self.feedbacks.lock().unwrap().push_back(result);
    }

    pub fn push_upload(&self, result: Result<ResumeIngested, ApiError>) {
        self.uploads.lock().unwrap().push_back(result);
    }

    /// Journal of network calls, in issue order.
    pub fn call_log(&self) -> Vec<&'static str> {
        self.calls.lock().unwrap().clone()
    }

    pub fn network_calls(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    fn record(&self, endpoint: &'static str) {
        self.calls.lock().unwrap().push(endpoint);
    }
}

#[async_trait]
impl MatchApi for FakeApi {
    async fn create_job(&self, _req: &CreateJobRequest) -> Result<CreateJobResponse, ApiError> {
        self.record("jobs");
        Ok(CreateJobResponse { job_id: 1 })
    }

    async fn upload_resume(
        &self,
        _file_name: &str,
        _content_type: &str,
        _body: bytes::Bytes,
    ) -> Result<ResumeIngested, ApiError> {
        self.record("resumes");
        self.uploads.lock().unwrap().pop_front().unwrap_or(Ok(ResumeIngested {
            candidate_id: 1,
            full_name: "Candidate 1".to_string(),
            email: "c1@example.com".to_string(),
            phone: "555-111-2222".to_string(),
            skills: vec![],
            years_exp: 3.0,
            edu_level: 2,
        }))
    }

    async fn fetch_model(&self) -> Result<ModelState, ApiError> {
        self.record("models");
        self.models
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(Ok(make_model_state(&DEFAULT_WEIGHTS)))
    }

    async fn fetch_rankings(&self, req: &RankingRequest) -> Result<RankingResponse, ApiError> {
        self.record("rankings");
        *self.last_ranking_request.lock().unwrap() = Some(req.clone());
        self.rankings
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(Ok(make_ranking_response(req.job_id, &[1])))
    }

    async fn send_feedback(&self, req: &FeedbackRequest) -> Result<FeedbackResponse, ApiError> {
        self.record("feedback");
        *self.last_feedback_request.lock().unwrap() = Some(req.clone());
        self.feedbacks.lock().unwrap().pop_front().unwrap_or(Ok(FeedbackResponse {
            updated_pairs: 1,
            new_weights: DEFAULT_WEIGHTS.to_vec(),
        }))
    }
}
