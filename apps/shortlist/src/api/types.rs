use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Number of model features. Weights and candidate feature vectors are
/// positionally bound to [`FEATURE_LABELS`](crate::display::FEATURE_LABELS).
pub const FEATURE_COUNT: usize = 5;

/// Weights used until the first successful model pull or rankings fetch.
pub const DEFAULT_WEIGHTS: [f64; FEATURE_COUNT] = [0.5, 0.18, 0.1, 0.17, 0.05];

/// A job opening as held by the job list. The core only reads `id` and
/// caches `title` for display.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobRecord {
    pub id: i64,
    pub title: String,
    pub description: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct CreateJobRequest {
    pub title: String,
    pub description: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateJobResponse {
    pub job_id: i64,
}

/// Parsed resume acknowledgment returned by `POST /resumes`.
#[derive(Debug, Clone, Deserialize)]
pub struct ResumeIngested {
    pub candidate_id: i64,
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub skills: Vec<String>,
    pub years_exp: f64,
    pub edu_level: i32,
}

/// Model snapshot returned by `GET /models`.
#[derive(Debug, Clone, Deserialize)]
pub struct ModelState {
    pub weights: Vec<f64>,
    pub lr: f64,
    pub l2: f64,
    pub updated_at: Option<DateTime<Utc>>,
}

/// Hyper-parameters displayed alongside the weights.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelMeta {
    pub learning_rate: f64,
    pub l2: f64,
    pub updated_at: Option<DateTime<Utc>>,
}

impl Default for ModelMeta {
    fn default() -> Self {
        Self {
            learning_rate: 0.1,
            l2: 1e-4,
            updated_at: None,
        }
    }
}

/// Query parameters for `GET /rankings`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankingRequest {
    pub job_id: i64,
    pub k: u32,
    pub epsilon: f64,
}

/// One shortlist entry. Feature values arrive flat on the wire and are
/// already normalized server-side; `features()` exposes them in weight
/// order. Immutable once received; replaced wholesale on the next fetch.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankedCandidate {
    pub candidate_id: i64,
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub skills: Vec<String>,
    pub years_exp: f64,
    pub edu_level_raw: i32,
    pub sem_sim: f64,
    pub skill_overlap: f64,
    pub jaccard: f64,
    pub years: f64,
    pub edu: f64,
    pub score: f64,
    pub explore: bool,
}

impl RankedCandidate {
    /// Feature values in the fixed order `[sem_sim, skill_overlap, jaccard,
    /// years, edu]`, positionally aligned with the weight vector.
    pub fn features(&self) -> [f64; FEATURE_COUNT] {
        [
            self.sem_sim,
            self.skill_overlap,
            self.jaccard,
            self.years,
            self.edu,
        ]
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct RankingResponse {
    pub job_id: i64,
    pub weights: Vec<f64>,
    pub candidates: Vec<RankedCandidate>,
}

/// Single-click "best candidate" judgment. `shown_candidate_ids` must be
/// the full ordered shown-set of the fetch still current when the user
/// picked, not just the winner.
#[derive(Debug, Clone, Serialize)]
pub struct FeedbackRequest {
    pub job_id: i64,
    pub shown_candidate_ids: Vec<i64>,
    pub chosen_candidate_id: i64,
}

/// Acknowledgment for a feedback submission. `new_weights` is informational
/// only: displayed state is re-read from the server afterwards.
#[derive(Debug, Clone, Deserialize)]
pub struct FeedbackResponse {
    pub updated_pairs: u64,
    pub new_weights: Vec<f64>,
}
