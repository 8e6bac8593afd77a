/// Scoring-service client — the single point of entry for all HTTP calls
/// against the remote scoring/training service.
///
/// ARCHITECTURAL RULE: no other module may touch the network directly.
/// Session, feedback, and upload code talk to an `Arc<dyn MatchApi>` so
/// tests can swap in an in-memory fake.
use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::Client;
use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

pub mod types;

use types::{
    CreateJobRequest, CreateJobResponse, FeedbackRequest, FeedbackResponse, ModelState,
    RankingRequest, RankingResponse, ResumeIngested,
};

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Unsupported upload content type: {0}")]
    UnsupportedContentType(String),
}

/// Error envelope the scoring service returns on non-2xx responses.
#[derive(Debug, Deserialize)]
struct ServiceError {
    detail: String,
}

/// The five operations of the scoring/training service.
#[async_trait]
pub trait MatchApi: Send + Sync {
    async fn create_job(&self, req: &CreateJobRequest) -> Result<CreateJobResponse, ApiError>;

    async fn upload_resume(
        &self,
        file_name: &str,
        content_type: &str,
        body: bytes::Bytes,
    ) -> Result<ResumeIngested, ApiError>;

    async fn fetch_model(&self) -> Result<ModelState, ApiError>;

    async fn fetch_rankings(&self, req: &RankingRequest) -> Result<RankingResponse, ApiError>;

    async fn send_feedback(&self, req: &FeedbackRequest) -> Result<FeedbackResponse, ApiError>;
}

/// Production `MatchApi` over HTTP.
#[derive(Clone)]
pub struct HttpApi {
    client: Client,
    base_url: String,
}

impl HttpApi {
    pub fn new(base_url: String, timeout: std::time::Duration) -> Self {
        Self {
            client: Client::builder()
                .timeout(timeout)
                .build()
                .expect("Failed to build HTTP client"),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Triages a response: 2xx deserializes as `T`, anything else becomes
    /// `ApiError::Api` carrying the service's `detail` message when the
    /// body parses as its error envelope, else the raw body.
    async fn read_json<T: serde::de::DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, ApiError> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ServiceError>(&body)
                .map(|e| e.detail)
                .unwrap_or(body);
            return Err(ApiError::Api {
                status: status.as_u16(),
                message,
            });
        }
        Ok(response.json().await?)
    }
}

#[async_trait]
impl MatchApi for HttpApi {
    async fn create_job(&self, req: &CreateJobRequest) -> Result<CreateJobResponse, ApiError> {
        let response = self.client.post(self.url("/jobs")).json(req).send().await?;
        Self::read_json(response).await
    }

    async fn upload_resume(
        &self,
        file_name: &str,
        content_type: &str,
        body: bytes::Bytes,
    ) -> Result<ResumeIngested, ApiError> {
        let part = Part::bytes(body.to_vec())
            .file_name(file_name.to_string())
            .mime_str(content_type)
            .map_err(|_| ApiError::UnsupportedContentType(content_type.to_string()))?;
        let form = Form::new().part("file", part);

        let response = self
            .client
            .post(self.url("/resumes"))
            .multipart(form)
            .send()
            .await?;
        let ingested: ResumeIngested = Self::read_json(response).await?;
        debug!(
            candidate_id = ingested.candidate_id,
            "Resume ingested: {file_name}"
        );
        Ok(ingested)
    }

    async fn fetch_model(&self) -> Result<ModelState, ApiError> {
        let response = self.client.get(self.url("/models")).send().await?;
        Self::read_json(response).await
    }

    async fn fetch_rankings(&self, req: &RankingRequest) -> Result<RankingResponse, ApiError> {
        let response = self
            .client
            .get(self.url("/rankings"))
            .query(&[
                ("job_id", req.job_id.to_string()),
                ("k", req.k.to_string()),
                ("epsilon", req.epsilon.to_string()),
            ])
            .send()
            .await?;
        Self::read_json(response).await
    }

    async fn send_feedback(&self, req: &FeedbackRequest) -> Result<FeedbackResponse, ApiError> {
        let response = self
            .client
            .post(self.url("/feedback"))
            .json(req)
            .send()
            .await?;
        Self::read_json(response).await
    }
}
