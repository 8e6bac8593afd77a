//! Resume upload queue.
//!
//! Tracks per-file ingestion status. Files are validated on enqueue
//! (document type, size cap) and uploaded one at a time in enqueue order.
//! Items are keyed by queue-assigned id and transitioned by id, never
//! mutated in place during an in-flight pass, so a re-entrant resend
//! cannot lose updates.

use std::sync::Arc;

use bytes::Bytes;
use thiserror::Error;
use tracing::{info, warn};

use crate::api::MatchApi;
use crate::notify::{Notification, NotificationSink};

pub const ACCEPTED_CONTENT_TYPE: &str = "application/pdf";
pub const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Why a file never entered the queue. Reported, not fatal: other files in
/// the same selection still enqueue.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum UploadRejection {
    #[error("Only PDFs accepted: {0}")]
    NotPdf(String),

    #[error("File too large: {0} exceeds the 10MB limit")]
    TooLarge(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UploadStatus {
    Pending,
    Uploading,
    Success { candidate_id: i64 },
    Error { message: String },
}

/// A file handed to the queue. The queue owns the bytes until upload.
#[derive(Debug, Clone)]
pub struct ResumeFile {
    pub name: String,
    pub content_type: String,
    pub data: Bytes,
}

#[derive(Debug, Clone)]
pub struct UploadItem {
    pub id: u64,
    pub file: ResumeFile,
    pub status: UploadStatus,
}

pub struct UploadQueue {
    api: Arc<dyn MatchApi>,
    notifier: Arc<dyn NotificationSink>,
    next_id: u64,
    items: Vec<UploadItem>,
}

impl UploadQueue {
    pub fn new(api: Arc<dyn MatchApi>, notifier: Arc<dyn NotificationSink>) -> Self {
        Self {
            api,
            notifier,
            next_id: 0,
            items: Vec::new(),
        }
    }

    /// Validates and enqueues one file. Rejections surface as a
    /// notification and an `Err`, leaving the queue unchanged.
    pub fn enqueue(&mut self, file: ResumeFile) -> Result<u64, UploadRejection> {
        if file.content_type != ACCEPTED_CONTENT_TYPE {
            self.notifier.push(Notification::error(
                "Only PDFs accepted",
                &format!("{} skipped.", file.name),
            ));
            return Err(UploadRejection::NotPdf(file.name));
        }
        if file.data.len() > MAX_UPLOAD_BYTES {
            self.notifier.push(Notification::error(
                "File too large",
                &format!("{} exceeds 10MB limit.", file.name),
            ));
            return Err(UploadRejection::TooLarge(file.name));
        }

        let id = self.next_id;
        self.next_id += 1;
        self.items.push(UploadItem {
            id,
            file,
            status: UploadStatus::Pending,
        });
        Ok(id)
    }

    /// Uploads every item not already successful, one at a time in enqueue
    /// order. Doubles as the "resend" action: successes are left untouched,
    /// previous errors are re-attempted. Returns the number of items that
    /// reached `Success` during this pass.
    pub async fn process_pending(&mut self) -> usize {
        // Snapshot of ids first; items enqueued mid-pass wait for the next.
        let pass: Vec<u64> = self
            .items
            .iter()
            .filter(|item| !matches!(item.status, UploadStatus::Success { .. }))
            .map(|item| item.id)
            .collect();

        let mut uploaded = 0;
        for id in pass {
            let Some(file) = self.file_for(id) else {
                continue;
            };
            self.transition(id, UploadStatus::Uploading);

            let result = self
                .api
                .upload_resume(&file.name, &file.content_type, file.data.clone())
                .await;

            match result {
                Ok(ingested) => {
                    info!(
                        candidate_id = ingested.candidate_id,
                        file = %file.name,
                        "Resume stored"
                    );
                    self.transition(
                        id,
                        UploadStatus::Success {
                            candidate_id: ingested.candidate_id,
                        },
                    );
                    self.notifier.push(Notification::success(
                        "Resume ingested",
                        &format!("{} → candidate {}", file.name, ingested.candidate_id),
                    ));
                    uploaded += 1;
                }
                Err(e) => {
                    warn!(error = %e, file = %file.name, "Resume upload failed");
                    self.transition(
                        id,
                        UploadStatus::Error {
                            message: "Upload failed".to_string(),
                        },
                    );
                    self.notifier.push(Notification::error(
                        "Upload failed",
                        &format!("{} could not be saved.", file.name),
                    ));
                }
            }
        }
        uploaded
    }

    pub fn items(&self) -> &[UploadItem] {
        &self.items
    }

    /// Number of resumes successfully ingested — the precondition the
    /// ranking session assumes before a fetch makes sense.
    pub fn ingested_count(&self) -> usize {
        self.items
            .iter()
            .filter(|item| matches!(item.status, UploadStatus::Success { .. }))
            .count()
    }

    pub fn pending_count(&self) -> usize {
        self.items
            .iter()
            .filter(|item| !matches!(item.status, UploadStatus::Success { .. }))
            .count()
    }

    fn file_for(&self, id: u64) -> Option<ResumeFile> {
        self.items
            .iter()
            .find(|item| item.id == id)
            .map(|item| item.file.clone())
    }

    fn transition(&mut self, id: u64, status: UploadStatus) {
        if let Some(item) = self.items.iter_mut().find(|item| item.id == id) {
            item.status = status;
        }
    }
}
