//! Feedback & model-sync controller.
//!
//! Submits the single-click "best candidate" judgment together with the
//! full ordered shown-set, then re-synchronizes displayed state with a
//! read-after-write against the server: fresh rankings first, model
//! metadata second. The acknowledgment's `new_weights` are never applied
//! locally; they are informational only.

use tracing::info;

use crate::api::types::FeedbackRequest;
use crate::errors::CoreError;
use crate::notify::Notification;
use crate::session::{Phase, RankingSession};

impl RankingSession {
    /// Submits feedback for `candidate_id` and, on acceptance, runs the
    /// refresh chain strictly in sequence: rankings, then model pull.
    /// Reversing that order could show new weights against a stale
    /// shortlist.
    ///
    /// Validation failures (`NoJobSelected`, `NoRankingsYet`) are detected
    /// locally and never reach the network. On a transport failure the
    /// shown-set is left untouched and remains valid for retry.
    pub async fn submit_feedback(&mut self, candidate_id: i64) -> Result<(), CoreError> {
        let Some(job_id) = self.selected_job_id() else {
            self.notify(Notification::error(
                "No job selected",
                "Pick a job before sending feedback.",
            ));
            return Err(CoreError::NoJobSelected);
        };
        if self.shown_ids().is_empty() {
            self.notify(Notification::error(
                "No rankings yet",
                "Fetch rankings before training the model.",
            ));
            return Err(CoreError::NoRankingsYet);
        }

        // The UI only offers picks from rendered candidates, so membership
        // of chosen_candidate_id in the shown-set is a server-side contract
        // rather than a local check.
        let request = FeedbackRequest {
            job_id,
            shown_candidate_ids: self.shown_ids().to_vec(),
            chosen_candidate_id: candidate_id,
        };

        self.set_phase(Phase::Submitting);
        match self.api().send_feedback(&request).await {
            Ok(ack) => {
                info!(
                    updated_pairs = ack.updated_pairs,
                    chosen = candidate_id,
                    "Feedback accepted"
                );
                self.notify(Notification::success(
                    "Model updated",
                    "Feedback incorporated. Regenerating rankings…",
                ));
                self.fetch_rankings().await?;
                self.pull_model().await;
                Ok(())
            }
            Err(e) => {
                self.set_phase(Phase::Error);
                self.notify(Notification::error(
                    "Feedback failed",
                    "Could not update weights. Please retry.",
                ));
                Err(CoreError::FeedbackFailed(e))
            }
        }
    }
}
