//! Shortlist — ranking review & online feedback loop for the recruiter
//! console.
//!
//! The remote scoring/training service owns ranking computation, learning
//! updates, and persistence; this crate owns the client-side orchestration:
//! requesting exploration-perturbed shortlists, tracking the shown-set so
//! feedback stays attributable and non-stale, rendering per-feature
//! contributions, masking PII before display, and driving the
//! feedback → refresh cycle that keeps displayed weights consistent with
//! the server-held model.

pub mod api;
pub mod config;
pub mod display;
pub mod errors;
pub mod feedback;
pub mod logging;
pub mod notify;
pub mod privacy;
pub mod session;
pub mod uploads;

#[cfg(test)]
pub(crate) mod testutil;

pub use config::Config;
pub use errors::CoreError;
pub use session::RankingSession;
