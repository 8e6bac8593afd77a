//! Notification center — owns the toast queue and its id counter.
//!
//! Producers never hold ambient globals; they receive an
//! `Arc<dyn NotificationSink>` capability and push through it. A separate
//! renderer (out of scope) drains `active()` and calls `dismiss(id)`.

use std::sync::Mutex;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Info,
    Success,
    Error,
}

/// A user-visible outcome report: short title, actionable description.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub severity: Severity,
    pub title: String,
    pub description: String,
}

impl Notification {
    pub fn success(title: &str, description: &str) -> Self {
        Self {
            severity: Severity::Success,
            title: title.to_string(),
            description: description.to_string(),
        }
    }

    pub fn error(title: &str, description: &str) -> Self {
        Self {
            severity: Severity::Error,
            title: title.to_string(),
            description: description.to_string(),
        }
    }
}

/// Capability for reporting outcomes. Implemented by `NotificationCenter`;
/// tests substitute a recording sink.
pub trait NotificationSink: Send + Sync {
    fn push(&self, notification: Notification) -> u64;
}

#[derive(Default)]
struct CenterInner {
    next_id: u64,
    active: Vec<(u64, Notification)>,
}

/// Process-scoped notification state with explicit lifecycle: created with
/// the UI root, torn down with it.
#[derive(Default)]
pub struct NotificationCenter {
    inner: Mutex<CenterInner>,
}

impl NotificationCenter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn enqueue(&self, notification: Notification) -> u64 {
        let mut inner = self.inner.lock().expect("notification center poisoned");
        let id = inner.next_id;
        inner.next_id += 1;
        inner.active.push((id, notification));
        id
    }

    pub fn dismiss(&self, id: u64) {
        let mut inner = self.inner.lock().expect("notification center poisoned");
        inner.active.retain(|(existing, _)| *existing != id);
    }

    /// Snapshot of currently active notifications, oldest first.
    pub fn active(&self) -> Vec<(u64, Notification)> {
        self.inner
            .lock()
            .expect("notification center poisoned")
            .active
            .clone()
    }
}

impl NotificationSink for NotificationCenter {
    fn push(&self, notification: Notification) -> u64 {
        self.enqueue(notification)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_are_monotonic() {
        let center = NotificationCenter::new();
        let a = center.enqueue(Notification::success("A", "first"));
        let b = center.enqueue(Notification::error("B", "second"));
        assert!(b > a);
    }

    #[test]
    fn test_dismiss_removes_only_target() {
        let center = NotificationCenter::new();
        let a = center.enqueue(Notification::success("A", "first"));
        let b = center.enqueue(Notification::error("B", "second"));
        center.dismiss(a);
        let active = center.active();
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].0, b);
    }

    #[test]
    fn test_dismiss_unknown_id_is_noop() {
        let center = NotificationCenter::new();
        center.enqueue(Notification::success("A", "first"));
        center.dismiss(999);
        assert_eq!(center.active().len(), 1);
    }
}
