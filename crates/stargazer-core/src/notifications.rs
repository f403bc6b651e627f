// Short-lived notices (toasts) raised when something goes wrong
use std::collections::VecDeque;
use std::time::Duration;

use serde::Serialize;

/// How long a notice stays up unless dismissed earlier
pub const NOTIFICATION_TTL: Duration = Duration::from_millis(3000);

pub type NotificationId = u64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Severity {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notification {
    pub id: NotificationId,
    pub message: String,
    pub severity: Severity,
}

/// Newest-first list of live notices
///
/// The queue only hands out ids and keeps the list; arming the expiry timer
/// for each id is up to whoever drives it (see `Effect::ExpireNotification`).
/// Dismissal is idempotent so the timer and a manual close can race freely.
#[derive(Debug, Clone)]
pub struct NotificationQueue {
    entries: VecDeque<Notification>,
    next_id: NotificationId,
}

impl NotificationQueue {
    pub fn new() -> Self {
        Self {
            entries: VecDeque::new(),
            next_id: 1,
        }
    }

    /// Push a notice to the front and return its id (1, 2, 3, ...)
    pub fn enqueue(&mut self, message: impl Into<String>, severity: Severity) -> NotificationId {
        let id = self.next_id;
        self.next_id += 1;

        self.entries.push_front(Notification {
            id,
            message: message.into(),
            severity,
        });

        id
    }

    /// Remove the notice if it is still there. Returns whether anything was
    /// removed; a second call for the same id is a harmless no-op.
    pub fn dismiss(&mut self, id: NotificationId) -> bool {
        match self.entries.iter().position(|n| n.id == id) {
            Some(pos) => {
                self.entries.remove(pos);
                true
            }
            None => false,
        }
    }

    pub fn get(&self, id: NotificationId) -> Option<&Notification> {
        self.entries.iter().find(|n| n.id == id)
    }

    /// Newest first
    pub fn iter(&self) -> impl Iterator<Item = &Notification> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for NotificationQueue {
    fn default() -> Self {
        Self::new()
    }
}
