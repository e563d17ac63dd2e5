//! User-facing notifications.
//!
//! Every recoverable failure (rejected drop, failed save, invalid edit) and
//! every confirmation ends up here as a single message. The UI drains the
//! queue and shows them as non-blocking toasts.

use std::collections::VecDeque;

/// Severity of a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    Success,
    Info,
    Error,
}

/// A single message for the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub level: NotificationLevel,
    pub message: String,
}

impl Notification {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: NotificationLevel::Success,
            message: message.into(),
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self {
            level: NotificationLevel::Info,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NotificationLevel::Error,
            message: message.into(),
        }
    }

    pub fn is_error(&self) -> bool {
        self.level == NotificationLevel::Error
    }
}

/// FIFO of pending notifications.
#[derive(Debug, Clone, Default)]
pub struct Notifications {
    queue: VecDeque<Notification>,
}

impl Notifications {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, notification: Notification) {
        match notification.level {
            NotificationLevel::Error => log::warn!("{}", notification.message),
            _ => log::info!("{}", notification.message),
        }
        self.queue.push_back(notification);
    }

    /// Take all pending notifications, oldest first.
    pub fn drain(&mut self) -> Vec<Notification> {
        self.queue.drain(..).collect()
    }

    /// Most recent notification, if any.
    pub fn last(&self) -> Option<&Notification> {
        self.queue.back()
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drain_in_order() {
        let mut notifications = Notifications::new();
        notifications.push(Notification::success("Saved"));
        notifications.push(Notification::error("Failed"));
        assert_eq!(notifications.len(), 2);
        assert!(notifications.last().unwrap().is_error());

        let drained = notifications.drain();
        assert_eq!(drained[0].message, "Saved");
        assert_eq!(drained[1].level, NotificationLevel::Error);
        assert!(notifications.is_empty());
    }
}
