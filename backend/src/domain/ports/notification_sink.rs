//! Port for the fire-and-forget notification surface.

use crate::domain::Notification;

/// Delivers `(title, description, severity)` notifications to the user.
///
/// Delivery is synchronous and infallible from the caller's point of view;
/// adapters swallow and log their own failures.
#[cfg_attr(test, mockall::automock)]
pub trait NotificationSink: Send + Sync {
    /// Surface a notification.
    fn notify(&self, notification: Notification);
}

