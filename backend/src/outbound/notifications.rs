//! Notification sink writing to the terminal.

use std::io::Write;

use tracing::{info, warn};

use crate::domain::ports::NotificationSink;
use crate::domain::{Notification, Severity};

/// Prints notifications to standard error and mirrors them into the log.
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleNotificationSink;

impl ConsoleNotificationSink {
    fn render(notification: &Notification) -> String {
        let marker = match notification.severity {
            Severity::Default => "ok",
            Severity::Destructive => "error",
        };
        format!(
            "[{marker}] {}: {}",
            notification.title, notification.description
        )
    }
}

impl NotificationSink for ConsoleNotificationSink {
    fn notify(&self, notification: Notification) {
        match notification.severity {
            Severity::Default => info!(title = %notification.title, "notification"),
            Severity::Destructive => warn!(title = %notification.title, "notification"),
        }
        let line = Self::render(&notification);
        if let Err(error) = writeln!(std::io::stderr().lock(), "{line}") {
            warn!(%error, "failed to write notification");
        }
    }
}
