//! User-facing notifications (toasts and banners).
//!
//! Every [`ErrorCode`] maps to its own title so the user can tell failures
//! apart without reading log output.

use serde::{Deserialize, Serialize};

use super::{Error, ErrorCode};

/// Visual weight of a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Default,
    Destructive,
}

/// A `(title, description, severity)` triple delivered to the notification
/// surface.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub title: String,
    pub description: String,
    pub severity: Severity,
}

impl Notification {
    fn new(title: &str, description: impl Into<String>, severity: Severity) -> Self {
        Self {
            title: title.to_owned(),
            description: description.into(),
            severity,
        }
    }

    /// A slot reservation succeeded.
    pub fn slot_booked() -> Self {
        Self::new(
            "Slot Booked",
            "You are now scheduled for your session.",
            Severity::Default,
        )
    }

    /// Mentor registration succeeded.
    pub fn mentor_registered() -> Self {
        Self::new(
            "Mentor registered successfully",
            "You have been registered as a mentor.",
            Severity::Default,
        )
    }

    /// Describe a failure.
    ///
    /// # Examples
    /// ```
    /// use mentorship::domain::{Error, Notification, Severity};
    ///
    /// let note = Notification::from_error(&Error::already_registered("duplicate"));
    /// assert_eq!(note.title, "Mentor already registered");
    /// assert_eq!(note.severity, Severity::Destructive);
    /// ```
    pub fn from_error(error: &Error) -> Self {
        let (title, description) = match error.code() {
            ErrorCode::SessionUnavailable => (
                "Session expired",
                "Please sign in again to continue.".to_owned(),
            ),
            ErrorCode::DirectoryUnavailable => ("Error", "Failed to fetch mentors.".to_owned()),
            ErrorCode::SlotAlreadyBooked => (
                "Slot unavailable",
                "That slot has just been booked. Please pick another slot.".to_owned(),
            ),
            ErrorCode::AlreadyRegistered => (
                "Mentor already registered",
                "You have already registered as a mentor.".to_owned(),
            ),
            ErrorCode::ValidationFailed => ("Check your input", error.message().to_owned()),
            ErrorCode::Forbidden => ("Not allowed", error.message().to_owned()),
            ErrorCode::NotFound => ("Not found", error.message().to_owned()),
            ErrorCode::StoreUnavailable => ("Booking Error", error.message().to_owned()),
            _ => ("Something went wrong", error.message().to_owned()),
        };
        Self::new(title, description, Severity::Destructive)
    }
}
