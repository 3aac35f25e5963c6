//! Domain-level error types.
//!
//! These errors are transport agnostic. The booking flow surfaces them as
//! request state and notifications; the command-line adapter prints them.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Stable machine-readable error code describing the failure category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[non_exhaustive]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    /// No bearer token could be derived from the current session.
    SessionUnavailable,
    /// Listing mentors failed; the caller may retry.
    DirectoryUnavailable,
    /// The (mentor, slot) pair is already reserved.
    SlotAlreadyBooked,
    /// The mentor identity already has a profile.
    AlreadyRegistered,
    /// A client-side precondition was not met; nothing reached the network.
    ValidationFailed,
    /// The session role does not permit the action.
    Forbidden,
    /// The referenced mentor is not part of the current snapshot.
    NotFound,
    /// The data store failed outside of directory reads.
    StoreUnavailable,
    /// An unexpected error occurred inside the domain.
    InternalError,
}

/// Domain error payload.
///
/// ## Invariants
/// - `message` must be non-empty once trimmed of whitespace.
///
/// # Examples
/// ```
/// use mentorship::domain::{Error, ErrorCode};
///
/// let err = Error::slot_already_booked("taken");
/// assert_eq!(err.code(), ErrorCode::SlotAlreadyBooked);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[serde(deny_unknown_fields)]
#[serde(try_from = "ErrorDto", into = "ErrorDto")]
pub struct Error {
    code: ErrorCode,
    message: String,
    details: Option<Value>,
}

/// Validation errors emitted by the constructors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ErrorValidationError {
    EmptyMessage,
}

impl std::fmt::Display for ErrorValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyMessage => write!(f, "error message must not be empty"),
        }
    }
}

impl std::error::Error for ErrorValidationError {}

const FALLBACK_MESSAGE: &str = "unexpected error";

impl Error {
    /// Create a new error.
    ///
    /// Blank messages are replaced with a generic fallback so that every
    /// error stays displayable; use [`Error::try_new`] to reject them.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self::try_new(code, message).unwrap_or_else(|_| Self {
            code,
            message: FALLBACK_MESSAGE.to_owned(),
            details: None,
        })
    }

    /// Fallible constructor that validates the message content.
    pub fn try_new(code: ErrorCode, message: impl Into<String>) -> Result<Self, ErrorValidationError> {
        let message = message.into();
        if message.trim().is_empty() {
            return Err(ErrorValidationError::EmptyMessage);
        }
        Ok(Self {
            code,
            message,
            details: None,
        })
    }

    /// Stable machine-readable error code.
    pub fn code(&self) -> ErrorCode {
        self.code
    }

    /// Human-readable message.
    pub fn message(&self) -> &str {
        self.message.as_str()
    }

    /// Supplementary error details.
    pub fn details(&self) -> Option<&Value> {
        self.details.as_ref()
    }

    /// Attach structured details to the error.
    ///
    /// # Examples
    /// ```
    /// use mentorship::domain::Error;
    /// use serde_json::json;
    ///
    /// let err = Error::validation_failed("bad").with_details(json!({ "field": "name" }));
    /// assert!(err.details().is_some());
    /// ```
    pub fn with_details(mut self, details: Value) -> Self {
        self.details = Some(details);
        self
    }

    /// Convenience constructor for [`ErrorCode::SessionUnavailable`].
    pub fn session_unavailable(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::SessionUnavailable, message)
    }

    /// Convenience constructor for [`ErrorCode::DirectoryUnavailable`].
    pub fn directory_unavailable(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::DirectoryUnavailable, message)
    }

    /// Convenience constructor for [`ErrorCode::SlotAlreadyBooked`].
    pub fn slot_already_booked(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::SlotAlreadyBooked, message)
    }

    /// Convenience constructor for [`ErrorCode::AlreadyRegistered`].
    pub fn already_registered(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::AlreadyRegistered, message)
    }

    /// Convenience constructor for [`ErrorCode::ValidationFailed`].
    pub fn validation_failed(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ValidationFailed, message)
    }

    /// Convenience constructor for [`ErrorCode::Forbidden`].
    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Forbidden, message)
    }

    /// Convenience constructor for [`ErrorCode::NotFound`].
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::NotFound, message)
    }

    /// Convenience constructor for [`ErrorCode::StoreUnavailable`].
    pub fn store_unavailable(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::StoreUnavailable, message)
    }

    /// Convenience constructor for [`ErrorCode::InternalError`].
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InternalError, message)
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for Error {}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ErrorDto {
    code: ErrorCode,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<Value>,
}

impl From<Error> for ErrorDto {
    fn from(value: Error) -> Self {
        Self {
            code: value.code,
            message: value.message,
            details: value.details,
        }
    }
}

impl TryFrom<ErrorDto> for Error {
    type Error = ErrorValidationError;

    fn try_from(value: ErrorDto) -> Result<Self, Self::Error> {
        let ErrorDto {
            code,
            message,
            details,
        } = value;

        let mut error = Self::try_new(code, message)?;
        error.details = details;
        Ok(error)
    }
}

#[cfg(test)]
mod tests;
