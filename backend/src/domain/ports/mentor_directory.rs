//! Driving port for the read-side mentor listing.

use async_trait::async_trait;

use crate::domain::{AccessToken, Error, Mentor};

/// Lists mentors open for bookings.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MentorDirectory: Send + Sync {
    /// Return every available mentor ordered by display name, ties broken by
    /// identity.
    ///
    /// # Errors
    ///
    /// Returns `DirectoryUnavailable` when the store fails and
    /// `SessionUnavailable` when it rejects the token. Partial results are
    /// never returned.
    async fn list_available_mentors(&self, token: &AccessToken) -> Result<Vec<Mentor>, Error>;
}

