//! Driving port for mentor self-registration.

use async_trait::async_trait;

use crate::domain::{AccessToken, Error, Mentor, MentorId, MentorProfile};

/// A validated profile submitted under the caller's identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisterMentorRequest {
    /// Identity the profile is keyed by.
    pub mentor_id: MentorId,
    /// Validated profile.
    pub profile: MentorProfile,
}

/// Publishes mentor profiles.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MentorRegistration: Send + Sync {
    /// Store the profile and return the resulting mentor record.
    ///
    /// # Errors
    ///
    /// Returns `AlreadyRegistered` when the identity already has a profile;
    /// the stored slot set is left untouched.
    async fn register_mentor(
        &self,
        token: &AccessToken,
        request: RegisterMentorRequest,
    ) -> Result<Mentor, Error>;
}
