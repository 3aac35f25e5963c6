//! Mentor registration service.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, warn};

use crate::domain::ports::{
    MentorRegistration, MentorRepository, MentorRepositoryError, RegisterMentorRequest,
};
use crate::domain::{AccessToken, Error, Mentor};

/// Registration service inserting validated profiles.
#[derive(Clone)]
pub struct MentorRegistrationService<M> {
    mentors: Arc<M>,
}

impl<M> MentorRegistrationService<M> {
    /// Create a service over the given repository.
    pub fn new(mentors: Arc<M>) -> Self {
        Self { mentors }
    }
}

fn map_repository_error(error: MentorRepositoryError) -> Error {
    match error {
        MentorRepositoryError::Duplicate { mentor_id } => {
            Error::already_registered(format!("mentor {mentor_id} is already registered"))
        }
        MentorRepositoryError::Unauthorized => {
            Error::session_unavailable("mentor store rejected the session token")
        }
        other => {
            warn!(error = %other, "mentor registration failed");
            Error::store_unavailable(format!("mentor store unavailable: {other}"))
        }
    }
}

#[async_trait]
impl<M> MentorRegistration for MentorRegistrationService<M>
where
    M: MentorRepository,
{
    async fn register_mentor(
        &self,
        token: &AccessToken,
        request: RegisterMentorRequest,
    ) -> Result<Mentor, Error> {
        let mentor = request.profile.into_mentor(request.mentor_id);
        self.mentors
            .insert(token, &mentor)
            .await
            .map_err(map_repository_error)?;
        debug!(mentor_id = %mentor.id, slots = mentor.slots.len(), "mentor registered");
        Ok(mentor)
    }
}
