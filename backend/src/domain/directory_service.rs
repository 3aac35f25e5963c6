//! Mentor directory service.
//!
//! Implements [`MentorDirectory`] over a [`MentorRepository`], enforcing the
//! availability filter and a total display order regardless of what the
//! adapter returns.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, warn};

use crate::domain::ports::{MentorDirectory, MentorRepository, MentorRepositoryError};
use crate::domain::{AccessToken, Error, Mentor};

/// Directory service implementing the read-side listing.
#[derive(Clone)]
pub struct MentorDirectoryService<M> {
    mentors: Arc<M>,
}

impl<M> MentorDirectoryService<M> {
    /// Create a service over the given repository.
    pub fn new(mentors: Arc<M>) -> Self {
        Self { mentors }
    }
}

fn map_repository_error(error: MentorRepositoryError) -> Error {
    match error {
        MentorRepositoryError::Unauthorized => {
            Error::session_unavailable("mentor store rejected the session token")
        }
        other => {
            warn!(error = %other, "mentor directory lookup failed");
            Error::directory_unavailable(format!("mentor directory unavailable: {other}"))
        }
    }
}

#[async_trait]
impl<M> MentorDirectory for MentorDirectoryService<M>
where
    M: MentorRepository,
{
    async fn list_available_mentors(&self, token: &AccessToken) -> Result<Vec<Mentor>, Error> {
        let mut mentors = self
            .mentors
            .list_available(token)
            .await
            .map_err(map_repository_error)?;
        mentors.retain(|mentor| mentor.available_to_mentor);
        mentors.sort_by(|left, right| {
            left.name
                .cmp(&right.name)
                .then_with(|| left.id.cmp(&right.id))
        });
        debug!(count = mentors.len(), "listed available mentors");
        Ok(mentors)
    }
}
