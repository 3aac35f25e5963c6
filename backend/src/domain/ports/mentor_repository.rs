//! Port for the `mentors` table of the data store.
//!
//! The store is queried with the caller's bearer token so row-level policies
//! apply; adapters report a rejected token as
//! [`MentorRepositoryError::Unauthorized`].

use async_trait::async_trait;

use crate::domain::{AccessToken, Mentor};

use super::define_port_error;

define_port_error! {
    /// Errors raised by mentor repository adapters.
    pub enum MentorRepositoryError {
        /// The store rejected the bearer token.
        Unauthorized => "mentor store rejected the access token",
        /// Repository connection could not be established.
        Connection { message: String } =>
            "mentor store connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "mentor store query failed: {message}",
        /// A profile already exists for this identity.
        Duplicate { mentor_id: String } =>
            "mentor {mentor_id} is already registered",
    }
}

/// Port for mentor profile storage.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MentorRepository: Send + Sync {
    /// Fetch every mentor whose availability flag is set.
    ///
    /// Adapters filter on the flag; ordering is left to the caller.
    async fn list_available(&self, token: &AccessToken)
    -> Result<Vec<Mentor>, MentorRepositoryError>;

    /// Insert a new profile.
    ///
    /// Must fail with [`MentorRepositoryError::Duplicate`] when a profile
    /// already exists for `mentor.id`, leaving the stored profile untouched.
    async fn insert(&self, token: &AccessToken, mentor: &Mentor)
    -> Result<(), MentorRepositoryError>;
}
