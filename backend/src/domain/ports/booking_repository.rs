//! Port for the `bookings` table of the data store.
//!
//! The table carries a unique constraint over `(mentor_id, slot)`. Adapters
//! must enforce it atomically at the storage boundary and surface violations
//! as [`BookingRepositoryError::Conflict`]; the domain never pre-checks
//! availability.

use async_trait::async_trait;

use crate::domain::{AccessToken, Booking, BookingWithMentor, CandidateId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by booking repository adapters.
    pub enum BookingRepositoryError {
        /// The store rejected the bearer token.
        Unauthorized => "booking store rejected the access token",
        /// Repository connection could not be established.
        Connection { message: String } =>
            "booking store connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "booking store query failed: {message}",
        /// The `(mentor, slot)` pair is already reserved.
        Conflict { mentor_id: String, slot: String } =>
            "slot {slot} of mentor {mentor_id} is already booked",
    }
}

/// Port for the append-only booking record.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BookingRepository: Send + Sync {
    /// Append a booking, failing with
    /// [`BookingRepositoryError::Conflict`] when the pair is taken.
    async fn insert(&self, token: &AccessToken, booking: &Booking)
    -> Result<(), BookingRepositoryError>;

    /// List a candidate's bookings joined with mentor display fields, in
    /// insertion order.
    async fn list_for_candidate(
        &self,
        token: &AccessToken,
        candidate_id: &CandidateId,
    ) -> Result<Vec<BookingWithMentor>, BookingRepositoryError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn conflict_error_formats_the_pair() {
        let error = BookingRepositoryError::conflict("user_m", "2025-01-10T09:00:00+00:00");
        assert_eq!(
            error.to_string(),
            "slot 2025-01-10T09:00:00+00:00 of mentor user_m is already booked"
        );
    }
}
