//! Driving port for slot reservations.
//!
//! The registry records bookings and enforces one reservation per
//! `(mentor, slot)` pair. It deliberately does not check the slot against the
//! mentor's offered set: stale views are resolved by the uniqueness
//! constraint failing the write.

use async_trait::async_trait;

use crate::domain::{AccessToken, Booking, BookingRequest, BookingWithMentor, CandidateId, Error};

/// Reserve slots and list a candidate's bookings.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SlotRegistry: Send + Sync {
    /// Reserve a slot for a candidate.
    ///
    /// # Errors
    ///
    /// Returns `SlotAlreadyBooked` when the pair is taken. Callers must not
    /// retry the same pair automatically.
    async fn reserve_slot(
        &self,
        token: &AccessToken,
        request: BookingRequest,
    ) -> Result<Booking, Error>;

    /// List the candidate's bookings with mentor display fields, in
    /// insertion order.
    async fn list_my_bookings(
        &self,
        token: &AccessToken,
        candidate_id: &CandidateId,
    ) -> Result<Vec<BookingWithMentor>, Error>;
}
