//! Slot registry service.
//!
//! Reservations go straight to the [`BookingRepository`]; the storage
//! boundary's uniqueness constraint is the only double-booking guard.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use serde_json::json;
use tracing::{debug, warn};

use crate::domain::ports::{BookingRepository, BookingRepositoryError, SlotRegistry};
use crate::domain::{
    AccessToken, Booking, BookingId, BookingRequest, BookingWithMentor, CandidateId, Error,
};

/// Registry service implementing the write-side booking record.
#[derive(Clone)]
pub struct SlotRegistryService<B> {
    bookings: Arc<B>,
    clock: Arc<dyn Clock>,
}

impl<B> SlotRegistryService<B> {
    /// Create a service stamping bookings with `clock`.
    pub fn new(bookings: Arc<B>, clock: Arc<dyn Clock>) -> Self {
        Self { bookings, clock }
    }
}

fn map_repository_error(error: BookingRepositoryError) -> Error {
    match error {
        BookingRepositoryError::Conflict { mentor_id, slot } => {
            Error::slot_already_booked("This slot has already been booked.").with_details(json!({
                "mentorId": mentor_id,
                "slot": slot,
            }))
        }
        BookingRepositoryError::Unauthorized => {
            Error::session_unavailable("booking store rejected the session token")
        }
        other => {
            warn!(error = %other, "booking store call failed");
            Error::store_unavailable(format!("booking store unavailable: {other}"))
        }
    }
}

#[async_trait]
impl<B> SlotRegistry for SlotRegistryService<B>
where
    B: BookingRepository,
{
    async fn reserve_slot(
        &self,
        token: &AccessToken,
        request: BookingRequest,
    ) -> Result<Booking, Error> {
        let booking = Booking {
            id: BookingId::random(),
            mentor_id: request.mentor_id,
            candidate_id: request.candidate_id,
            slot: request.slot,
            booked_at: self.clock.utc(),
        };
        self.bookings
            .insert(token, &booking)
            .await
            .map_err(map_repository_error)?;
        debug!(
            booking_id = %booking.id,
            mentor_id = %booking.mentor_id,
            slot = %booking.slot,
            "slot reserved"
        );
        Ok(booking)
    }

    async fn list_my_bookings(
        &self,
        token: &AccessToken,
        candidate_id: &CandidateId,
    ) -> Result<Vec<BookingWithMentor>, Error> {
        self.bookings
            .list_for_candidate(token, candidate_id)
            .await
            .map_err(map_repository_error)
    }
}
