//! PostgreSQL-backed `BookingRepository`.
//!
//! The `bookings_mentor_slot_key` unique index over `(mentor_id, slot_at)`
//! makes the insert the atomic arbiter between racing candidates.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use tracing::warn;

use crate::domain::ports::{BookingRepository, BookingRepositoryError};
use crate::domain::{
    AccessToken, Booking, BookingId, BookingWithMentor, CandidateId, MentorId, MentorSummary,
};

use super::diesel_error_mapping::{ErrorConstructors, map_diesel_error, map_pool_error};
use super::models::{BookingRow, MentorSummaryRow, NewBookingRow};
use super::pool::DbPool;
use super::schema::{bookings, mentors};

/// Diesel implementation of the booking repository port.
#[derive(Clone)]
pub struct DieselBookingRepository {
    pool: DbPool,
}

impl DieselBookingRepository {
    /// Create a repository over the given pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn rows_to_booking(booking: BookingRow, mentor: MentorSummaryRow) -> Option<BookingWithMentor> {
    let ids = MentorId::new(booking.mentor_id.as_str())
        .ok()
        .zip(CandidateId::new(booking.candidate_id.as_str()).ok());
    let Some((mentor_id, candidate_id)) = ids else {
        warn!(booking_id = %booking.booking_id, "skipping booking row with an invalid id");
        return None;
    };
    Some(BookingWithMentor {
        booking: Booking {
            id: BookingId::from_uuid(booking.booking_id),
            mentor_id,
            candidate_id,
            slot: booking.slot_at,
            booked_at: booking.booked_at,
        },
        mentor: MentorSummary {
            name: mentor.name,
            current_designation: mentor.current_designation,
            company_name: mentor.company_name,
            expertise_area: mentor.expertise_area,
        },
    })
}

#[async_trait]
impl BookingRepository for DieselBookingRepository {
    async fn insert(
        &self,
        _token: &AccessToken,
        booking: &Booking,
    ) -> Result<(), BookingRepositoryError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| map_pool_error(err, BookingRepositoryError::connection))?;

        let row = NewBookingRow {
            booking_id: *booking.id.as_uuid(),
            mentor_id: booking.mentor_id.as_str(),
            candidate_id: booking.candidate_id.as_str(),
            slot_at: booking.slot,
            booked_at: booking.booked_at,
        };

        diesel::insert_into(bookings::table)
            .values(&row)
            .execute(&mut conn)
            .await
            .map_err(|err| {
                map_diesel_error(
                    err,
                    ErrorConstructors {
                        query: BookingRepositoryError::query,
                        connection: BookingRepositoryError::connection,
                        unique: || {
                            BookingRepositoryError::conflict(
                                booking.mentor_id.as_str(),
                                booking.slot.to_rfc3339(),
                            )
                        },
                    },
                )
            })?;
        Ok(())
    }

    async fn list_for_candidate(
        &self,
        _token: &AccessToken,
        candidate_id: &CandidateId,
    ) -> Result<Vec<BookingWithMentor>, BookingRepositoryError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| map_pool_error(err, BookingRepositoryError::connection))?;

        let rows: Vec<(BookingRow, MentorSummaryRow)> = bookings::table
            .inner_join(mentors::table)
            .filter(bookings::candidate_id.eq(candidate_id.as_str()))
            .order((bookings::booked_at.asc(), bookings::booking_id.asc()))
            .select((BookingRow::as_select(), MentorSummaryRow::as_select()))
            .load(&mut conn)
            .await
            .map_err(|err| {
                map_diesel_error(
                    err,
                    ErrorConstructors {
                        query: BookingRepositoryError::query,
                        connection: BookingRepositoryError::connection,
                        unique: || BookingRepositoryError::query("unexpected unique violation"),
                    },
                )
            })?;

        Ok(rows
            .into_iter()
            .filter_map(|(booking, mentor)| rows_to_booking(booking, mentor))
            .collect())
    }
}
