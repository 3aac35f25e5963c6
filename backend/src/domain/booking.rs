//! Slot reservations.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{CandidateId, MentorId, MentorSummary, Slot};

/// Stable booking identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BookingId(Uuid);

impl BookingId {
    /// Generate a new random identifier.
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Wrap an existing UUID.
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Access the underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for BookingId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Arguments of a reservation attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingRequest {
    pub mentor_id: MentorId,
    pub candidate_id: CandidateId,
    pub slot: Slot,
}

/// A confirmed reservation.
///
/// ## Invariants
/// - `(mentor_id, slot)` is unique across all bookings.
/// - Bookings are never mutated once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    pub id: BookingId,
    pub mentor_id: MentorId,
    pub candidate_id: CandidateId,
    pub slot: Slot,
    pub booked_at: DateTime<Utc>,
}

impl Booking {
    /// The `(mentor, slot)` pair guarded by the uniqueness invariant.
    pub fn slot_key(&self) -> (&MentorId, &Slot) {
        (&self.mentor_id, &self.slot)
    }
}

/// A booking joined with its mentor's display fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingWithMentor {
    #[serde(flatten)]
    pub booking: Booking,
    pub mentor: MentorSummary,
}
