//! Internal Diesel row structs.
//!
//! These types never leave the persistence layer.

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use super::schema::{bookings, mentors};

/// Row read from the mentors table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = mentors)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct MentorRow {
    pub mentor_id: String,
    pub name: String,
    pub current_designation: String,
    pub company_name: String,
    pub expertise_area: String,
    pub alma_mater: String,
    pub is_alumni: bool,
    pub available_to_mentor: bool,
    pub slots_for_mentoring: Vec<DateTime<Utc>>,
}

/// Insertable mentor profile.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = mentors)]
pub(crate) struct NewMentorRow<'a> {
    pub mentor_id: &'a str,
    pub name: &'a str,
    pub current_designation: &'a str,
    pub company_name: &'a str,
    pub expertise_area: &'a str,
    pub alma_mater: &'a str,
    pub is_alumni: bool,
    pub available_to_mentor: bool,
    pub slots_for_mentoring: &'a [DateTime<Utc>],
}

/// Row read from the bookings table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = bookings)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct BookingRow {
    pub booking_id: Uuid,
    pub mentor_id: String,
    pub candidate_id: String,
    pub slot_at: DateTime<Utc>,
    pub booked_at: DateTime<Utc>,
}

/// Mentor display columns joined onto a booking.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = mentors)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct MentorSummaryRow {
    pub name: String,
    pub current_designation: String,
    pub company_name: String,
    pub expertise_area: String,
}

/// Insertable booking.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = bookings)]
pub(crate) struct NewBookingRow<'a> {
    pub booking_id: Uuid,
    pub mentor_id: &'a str,
    pub candidate_id: &'a str,
    pub slot_at: DateTime<Utc>,
    pub booked_at: DateTime<Utc>,
}
