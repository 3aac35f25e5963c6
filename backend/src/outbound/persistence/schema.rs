//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match `backend/migrations` exactly.

diesel::table! {
    /// Mentor profiles, one row per registering account.
    mentors (mentor_id) {
        /// Account id of the registering recruiter.
        mentor_id -> Text,
        name -> Text,
        current_designation -> Text,
        company_name -> Text,
        expertise_area -> Text,
        alma_mater -> Text,
        is_alumni -> Bool,
        available_to_mentor -> Bool,
        /// Offered slots, sorted and minute-aligned.
        slots_for_mentoring -> Array<Timestamptz>,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Append-only reservations. `(mentor_id, slot_at)` is unique.
    bookings (booking_id) {
        booking_id -> Uuid,
        mentor_id -> Text,
        candidate_id -> Text,
        slot_at -> Timestamptz,
        booked_at -> Timestamptz,
    }
}

diesel::joinable!(bookings -> mentors (mentor_id));

diesel::allow_tables_to_appear_in_same_query!(bookings, mentors);
