//! Plain-text rendering of directory and booking results.

use std::io::{self, Write};

use chrono::SecondsFormat;

use crate::domain::{Booking, BookingWithMentor, Mentor, Slot};

fn slot_label(slot: &Slot) -> String {
    slot.to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// One block per mentor: a header line followed by the offered slots.
pub fn write_mentors(out: &mut impl Write, mentors: &[Mentor]) -> io::Result<()> {
    if mentors.is_empty() {
        return writeln!(out, "No mentors are available right now.");
    }
    for mentor in mentors {
        writeln!(
            out,
            "{} ({}): {} at {}, {}",
            mentor.name,
            mentor.id,
            mentor.current_designation,
            mentor.company_name,
            mentor.expertise_area
        )?;
        for slot in &mentor.slots {
            writeln!(out, "  {}", slot_label(slot))?;
        }
    }
    Ok(())
}

pub fn write_booking(out: &mut impl Write, booking: &Booking) -> io::Result<()> {
    writeln!(
        out,
        "Booked {} with {} (booking {})",
        slot_label(&booking.slot),
        booking.mentor_id,
        booking.id
    )
}

pub fn write_bookings(out: &mut impl Write, bookings: &[BookingWithMentor]) -> io::Result<()> {
    if bookings.is_empty() {
        return writeln!(out, "You have no bookings yet.");
    }
    for entry in bookings {
        writeln!(
            out,
            "{}  {}, {} at {}",
            slot_label(&entry.booking.slot),
            entry.mentor.name,
            entry.mentor.current_designation,
            entry.mentor.company_name
        )?;
    }
    Ok(())
}

pub fn write_registration(out: &mut impl Write, mentor: &Mentor) -> io::Result<()> {
    writeln!(
        out,
        "Registered {} ({}) with {} slot(s)",
        mentor.name,
        mentor.id,
        mentor.slots.len()
    )
}
