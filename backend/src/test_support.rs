//! Test utilities shared by unit tests (in `src/`) and integration tests (in
//! `tests/`).
//!
//! Compiled for `cfg(test)` and behind the `test-support` feature.

use std::sync::{Mutex, PoisonError};

use chrono::{DateTime, Local, TimeZone, Utc};
use mockable::Clock;

use crate::domain::ports::NotificationSink;
use crate::domain::{
    AccessToken, CandidateId, Mentor, MentorId, MentorProfile, MentorProfileInput, Notification,
    OfferedSlots, Slot,
};

/// Slot at `hour:minute` UTC on 2025-01-10.
pub fn at(hour: u32, minute: u32) -> Slot {
    Utc.with_ymd_and_hms(2025, 1, 10, hour, minute, 0)
        .single()
        .unwrap_or_else(|| panic!("invalid fixture time {hour}:{minute}"))
}

/// Parse an RFC 3339 slot.
pub fn slot(value: &str) -> Slot {
    DateTime::parse_from_rfc3339(value)
        .unwrap_or_else(|error| panic!("invalid slot {value:?}: {error}"))
        .with_timezone(&Utc)
}

pub fn mentor_id(value: &str) -> MentorId {
    MentorId::new(value).unwrap_or_else(|error| panic!("invalid mentor id {value:?}: {error}"))
}

pub fn candidate_id(value: &str) -> CandidateId {
    CandidateId::new(value)
        .unwrap_or_else(|error| panic!("invalid candidate id {value:?}: {error}"))
}

/// A non-blank bearer token.
pub fn token() -> AccessToken {
    AccessToken::new("test-token").unwrap_or_else(|| panic!("fixture token is blank"))
}

/// Available mentor with the given slots.
pub fn mentor(id: &str, name: &str, slots: &[Slot]) -> Mentor {
    Mentor {
        id: mentor_id(id),
        name: name.to_owned(),
        current_designation: "Staff Engineer".to_owned(),
        company_name: "Acme".to_owned(),
        expertise_area: "Distributed Systems".to_owned(),
        alma_mater: "State University".to_owned(),
        is_alumni: true,
        available_to_mentor: true,
        slots: slots.iter().copied().collect::<OfferedSlots>(),
    }
}

/// Registration form with every required field filled and one slot.
pub fn complete_input() -> MentorProfileInput {
    MentorProfileInput {
        is_alumni: true,
        available_to_mentor: true,
        name: "Ada Lovelace".to_owned(),
        alma_mater: "University of London".to_owned(),
        expertise_area: "Mathematics".to_owned(),
        current_designation: "Analyst".to_owned(),
        company_name: "Analytical Engines".to_owned(),
        slots_for_mentoring: OfferedSlots::from(vec![at(9, 0)]),
    }
}

/// Validated profile with the given name and slots.
pub fn profile(name: &str, slots: &[Slot]) -> MentorProfile {
    let input = MentorProfileInput {
        name: name.to_owned(),
        slots_for_mentoring: slots.iter().copied().collect(),
        ..complete_input()
    };
    MentorProfile::try_from_input(&input)
        .unwrap_or_else(|error| panic!("fixture profile is invalid: {error}"))
}

/// Clock frozen at 2025-01-09T12:00:00Z.
#[derive(Debug, Clone, Copy)]
pub struct FixtureClock {
    utc_now: DateTime<Utc>,
}

impl Default for FixtureClock {
    fn default() -> Self {
        Self {
            utc_now: Utc
                .with_ymd_and_hms(2025, 1, 9, 12, 0, 0)
                .single()
                .unwrap_or_else(|| panic!("valid fixture timestamp")),
        }
    }
}

impl Clock for FixtureClock {
    fn local(&self) -> DateTime<Local> {
        self.utc_now.with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        self.utc_now
    }
}

/// Sink remembering every notification it receives.
#[derive(Debug, Default)]
pub struct RecordingNotificationSink {
    received: Mutex<Vec<Notification>>,
}

impl RecordingNotificationSink {
    /// Notifications in delivery order.
    pub fn notifications(&self) -> Vec<Notification> {
        self.received
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Titles in delivery order.
    pub fn titles(&self) -> Vec<String> {
        self.notifications()
            .into_iter()
            .map(|notification| notification.title)
            .collect()
    }
}

impl NotificationSink for RecordingNotificationSink {
    fn notify(&self, notification: Notification) {
        self.received
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(notification);
    }
}
