//! In-process store implementing both repository ports.
//!
//! One mutex guards mentors and bookings together, so the `(mentor, slot)`
//! uniqueness check and the append happen atomically, as a database unique
//! index would.

use std::collections::{BTreeMap, HashSet};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use tracing::debug;
use zeroize::Zeroizing;

use crate::domain::ports::{
    BookingRepository, BookingRepositoryError, MentorRepository, MentorRepositoryError,
};
use crate::domain::{AccessToken, Booking, BookingWithMentor, CandidateId, Mentor, MentorId, Slot};

#[derive(Debug, Default)]
struct StoreState {
    mentors: BTreeMap<MentorId, Mentor>,
    bookings: Vec<Booking>,
    reserved: HashSet<(MentorId, Slot)>,
}

/// Mentors and bookings held in memory.
#[derive(Default)]
pub struct InMemoryStore {
    state: Mutex<StoreState>,
    required_token: Option<Zeroizing<String>>,
    unavailable: AtomicBool,
}

impl InMemoryStore {
    /// Empty store accepting any token.
    pub fn new() -> Self {
        Self::default()
    }

    /// Reject every call whose token differs from `token`.
    pub fn with_required_token(mut self, token: impl Into<String>) -> Self {
        self.required_token = Some(Zeroizing::new(token.into()));
        self
    }

    /// Store pre-populated with mentor profiles. Later duplicates of an id
    /// are ignored.
    pub fn seeded(mentors: impl IntoIterator<Item = Mentor>) -> Self {
        let store = Self::new();
        {
            let mut state = store.lock();
            for mentor in mentors {
                state.mentors.entry(mentor.id.clone()).or_insert(mentor);
            }
        }
        store
    }

    /// Simulate an outage: every call fails with a connection error until
    /// cleared.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    /// Number of stored bookings.
    pub fn booking_count(&self) -> usize {
        self.lock().bookings.len()
    }

    /// Stored profile for `mentor_id`, regardless of availability.
    pub fn mentor(&self, mentor_id: &MentorId) -> Option<Mentor> {
        self.lock().mentors.get(mentor_id).cloned()
    }

    fn lock(&self) -> MutexGuard<'_, StoreState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn check_access(&self, token: &AccessToken) -> Result<(), AccessDenied> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(AccessDenied::Unavailable);
        }
        match &self.required_token {
            Some(expected) if expected.as_str() != token.expose() => Err(AccessDenied::Token),
            _ => Ok(()),
        }
    }
}

enum AccessDenied {
    Unavailable,
    Token,
}

impl From<AccessDenied> for MentorRepositoryError {
    fn from(value: AccessDenied) -> Self {
        match value {
            AccessDenied::Unavailable => Self::connection("in-memory store is offline"),
            AccessDenied::Token => Self::unauthorized(),
        }
    }
}

impl From<AccessDenied> for BookingRepositoryError {
    fn from(value: AccessDenied) -> Self {
        match value {
            AccessDenied::Unavailable => Self::connection("in-memory store is offline"),
            AccessDenied::Token => Self::unauthorized(),
        }
    }
}

#[async_trait]
impl MentorRepository for InMemoryStore {
    async fn list_available(
        &self,
        token: &AccessToken,
    ) -> Result<Vec<Mentor>, MentorRepositoryError> {
        self.check_access(token)?;
        Ok(self
            .lock()
            .mentors
            .values()
            .filter(|mentor| mentor.available_to_mentor)
            .cloned()
            .collect())
    }

    async fn insert(
        &self,
        token: &AccessToken,
        mentor: &Mentor,
    ) -> Result<(), MentorRepositoryError> {
        self.check_access(token)?;
        let mut state = self.lock();
        if state.mentors.contains_key(&mentor.id) {
            return Err(MentorRepositoryError::duplicate(mentor.id.as_str()));
        }
        state.mentors.insert(mentor.id.clone(), mentor.clone());
        Ok(())
    }
}

#[async_trait]
impl BookingRepository for InMemoryStore {
    async fn insert(
        &self,
        token: &AccessToken,
        booking: &Booking,
    ) -> Result<(), BookingRepositoryError> {
        self.check_access(token)?;
        let mut state = self.lock();
        if !state.mentors.contains_key(&booking.mentor_id) {
            return Err(BookingRepositoryError::query(
                "referenced record does not exist",
            ));
        }
        if !state
            .reserved
            .insert((booking.mentor_id.clone(), booking.slot))
        {
            debug!(mentor_id = %booking.mentor_id, slot = %booking.slot, "slot already reserved");
            return Err(BookingRepositoryError::conflict(
                booking.mentor_id.as_str(),
                booking.slot.to_rfc3339(),
            ));
        }
        state.bookings.push(booking.clone());
        Ok(())
    }

    async fn list_for_candidate(
        &self,
        token: &AccessToken,
        candidate_id: &CandidateId,
    ) -> Result<Vec<BookingWithMentor>, BookingRepositoryError> {
        self.check_access(token)?;
        let state = self.lock();
        Ok(state
            .bookings
            .iter()
            .filter(|booking| &booking.candidate_id == candidate_id)
            .filter_map(|booking| {
                state
                    .mentors
                    .get(&booking.mentor_id)
                    .map(|mentor| BookingWithMentor {
                        booking: booking.clone(),
                        mentor: mentor.summary(),
                    })
            })
            .collect())
    }
}
