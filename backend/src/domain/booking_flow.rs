//! Candidate-side booking state machine.
//!
//! The orchestrator walks a candidate from the mentor directory to a
//! confirmed reservation:
//!
//! ```text
//! Idle -> MentorsLoading -> MentorsLoaded -> SlotsDisplayed -> Booking
//!                                                  ^              |
//!                                                  |              v
//!                                                  +-- BookingConfirmed | BookingFailed
//! ```
//!
//! Every remote call flows through a [`RemoteCall`] owned by the
//! orchestrator. Each kind of call carries a generation counter; a response
//! whose generation has been superseded by a later user action is discarded
//! rather than applied, and raises no notification. Double-booking is never
//! prevented here: the registry's uniqueness constraint rejects the second
//! attempt and the orchestrator reports it as a failure.

use std::collections::HashSet;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::ports::{MentorDirectory, NotificationSink, SessionProvider, SlotRegistry};
use super::remote_call::{RemoteCall, RequestState};
use super::{
    Booking, BookingRequest, BookingWithMentor, CandidateId, Error, ErrorCode, Mentor, MentorId,
    Notification, Slot,
};

/// Phase of the booking flow.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BookingPhase {
    /// No identity resolved yet, or the first directory fetch failed.
    #[default]
    Idle,
    MentorsLoading,
    MentorsLoaded,
    /// A mentor is selected and their open slots are displayed.
    SlotsDisplayed,
    /// A reservation is in flight.
    Booking,
    /// The last reservation succeeded; the slot list stays displayed.
    BookingConfirmed,
    /// The last reservation failed; the slot list stays displayed without
    /// the slot if it turned out to be taken.
    BookingFailed,
}

impl BookingPhase {
    /// Whether a slot list is on screen in this phase.
    pub fn displays_slots(self) -> bool {
        matches!(
            self,
            Self::SlotsDisplayed | Self::Booking | Self::BookingConfirmed | Self::BookingFailed
        )
    }
}

/// Result of [`BookingOrchestrator::confirm_booking`].
#[derive(Debug, Clone, PartialEq)]
pub enum BookingOutcome {
    /// No mentor or slot was selected; nothing was sent.
    NothingSelected,
    Confirmed(Booking),
    Failed(Error),
}

/// Read-only snapshot of the flow for rendering.
#[derive(Debug, Clone, PartialEq)]
pub struct BookingView {
    pub phase: BookingPhase,
    /// Last directory snapshot, `None` until the first successful fetch.
    pub mentors: Option<Vec<Mentor>>,
    pub selected_mentor: Option<MentorId>,
    pub displayed_slots: Vec<Slot>,
    pub selected_slot: Option<Slot>,
    pub my_bookings: Vec<BookingWithMentor>,
    pub directory: RequestState<Vec<Mentor>>,
    pub reservation: RequestState<Booking>,
    pub bookings: RequestState<Vec<BookingWithMentor>>,
}

#[derive(Debug, Default)]
struct FlowState {
    phase: BookingPhase,
    candidate: Option<CandidateId>,
    mentors: Option<Vec<Mentor>>,
    directory_error: Option<Error>,
    selected_mentor: Option<MentorId>,
    displayed_slots: Vec<Slot>,
    selected_slot: Option<Slot>,
    taken: HashSet<(MentorId, Slot)>,
    my_bookings: Option<Vec<BookingWithMentor>>,
    bookings_error: Option<Error>,
    directory_generation: u64,
    selection_generation: u64,
    bookings_generation: u64,
}

impl FlowState {
    fn open_slots(&self, mentor: &Mentor) -> Vec<Slot> {
        mentor
            .slots
            .iter()
            .filter(|slot| !self.taken.contains(&(mentor.id.clone(), **slot)))
            .copied()
            .collect()
    }

    fn selected(&self) -> Option<&Mentor> {
        let selected = self.selected_mentor.as_ref()?;
        self.mentors
            .as_ref()?
            .iter()
            .find(|mentor| &mentor.id == selected)
    }

    /// Re-derive the displayed slots after the snapshot or taken set changed.
    ///
    /// Dropping the selected mentor retires the selection, so an in-flight
    /// reservation for it no longer counts as current.
    fn refresh_selection(&mut self) {
        let Some(slots) = self.selected().map(|mentor| self.open_slots(mentor)) else {
            if self.selected_mentor.take().is_some() {
                self.selection_generation += 1;
            }
            self.selected_slot = None;
            self.displayed_slots.clear();
            if self.phase.displays_slots() {
                self.phase = BookingPhase::MentorsLoaded;
            }
            return;
        };
        if self
            .selected_slot
            .is_some_and(|slot| !slots.contains(&slot))
        {
            self.selected_slot = None;
        }
        self.displayed_slots = slots;
    }
}

/// Coordinates mentor selection, slot enumeration and reservation for the
/// signed-in candidate.
pub struct BookingOrchestrator<S, D, R, N>
where
    S: ?Sized,
    N: ?Sized,
{
    session: Arc<S>,
    notifications: Arc<N>,
    directory_call: RemoteCall<D, Vec<Mentor>, S>,
    reservation_call: RemoteCall<R, Booking, S>,
    bookings_call: RemoteCall<R, Vec<BookingWithMentor>, S>,
    state: Mutex<FlowState>,
}

impl<S, D, R, N> BookingOrchestrator<S, D, R, N>
where
    S: SessionProvider + ?Sized,
    D: MentorDirectory,
    R: SlotRegistry,
    N: NotificationSink + ?Sized + 'static,
{
    /// Wire the flow to its collaborators.
    ///
    /// Reservation outcomes are announced by the reservation call's hooks.
    /// Directory and bookings failures are announced only once the response
    /// is known to be current.
    pub fn new(
        session: Arc<S>,
        directory: Arc<D>,
        registry: Arc<R>,
        notifications: Arc<N>,
    ) -> Self {
        let directory_call = RemoteCall::new(Arc::clone(&session), directory);
        let sink = Arc::clone(&notifications);
        let failures = Arc::clone(&notifications);
        let reservation_call = RemoteCall::new(Arc::clone(&session), Arc::clone(&registry))
            .with_on_success(move |_: &Booking| sink.notify(Notification::slot_booked()))
            .with_on_error(move |error: &Error| failures.notify(Notification::from_error(error)));
        let bookings_call = RemoteCall::new(Arc::clone(&session), registry);

        Self {
            session,
            notifications,
            directory_call,
            reservation_call,
            bookings_call,
            state: Mutex::new(FlowState::default()),
        }
    }

    fn lock(&self) -> MutexGuard<'_, FlowState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn fail(&self, error: Error) -> Error {
        self.notifications.notify(Notification::from_error(&error));
        error
    }

    /// Resolve the session identity, then load the directory and the
    /// candidate's bookings.
    ///
    /// No directory call is made until an identity is available. A directory
    /// response superseded by a later reload does not fail the start.
    pub async fn start(&self) -> Result<(), Error> {
        let Some(identity) = self.session.identity() else {
            return Err(self.fail(Error::session_unavailable(
                "Sign in to browse mentors.",
            )));
        };
        let candidate = CandidateId::new(identity.account_id()).map_err(|err| {
            self.fail(Error::session_unavailable(format!(
                "session identity is unusable: {err}"
            )))
        })?;
        self.lock().candidate = Some(candidate);

        self.fetch_directory().await?;
        self.fetch_bookings().await.map(|_| ())
    }

    /// Fetch the directory snapshot.
    ///
    /// An in-progress mentor selection survives a reload: its slots are
    /// re-derived from the new snapshot. When a later reload supersedes this
    /// one, the latest snapshot is returned instead (empty while none has
    /// arrived).
    pub async fn load_mentors(&self) -> Result<Vec<Mentor>, Error> {
        match self.fetch_directory().await? {
            Some(mentors) => Ok(mentors),
            None => Ok(self.lock().mentors.clone().unwrap_or_default()),
        }
    }

    /// `Ok(None)` when the response was superseded and discarded.
    async fn fetch_directory(&self) -> Result<Option<Vec<Mentor>>, Error> {
        let generation = {
            let mut state = self.lock();
            if state.candidate.is_none() {
                drop(state);
                return Err(self.fail(Error::session_unavailable(
                    "Sign in to browse mentors.",
                )));
            }
            state.directory_generation += 1;
            state.directory_error = None;
            if !state.phase.displays_slots() {
                state.phase = BookingPhase::MentorsLoading;
            }
            state.directory_generation
        };

        let result = self
            .directory_call
            .invoke(|token, directory| async move {
                directory.list_available_mentors(&token).await
            })
            .await;

        let mut state = self.lock();
        if state.directory_generation != generation {
            debug!(
                generation,
                current = state.directory_generation,
                "discarding stale directory response"
            );
            return Ok(None);
        }
        match result {
            Ok(mentors) => {
                state.mentors = Some(mentors.clone());
                if state.selected_mentor.is_some() {
                    state.refresh_selection();
                } else {
                    state.phase = BookingPhase::MentorsLoaded;
                }
                Ok(Some(mentors))
            }
            Err(error) => {
                if state.phase == BookingPhase::MentorsLoading {
                    state.phase = if state.mentors.is_some() {
                        BookingPhase::MentorsLoaded
                    } else {
                        BookingPhase::Idle
                    };
                }
                state.directory_error = Some(error.clone());
                drop(state);
                Err(self.fail(error))
            }
        }
    }

    /// Select a mentor from the current snapshot and display their open
    /// slots. Any previous slot selection is reset.
    pub fn select_mentor(&self, mentor_id: &MentorId) -> Result<Vec<Slot>, Error> {
        let mut state = self.lock();
        let Some(mentors) = state.mentors.as_ref() else {
            drop(state);
            return Err(self.fail(Error::validation_failed(
                "Mentors have not been loaded yet.",
            )));
        };
        let Some(mentor) = mentors.iter().find(|mentor| &mentor.id == mentor_id) else {
            drop(state);
            return Err(self.fail(Error::not_found(format!(
                "Mentor {mentor_id} is not available."
            ))));
        };
        let slots = state.open_slots(mentor);

        state.selected_mentor = Some(mentor_id.clone());
        state.selected_slot = None;
        state.displayed_slots = slots.clone();
        state.selection_generation += 1;
        state.phase = BookingPhase::SlotsDisplayed;
        Ok(slots)
    }

    /// Select one of the displayed slots.
    pub fn select_slot(&self, slot: Slot) -> Result<(), Error> {
        let mut state = self.lock();
        if state.selected_mentor.is_none() {
            drop(state);
            return Err(self.fail(Error::validation_failed("Select a mentor first.")));
        }
        if !state.displayed_slots.contains(&slot) {
            drop(state);
            return Err(self.fail(Error::validation_failed(
                "That slot is not offered by the selected mentor.",
            )));
        }
        state.selected_slot = Some(slot);
        if state.phase != BookingPhase::Booking {
            state.phase = BookingPhase::SlotsDisplayed;
        }
        Ok(())
    }

    /// Reserve the selected slot.
    ///
    /// On success the slot leaves the displayed list, though it stays
    /// selected, and the candidate's bookings are refreshed. When the slot
    /// turns out to be taken it is removed from the list and deselected.
    /// Results for a selection the user has since replaced only update the
    /// taken set.
    pub async fn confirm_booking(&self) -> BookingOutcome {
        let (request, generation) = {
            let mut state = self.lock();
            let (Some(mentor_id), Some(slot)) = (state.selected_mentor.clone(), state.selected_slot)
            else {
                return BookingOutcome::NothingSelected;
            };
            let Some(candidate_id) = state.candidate.clone() else {
                drop(state);
                return BookingOutcome::Failed(
                    self.fail(Error::session_unavailable("Sign in to book a slot.")),
                );
            };
            state.phase = BookingPhase::Booking;
            let request = BookingRequest {
                mentor_id,
                candidate_id,
                slot,
            };
            (request, state.selection_generation)
        };
        let (mentor_id, slot) = (request.mentor_id.clone(), request.slot);

        let result = self
            .reservation_call
            .invoke(|token, registry| async move { registry.reserve_slot(&token, request).await })
            .await;

        {
            let mut state = self.lock();
            let current = state.selection_generation == generation;
            if !current {
                debug!(
                    generation,
                    current = state.selection_generation,
                    "selection changed while booking"
                );
            }
            match &result {
                Ok(_) => {
                    state.taken.insert((mentor_id, slot));
                    if current {
                        state.displayed_slots.retain(|offered| *offered != slot);
                        state.phase = BookingPhase::BookingConfirmed;
                    } else {
                        state.refresh_selection();
                    }
                }
                Err(error) => {
                    if error.code() == ErrorCode::SlotAlreadyBooked {
                        state.taken.insert((mentor_id, slot));
                        state.refresh_selection();
                    }
                    if current {
                        state.phase = BookingPhase::BookingFailed;
                    }
                }
            }
        }

        match result {
            Ok(booking) => {
                if let Err(error) = self.refresh_my_bookings().await {
                    debug!(error = %error, "bookings refresh after reservation failed");
                }
                BookingOutcome::Confirmed(booking)
            }
            Err(error) => BookingOutcome::Failed(error),
        }
    }

    /// Reload the candidate's own bookings.
    ///
    /// When a later reload supersedes this one, the bookings currently held
    /// are returned instead.
    pub async fn refresh_my_bookings(&self) -> Result<Vec<BookingWithMentor>, Error> {
        match self.fetch_bookings().await? {
            Some(bookings) => Ok(bookings),
            None => Ok(self.lock().my_bookings.clone().unwrap_or_default()),
        }
    }

    async fn fetch_bookings(&self) -> Result<Option<Vec<BookingWithMentor>>, Error> {
        let (candidate, generation) = {
            let mut state = self.lock();
            let Some(candidate) = state.candidate.clone() else {
                drop(state);
                return Err(self.fail(Error::session_unavailable(
                    "Sign in to see your bookings.",
                )));
            };
            state.bookings_generation += 1;
            state.bookings_error = None;
            (candidate, state.bookings_generation)
        };

        let result = self
            .bookings_call
            .invoke(|token, registry| async move {
                registry.list_my_bookings(&token, &candidate).await
            })
            .await;

        let mut state = self.lock();
        if state.bookings_generation != generation {
            debug!(
                generation,
                current = state.bookings_generation,
                "discarding stale bookings response"
            );
            return Ok(None);
        }
        match result {
            Ok(bookings) => {
                state.my_bookings = Some(bookings.clone());
                Ok(Some(bookings))
            }
            Err(error) => {
                state.bookings_error = Some(error.clone());
                drop(state);
                Err(self.fail(error))
            }
        }
    }

    /// Current phase.
    pub fn phase(&self) -> BookingPhase {
        self.lock().phase
    }

    /// Snapshot of the whole flow.
    ///
    /// Directory and bookings request states reflect only responses that
    /// were current when they arrived.
    pub fn view(&self) -> BookingView {
        let state = self.lock();
        BookingView {
            phase: state.phase,
            mentors: state.mentors.clone(),
            selected_mentor: state.selected_mentor.clone(),
            displayed_slots: state.displayed_slots.clone(),
            selected_slot: state.selected_slot,
            my_bookings: state.my_bookings.clone().unwrap_or_default(),
            directory: RequestState {
                data: state.mentors.clone(),
                loading: self.directory_call.is_loading(),
                error: state.directory_error.clone(),
            },
            reservation: self.reservation_call.state(),
            bookings: RequestState {
                data: state.my_bookings.clone(),
                loading: self.bookings_call.is_loading(),
                error: state.bookings_error.clone(),
            },
        }
    }
}

#[cfg(test)]
#[path = "booking_flow_tests.rs"]
mod tests;
