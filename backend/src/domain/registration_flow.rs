//! Mentor self-registration flow.
//!
//! Keeps the draft of offered slots, checks the role claim and validates the
//! profile locally before anything reaches the network. Only one submission
//! may be in flight at a time.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use chrono::NaiveDate;
use tracing::debug;

use super::ports::{MentorRegistration, NotificationSink, RegisterMentorRequest, SessionProvider};
use super::remote_call::{RemoteCall, RequestState};
use super::slots::slot_at;
use super::{
    Error, Mentor, MentorId, MentorProfile, MentorProfileInput, Notification, OfferedSlots, Role,
    Slot,
};

/// Result of [`MentorRegistrationFlow::submit`].
#[derive(Debug, Clone, PartialEq)]
pub enum RegistrationOutcome {
    Registered(Mentor),
    /// Another submission is still in flight; nothing was sent.
    AlreadySubmitting,
}

/// Registration form state and submission for the signed-in account.
pub struct MentorRegistrationFlow<S, G, N>
where
    S: ?Sized,
    N: ?Sized,
{
    session: Arc<S>,
    notifications: Arc<N>,
    call: RemoteCall<G, Mentor, S>,
    draft: Mutex<OfferedSlots>,
    submitting: AtomicBool,
}

/// Clears the submitting flag on every exit path.
struct Submission<'a>(&'a AtomicBool);

impl Drop for Submission<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

impl<S, G, N> MentorRegistrationFlow<S, G, N>
where
    S: SessionProvider + ?Sized,
    G: MentorRegistration,
    N: NotificationSink + ?Sized + 'static,
{
    /// Wire the flow to its collaborators.
    pub fn new(session: Arc<S>, registration: Arc<G>, notifications: Arc<N>) -> Self {
        let on_success = Arc::clone(&notifications);
        let on_error = Arc::clone(&notifications);
        let call = RemoteCall::new(Arc::clone(&session), registration)
            .with_on_success(move |_: &Mentor| on_success.notify(Notification::mentor_registered()))
            .with_on_error(move |error: &Error| on_error.notify(Notification::from_error(error)));
        Self {
            session,
            notifications,
            call,
            draft: Mutex::new(OfferedSlots::new()),
            submitting: AtomicBool::new(false),
        }
    }

    fn draft(&self) -> MutexGuard<'_, OfferedSlots> {
        self.draft.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn fail(&self, error: Error) -> Error {
        self.notifications.notify(Notification::from_error(&error));
        error
    }

    /// Add a slot to the draft, truncated to the minute. Returns `false` when
    /// it was already present.
    pub fn add_slot(&self, slot: Slot) -> bool {
        self.draft().insert(slot)
    }

    /// Add a slot from a calendar date and an `HH:MM` time.
    pub fn add_slot_at(&self, date: NaiveDate, time: &str) -> Result<bool, Error> {
        let slot = slot_at(date, time).map_err(|error| self.fail(error))?;
        Ok(self.add_slot(slot))
    }

    /// Remove the slot shown at `index` in the draft.
    pub fn remove_slot_at(&self, index: usize) -> Option<Slot> {
        self.draft().remove_at(index)
    }

    /// Current draft, in display order.
    pub fn draft_slots(&self) -> OfferedSlots {
        self.draft().clone()
    }

    /// Lifecycle of the registration call.
    pub fn state(&self) -> RequestState<Mentor> {
        self.call.state()
    }

    /// Submit the form.
    ///
    /// Slots already in `input` are merged with the draft. The draft is
    /// cleared only after a successful registration.
    ///
    /// # Errors
    ///
    /// `SessionUnavailable` without a signed-in account, `Forbidden` for
    /// non-recruiters, `ValidationFailed` for an incomplete profile and
    /// `AlreadyRegistered` when the account already has a profile.
    pub async fn submit(&self, mut input: MentorProfileInput) -> Result<RegistrationOutcome, Error> {
        if self.submitting.swap(true, Ordering::AcqRel) {
            debug!("registration already in flight");
            return Ok(RegistrationOutcome::AlreadySubmitting);
        }
        let _submission = Submission(&self.submitting);

        let Some(identity) = self.session.identity() else {
            return Err(self.fail(Error::session_unavailable(
                "Sign in to register as a mentor.",
            )));
        };
        if identity.role() != Role::Recruiter {
            return Err(self.fail(Error::forbidden(
                "Only recruiters can register as mentors.",
            )));
        }
        let mentor_id = MentorId::new(identity.account_id()).map_err(|err| {
            self.fail(Error::session_unavailable(format!(
                "session identity is unusable: {err}"
            )))
        })?;

        let draft = self.draft_slots();
        input.slots_for_mentoring.extend(&draft);
        let profile = MentorProfile::try_from_input(&input)
            .map_err(|err| self.fail(Error::from(err)))?;

        let request = RegisterMentorRequest { mentor_id, profile };
        let mentor = self
            .call
            .invoke(|token, registration| async move {
                registration.register_mentor(&token, request).await
            })
            .await?;

        self.draft().clear();
        Ok(RegistrationOutcome::Registered(mentor))
    }
}
