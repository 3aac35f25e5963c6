//! World helpers for the booking flow behaviour tests.

use super::*;

impl BookingWorld {
    pub(crate) fn setup(&self) {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .expect("tokio runtime");
        self.runtime.set(RuntimeHandle(Arc::new(runtime)));
        self.store.set(Arc::new(InMemoryStore::seeded([mentor(
            MENTOR,
            "Mina",
            &[at(9, 0), at(10, 0)],
        )])));
        self.first.set(self.candidate("user_x"));
        self.second.set(self.candidate("user_y"));
    }

    fn candidate(&self, account_id: &str) -> Candidate {
        let store = self.store();
        let sink = Arc::new(RecordingNotificationSink::default());
        let flow = BookingOrchestrator::new(
            Arc::new(StaticSessionProvider::new(
                Some(account_id.to_owned()),
                Role::Candidate,
                Some(format!("token-{account_id}")),
            )),
            Arc::new(MentorDirectoryService::new(Arc::clone(&store))),
            Arc::new(SlotRegistryService::new(store, Arc::new(FixtureClock::default()))),
            Arc::clone(&sink),
        );
        Candidate {
            flow: Arc::new(flow),
            sink,
        }
    }

    pub(crate) fn block_on<F: std::future::Future>(&self, future: F) -> F::Output {
        let RuntimeHandle(runtime) = self.runtime.get().expect("runtime should be set");
        runtime.block_on(future)
    }

    pub(crate) fn store(&self) -> Arc<InMemoryStore> {
        self.store.get().expect("store should be set")
    }

    pub(crate) fn first(&self) -> Candidate {
        self.first.get().expect("first candidate should be set")
    }

    pub(crate) fn second(&self) -> Candidate {
        self.second.get().expect("second candidate should be set")
    }

    /// Load the directory and select the mentor's slot at `hour`:00.
    pub(crate) fn select(&self, candidate: &Candidate, hour: u32) {
        self.block_on(candidate.flow.start()).expect("directory loads");
        candidate
            .flow
            .select_mentor(&mentor_id(MENTOR))
            .expect("mentor is listed");
        candidate
            .flow
            .select_slot(at(hour, 0))
            .expect("slot is offered");
    }

    /// Confirm `candidate`'s selection and remember the outcome.
    pub(crate) fn confirm(&self, candidate: &Candidate) {
        let outcome = self.block_on(candidate.flow.confirm_booking());
        let mut outcomes = self.outcomes.get().unwrap_or_default();
        outcomes.push(outcome);
        self.outcomes.set(outcomes);
    }

    pub(crate) fn outcomes(&self) -> Vec<BookingOutcome> {
        self.outcomes.get().expect("outcomes should be recorded")
    }

    pub(crate) fn mentor_id(&self) -> MentorId {
        mentor_id(MENTOR)
    }
}
