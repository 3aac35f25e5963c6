//! Behavioural tests for the candidate booking flow over the in-process store.

use std::sync::Arc;

use mentorship::domain::{
    BookingOrchestrator, BookingOutcome, MentorDirectoryService, MentorId, Role,
    SlotRegistryService,
};
use mentorship::outbound::memory::InMemoryStore;
use mentorship::outbound::session::StaticSessionProvider;
use mentorship::test_support::{FixtureClock, RecordingNotificationSink, at, mentor, mentor_id};
use rstest::fixture;
use rstest_bdd::Slot;
use rstest_bdd_macros::ScenarioState;

#[path = "booking_flow_bdd/world.rs"]
mod booking_flow_world;

const MENTOR: &str = "user_m";

type Flow = BookingOrchestrator<
    StaticSessionProvider,
    MentorDirectoryService<InMemoryStore>,
    SlotRegistryService<InMemoryStore>,
    RecordingNotificationSink,
>;

#[derive(Clone)]
struct RuntimeHandle(Arc<tokio::runtime::Runtime>);

/// One signed-in candidate with their own flow and notification log.
#[derive(Clone)]
struct Candidate {
    flow: Arc<Flow>,
    sink: Arc<RecordingNotificationSink>,
}

#[derive(Default, ScenarioState)]
struct BookingWorld {
    runtime: Slot<RuntimeHandle>,
    store: Slot<Arc<InMemoryStore>>,
    first: Slot<Candidate>,
    second: Slot<Candidate>,
    outcomes: Slot<Vec<BookingOutcome>>,
}

#[fixture]
fn world() -> BookingWorld {
    BookingWorld::default()
}

#[path = "booking_flow_bdd/steps.rs"]
mod booking_flow_steps;
