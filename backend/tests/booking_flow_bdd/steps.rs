//! Step definitions and scenario bindings for the booking flow.

use super::*;
use mentorship::domain::{BookingPhase, ErrorCode};
use rstest_bdd_macros::{given, scenario, then, when};

#[given("a directory with one mentor offering the 09:00 and 10:00 slots")]
fn a_directory_with_one_mentor(world: &BookingWorld) {
    world.setup();
}

#[given("both candidates have selected the 09:00 slot")]
fn both_candidates_have_selected_the_slot(world: &BookingWorld) {
    world.select(&world.first(), 9);
    world.select(&world.second(), 9);
}

#[given("the first candidate has selected the 09:00 slot")]
fn the_first_candidate_has_selected_the_slot(world: &BookingWorld) {
    world.select(&world.first(), 9);
}

#[given("the store is offline")]
fn the_store_is_offline(world: &BookingWorld) {
    world.store().set_unavailable(true);
}

#[when("both candidates confirm their booking at the same time")]
fn both_candidates_confirm_at_the_same_time(world: &BookingWorld) {
    let (first, second) = (world.first(), world.second());
    let (a, b) = world.block_on(async {
        tokio::join!(first.flow.confirm_booking(), second.flow.confirm_booking())
    });
    world.outcomes.set(vec![a, b]);
}

#[when("the first candidate confirms the booking twice")]
fn the_first_candidate_confirms_twice(world: &BookingWorld) {
    let first = world.first();
    let outcomes = world.block_on(async {
        let once = first.flow.confirm_booking().await;
        let twice = first.flow.confirm_booking().await;
        vec![once, twice]
    });
    world.outcomes.set(outcomes);
}

#[when("the first candidate opens the booking page")]
fn the_first_candidate_opens_the_booking_page(world: &BookingWorld) {
    let first = world.first();
    let result = world.block_on(first.flow.start());
    assert!(result.is_err(), "start should fail while the store is offline");
}

#[when("the first candidate confirms the booking")]
fn the_first_candidate_confirms(world: &BookingWorld) {
    world.confirm(&world.first());
}

#[when("the second candidate confirms the booking")]
fn the_second_candidate_confirms(world: &BookingWorld) {
    world.confirm(&world.second());
}

#[when("the second candidate picks the 10:00 slot and confirms it")]
fn the_second_candidate_picks_the_remaining_slot(world: &BookingWorld) {
    let second = world.second();
    assert_eq!(second.flow.view().displayed_slots, vec![at(10, 0)]);
    second
        .flow
        .select_slot(at(10, 0))
        .expect("remaining slot is offered");
    world.confirm(&second);
}

#[then("the bookings were confirmed, rejected as already booked, then confirmed")]
fn the_bookings_were_confirmed_rejected_then_confirmed(world: &BookingWorld) {
    let outcomes = world.outcomes();
    let [
        BookingOutcome::Confirmed(first),
        BookingOutcome::Failed(rejected),
        BookingOutcome::Confirmed(second),
    ] = outcomes.as_slice()
    else {
        panic!("unexpected outcomes {outcomes:?}");
    };
    assert_eq!(first.slot, at(9, 0));
    assert_eq!(rejected.code(), ErrorCode::SlotAlreadyBooked);
    assert_eq!(second.slot, at(10, 0));
    assert_eq!(second.candidate_id.as_str(), "user_y");
    assert_eq!(
        world.second().sink.titles(),
        ["Slot unavailable", "Slot Booked"]
    );
}

#[then("two bookings are stored")]
fn two_bookings_are_stored(world: &BookingWorld) {
    assert_eq!(world.store().booking_count(), 2);
}

#[then("exactly one booking is stored")]
fn exactly_one_booking_is_stored(world: &BookingWorld) {
    assert_eq!(world.store().booking_count(), 1);
    let confirmed = world
        .outcomes()
        .iter()
        .filter(|outcome| matches!(outcome, BookingOutcome::Confirmed(_)))
        .count();
    assert_eq!(confirmed, 1);
}

#[then("one candidate is told the slot is booked and the other that it is unavailable")]
fn one_candidate_wins_the_race(world: &BookingWorld) {
    let mut titles = [world.first().sink.titles(), world.second().sink.titles()];
    titles.sort();
    assert_eq!(
        titles,
        [vec!["Slot Booked".to_owned()], vec!["Slot unavailable".to_owned()]]
    );
}

#[then("the losing candidate only sees the 10:00 slot")]
fn the_losing_candidate_only_sees_the_other_slot(world: &BookingWorld) {
    let outcomes = world.outcomes();
    let loser = match outcomes.as_slice() {
        [BookingOutcome::Failed(error), _] => {
            assert_eq!(error.code(), ErrorCode::SlotAlreadyBooked);
            world.first()
        }
        [_, BookingOutcome::Failed(error)] => {
            assert_eq!(error.code(), ErrorCode::SlotAlreadyBooked);
            world.second()
        }
        other => panic!("expected one failed booking, got {other:?}"),
    };
    let view = loser.flow.view();
    assert_eq!(view.phase, BookingPhase::BookingFailed);
    assert_eq!(view.selected_mentor, Some(world.mentor_id()));
    assert_eq!(view.displayed_slots, vec![at(10, 0)]);
    assert_eq!(view.selected_slot, None);
}

#[then("the first candidate is told the slot is booked and then that it is unavailable")]
fn the_first_candidate_sees_both_notifications(world: &BookingWorld) {
    let first = world.first();
    assert_eq!(first.sink.titles(), ["Slot Booked", "Slot unavailable"]);
    assert_eq!(first.flow.view().my_bookings.len(), 1);
}

#[then("the first candidate is told the mentors could not be fetched")]
fn the_first_candidate_sees_the_directory_error(world: &BookingWorld) {
    let first = world.first();
    let notifications = first.sink.notifications();
    let notification = notifications.first().expect("a notification");
    assert_eq!(notification.title, "Error");
    assert_eq!(notification.description, "Failed to fetch mentors.");
    let view = first.flow.view();
    assert_eq!(
        view.directory.error.map(|error| error.code()),
        Some(ErrorCode::DirectoryUnavailable)
    );
}

#[then("no mentors are displayed")]
fn no_mentors_are_displayed(world: &BookingWorld) {
    let view = world.first().flow.view();
    assert_eq!(view.phase, BookingPhase::Idle);
    assert!(view.mentors.is_none());
    assert!(!view.directory.loading);
}

#[scenario(
    path = "tests/features/booking_flow.feature",
    name = "Two candidates race for the same slot"
)]
fn two_candidates_race_for_the_same_slot(world: BookingWorld) {
    drop(world);
}

#[scenario(
    path = "tests/features/booking_flow.feature",
    name = "A double-click books the slot only once"
)]
fn a_double_click_books_the_slot_only_once(world: BookingWorld) {
    drop(world);
}

#[scenario(
    path = "tests/features/booking_flow.feature",
    name = "The directory is unavailable"
)]
fn the_directory_is_unavailable(world: BookingWorld) {
    drop(world);
}

#[scenario(
    path = "tests/features/booking_flow.feature",
    name = "The second candidate falls back to the remaining slot"
)]
fn the_second_candidate_falls_back_to_the_remaining_slot(world: BookingWorld) {
    drop(world);
}
