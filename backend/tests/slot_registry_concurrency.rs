//! Concurrent reservations against the slot registry.

use std::sync::Arc;

use mentorship::domain::ports::SlotRegistry;
use mentorship::domain::{BookingRequest, ErrorCode, SlotRegistryService};
use mentorship::outbound::memory::InMemoryStore;
use mentorship::test_support::{FixtureClock, at, candidate_id, mentor, mentor_id, token};
use rstest::rstest;

#[rstest]
#[case(2)]
#[case(16)]
#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn at_most_one_reservation_wins(#[case] contenders: usize) {
    let store = Arc::new(InMemoryStore::seeded([mentor(
        "user_m",
        "Mina",
        &[at(9, 0), at(10, 0)],
    )]));
    let registry = Arc::new(SlotRegistryService::new(
        Arc::clone(&store),
        Arc::new(FixtureClock::default()),
    ));

    let handles: Vec<_> = (0..contenders)
        .map(|n| {
            let registry = Arc::clone(&registry);
            tokio::spawn(async move {
                let request = BookingRequest {
                    mentor_id: mentor_id("user_m"),
                    candidate_id: candidate_id(&format!("user_{n}")),
                    slot: at(9, 0),
                };
                registry.reserve_slot(&token(), request).await
            })
        })
        .collect();

    let mut confirmed = 0;
    for handle in handles {
        match handle.await.expect("reservation task") {
            Ok(booking) => {
                assert_eq!(booking.slot, at(9, 0));
                confirmed += 1;
            }
            Err(error) => assert_eq!(error.code(), ErrorCode::SlotAlreadyBooked),
        }
    }

    assert_eq!(confirmed, 1);
    assert_eq!(store.booking_count(), 1);
}

#[rstest]
#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn different_slots_do_not_contend() {
    let store = Arc::new(InMemoryStore::seeded([mentor(
        "user_m",
        "Mina",
        &[at(9, 0), at(10, 0)],
    )]));
    let registry = SlotRegistryService::new(Arc::clone(&store), Arc::new(FixtureClock::default()));

    let reserve = |hour, candidate: &str| BookingRequest {
        mentor_id: mentor_id("user_m"),
        candidate_id: candidate_id(candidate),
        slot: at(hour, 0),
    };
    let token = token();
    let (nine, ten) = tokio::join!(
        registry.reserve_slot(&token, reserve(9, "user_x")),
        registry.reserve_slot(&token, reserve(10, "user_y")),
    );

    assert!(nine.is_ok());
    assert!(ten.is_ok());
    assert_eq!(store.booking_count(), 2);
}
