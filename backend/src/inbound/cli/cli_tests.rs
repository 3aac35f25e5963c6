//! Tests for the command-line adapter.

use cap_std::{ambient_authority, fs::Dir};
use clap::{CommandFactory, Parser};
use rstest::{fixture, rstest};
use tempfile::TempDir;

use super::*;
use crate::domain::{ErrorCode, Role};
use crate::test_support::{FixtureClock, RecordingNotificationSink, at, mentor, slot};

struct Harness {
    store: Arc<InMemoryStore>,
    sink: Arc<RecordingNotificationSink>,
}

impl Harness {
    fn context(&self, account_id: &str, role: Role) -> CliContext<InMemoryStore, InMemoryStore> {
        CliContext {
            mentors: Arc::clone(&self.store),
            bookings: Arc::clone(&self.store),
            session: Arc::new(StaticSessionProvider::new(
                Some(account_id.to_owned()),
                role,
                Some("token".to_owned()),
            )),
            notifications: Arc::clone(&self.sink) as Arc<dyn NotificationSink>,
            clock: Arc::new(FixtureClock::default()),
        }
    }

    async fn run(&self, account_id: &str, role: Role, args: &[&str]) -> Result<String, CliError> {
        let cli = Cli::try_parse_from(std::iter::once("mentorship").chain(args.iter().copied()))
            .expect("arguments parse");
        let mut out = Vec::new();
        execute(cli.command, &self.context(account_id, role), &mut out).await?;
        Ok(String::from_utf8(out).expect("utf-8 output"))
    }
}

#[fixture]
fn harness() -> Harness {
    let mut unavailable = mentor("user_b", "Bob", &[at(11, 0)]);
    unavailable.available_to_mentor = false;
    Harness {
        store: Arc::new(InMemoryStore::seeded([
            mentor("user_a", "Alice", &[at(9, 0), at(10, 0)]),
            unavailable,
        ])),
        sink: Arc::new(RecordingNotificationSink::default()),
    }
}

#[rstest]
fn slots_are_truncated_to_the_minute() {
    let cli = Cli::try_parse_from([
        "mentorship",
        "book",
        "--mentor",
        "user_a",
        "--slot",
        "2025-01-10T10:00:45+01:00",
    ])
    .expect("arguments parse");

    let Command::Book { mentor, slot: parsed } = cli.command else {
        panic!("expected the book subcommand");
    };
    assert_eq!(mentor.as_str(), "user_a");
    assert_eq!(parsed, at(9, 0));
}

#[rstest]
#[case(&["book", "--mentor", "", "--slot", "2025-01-10T09:00:00Z"])]
#[case(&["book", "--mentor", "user_a", "--slot", "tomorrow"])]
fn malformed_arguments_are_rejected(#[case] args: &[&str]) {
    let parsed = Cli::try_parse_from(std::iter::once("mentorship").chain(args.iter().copied()));
    assert!(parsed.is_err());
}

#[rstest]
#[case("book")]
#[case("bookings")]
#[case("register")]
fn help_warns_that_the_seeded_store_is_per_process(#[case] name: &str) {
    let mut command = Cli::command();
    let help = command
        .find_subcommand_mut(name)
        .expect("subcommand exists")
        .render_long_help()
        .to_string();

    assert!(help.contains("Without a database URL"), "{help}");
}

#[rstest]
#[tokio::test]
async fn mentors_lists_only_available_profiles(harness: Harness) {
    let text = harness
        .run("user_x", Role::Candidate, &["mentors"])
        .await
        .expect("listing succeeds");

    assert!(text.contains("Alice (user_a)"));
    assert!(!text.contains("Bob"));
    assert!(harness.sink.titles().is_empty());
}

#[rstest]
#[tokio::test]
async fn booking_shows_up_in_the_candidates_bookings(harness: Harness) {
    let booked = harness
        .run(
            "user_x",
            Role::Candidate,
            &["book", "--mentor", "user_a", "--slot", "2025-01-10T09:00:00Z"],
        )
        .await
        .expect("booking succeeds");
    let listed = harness
        .run("user_x", Role::Candidate, &["bookings"])
        .await
        .expect("listing succeeds");

    assert!(booked.starts_with("Booked 2025-01-10T09:00:00Z with user_a"));
    assert!(listed.contains("2025-01-10T09:00:00Z  Alice"));
    assert_eq!(harness.sink.titles(), ["Slot Booked"]);
}

#[rstest]
#[tokio::test]
async fn second_candidate_cannot_take_a_booked_slot(harness: Harness) {
    let args = ["book", "--mentor", "user_a", "--slot", "2025-01-10T10:00:00Z"];
    harness
        .run("user_x", Role::Candidate, &args)
        .await
        .expect("first booking succeeds");

    let error = harness
        .run("user_y", Role::Candidate, &args)
        .await
        .expect_err("slot is taken");

    let CliError::Domain(error) = error else {
        panic!("expected a domain error, got {error:?}");
    };
    assert_eq!(error.code(), ErrorCode::SlotAlreadyBooked);
    assert_eq!(harness.store.booking_count(), 1);
    assert_eq!(harness.sink.titles(), ["Slot Booked", "Slot unavailable"]);
}

#[rstest]
#[tokio::test]
async fn recruiters_register_from_a_profile_file(harness: Harness) {
    let dir = TempDir::new().expect("temp dir");
    Dir::open_ambient_dir(dir.path(), ambient_authority())
        .expect("open temp dir")
        .write(
            "profile.json",
            r#"{
                "name": "Rita",
                "almaMater": "ETH",
                "expertiseArea": "Compilers",
                "currentDesignation": "Principal Engineer",
                "companyName": "Initech",
                "availableToMentor": true
            }"#,
        )
        .expect("write profile");
    let profile = dir.path().join("profile.json");
    let profile = profile.to_str().expect("utf-8 path");

    let text = harness
        .run(
            "user_r",
            Role::Recruiter,
            &["register", "--profile", profile, "--slot", "2025-01-11T15:00:00Z"],
        )
        .await
        .expect("registration succeeds");

    assert_eq!(text, "Registered Rita (user_r) with 1 slot(s)\n");
    let stored = harness
        .store
        .mentor(&MentorId::new("user_r").expect("valid id"))
        .expect("profile stored");
    assert_eq!(stored.slots.as_slice(), &[slot("2025-01-11T15:00:00Z")]);
    assert_eq!(harness.sink.titles(), ["Mentor registered successfully"]);
}

#[rstest]
#[tokio::test]
async fn unknown_mentors_are_not_found(harness: Harness) {
    let error = harness
        .run(
            "user_x",
            Role::Candidate,
            &["book", "--mentor", "user_b", "--slot", "2025-01-10T11:00:00Z"],
        )
        .await
        .expect_err("unavailable mentors are hidden");

    assert!(matches!(error, CliError::Domain(ref e) if e.code() == ErrorCode::NotFound));
}
