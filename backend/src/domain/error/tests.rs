//! Tests for domain error construction and serialisation.

use super::*;
use rstest::{fixture, rstest};
use serde_json::json;

#[fixture]
fn conflict_error() -> Error {
    Error::slot_already_booked("slot taken").with_details(json!({"mentorId": "mentor-1"}))
}

#[rstest]
#[case(Error::session_unavailable("x"), ErrorCode::SessionUnavailable)]
#[case(Error::directory_unavailable("x"), ErrorCode::DirectoryUnavailable)]
#[case(Error::slot_already_booked("x"), ErrorCode::SlotAlreadyBooked)]
#[case(Error::already_registered("x"), ErrorCode::AlreadyRegistered)]
#[case(Error::validation_failed("x"), ErrorCode::ValidationFailed)]
#[case(Error::forbidden("x"), ErrorCode::Forbidden)]
#[case(Error::not_found("x"), ErrorCode::NotFound)]
#[case(Error::store_unavailable("x"), ErrorCode::StoreUnavailable)]
#[case(Error::internal("x"), ErrorCode::InternalError)]
fn constructors_set_code(#[case] error: Error, #[case] expected: ErrorCode) {
    assert_eq!(error.code(), expected);
}

#[rstest]
fn try_new_rejects_empty_messages() {
    let result = Error::try_new(ErrorCode::ValidationFailed, "   ");
    assert!(matches!(result, Err(ErrorValidationError::EmptyMessage)));
}

#[rstest]
fn new_falls_back_for_blank_messages() {
    let error = Error::new(ErrorCode::InternalError, "");
    assert_eq!(error.message(), FALLBACK_MESSAGE);
    assert_eq!(error.code(), ErrorCode::InternalError);
}

#[rstest]
fn display_uses_the_message(conflict_error: Error) {
    assert_eq!(conflict_error.to_string(), "slot taken");
}

#[rstest]
fn serialises_with_snake_case_code(conflict_error: Error) {
    let value = serde_json::to_value(&conflict_error).expect("serialise error");
    assert_eq!(
        value,
        json!({
            "code": "slot_already_booked",
            "message": "slot taken",
            "details": {"mentorId": "mentor-1"},
        })
    );
}

#[rstest]
fn deserialisation_round_trips(conflict_error: Error) {
    let value = serde_json::to_value(&conflict_error).expect("serialise error");
    let decoded: Error = serde_json::from_value(value).expect("deserialise error");
    assert_eq!(decoded, conflict_error);
}

#[rstest]
fn deserialisation_rejects_blank_messages() {
    let payload = json!({"code": "not_found", "message": "  "});
    let result: Result<Error, _> = serde_json::from_value(payload);
    assert!(result.is_err());
}
