//! Domain primitives, services and flows.
//!
//! Purpose: model mentors, offered slots and bookings, and coordinate the
//! booking and registration flows over the ports in [`ports`]. Nothing in
//! here knows about a concrete store, session provider or UI.
//!
//! Public surface:
//! - Error / ErrorCode: domain failure with a stable code.
//! - Mentor, MentorProfile, OfferedSlots, Booking: entities.
//! - RemoteCall / RequestState: lifecycle wrapper for every remote call.
//! - MentorDirectoryService, SlotRegistryService, MentorRegistrationService:
//!   driving port implementations.
//! - BookingOrchestrator, MentorRegistrationFlow: client-side flows.

pub mod booking;
pub mod booking_flow;
pub mod directory_service;
pub mod error;
pub mod identity;
pub mod mentor;
pub mod notification;
pub mod ports;
pub mod registration_flow;
pub mod registration_service;
pub mod remote_call;
pub mod session;
pub mod slot_registry_service;
pub mod slots;

pub use self::booking::{Booking, BookingId, BookingRequest, BookingWithMentor};
pub use self::booking_flow::{BookingOrchestrator, BookingOutcome, BookingPhase, BookingView};
pub use self::directory_service::MentorDirectoryService;
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::identity::{CandidateId, IdentityValidationError, MentorId};
pub use self::mentor::{
    Mentor, MentorProfile, MentorProfileInput, MentorSummary, MentorValidationError,
};
pub use self::notification::{Notification, Severity};
pub use self::registration_flow::{MentorRegistrationFlow, RegistrationOutcome};
pub use self::registration_service::MentorRegistrationService;
pub use self::remote_call::{RemoteCall, RequestState};
pub use self::session::{AccessToken, Role, SessionIdentity};
pub use self::slot_registry_service::SlotRegistryService;
pub use self::slots::{OfferedSlots, Slot, normalise_slot, slot_at};
