//! Domain ports and supporting types for the hexagonal boundary.
//!
//! Driven ports ([`MentorRepository`], [`BookingRepository`],
//! [`SessionProvider`], [`NotificationSink`]) are implemented by outbound
//! adapters. Driving ports ([`MentorDirectory`], [`SlotRegistry`],
//! [`MentorRegistration`]) are implemented by domain services and consumed
//! by the flows and inbound adapters.

mod macros;
pub(crate) use macros::define_port_error;

mod booking_repository;
mod mentor_directory;
mod mentor_registration;
mod mentor_repository;
mod notification_sink;
mod session_provider;
mod slot_registry;

#[cfg(test)]
pub use booking_repository::MockBookingRepository;
pub use booking_repository::{BookingRepository, BookingRepositoryError};
#[cfg(test)]
pub use mentor_directory::MockMentorDirectory;
pub use mentor_directory::MentorDirectory;
#[cfg(test)]
pub use mentor_registration::MockMentorRegistration;
pub use mentor_registration::{MentorRegistration, RegisterMentorRequest};
#[cfg(test)]
pub use mentor_repository::MockMentorRepository;
pub use mentor_repository::{MentorRepository, MentorRepositoryError};
#[cfg(test)]
pub use notification_sink::MockNotificationSink;
pub use notification_sink::NotificationSink;
#[cfg(test)]
pub use session_provider::MockSessionProvider;
pub use session_provider::{FixtureSessionProvider, SessionError, SessionProvider};
#[cfg(test)]
pub use slot_registry::MockSlotRegistry;
pub use slot_registry::SlotRegistry;
