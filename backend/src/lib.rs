//! Mentorship booking coordination.
//!
//! The domain layer owns the booking and registration flows; adapters under
//! `outbound` supply storage, sessions and notifications, and `inbound`
//! exposes the flows as a command-line tool.

pub mod domain;
pub mod inbound;
pub mod outbound;
pub mod settings;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;
