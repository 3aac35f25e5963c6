//! PostgreSQL adapters for the mentor and booking repositories.
//!
//! Diesel row structs and table definitions stay private to this module;
//! repositories only translate between rows and domain types.
//!
//! ```no_run
//! use mentorship::outbound::persistence::{
//!     DbPool, DieselBookingRepository, DieselMentorRepository, PoolConfig,
//! };
//!
//! # async fn wire() -> Result<(), mentorship::outbound::persistence::PoolError> {
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/mentorship")).await?;
//! let mentors = DieselMentorRepository::new(pool.clone());
//! let bookings = DieselBookingRepository::new(pool);
//! # let _ = (mentors, bookings);
//! # Ok(())
//! # }
//! ```

mod diesel_booking_repository;
mod diesel_error_mapping;
mod diesel_mentor_repository;
mod models;
mod pool;
mod schema;

pub use diesel_booking_repository::DieselBookingRepository;
pub use diesel_mentor_repository::DieselMentorRepository;
pub use pool::{DbPool, PoolConfig, PoolError};
