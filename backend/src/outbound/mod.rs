//! Outbound adapters implementing the domain's driven ports.
//!
//! - **memory**: in-process store for both repositories
//! - **persistence**: PostgreSQL repositories using Diesel
//! - **session**: session provider fed from configuration
//! - **notifications**: terminal notification sink

pub mod memory;
pub mod notifications;
pub mod persistence;
pub mod session;
