//! Inbound adapters translating external input into domain flow calls.
//!
//! The command-line adapter under [`cli`] is the only transport.

pub mod cli;
