//! Shared helpers for integration tests.

pub mod scripted;
pub mod socket_guard;
