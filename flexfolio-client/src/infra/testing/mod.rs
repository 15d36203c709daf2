//! Test doubles for the service seams.

pub mod stubs;
