//! Test utilities
//!
//! Manual in-memory implementations of the ports, test fixtures and a
//! local fake of the hosted backend.

pub mod fake_backend;
pub mod fixtures;
pub mod mocks;

pub use fake_backend::spawn_backend;
pub use fixtures::*;
pub use mocks::*;
