//! Domain layer
//!
//! Contains plain data and trait definitions with no I/O of their own.
//! - `entities`: Normalized snapshots of backend rows
//! - `ports`: Trait definitions for external dependencies

pub mod entities;
pub mod ports;
