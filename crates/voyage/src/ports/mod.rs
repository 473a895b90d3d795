//! Ports (Interfaces)
//!
//! Abstract interfaces that define how the domain layer
//! interacts with external systems (search providers, date pickers).
//!
//! Implementations of these traits live in the host application.

pub mod services;

// Re-exports
pub use services::*;
