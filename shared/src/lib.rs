//! User Management Shared Library
//!
//! This crate contains the domain model, wire types, and input validation
//! shared between the backend service and its tests.

pub mod models;
pub mod types;
pub mod validation;

// Re-export commonly used items
pub use models::{AuditFields, User};
pub use types::*;
