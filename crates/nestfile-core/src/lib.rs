//! # nestfile-core
//!
//! Core crate for Nestfile. Contains configuration schemas, typed
//! identifiers, domain events, the event bus, and the unified error
//! system.
//!
//! This crate has **no** internal dependencies on other Nestfile crates.

pub mod config;
pub mod error;
pub mod events;
pub mod result;
pub mod types;

pub use error::AppError;
pub use result::AppResult;
