//! # nestfile-api
//!
//! HTTP presentation layer for Nestfile. Translates requests into calls
//! on the scoped services and serializes their outputs; owns no business
//! rules. Authentication happens upstream — the fronting identity
//! provider injects the principal as a header (see
//! [`extractors::Principal`]).

pub mod dto;
pub mod extractors;
pub mod handlers;
pub mod router;
pub mod state;
