//! # nestfile-service
//!
//! Business logic services for Nestfile. Every operation that touches
//! folders or files goes through this crate's services, which scope all
//! reads and writes to the authenticated principal — the ownership check
//! lives here and nowhere else.

pub mod context;
pub mod file;
pub mod folder;
pub mod user;

pub(crate) mod validate;

pub use context::RequestContext;
