//! Lifecycle and maintenance operations.
//!
//! All operations go through the repository contracts, enforce their
//! preconditions with the shared error taxonomy, and never touch the
//! matching core.

pub mod bulk;
pub mod content;
pub mod expiration;
pub mod groups;
pub mod hosts;
pub mod redirects;
pub mod tenants;
