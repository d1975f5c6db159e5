//! `sitestock-auth` — credential records and one-shot credential checks.
//!
//! This crate is intentionally decoupled from HTTP and storage. There is no
//! session or token management here; callers verify credentials per request.

pub mod password;
pub mod roles;
pub mod user;

pub use password::PasswordHash;
pub use roles::Role;
pub use user::{UserId, UserRecord};
