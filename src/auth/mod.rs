//! Authentication
//!
//! Handles:
//! - Resolving a request to an authenticated account
//! - Password hashing

mod middleware;
mod password;

pub use middleware::{AUTHENTICATION_HEADER, CurrentAccount, require_auth};
pub use password::{hash_password, verify_password};
