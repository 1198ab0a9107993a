//! Service layer
//!
//! Contains business logic separated from HTTP handlers.
//! Services validate input, call repositories and log mutations.

mod account;
mod status;
mod timeline;

pub use account::{AccountService, RegisterAccount};
pub use status::StatusService;
pub use timeline::TimelineService;
