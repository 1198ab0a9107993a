//! Data models
//!
//! Rust structs representing database entities.
//! Ids are store-assigned integers and timestamps use chrono.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// =============================================================================
// ID Types
// =============================================================================

/// Account identity, assigned by the store on insert (always > 0)
pub type AccountId = i64;

/// Status identity, assigned by the store on insert (always > 0)
pub type StatusId = i64;

// =============================================================================
// Account
// =============================================================================

/// A registered account
///
/// Accounts are created once and never updated or deleted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Account {
    pub id: AccountId,
    /// Unique external lookup key
    pub username: String,
    /// Argon2 PHC string; never leaves the process
    #[serde(skip_serializing, default)]
    pub password_hash: String,
    pub display_name: Option<String>,
    /// Biography
    pub note: Option<String>,
    /// URL to the avatar image
    pub avatar: Option<String>,
    /// URL to the header image
    pub header: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Account {
    /// Check a plaintext password against the stored hash
    ///
    /// Reserved for a password login flow; request authentication currently
    /// goes by username header only.
    pub fn check_password(&self, password: &str) -> bool {
        crate::auth::verify_password(password, &self.password_hash)
    }
}

/// Insertable account record
///
/// Identity and creation time are assigned by the repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAccount {
    pub username: String,
    pub password_hash: String,
    pub display_name: Option<String>,
    pub note: Option<String>,
    pub avatar: Option<String>,
    pub header: Option<String>,
}

impl NewAccount {
    pub fn new(username: impl Into<String>, password_hash: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password_hash: password_hash.into(),
            display_name: None,
            note: None,
            avatar: None,
            header: None,
        }
    }

    pub fn with_display_name(mut self, display_name: Option<String>) -> Self {
        self.display_name = display_name;
        self
    }

    pub fn with_note(mut self, note: Option<String>) -> Self {
        self.note = note;
        self
    }

    pub fn with_avatar(mut self, avatar: Option<String>) -> Self {
        self.avatar = avatar;
        self
    }

    pub fn with_header(mut self, header: Option<String>) -> Self {
        self.header = header;
        self
    }

    /// Attach store-assigned identity and timestamp
    pub(crate) fn into_account(self, id: AccountId, created_at: DateTime<Utc>) -> Account {
        Account {
            id,
            username: self.username,
            password_hash: self.password_hash,
            display_name: self.display_name,
            note: self.note,
            avatar: self.avatar,
            header: self.header,
            created_at,
        }
    }
}

// =============================================================================
// Status
// =============================================================================

/// A post, always carried together with its author
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Status {
    pub id: StatusId,
    pub account: Account,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

/// Insertable status record
///
/// Only the author's id is needed on the write path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewStatus {
    pub account_id: AccountId,
    pub content: String,
}

impl NewStatus {
    pub fn new(account_id: AccountId, content: impl Into<String>) -> Self {
        Self {
            account_id,
            content: content.into(),
        }
    }
}

/// Joined `status` + `account` row as read by the SQL store
#[derive(Debug, sqlx::FromRow)]
pub(crate) struct StatusRow {
    pub status_id: StatusId,
    pub content: String,
    pub status_created_at: DateTime<Utc>,
    pub account_id: AccountId,
    pub username: String,
    pub password_hash: String,
    pub display_name: Option<String>,
    pub note: Option<String>,
    pub avatar: Option<String>,
    pub header: Option<String>,
    pub account_created_at: DateTime<Utc>,
}

impl From<StatusRow> for Status {
    fn from(row: StatusRow) -> Self {
        Status {
            id: row.status_id,
            content: row.content,
            created_at: row.status_created_at,
            account: Account {
                id: row.account_id,
                username: row.username,
                password_hash: row.password_hash,
                display_name: row.display_name,
                note: row.note,
                avatar: row.avatar,
                header: row.header,
                created_at: row.account_created_at,
            },
        }
    }
}
