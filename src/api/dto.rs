//! API request and response DTOs
//!
//! Data Transfer Objects for the JSON bodies of the v1 API.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::data::{Account, AccountId, Status, StatusId};
use crate::service::RegisterAccount;

/// Account response
///
/// Optional profile fields are omitted when absent; an empty string is
/// still returned as `""`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountResponse {
    pub id: AccountId,
    pub username: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub header: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<Account> for AccountResponse {
    fn from(account: Account) -> Self {
        Self {
            id: account.id,
            username: account.username,
            display_name: account.display_name,
            note: account.note,
            avatar: account.avatar,
            header: account.header,
            created_at: account.created_at,
        }
    }
}

/// Status response with its author embedded
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusResponse {
    pub id: StatusId,
    pub account: AccountResponse,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

impl From<Status> for StatusResponse {
    fn from(status: Status) -> Self {
        Self {
            id: status.id,
            account: status.account.into(),
            content: status.content,
            created_at: status.created_at,
        }
    }
}

/// Body of `POST /v1/accounts`
///
/// Username and password default to empty so that a missing field is
/// reported as a validation error instead of a decode failure.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateAccountRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
    pub display_name: Option<String>,
    pub note: Option<String>,
    pub avatar: Option<String>,
    pub header: Option<String>,
}

impl From<CreateAccountRequest> for RegisterAccount {
    fn from(req: CreateAccountRequest) -> Self {
        Self {
            username: req.username,
            password: req.password,
            display_name: req.display_name,
            note: req.note,
            avatar: req.avatar,
            header: req.header,
        }
    }
}

/// Body of `POST /v1/statuses`
#[derive(Debug, Clone, Deserialize)]
pub struct CreateStatusRequest {
    #[serde(default)]
    pub status: String,
    /// Accepted for client compatibility; attachments are not stored
    #[serde(default)]
    pub media_ids: Option<Vec<i64>>,
}
