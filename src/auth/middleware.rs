//! Authentication middleware
//!
//! Requests authenticate with `Authentication: username <name>`. The header
//! resolves to an [`Account`]; anything else is rejected with 401.

use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts, State},
    http::{HeaderMap, Request, request::Parts},
    middleware::Next,
    response::Response,
};

use crate::AppState;
use crate::data::Account;
use crate::error::AppError;

/// Header carrying the caller's identity
pub const AUTHENTICATION_HEADER: &str = "Authentication";

const USERNAME_SCHEME: &str = "username ";

fn extract_username_from_headers(headers: &HeaderMap) -> Option<String> {
    headers
        .get(AUTHENTICATION_HEADER)
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix(USERNAME_SCHEME))
        .map(str::trim)
        .filter(|username| !username.is_empty())
        .map(ToOwned::to_owned)
}

async fn authenticate(headers: &HeaderMap, state: &AppState) -> Result<Account, AppError> {
    let username = extract_username_from_headers(headers).ok_or(AppError::Unauthorized)?;

    match state.repos.accounts.find_by_username(&username).await? {
        Some(account) => Ok(account),
        None => {
            tracing::debug!(%username, "Authentication for unknown account");
            Err(AppError::Unauthorized)
        }
    }
}

/// Middleware to require authentication
///
/// Resolves the caller and stores the [`Account`] in request extensions.
///
/// # Usage
/// ```ignore
/// let protected_routes = Router::new()
///     .route("/v1/statuses", post(...))
///     .layer(middleware::from_fn_with_state(state, require_auth));
/// ```
pub async fn require_auth(
    State(state): State<AppState>,
    mut request: Request<axum::body::Body>,
    next: Next,
) -> Result<Response, AppError> {
    let account = authenticate(request.headers(), &state).await?;

    request.extensions_mut().insert(account);

    Ok(next.run(request).await)
}

/// Extractor for the authenticated account
///
/// Uses the account stored by [`require_auth`] when present, otherwise
/// authenticates the request itself.
#[derive(Debug, Clone)]
pub struct CurrentAccount(pub Account);

#[async_trait]
impl<S> FromRequestParts<S> for CurrentAccount
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        if let Some(account) = parts.extensions.get::<Account>().cloned() {
            return Ok(CurrentAccount(account));
        }

        let state = AppState::from_ref(state);
        let account = authenticate(&parts.headers, &state).await?;
        parts.extensions.insert(account.clone());

        Ok(CurrentAccount(account))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers_with(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHENTICATION_HEADER, HeaderValue::from_str(value).unwrap());
        headers
    }

    #[test]
    fn extracts_username_scheme() {
        assert_eq!(
            extract_username_from_headers(&headers_with("username john")),
            Some("john".to_string())
        );
    }

    #[test]
    fn rejects_missing_or_malformed_header() {
        assert_eq!(extract_username_from_headers(&HeaderMap::new()), None);
        assert_eq!(extract_username_from_headers(&headers_with("username ")), None);
        assert_eq!(extract_username_from_headers(&headers_with("Bearer john")), None);
    }
}
