//! Caller identity.
//!
//! Authentication happens in front of this service; the identity layer
//! forwards the authenticated user's id in the `x-user-id` header. Every
//! per-user route extracts an [`Owner`] and scopes its store calls by it.

use axum::{extract::FromRequestParts, http::request::Parts};
use uuid::Uuid;

use crate::error::ApiError;

pub const USER_ID_HEADER: &str = "x-user-id";

/// The authenticated user making the request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Owner(pub Uuid);

impl<S> FromRequestParts<S> for Owner
where
  S: Send + Sync,
{
  type Rejection = ApiError;

  async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
    let raw = parts
      .headers
      .get(USER_ID_HEADER)
      .ok_or_else(|| ApiError::Unauthorized(format!("missing {USER_ID_HEADER} header")))?;

    let id = raw
      .to_str()
      .ok()
      .and_then(|s| Uuid::parse_str(s.trim()).ok())
      .ok_or_else(|| ApiError::Unauthorized(format!("malformed {USER_ID_HEADER} header")))?;

    Ok(Owner(id))
  }
}
