// duka/src/session.rs

//! Identity context attached to outgoing service calls.

/// The authenticated user and token for a browsing session.
///
/// Passed explicitly to service constructors; nothing in this crate reads
/// ambient authentication state.
#[derive(Debug, Clone)]
pub struct SessionContext {
  pub user_id: i64,
  /// Sent verbatim as the `Authorization` header value (the backend
  /// expects the bare token, no scheme prefix). `None` means no header.
  pub token: Option<String>,
}

impl SessionContext {
  pub fn new(user_id: i64) -> Self {
    Self { user_id, token: None }
  }

  pub fn with_token(user_id: i64, token: impl Into<String>) -> Self {
    Self {
      user_id,
      token: Some(token.into()),
    }
  }
}
