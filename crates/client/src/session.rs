//! Explicit session context.
//!
//! The auth provider issues the token; this crate only carries it. Every data
//! call takes a `&Session`, so there is no ambient "current user".

use homeinv_core::types::UserId;

use crate::error::ClientError;

/// Access token and user id of the signed-in user.
#[derive(Clone, PartialEq, Eq)]
pub struct Session {
    pub access_token: String,
    pub user_id: UserId,
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("access_token", &"<redacted>")
            .field("user_id", &self.user_id)
            .finish()
    }
}

/// Holder of the optional current session.
///
/// `sign_in` and `sign_out` are the only transitions.
#[derive(Debug, Default)]
pub struct AuthContext {
    session: Option<Session>,
}

impl AuthContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sign_in(&mut self, session: Session) {
        tracing::debug!(user_id = %session.user_id, "Signed in");
        self.session = Some(session);
    }

    /// Drop the session. Returns the one that was active, if any.
    pub fn sign_out(&mut self) -> Option<Session> {
        self.session.take()
    }

    pub fn is_signed_in(&self) -> bool {
        self.session.is_some()
    }

    /// The active session, or [`ClientError::NotSignedIn`].
    pub fn session(&self) -> Result<&Session, ClientError> {
        self.session.as_ref().ok_or(ClientError::NotSignedIn)
    }
}
