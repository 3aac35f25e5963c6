//! Port for the external identity/session provider.

use async_trait::async_trait;

use crate::domain::{AccessToken, Role, SessionIdentity};

use super::define_port_error;

define_port_error! {
    /// Errors raised while deriving a bearer token.
    pub enum SessionError {
        /// No account is signed in.
        SignedOut => "no active session",
        /// The provider refused to mint a token.
        TokenRejected { message: String } =>
            "session token derivation failed: {message}",
    }
}

/// Supplies the signed-in identity and short-lived store tokens.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SessionProvider: Send + Sync {
    /// Identity of the signed-in account, once resolved.
    fn identity(&self) -> Option<SessionIdentity>;

    /// Derive a fresh bearer token scoped for data-store access.
    async fn access_token(&self) -> Result<AccessToken, SessionError>;
}

/// Fixture provider with a fixed identity and token.
#[derive(Debug, Clone)]
pub struct FixtureSessionProvider {
    identity: SessionIdentity,
    token: Option<AccessToken>,
}

impl FixtureSessionProvider {
    /// Signed-in candidate with a static token.
    pub fn candidate(account_id: &str) -> Self {
        Self::with_role(account_id, Role::Candidate)
    }

    /// Signed-in account with the given role.
    pub fn with_role(account_id: &str, role: Role) -> Self {
        Self {
            identity: SessionIdentity::new(account_id, role),
            token: AccessToken::new(format!("fixture-token-{account_id}")),
        }
    }
}

#[async_trait]
impl SessionProvider for FixtureSessionProvider {
    fn identity(&self) -> Option<SessionIdentity> {
        Some(self.identity.clone())
    }

    async fn access_token(&self) -> Result<AccessToken, SessionError> {
        self.token.clone().ok_or_else(SessionError::signed_out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[tokio::test]
    async fn fixture_provider_exposes_identity_and_token() {
        let provider = FixtureSessionProvider::with_role("user_r", Role::Recruiter);
        let identity = provider.identity().expect("identity present");
        assert_eq!(identity.account_id(), "user_r");
        assert_eq!(identity.role(), Role::Recruiter);

        let token = provider.access_token().await.expect("token minted");
        assert_eq!(token.expose(), "fixture-token-user_r");
    }
}
