//! Session provider backed by configured credentials.

use async_trait::async_trait;
use zeroize::Zeroizing;

use crate::domain::ports::{SessionError, SessionProvider};
use crate::domain::{AccessToken, Role, SessionIdentity};

/// Session whose identity and token are fixed at start-up, as for a
/// command-line client handed a token by the identity provider.
#[derive(Clone)]
pub struct StaticSessionProvider {
    identity: Option<SessionIdentity>,
    token: Option<Zeroizing<String>>,
}

impl StaticSessionProvider {
    /// Signed-in session for `account_id` with the given role.
    pub fn new(account_id: Option<String>, role: Role, token: Option<String>) -> Self {
        let identity = account_id
            .filter(|id| !id.trim().is_empty())
            .map(|id| SessionIdentity::new(id, role));
        Self {
            identity,
            token: token.map(Zeroizing::new),
        }
    }

    /// Session with nobody signed in.
    pub fn signed_out() -> Self {
        Self {
            identity: None,
            token: None,
        }
    }
}

#[async_trait]
impl SessionProvider for StaticSessionProvider {
    fn identity(&self) -> Option<SessionIdentity> {
        self.identity.clone()
    }

    async fn access_token(&self) -> Result<AccessToken, SessionError> {
        if self.identity.is_none() {
            return Err(SessionError::signed_out());
        }
        self.token
            .as_ref()
            .and_then(|token| AccessToken::new(token.as_str()))
            .ok_or_else(|| SessionError::token_rejected("no access token configured"))
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[tokio::test]
    async fn configured_session_mints_its_token() {
        let session = StaticSessionProvider::new(
            Some("user_r".to_owned()),
            Role::Recruiter,
            Some("secret".to_owned()),
        );

        let identity = session.identity().expect("signed in");
        assert_eq!(identity.role(), Role::Recruiter);
        let token = session.access_token().await.expect("token configured");
        assert_eq!(token.expose(), "secret");
    }

    #[rstest]
    #[case(StaticSessionProvider::signed_out(), SessionError::signed_out())]
    #[case(
        StaticSessionProvider::new(Some("  ".to_owned()), Role::Candidate, Some("t".to_owned())),
        SessionError::signed_out()
    )]
    #[case(
        StaticSessionProvider::new(Some("user_x".to_owned()), Role::Candidate, Some(" ".to_owned())),
        SessionError::token_rejected("no access token configured")
    )]
    #[tokio::test]
    async fn incomplete_sessions_cannot_mint_tokens(
        #[case] session: StaticSessionProvider,
        #[case] expected: SessionError,
    ) {
        let error = session.access_token().await.expect_err("no token");
        assert_eq!(error, expected);
    }
}
