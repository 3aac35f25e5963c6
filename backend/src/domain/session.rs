//! Session primitives supplied by the identity provider.
//!
//! The provider hands out short-lived bearer tokens scoped for data-store
//! access together with a stable account id and a role claim.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use zeroize::Zeroizing;

/// Role claim attached to a session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Recruiters may publish mentor profiles.
    Recruiter,
    /// Any other account.
    #[default]
    Candidate,
}

impl Role {
    /// Map a raw role claim. Anything other than `recruiter` is a candidate.
    pub fn from_claim(claim: Option<&str>) -> Self {
        match claim.map(str::trim) {
            Some(value) if value.eq_ignore_ascii_case("recruiter") => Self::Recruiter,
            _ => Self::Candidate,
        }
    }

    /// Claim string for this role.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Recruiter => "recruiter",
            Self::Candidate => "candidate",
        }
    }
}

impl FromStr for Role {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from_claim(Some(s)))
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Resolved identity of the signed-in account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionIdentity {
    account_id: String,
    role: Role,
}

impl SessionIdentity {
    /// Construct an identity from the provider's account id and role.
    pub fn new(account_id: impl Into<String>, role: Role) -> Self {
        Self {
            account_id: account_id.into(),
            role,
        }
    }

    /// Raw account id.
    pub fn account_id(&self) -> &str {
        self.account_id.as_str()
    }

    /// Role claim.
    pub fn role(&self) -> Role {
        self.role
    }
}

/// Bearer token for data-store access. Wiped from memory on drop and never
/// printed.
#[derive(Clone, PartialEq, Eq)]
pub struct AccessToken(Zeroizing<String>);

impl AccessToken {
    /// Wrap a token, returning `None` for blank values.
    pub fn new(token: impl Into<String>) -> Option<Self> {
        let token = Zeroizing::new(token.into());
        (!token.trim().is_empty()).then(|| Self(token))
    }

    /// Expose the raw token to an adapter.
    pub fn expose(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AccessToken(<redacted>)")
    }
}
