//! Opaque account identifiers issued by the identity provider.
//!
//! Mentors and candidates are both accounts of the external auth provider.
//! Their identifiers are opaque strings (for example `user_2bX9...`) and are
//! kept in distinct newtypes so a candidate id can never be passed where a
//! mentor id is expected.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Validation errors returned when constructing account identifiers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IdentityValidationError {
    /// The identifier was empty.
    Empty,
    /// The identifier carried leading or trailing whitespace.
    SurroundingWhitespace,
}

impl fmt::Display for IdentityValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "account id must not be empty"),
            Self::SurroundingWhitespace => {
                write!(f, "account id must not contain surrounding whitespace")
            }
        }
    }
}

impl std::error::Error for IdentityValidationError {}

fn validate(raw: &str) -> Result<(), IdentityValidationError> {
    if raw.is_empty() {
        return Err(IdentityValidationError::Empty);
    }
    if raw.trim() != raw {
        return Err(IdentityValidationError::SurroundingWhitespace);
    }
    Ok(())
}

macro_rules! account_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(try_from = "String", into = "String")]
        pub struct $name(String);

        impl $name {
            /// Validate and construct the identifier.
            pub fn new(id: impl Into<String>) -> Result<Self, IdentityValidationError> {
                let raw = id.into();
                validate(&raw)?;
                Ok(Self(raw))
            }

            /// Borrow the identifier as a string slice.
            pub fn as_str(&self) -> &str {
                self.0.as_str()
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                self.as_str()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> Self {
                value.0
            }
        }

        impl TryFrom<String> for $name {
            type Error = IdentityValidationError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }
    };
}

account_id! {
    /// Identity of a mentor; equal to the account id that registered the
    /// profile.
    MentorId
}

account_id! {
    /// Identity of the candidate reserving slots.
    CandidateId
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("", IdentityValidationError::Empty)]
    #[case(" user_1", IdentityValidationError::SurroundingWhitespace)]
    #[case("user_1\n", IdentityValidationError::SurroundingWhitespace)]
    fn invalid_ids_are_rejected(#[case] raw: &str, #[case] expected: IdentityValidationError) {
        assert_eq!(MentorId::new(raw).expect_err("invalid id"), expected);
        assert_eq!(CandidateId::new(raw).expect_err("invalid id"), expected);
    }

    #[rstest]
    fn ids_order_lexicographically() {
        let a = MentorId::new("user_a").expect("valid id");
        let b = MentorId::new("user_b").expect("valid id");
        assert!(a < b);
    }

    #[rstest]
    fn deserialisation_validates() {
        let ok: CandidateId = serde_json::from_str("\"user_9\"").expect("valid id");
        assert_eq!(ok.as_str(), "user_9");
        let err = serde_json::from_str::<CandidateId>("\"\"");
        assert!(err.is_err());
    }
}
