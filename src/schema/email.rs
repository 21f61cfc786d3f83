//! Email address fields
//!
//! Accepted shape: `local@domain` where
//!
//! - the local part uses the RFC 5322 atom characters, with no leading,
//!   trailing or doubled dots, at most 64 bytes
//! - the domain has at least two dot-separated labels of letters, digits and
//!   inner hyphens, each at most 63 bytes
//! - the whole address is at most 254 bytes
//!
//! Quoted local parts and IP-literal domains are not accepted.

use std::fmt;
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use super::errors::ValidationError;

const MAX_ADDRESS_LEN: usize = 254;
const MAX_LOCAL_LEN: usize = 64;

static EMAIL_PATTERN: OnceLock<Regex> = OnceLock::new();

fn email_pattern() -> &'static Regex {
    EMAIL_PATTERN.get_or_init(|| {
        Regex::new(
            r"^[A-Za-z0-9!#$%&'*+/=?^_`{|}~-]+(\.[A-Za-z0-9!#$%&'*+/=?^_`{|}~-]+)*@[A-Za-z0-9]([A-Za-z0-9-]{0,61}[A-Za-z0-9])?(\.[A-Za-z0-9]([A-Za-z0-9-]{0,61}[A-Za-z0-9])?)+$",
        )
        .expect("email pattern compiles")
    })
}

/// An email address that passed shape validation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct EmailAddress(String);

impl EmailAddress {
    pub fn parse(input: impl Into<String>) -> Result<Self, ValidationError> {
        let input = input.into();

        let local_len = input.find('@').unwrap_or(input.len());
        if input.len() > MAX_ADDRESS_LEN
            || local_len > MAX_LOCAL_LEN
            || !email_pattern().is_match(&input)
        {
            return Err(ValidationError::InvalidEmail(input));
        }

        Ok(Self(input))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl TryFrom<String> for EmailAddress {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl From<EmailAddress> for String {
    fn from(email: EmailAddress) -> Self {
        email.0
    }
}

impl AsRef<str> for EmailAddress {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_common_addresses() {
        for input in [
            "info@acme.com",
            "first.last@catering.example.org",
            "orders+lunch@sub-domain.co.uk",
            "x@a.io",
        ] {
            assert!(EmailAddress::parse(input).is_ok(), "{input} should be accepted");
        }
    }

    #[test]
    fn test_rejects_malformed_addresses() {
        for input in [
            "",
            "plainaddress",
            "@acme.com",
            "info@",
            "info@acme",
            "info@@acme.com",
            "in fo@acme.com",
            ".info@acme.com",
            "info.@acme.com",
            "in..fo@acme.com",
            "info@-acme.com",
            "info@acme-.com",
            "info@acme..com",
        ] {
            assert!(
                matches!(EmailAddress::parse(input), Err(ValidationError::InvalidEmail(_))),
                "{input} should be rejected"
            );
        }
    }

    #[test]
    fn test_rejects_overlong_local_part() {
        let input = format!("{}@acme.com", "a".repeat(65));
        assert!(EmailAddress::parse(input).is_err());
        let input = format!("{}@acme.com", "a".repeat(64));
        assert!(EmailAddress::parse(input).is_ok());
    }

    #[test]
    fn test_serde_validates() {
        let ok: EmailAddress = serde_json::from_str("\"info@acme.com\"").unwrap();
        assert_eq!(ok.as_str(), "info@acme.com");
        assert_eq!(serde_json::to_string(&ok).unwrap(), "\"info@acme.com\"");

        let err = serde_json::from_str::<EmailAddress>("\"not-an-email\"").unwrap_err();
        assert!(err.to_string().contains("Invalid email address"));
    }
}
