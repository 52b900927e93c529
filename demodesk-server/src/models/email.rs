//! Email address validation
//!
//! Accepts `local@domain` addresses with an unquoted local part and a dotted
//! domain. Letters and digits may be any Unicode script, so internationalized
//! addresses pass. The address is kept exactly as submitted (no case folding).

use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

use super::ValidationError;

const FIELD: &str = "email";

/// Maximum total address length (RFC 5321 path limit minus brackets)
const MAX_EMAIL_LEN: usize = 254;

/// Maximum local-part length
const MAX_LOCAL_LEN: usize = 64;

/// Dot-atom local part: no leading, trailing or doubled dots
static LOCAL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[\p{L}\p{N}!#$%&'*+/=?^_`{|}~-]+(?:\.[\p{L}\p{N}!#$%&'*+/=?^_`{|}~-]+)*$")
        .expect("invalid local-part regex")
});

/// Dotted hostname: labels of letters and digits with inner hyphens, at least two labels
static DOMAIN_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^(?:[\p{L}\p{N}](?:[\p{L}\p{N}-]{0,61}[\p{L}\p{N}])?\.)+[\p{L}\p{N}](?:[\p{L}\p{N}-]{0,61}[\p{L}\p{N}])?$",
    )
    .expect("invalid domain regex")
});

/// Validated email address
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Parse and validate an email address.
    ///
    /// # Example
    /// ```
    /// use demodesk_server::models::EmailAddress;
    ///
    /// assert!(EmailAddress::new("ada@example.com").is_ok());
    /// assert!(EmailAddress::new("not-an-email").is_err());
    /// assert!(EmailAddress::new("ada@localhost").is_err());  // no dot in domain
    /// ```
    pub fn new(s: &str) -> Result<Self, ValidationError> {
        if s.is_empty() {
            return Err(ValidationError::Empty { field: FIELD });
        }

        if s.chars().any(char::is_whitespace) {
            return Err(invalid("must not contain whitespace"));
        }

        if s.chars().count() > MAX_EMAIL_LEN {
            return Err(invalid("exceeds maximum length of 254 characters"));
        }

        let (local, domain) = match s.split_once('@') {
            Some(parts) => parts,
            None => return Err(invalid("missing '@'")),
        };

        if domain.contains('@') {
            return Err(invalid("must contain exactly one '@'"));
        }

        if local.is_empty() || local.chars().count() > MAX_LOCAL_LEN {
            return Err(invalid("local part must be 1-64 characters"));
        }

        if !LOCAL_RE.is_match(local) {
            return Err(invalid("local part contains invalid characters or dots"));
        }

        if !domain.contains('.') {
            return Err(invalid("domain must contain a dot"));
        }

        if !DOMAIN_RE.is_match(domain) {
            return Err(invalid("domain is not a valid hostname"));
        }

        let tld = domain.rsplit('.').next().unwrap_or_default();
        if tld.chars().all(char::is_numeric) {
            return Err(invalid("top-level domain must not be numeric"));
        }

        Ok(Self(s.to_owned()))
    }

    /// Get the address as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume and return the inner string.
    pub fn into_string(self) -> String {
        self.0
    }
}

fn invalid(reason: &'static str) -> ValidationError {
    ValidationError::InvalidFormat {
        field: FIELD,
        reason,
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
