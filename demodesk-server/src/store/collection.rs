//! Collection and schema name validation
//!
//! Names end up quoted inside SQL identifiers, so only a conservative
//! character set is accepted.

use once_cell::sync::Lazy;
use regex::Regex;

use super::StoreError;

/// Maximum identifier length (Postgres NAMEDATALEN - 1)
const MAX_NAME_LEN: usize = 63;

/// Starts with a letter or underscore; letters, digits, underscores, hyphens after
static IDENT_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z_][A-Za-z0-9_-]{0,62}$").expect("invalid identifier regex")
});

/// Validated collection (or logical database) name
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CollectionName(String);

impl CollectionName {
    pub fn new(s: &str) -> Result<Self, StoreError> {
        if s.is_empty() {
            return Err(invalid(s, "cannot be empty"));
        }

        if s.len() > MAX_NAME_LEN {
            return Err(invalid(s, "exceeds 63 characters"));
        }

        if !IDENT_RE.is_match(s) {
            return Err(invalid(
                s,
                "must start with a letter or underscore and contain only letters, digits, '_' or '-'",
            ));
        }

        Ok(Self(s.to_owned()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Double-quoted SQL identifier. Safe because the name never contains quotes.
    pub fn quoted(&self) -> String {
        format!("\"{}\"", self.0)
    }
}

fn invalid(name: &str, reason: &'static str) -> StoreError {
    StoreError::InvalidName {
        name: name.to_owned(),
        reason,
    }
}

impl AsRef<str> for CollectionName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
