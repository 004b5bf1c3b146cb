use once_cell::sync::Lazy;
use regex::Regex;
use std::borrow::Cow;

use crate::error::RowError;

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$")
        .expect("email pattern is a valid regex")
});

/// How domains are keyed in the tally.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DomainCase {
    /// Count domains exactly as written in the source file.
    #[default]
    Preserve,
    /// Fold ASCII case so `Example.com` and `example.com` share a count.
    Lowercase,
}

/// Syntax-only check; says nothing about deliverability.
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(email)
}

/// Returns the part after the single `@`.
pub fn extract_domain(email: &str) -> Result<&str, RowError> {
    let mut parts = email.split('@');
    match (parts.next(), parts.next(), parts.next()) {
        (Some(_), Some(domain), None) => Ok(domain),
        _ => Err(RowError::DomainExtraction {
            value: email.to_string(),
        }),
    }
}

pub fn normalize_domain(domain: &str, case: DomainCase) -> Cow<'_, str> {
    match case {
        DomainCase::Preserve => Cow::Borrowed(domain),
        DomainCase::Lowercase if domain.bytes().any(|b| b.is_ascii_uppercase()) => {
            Cow::Owned(domain.to_ascii_lowercase())
        }
        DomainCase::Lowercase => Cow::Borrowed(domain),
    }
}
