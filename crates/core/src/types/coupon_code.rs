//! Normalized coupon codes.
//!
//! Coupon codes are case-insensitive. Every comparison and every storage
//! lookup goes through [`CouponCode`], which holds the trimmed, uppercased form.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing a [`CouponCode`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum CouponCodeError {
    /// Nothing left after trimming.
    #[error("Coupon code is required")]
    Empty,
}

/// A coupon code in canonical (trimmed, uppercase) form.
///
/// ```
/// use bloom_core::CouponCode;
///
/// let a = CouponCode::parse(" welcome10 ").unwrap();
/// let b = CouponCode::parse("WELCOME10").unwrap();
/// assert_eq!(a, b);
/// assert_eq!(a.as_str(), "WELCOME10");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CouponCode(String);

impl CouponCode {
    /// Normalize and validate a coupon code.
    ///
    /// # Errors
    ///
    /// Returns [`CouponCodeError::Empty`] if the input is blank.
    pub fn parse(s: &str) -> Result<Self, CouponCodeError> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(CouponCodeError::Empty);
        }
        Ok(Self(trimmed.to_uppercase()))
    }

    /// Whether `other` normalizes to this code.
    #[must_use]
    pub fn matches(&self, other: &str) -> bool {
        other.trim().to_uppercase() == self.0
    }

    /// Returns the canonical code.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CouponCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::str::FromStr for CouponCode {
    type Err = CouponCodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for CouponCode {
    type Error = CouponCodeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<CouponCode> for String {
    fn from(code: CouponCode) -> Self {
        code.0
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_normalizes() {
        assert_eq!(CouponCode::parse("freeship").unwrap().as_str(), "FREESHIP");
        assert_eq!(
            CouponCode::parse("\tWelcome10\n").unwrap().as_str(),
            "WELCOME10"
        );
    }

    #[test]
    fn test_parse_blank() {
        assert_eq!(CouponCode::parse(""), Err(CouponCodeError::Empty));
        assert_eq!(CouponCode::parse("   "), Err(CouponCodeError::Empty));
    }

    #[test]
    fn test_matches_ignores_case() {
        let code = CouponCode::parse("WELCOME10").unwrap();
        assert!(code.matches("welcome10"));
        assert!(code.matches(" Welcome10 "));
        assert!(!code.matches("WELCOME1"));
    }

    #[test]
    fn test_deserialize_normalizes() {
        let code: CouponCode = serde_json::from_str("\" welcome10\"").unwrap();
        assert_eq!(code.as_str(), "WELCOME10");
        assert!(serde_json::from_str::<CouponCode>("\"  \"").is_err());
    }
}
