//! Library of Congress Control Numbers.
//!
//! Two numbering schemes exist. Numbers assigned through 2000 carry a
//! 2-digit year and may end in a supplement suffix; numbers from 2001 on carry
//! a 4-digit year. Both have a 6-digit serial and an optional alphabetic
//! prefix. Digit counts (8 vs 10) keep the two schemes apart.

use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use super::strip_separators;
use crate::error::ValidationError;

const KIND: &str = "LCCN";
const SUGGESTION: &str =
    "Use a 2-digit-year number like 75061201 or a 4-digit-year number like 2003045631";

/// First year that uses the 4-digit-year scheme.
const FIRST_FOUR_DIGIT_YEAR: u32 = 2001;

/// 2-digit year, 6-digit serial, optional supplement suffix.
#[allow(clippy::expect_used)]
static PRE_2001_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(?:n[bro]?)?(?:s[hjp])?[0-9]{2}[0-9]{6}(?:ak|am|acn|f|he|m|map|mn|mp|ne|pp|r)?$",
    )
    .expect("pre-2001 LCCN regex is valid") // Static pattern, safe to panic
});

/// 4-digit year, 6-digit serial.
#[allow(clippy::expect_used)]
static POST_2000_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:n[bro]?)?(?:s[hjp])?([0-9]{4})[0-9]{6}$")
        .expect("post-2000 LCCN regex is valid") // Static pattern, safe to panic
});

/// Numbering scheme an [`Lccn`] belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LccnEra {
    /// 2-digit year, assigned through 2000
    Pre2001,
    /// 4-digit year, assigned from 2001
    Post2000,
}

/// A Library of Congress Control Number, normalized to lowercase without separators.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Lccn {
    value: String,
    era: LccnEra,
}

impl Lccn {
    /// Parses and normalizes an LCCN.
    ///
    /// Any 2-digit year is read as the pre-2001 scheme; a 4-digit year must be
    /// 2001 or later.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidIdentifier`] if neither scheme matches.
    pub fn parse(raw: &str) -> Result<Self, ValidationError> {
        let value = strip_separators(raw).to_ascii_lowercase();

        if PRE_2001_PATTERN.is_match(&value) {
            return Ok(Self {
                value,
                era: LccnEra::Pre2001,
            });
        }

        let year = POST_2000_PATTERN
            .captures(&value)
            .and_then(|caps| caps.get(1))
            .and_then(|year| year.as_str().parse::<u32>().ok());
        match year {
            Some(year) if year >= FIRST_FOUR_DIGIT_YEAR => Ok(Self {
                value,
                era: LccnEra::Post2000,
            }),
            Some(year) => Err(ValidationError::invalid_identifier(
                KIND,
                raw,
                format!("4-digit year {year} predates the 2001 numbering scheme"),
                SUGGESTION,
            )),
            None => Err(ValidationError::invalid_identifier(
                KIND,
                raw,
                "does not match either LCCN numbering scheme",
                SUGGESTION,
            )),
        }
    }

    /// Returns true if `raw` parses as an LCCN.
    #[must_use]
    pub fn is_lccn(raw: &str) -> bool {
        Self::parse(raw).is_ok()
    }

    /// Canonical lowercase text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.value
    }

    #[must_use]
    pub fn era(&self) -> LccnEra {
        self.era
    }

    #[must_use]
    pub fn is_pre_2000(&self) -> bool {
        self.era == LccnEra::Pre2001
    }

    #[must_use]
    pub fn is_post_2000(&self) -> bool {
        self.era == LccnEra::Post2000
    }
}

impl FromStr for Lccn {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Lccn {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Lccn> for String {
    fn from(lccn: Lccn) -> Self {
        lccn.value
    }
}

impl fmt::Display for Lccn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.value)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    // ==================== Pre-2001 Fixtures ====================

    #[test]
    fn test_pre_2001_plain() {
        let lccn = Lccn::parse("75061201").unwrap();
        assert_eq!(lccn.era(), LccnEra::Pre2001);
        assert!(lccn.is_pre_2000());
        assert!(!lccn.is_post_2000());
    }

    #[test]
    fn test_pre_2001_year_00_is_still_pre_2001() {
        assert!(Lccn::parse("00123456").unwrap().is_pre_2000());
    }

    #[test]
    fn test_pre_2001_with_prefix_and_suffix() {
        let lccn = Lccn::parse("n 79-021164 map").unwrap();
        assert_eq!(lccn.as_str(), "n79021164map");
        assert!(lccn.is_pre_2000());
    }

    #[test]
    fn test_pre_2001_uppercase_normalized() {
        let lccn = Lccn::parse("SH85-026371").unwrap();
        assert_eq!(lccn.as_str(), "sh85026371");
        assert!(lccn.is_pre_2000());
    }

    // ==================== Post-2000 Fixtures ====================

    #[test]
    fn test_post_2000_plain() {
        let lccn = Lccn::parse("2003045631").unwrap();
        assert_eq!(lccn.era(), LccnEra::Post2000);
        assert!(lccn.is_post_2000());
        assert!(!lccn.is_pre_2000());
    }

    #[test]
    fn test_post_2000_with_prefix_and_hyphen() {
        let lccn = Lccn::parse("nb2012-345678").unwrap();
        assert_eq!(lccn.as_str(), "nb2012345678");
        assert!(lccn.is_post_2000());
    }

    #[test]
    fn test_post_2000_rejects_suffix() {
        assert!(Lccn::parse("2003045631map").is_err());
    }

    #[test]
    fn test_four_digit_year_before_2001_rejected() {
        let err = Lccn::parse("1999045631").unwrap_err();
        assert!(err.to_string().contains("1999"));
    }

    // ==================== Rejection Tests ====================

    #[test]
    fn test_wrong_digit_count_rejected() {
        assert!(Lccn::parse("1234567").is_err());
        assert!(Lccn::parse("123456789").is_err());
    }

    #[test]
    fn test_unknown_prefix_rejected() {
        assert!(Lccn::parse("zz75061201").is_err());
    }

    #[test]
    fn test_parse_is_idempotent() {
        let first = Lccn::parse("SH 85-026371").unwrap();
        assert_eq!(Lccn::parse(first.as_str()).unwrap(), first);
    }

    #[test]
    fn test_non_ascii_digits_rejected() {
        assert!(Lccn::parse("٧٥٠٦١٢٠١").is_err());
        assert!(Lccn::parse("٢٠٠٣٠٤٥٦٣١").is_err());
    }
}
