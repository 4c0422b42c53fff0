//! Cover image sizes.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Size of a cover image served by the covers service.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum CoverSize {
    Small,
    Medium,
    #[default]
    Large,
}

impl CoverSize {
    /// Parses `s`/`m`/`l` or `small`/`medium`/`large`, ignoring case.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidIdentifier`] for any other input.
    pub fn parse(raw: &str) -> Result<Self, ValidationError> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "s" | "small" => Ok(Self::Small),
            "m" | "medium" => Ok(Self::Medium),
            "l" | "large" => Ok(Self::Large),
            _ => Err(ValidationError::invalid_identifier(
                "cover size",
                raw,
                "unknown size",
                "Use S, M or L",
            )),
        }
    }

    /// Canonical single-letter form used in cover paths.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Small => "S",
            Self::Medium => "M",
            Self::Large => "L",
        }
    }
}

impl FromStr for CoverSize {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for CoverSize {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<CoverSize> for String {
    fn from(size: CoverSize) -> Self {
        size.as_str().to_string()
    }
}

impl fmt::Display for CoverSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_letter_and_word_forms_agree() {
        for raw in ["l", "L", "Large", "LARGE", " large "] {
            assert_eq!(CoverSize::parse(raw).unwrap(), CoverSize::Large, "{raw}");
        }
        for raw in ["s", "S", "Small"] {
            assert_eq!(CoverSize::parse(raw).unwrap(), CoverSize::Small, "{raw}");
        }
        for raw in ["m", "M", "Medium"] {
            assert_eq!(CoverSize::parse(raw).unwrap(), CoverSize::Medium, "{raw}");
        }
    }

    #[test]
    fn test_rejects_other_sizes() {
        assert!(CoverSize::parse("XL").is_err());
        assert!(CoverSize::parse("batman").is_err());
        assert!(CoverSize::parse("").is_err());
    }

    #[test]
    fn test_canonical_letters() {
        assert_eq!(CoverSize::Small.to_string(), "S");
        assert_eq!(CoverSize::Medium.to_string(), "M");
        assert_eq!(CoverSize::Large.to_string(), "L");
        assert_eq!(CoverSize::default(), CoverSize::Large);
    }
}
