//! Dewey decimal classification numbers.

use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

const KIND: &str = "Dewey decimal number";
const SUGGESTION: &str = "Use three digits with an optional fraction, e.g. 523.1";

#[allow(clippy::expect_used)]
static DEWEY_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[0-9]{3}(\.[0-9]{1,10})?$").expect("Dewey regex is valid") // Static pattern, safe to panic
});

/// A positive Dewey decimal number such as `523.1`.
///
/// The canonical text drops trailing zeros of the fraction (`523.10` becomes
/// `523.1`, `523.0` becomes `523`), so equality follows the numeric value.
#[derive(Debug, Clone, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DeweyDecimal {
    text: String,
    value: f64,
}

impl DeweyDecimal {
    /// Parses a Dewey number from text.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidIdentifier`] if the text does not match
    /// `[0-9]{3}(\.[0-9]{1,10})?` or the number is not positive.
    pub fn parse(raw: &str) -> Result<Self, ValidationError> {
        let trimmed = raw.trim();
        if !DEWEY_PATTERN.is_match(trimmed) {
            return Err(ValidationError::invalid_identifier(
                KIND,
                raw,
                "expected three digits with an optional fraction of up to ten digits",
                SUGGESTION,
            ));
        }

        let text = canonical_text(trimmed);
        let value = text
            .parse::<f64>()
            .ok()
            .filter(|v| *v > 0.0)
            .ok_or_else(|| {
                ValidationError::invalid_identifier(KIND, raw, "must be positive", SUGGESTION)
            })?;
        Ok(Self { text, value })
    }

    /// Builds a Dewey number from its numeric value.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidIdentifier`] if the value is not
    /// positive or its decimal form does not have a three-digit class.
    pub fn from_f64(value: f64) -> Result<Self, ValidationError> {
        if !value.is_finite() {
            return Err(ValidationError::invalid_identifier(
                KIND,
                &value.to_string(),
                "must be a finite number",
                SUGGESTION,
            ));
        }
        Self::parse(&value.to_string())
    }

    /// Canonical text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.text
    }

    #[must_use]
    pub fn value(&self) -> f64 {
        self.value
    }

    /// The three-digit main class (`523` for `523.1`).
    #[must_use]
    pub fn main_class(&self) -> &str {
        &self.text[..3]
    }
}

fn canonical_text(trimmed: &str) -> String {
    match trimmed.split_once('.') {
        Some((class, fraction)) => {
            let fraction = fraction.trim_end_matches('0');
            if fraction.is_empty() {
                class.to_string()
            } else {
                format!("{class}.{fraction}")
            }
        }
        None => trimmed.to_string(),
    }
}

impl FromStr for DeweyDecimal {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<f64> for DeweyDecimal {
    type Error = ValidationError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::from_f64(value)
    }
}

impl TryFrom<String> for DeweyDecimal {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<DeweyDecimal> for String {
    fn from(dewey: DeweyDecimal) -> Self {
        dewey.text
    }
}

impl fmt::Display for DeweyDecimal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}
