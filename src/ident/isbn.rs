//! ISBN validation and ISBN-10 to ISBN-13 conversion.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::strip_separators;
use crate::error::ValidationError;

const KIND: &str = "ISBN";
const SUGGESTION: &str = "Use a 10-digit or 13-digit ISBN such as 0306406152 or 9780306406157";

/// An ISBN stored in its 13-digit form.
///
/// ISBN-10 input is checksum-validated, then converted by prefixing `978` and
/// recomputing the check digit. The stored value is always 13 ASCII digits
/// with a valid checksum.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Isbn13 {
    digits: String,
}

impl Isbn13 {
    /// Parses an ISBN-10 or ISBN-13.
    ///
    /// Whitespace, hyphens and a leading `ISBN`/`ISBN:` label are ignored; a
    /// lowercase `x` check digit is accepted for ISBN-10.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidIdentifier`] if the input has the
    /// wrong length or characters, or its checksum does not validate.
    pub fn parse(raw: &str) -> Result<Self, ValidationError> {
        let cleaned = strip_separators(strip_label(raw.trim())).to_ascii_uppercase();
        if !cleaned.is_ascii() {
            return Err(ValidationError::invalid_identifier(
                KIND,
                raw,
                "only ASCII digits and X are allowed",
                SUGGESTION,
            ));
        }
        match cleaned.len() {
            10 => convert_isbn10(raw, &cleaned),
            13 => validate_isbn13(raw, &cleaned),
            n => Err(ValidationError::invalid_identifier(
                KIND,
                raw,
                format!("expected 10 or 13 characters, found {n}"),
                SUGGESTION,
            )),
        }
    }

    /// The 13 digits.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.digits
    }
}

fn strip_label(input: &str) -> &str {
    match input.get(..4) {
        Some(label) if label.eq_ignore_ascii_case("isbn") => {
            let rest = input[4..].trim_start();
            rest.strip_prefix(':').unwrap_or(rest)
        }
        _ => input,
    }
}

fn digit_values(raw: &str, digits: &str) -> Result<Vec<u32>, ValidationError> {
    digits
        .chars()
        .map(|c| {
            c.to_digit(10).ok_or_else(|| {
                ValidationError::invalid_identifier(
                    KIND,
                    raw,
                    format!("unexpected character '{c}'"),
                    SUGGESTION,
                )
            })
        })
        .collect()
}

/// Check digit for the first 12 digits of an ISBN-13 (weights 1,3,1,3,...).
fn isbn13_check_digit(first_twelve: &[u32]) -> u32 {
    let sum: u32 = first_twelve
        .iter()
        .enumerate()
        .map(|(i, d)| if i % 2 == 0 { *d } else { d * 3 })
        .sum();
    (10 - sum % 10) % 10
}

fn convert_isbn10(raw: &str, cleaned: &str) -> Result<Isbn13, ValidationError> {
    let (body, check) = cleaned.split_at(9);
    let body_digits = digit_values(raw, body)?;
    let check_value = match check {
        "X" => 10,
        other => digit_values(raw, other)?[0],
    };

    // Weighted 10..1 sum including the check digit must be divisible by 11.
    let weighted: u32 = body_digits
        .iter()
        .zip((2..=10).rev())
        .map(|(d, w)| d * w)
        .sum::<u32>()
        + check_value;
    if weighted % 11 != 0 {
        return Err(ValidationError::invalid_identifier(
            KIND,
            raw,
            "ISBN-10 checksum does not validate",
            SUGGESTION,
        ));
    }

    let mut digits: Vec<u32> = vec![9, 7, 8];
    digits.extend(body_digits);
    let check13 = isbn13_check_digit(&digits);
    digits.push(check13);
    Ok(Isbn13 {
        digits: digits.iter().map(u32::to_string).collect(),
    })
}

fn validate_isbn13(raw: &str, cleaned: &str) -> Result<Isbn13, ValidationError> {
    let digits = digit_values(raw, cleaned)?;
    if isbn13_check_digit(&digits[..12]) != digits[12] {
        return Err(ValidationError::invalid_identifier(
            KIND,
            raw,
            "ISBN-13 checksum does not validate",
            SUGGESTION,
        ));
    }
    Ok(Isbn13 {
        digits: cleaned.to_string(),
    })
}

impl FromStr for Isbn13 {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<&str> for Isbn13 {
    type Error = ValidationError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl TryFrom<String> for Isbn13 {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Isbn13> for String {
    fn from(isbn: Isbn13) -> Self {
        isbn.digits
    }
}

impl fmt::Display for Isbn13 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.digits)
    }
}
