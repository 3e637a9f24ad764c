//! # Registry Types
//!
//! Validated value types shared across the patient registry crates.
//!
//! Values are checked once, at construction, so that downstream code can rely on the
//! invariant without re-validating:
//! - [`NonEmptyText`] for required free-text fields (name, phone)
//! - [`Age`] for patient ages, accepted as an integer or a decimal string

use std::fmt;

/// Errors that can occur when creating validated text types.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum TextError {
    /// The input text was empty or contained only whitespace
    #[error("Text cannot be empty")]
    Empty,
}

/// A string type that guarantees non-empty content.
///
/// This type wraps a `String` and ensures it contains at least one non-whitespace character.
/// The input is automatically trimmed of leading and trailing whitespace during construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NonEmptyText(String);

impl NonEmptyText {
    /// Creates a new `NonEmptyText` from the given input.
    ///
    /// The input is trimmed of leading and trailing whitespace. If the trimmed
    /// result is empty, an error is returned.
    pub fn new(input: impl AsRef<str>) -> Result<Self, TextError> {
        let trimmed = input.as_ref().trim();
        if trimmed.is_empty() {
            return Err(TextError::Empty);
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Returns the inner string as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NonEmptyText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for NonEmptyText {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl serde::Serialize for NonEmptyText {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> serde::Deserialize<'de> for NonEmptyText {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        NonEmptyText::new(&s).map_err(serde::de::Error::custom)
    }
}

/// Errors that can occur when parsing an [`Age`].
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum AgeError {
    #[error("age cannot be empty")]
    Empty,
    #[error("age must be a whole number, got {0:?}")]
    NotANumber(String),
    #[error("age must be between 0 and {max}, got {value}", max = Age::MAX)]
    OutOfRange { value: i64 },
}

/// A patient age in whole years.
///
/// Always stored and serialised as an integer. Parsing accepts either an integer or a
/// decimal string, because both forms appear in form posts and in older data files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Age(u32);

impl Age {
    /// Largest accepted age.
    pub const MAX: u32 = 150;

    /// Creates an `Age` from an integer, rejecting negative or implausible values.
    pub fn new(value: i64) -> Result<Self, AgeError> {
        if value < 0 || value > i64::from(Self::MAX) {
            return Err(AgeError::OutOfRange { value });
        }
        // Range checked above, so the conversion cannot truncate.
        Ok(Self(value as u32))
    }

    /// Parses an age from text such as `"30"` or `" 30 "`.
    pub fn parse(input: &str) -> Result<Self, AgeError> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(AgeError::Empty);
        }
        let value: i64 = trimmed
            .parse()
            .map_err(|_| AgeError::NotANumber(trimmed.to_owned()))?;
        Self::new(value)
    }

    pub fn value(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for Age {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for Age {
    type Err = AgeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl serde::Serialize for Age {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_u32(self.0)
    }
}

impl<'de> serde::Deserialize<'de> for Age {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(serde::Deserialize)]
        #[serde(untagged)]
        enum RawAge {
            Number(i64),
            Text(String),
        }

        match RawAge::deserialize(deserializer)? {
            RawAge::Number(n) => Age::new(n),
            RawAge::Text(s) => Age::parse(&s),
        }
        .map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn non_empty_text_trims_input() {
        let text = NonEmptyText::new("  Ana  ").unwrap();
        assert_eq!(text.as_str(), "Ana");
    }

    #[test]
    fn non_empty_text_rejects_whitespace() {
        assert_eq!(NonEmptyText::new(" \t "), Err(TextError::Empty));
    }

    #[test]
    fn age_parses_padded_digits() {
        assert_eq!(Age::parse(" 42 ").unwrap().value(), 42);
    }

    #[test]
    fn age_rejects_bad_input() {
        assert_eq!(Age::parse(""), Err(AgeError::Empty));
        assert!(matches!(Age::parse("forty"), Err(AgeError::NotANumber(_))));
        assert_eq!(Age::parse("-1"), Err(AgeError::OutOfRange { value: -1 }));
        assert_eq!(Age::new(151), Err(AgeError::OutOfRange { value: 151 }));
    }

    #[test]
    fn age_deserialises_from_number_or_string() {
        let from_number: Age = serde_json::from_str("30").unwrap();
        let from_text: Age = serde_json::from_str("\"30\"").unwrap();
        assert_eq!(from_number, from_text);
        assert_eq!(serde_json::to_string(&from_text).unwrap(), "30");
    }

    #[test]
    fn age_deserialise_rejects_garbage() {
        assert!(serde_json::from_str::<Age>("\"abc\"").is_err());
        assert!(serde_json::from_str::<Age>("true").is_err());
    }
}
