//! Plate number validation and normalization.

use std::fmt;

use thiserror::Error;

/// Shortest accepted raw plate, in characters.
pub const MIN_PLATE_LEN: usize = 7;

/// Longest accepted raw plate, in characters.
pub const MAX_PLATE_LEN: usize = 8;

/// Fixed caller-facing message for any rejected plate.
pub const INVALID_PLATE_MESSAGE: &str = "invalid plate number: expected 7 or 8 characters";

/// Why a raw plate was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlateError {
    #[error("plate number is missing")]
    Missing,

    #[error("plate number has {0} characters, expected 7 or 8")]
    Length(usize),

    #[error("plate number contains no digits")]
    NoDigits,
}

/// A validated plate reduced to its ASCII digits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlateQuery(String);

impl PlateQuery {
    /// Validate the raw path value and strip everything but ASCII digits.
    ///
    /// Length is checked on the raw input, before normalization, so
    /// `"12-345-67"` (nine characters) is rejected even though it holds
    /// seven digits.
    pub fn parse(raw: Option<&str>) -> Result<Self, PlateError> {
        let raw = raw.ok_or(PlateError::Missing)?;

        let len = raw.chars().count();
        if len == 0 {
            return Err(PlateError::Missing);
        }
        if !(MIN_PLATE_LEN..=MAX_PLATE_LEN).contains(&len) {
            return Err(PlateError::Length(len));
        }

        let digits: String = raw.chars().filter(char::is_ascii_digit).collect();
        if digits.is_empty() {
            return Err(PlateError::NoDigits);
        }

        Ok(Self(digits))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PlateQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
