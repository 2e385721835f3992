// File: ./src/model/parser.rs
// Field validators shared by every front-end and by the loader
use crate::error::ValidationError;
use chrono::NaiveDate;

pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Raw welcome-points input: either a number already typed as one (JSON
/// integer, numeric form field) or text a user typed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RawPoints<'a> {
    Integer(i128),
    Text(&'a str),
}

impl From<i32> for RawPoints<'_> {
    fn from(value: i32) -> Self {
        RawPoints::Integer(value.into())
    }
}

impl From<i64> for RawPoints<'_> {
    fn from(value: i64) -> Self {
        RawPoints::Integer(value.into())
    }
}

impl From<u32> for RawPoints<'_> {
    fn from(value: u32) -> Self {
        RawPoints::Integer(value.into())
    }
}

impl From<u64> for RawPoints<'_> {
    fn from(value: u64) -> Self {
        RawPoints::Integer(value.into())
    }
}

impl<'a> From<&'a str> for RawPoints<'a> {
    fn from(value: &'a str) -> Self {
        RawPoints::Text(value)
    }
}

impl<'a> From<&'a String> for RawPoints<'a> {
    fn from(value: &'a String) -> Self {
        RawPoints::Text(value.as_str())
    }
}

pub fn validate_name(raw: &str) -> Result<String, ValidationError> {
    let name = raw.trim();
    if name.is_empty() {
        return Err(ValidationError::EmptyName);
    }
    Ok(name.to_string())
}

pub fn validate_points<'a>(raw: impl Into<RawPoints<'a>>) -> Result<u64, ValidationError> {
    let value = match raw.into() {
        RawPoints::Integer(n) => n,
        RawPoints::Text(s) => s
            .trim()
            .parse::<i128>()
            .map_err(|_| ValidationError::NotPositiveInteger)?,
    };
    if value <= 0 {
        return Err(ValidationError::NotPositiveInteger);
    }
    u64::try_from(value).map_err(|_| ValidationError::NotPositiveInteger)
}

/// Accepts exactly `YYYY-MM-DD` naming a real calendar day.
///
/// chrono alone is lenient about field widths (`2025-1-5` parses), so the
/// shape is checked byte by byte before handing over.
pub fn validate_date(raw: &str) -> Result<NaiveDate, ValidationError> {
    let s = raw.trim();
    let shaped = s.len() == 10
        && s.bytes().enumerate().all(|(i, b)| match i {
            4 | 7 => b == b'-',
            _ => b.is_ascii_digit(),
        });
    if !shaped {
        return Err(ValidationError::BadDateFormat);
    }
    NaiveDate::parse_from_str(s, DATE_FORMAT).map_err(|_| ValidationError::BadDateFormat)
}
