//! Number and date formats found on Polish regulator pages.

use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::error::ValidationError;

/// Parse a decimal written the Polish way: `1 234,56`, `1.234,56`, or plain `1234.56`.
///
/// Spaces (including non-breaking ones) group thousands. When a comma is present,
/// it is the decimal separator and dots group thousands.
pub fn parse_decimal(value: &str) -> Result<Decimal, ValidationError> {
    let compact: String = value
        .chars()
        .filter(|ch| !ch.is_whitespace())
        .collect();
    if compact.is_empty() {
        return Err(ValidationError::InvalidDecimal(value.to_string()));
    }
    let normalized =
        if compact.contains(',') { compact.replace('.', "").replace(',', ".") } else { compact };
    Decimal::from_str(&normalized).map_err(|_| ValidationError::InvalidDecimal(value.to_string()))
}

/// Same as [`parse_decimal`], for the fields that the domain keeps as binary floats.
pub fn parse_float(value: &str) -> Result<f64, ValidationError> {
    let decimal = parse_decimal(value)?;
    f64::from_str(&decimal.to_string())
        .map_err(|_| ValidationError::InvalidDecimal(value.to_string()))
}

/// ISO `2024-01-31` or the local `31.01.2024`.
pub fn parse_date(value: &str) -> Result<NaiveDate, ValidationError> {
    let value = value.trim();
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(value, "%d.%m.%Y"))
        .map_err(|_| ValidationError::InvalidDate(value.to_string()))
}
